// Copyright 2025 The Ratemap Authors
// SPDX-License-Identifier: Apache-2.0

//! Input tables: the behavioral position trace and the spike-event log.
//!
//! Key semantics:
//! - `time` (integer milliseconds) is the join key between the two tables.
//! - Position times must be ordered; the strict constructor also rejects
//!   duplicates so the spike join is one-to-one. The tolerant constructor
//!   admits duplicate timestamps, and joins then fan out across every
//!   matching row (a documented degenerate multiplicity, not an error).
//! - Joining is an exact indexed lookup, never interpolation.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a recorded neuron (unit label from spike sorting).
///
/// Stored as an opaque string; integer labels arrive as their decimal
/// rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NeuronId(String);

impl NeuronId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NeuronId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NeuronId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One row of the behavioral trace: where the subject was at one time tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    /// Milliseconds since recording start
    pub time: u64,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// One spike event, tagged with the neuron that fired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpikeEvent {
    /// Milliseconds since recording start
    pub time: u64,
    pub neuron: NeuronId,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TableError {
    #[error("position samples must be ordered by time: sample {index} has time {time} after {previous}")]
    OutOfOrderTime {
        index: usize,
        time: u64,
        previous: u64,
    },

    #[error("duplicate position timestamp {time} at sample {index}")]
    DuplicateTime { index: usize, time: u64 },
}

/// Time-indexed table of 3D position samples.
///
/// Construction builds a time -> row lookup once; spike joins probe it per
/// event instead of scanning. The table is immutable afterwards.
#[derive(Debug, Clone)]
pub struct PositionTable {
    samples: Vec<PositionSample>,
    by_time: AHashMap<u64, Vec<usize>>,
}

impl PositionTable {
    /// Build a table, enforcing strictly increasing timestamps.
    ///
    /// This is the default entry point: duplicate times in the position
    /// trace are a data error caught at load time.
    pub fn new(samples: Vec<PositionSample>) -> Result<Self, TableError> {
        Self::build(samples, false)
    }

    /// Build a table that admits duplicate timestamps.
    ///
    /// Times must still be non-decreasing. A spike matching a duplicated
    /// time joins against every matching row.
    pub fn new_tolerating_duplicates(samples: Vec<PositionSample>) -> Result<Self, TableError> {
        Self::build(samples, true)
    }

    fn build(samples: Vec<PositionSample>, allow_duplicates: bool) -> Result<Self, TableError> {
        let mut by_time: AHashMap<u64, Vec<usize>> = AHashMap::with_capacity(samples.len());
        let mut previous: Option<u64> = None;

        for (index, sample) in samples.iter().enumerate() {
            if let Some(previous) = previous {
                if sample.time < previous {
                    return Err(TableError::OutOfOrderTime {
                        index,
                        time: sample.time,
                        previous,
                    });
                }
                if sample.time == previous && !allow_duplicates {
                    return Err(TableError::DuplicateTime {
                        index,
                        time: sample.time,
                    });
                }
            }
            previous = Some(sample.time);
            by_time.entry(sample.time).or_default().push(index);
        }

        Ok(Self { samples, by_time })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[PositionSample] {
        &self.samples
    }

    /// Position rows recorded at exactly `time`.
    ///
    /// Empty when the time is absent (an unjoinable spike); more than one
    /// row only under the duplicate-tolerant constructor.
    pub fn rows_at(&self, time: u64) -> impl Iterator<Item = &PositionSample> {
        self.by_time
            .get(&time)
            .into_iter()
            .flatten()
            .map(|&index| &self.samples[index])
    }

    pub fn has_time(&self, time: u64) -> bool {
        self.by_time.contains_key(&time)
    }
}

/// Spike-event log covering every recorded neuron
#[derive(Debug, Clone, Default)]
pub struct SpikeTable {
    events: Vec<SpikeEvent>,
}

impl SpikeTable {
    pub fn new(events: Vec<SpikeEvent>) -> Self {
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[SpikeEvent] {
        &self.events
    }

    /// Spikes belonging to one neuron, in log order.
    ///
    /// An identifier not present in the log simply yields nothing.
    pub fn iter_neuron<'a>(
        &'a self,
        neuron: &'a NeuronId,
    ) -> impl Iterator<Item = &'a SpikeEvent> {
        self.events.iter().filter(move |event| &event.neuron == neuron)
    }

    /// Sorted, deduplicated neuron identifiers present in the log
    pub fn neuron_ids(&self) -> Vec<NeuronId> {
        let mut ids: Vec<NeuronId> = self.events.iter().map(|e| e.neuron.clone()).collect();
        ids.sort();
        ids.dedup();
        ids
    }
}
