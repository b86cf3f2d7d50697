// Copyright 2025 The Ratemap Authors
// SPDX-License-Identifier: Apache-2.0

//! Spike-to-position join and per-voxel spike counting.

use ndarray::Array3;
use tracing::debug;

use crate::grid::VoxelGrid;
use crate::tables::{NeuronId, PositionTable, SpikeTable};

/// Dense per-voxel spike counts for a single neuron.
///
/// Key semantics:
/// - Spikes are filtered by neuron equality first; an unknown identifier
///   matches nothing and yields the all-zero map.
/// - Each spike is joined to position rows by exact `time` equality via the
///   table's index - no interpolation. A spike whose time is absent from
///   the position table is dropped (the subject's location is unknowable
///   for it) and counted for audit.
/// - Under a duplicate-tolerant position table, a spike matching a
///   duplicated timestamp fans out across every matching row.
#[derive(Debug, Clone, PartialEq)]
pub struct SpikeCountMap {
    counts: Array3<u32>,
    matched: u64,
    unjoinable: u64,
    out_of_bounds: u64,
}

impl SpikeCountMap {
    /// Filter, join, and bin the spikes of one neuron.
    pub fn build(
        grid: &VoxelGrid,
        positions: &PositionTable,
        spikes: &SpikeTable,
        neuron: &NeuronId,
    ) -> Self {
        let mut counts = Array3::<u32>::zeros(grid.dims());
        let mut matched = 0u64;
        let mut unjoinable = 0u64;
        let mut out_of_bounds = 0u64;

        for event in spikes.iter_neuron(neuron) {
            let mut joined_any = false;
            for row in positions.rows_at(event.time) {
                joined_any = true;
                match grid.bin(row.x, row.y, row.z) {
                    Some(voxel) => {
                        counts[voxel] += 1;
                        matched += 1;
                    }
                    None => out_of_bounds += 1,
                }
            }
            if !joined_any {
                unjoinable += 1;
            }
        }

        if unjoinable > 0 {
            debug!(
                %neuron,
                unjoinable,
                "spikes without a matching position sample were dropped"
            );
        }

        Self {
            counts,
            matched,
            unjoinable,
            out_of_bounds,
        }
    }

    /// Dense counts over the full lattice, zero-filled where nothing fired
    pub fn counts(&self) -> &Array3<u32> {
        &self.counts
    }

    pub fn dims(&self) -> (usize, usize, usize) {
        self.counts.dim()
    }

    /// Joined spike rows that landed in the lattice
    pub fn matched(&self) -> u64 {
        self.matched
    }

    /// Spikes whose time had no position sample (dropped, not errors)
    pub fn unjoinable(&self) -> u64 {
        self.unjoinable
    }

    /// Joined rows whose position fell outside the lattice
    pub fn out_of_bounds(&self) -> u64 {
        self.out_of_bounds
    }
}
