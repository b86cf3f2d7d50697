// Copyright 2025 The Ratemap Authors
// SPDX-License-Identifier: Apache-2.0

//! Occupancy normalization: spike counts -> firing rates -> [0, 1] scale.

use ndarray::parallel::prelude::*;
use ndarray::{Array3, Zip};

use crate::occupancy::OccupancyMap;
use crate::spike_binning::SpikeCountMap;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RateMapError {
    #[error("occupancy shape {occupancy:?} does not match spike-count shape {spikes:?}")]
    ShapeMismatch {
        occupancy: (usize, usize, usize),
        spikes: (usize, usize, usize),
    },
}

/// Occupancy-normalized firing-rate map over the full voxel lattice.
///
/// Key semantics:
/// - Per voxel, `rate = spike_count / occupancy` when occupancy > 0, else 0.
///   "Never visited" and "visited but silent" deliberately collapse to 0.
/// - The whole map is then rescaled by its global maximum into [0, 1], so
///   the most active voxel is exactly 1.0.
/// - A zero maximum (no occupancy anywhere, or no spikes) short-circuits to
///   the all-zero map; no division artifact can reach the output.
#[derive(Debug, Clone, PartialEq)]
pub struct FiringRateMap {
    values: Array3<f32>,
    peak_rate: f32,
}

impl FiringRateMap {
    /// Combine an occupancy map and a spike-count map over the same lattice.
    ///
    /// # Errors
    ///
    /// Returns `RateMapError::ShapeMismatch` when the two maps were built
    /// from different grids.
    pub fn normalize(
        occupancy: &OccupancyMap,
        spike_counts: &SpikeCountMap,
    ) -> Result<Self, RateMapError> {
        if occupancy.dims() != spike_counts.dims() {
            return Err(RateMapError::ShapeMismatch {
                occupancy: occupancy.dims(),
                spikes: spike_counts.dims(),
            });
        }
        Ok(Self::normalized(occupancy.counts(), spike_counts.counts()))
    }

    /// Same-lattice normalization; callers guarantee matching shapes.
    pub(crate) fn normalized(occupancy: &Array3<u32>, spike_counts: &Array3<u32>) -> Self {
        let mut values = Array3::<f32>::zeros(occupancy.dim());

        Zip::from(&mut values)
            .and(occupancy)
            .and(spike_counts)
            .for_each(|value, &occupied, &spiked| {
                if occupied > 0 {
                    *value = spiked as f32 / occupied as f32;
                }
            });

        let peak_rate = values.fold(0.0f32, |peak, &value| peak.max(value));
        if peak_rate > 0.0 {
            Zip::from(&mut values).par_for_each(|value| *value /= peak_rate);
        }

        Self { values, peak_rate }
    }

    /// Normalized values in [0, 1] over the full lattice
    pub fn values(&self) -> &Array3<f32> {
        &self.values
    }

    pub fn dims(&self) -> (usize, usize, usize) {
        self.values.dim()
    }

    /// Raw peak rate (spikes per occupancy tick) before rescaling; 0 for an
    /// all-zero map
    pub fn peak_rate(&self) -> f32 {
        self.peak_rate
    }
}
