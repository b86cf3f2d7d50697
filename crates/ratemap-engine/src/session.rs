// Copyright 2025 The Ratemap Authors
// SPDX-License-Identifier: Apache-2.0

//! Per-dataset session context and the uncached pure-function boundary.

use crate::grid::VoxelGrid;
use crate::occupancy::OccupancyMap;
use crate::rate_map::FiringRateMap;
use crate::spike_binning::SpikeCountMap;
use crate::tables::{NeuronId, PositionTable, SpikeTable};

/// Immutable context for one loaded dataset: the voxel grid, the position
/// table, and the occupancy map built once from it.
///
/// The occupancy map is neuron-independent, so switching neurons only pays
/// for the spike join and normalization. Nothing is mutated after
/// construction; a session can be shared read-only across threads computing
/// maps for different neurons, with no locking.
#[derive(Debug, Clone)]
pub struct RecordingSession {
    grid: VoxelGrid,
    positions: PositionTable,
    occupancy: OccupancyMap,
}

impl RecordingSession {
    /// Bind a grid to a position table and precompute the occupancy map.
    pub fn new(grid: VoxelGrid, positions: PositionTable) -> Self {
        let occupancy = OccupancyMap::build(&grid, &positions);
        Self {
            grid,
            positions,
            occupancy,
        }
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn positions(&self) -> &PositionTable {
        &self.positions
    }

    /// The cached, neuron-independent occupancy map
    pub fn occupancy(&self) -> &OccupancyMap {
        &self.occupancy
    }

    /// Compute the normalized firing-rate map for one neuron.
    ///
    /// An identifier absent from the spike table is a valid selection and
    /// yields the all-zero map. The result is not cached; callers hand it
    /// to the rendering boundary and drop it.
    pub fn firing_rate_map(&self, spikes: &SpikeTable, neuron: &NeuronId) -> FiringRateMap {
        let spike_counts = SpikeCountMap::build(&self.grid, &self.positions, spikes, neuron);
        FiringRateMap::normalized(self.occupancy.counts(), spike_counts.counts())
    }
}

/// One-shot boundary: `(grid, positions, spikes, neuron) -> FiringRateMap`.
///
/// Recomputes the occupancy map on every call; correctness is identical to
/// going through [`RecordingSession`], only the work is repeated.
pub fn firing_rate_map(
    grid: &VoxelGrid,
    positions: &PositionTable,
    spikes: &SpikeTable,
    neuron: &NeuronId,
) -> FiringRateMap {
    let occupancy = OccupancyMap::build(grid, positions);
    let spike_counts = SpikeCountMap::build(grid, positions, spikes, neuron);
    FiringRateMap::normalized(occupancy.counts(), spike_counts.counts())
}
