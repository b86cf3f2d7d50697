// Copyright 2025 The Ratemap Authors
// SPDX-License-Identifier: Apache-2.0

//! Occupancy map: how many position-sample ticks landed in each voxel.

use ndarray::Array3;
use tracing::debug;

use crate::grid::VoxelGrid;
use crate::tables::PositionTable;

/// Dense per-voxel count of position samples.
///
/// One count is one sample tick, so with uniform sampling the counts are a
/// proxy for time spent per voxel. The map is neuron-independent: it is
/// built once per position table and can be reused across neuron selections
/// (see `RecordingSession`), though recomputing it is equally correct.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyMap {
    counts: Array3<u32>,
    out_of_bounds: u64,
}

impl OccupancyMap {
    /// Bin every position sample into the lattice.
    ///
    /// Samples outside the covered domain are skipped and counted; real
    /// tracking data occasionally exceeds the nominal arena bounds.
    pub fn build(grid: &VoxelGrid, positions: &PositionTable) -> Self {
        let mut counts = Array3::<u32>::zeros(grid.dims());
        let mut out_of_bounds = 0u64;

        for sample in positions.samples() {
            match grid.bin(sample.x, sample.y, sample.z) {
                Some(voxel) => counts[voxel] += 1,
                None => out_of_bounds += 1,
            }
        }

        if out_of_bounds > 0 {
            debug!(
                out_of_bounds,
                total = positions.len(),
                "position samples outside the voxel lattice were skipped"
            );
        }

        Self {
            counts,
            out_of_bounds,
        }
    }

    /// Dense counts over the full lattice, zero-filled for unvisited voxels
    pub fn counts(&self) -> &Array3<u32> {
        &self.counts
    }

    pub fn dims(&self) -> (usize, usize, usize) {
        self.counts.dim()
    }

    /// Samples that fell outside the lattice and were not counted
    pub fn out_of_bounds(&self) -> u64 {
        self.out_of_bounds
    }

    /// Samples that were binned into the lattice
    pub fn total_binned(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::PositionSample;

    fn sample(time: u64, x: f32, y: f32, z: f32) -> PositionSample {
        PositionSample { time, x, y, z }
    }

    #[test]
    fn test_counts_cover_full_lattice() {
        let grid = VoxelGrid::new(20.0, 20.0, 20.0, 10.0).unwrap();
        let positions = PositionTable::new(vec![sample(0, 5.0, 5.0, 5.0)]).unwrap();
        let map = OccupancyMap::build(&grid, &positions);

        assert_eq!(map.dims(), (2, 2, 2));
        assert_eq!(map.counts()[(0, 0, 0)], 1);
        // Unvisited voxels are present and zero, not missing
        assert_eq!(map.counts()[(1, 1, 1)], 0);
    }

    #[test]
    fn test_reference_scenario_occupancy() {
        let grid = VoxelGrid::new(20.0, 20.0, 20.0, 10.0).unwrap();
        let positions = PositionTable::new(vec![
            sample(0, 5.0, 5.0, 5.0),
            sample(1, 5.0, 5.0, 5.0),
            sample(2, 15.0, 5.0, 5.0),
            sample(3, 5.0, 5.0, 5.0),
        ])
        .unwrap();
        let map = OccupancyMap::build(&grid, &positions);

        assert_eq!(map.counts()[(0, 0, 0)], 3);
        assert_eq!(map.counts()[(1, 0, 0)], 1);
        assert_eq!(map.total_binned(), 4);
        assert_eq!(map.out_of_bounds(), 0);
    }

    #[test]
    fn test_out_of_bounds_samples_skipped() {
        let grid = VoxelGrid::new(20.0, 20.0, 20.0, 10.0).unwrap();
        let positions = PositionTable::new(vec![
            sample(0, 5.0, 5.0, 5.0),
            sample(1, -3.0, 5.0, 5.0),
            sample(2, 5.0, 21.0, 5.0),
        ])
        .unwrap();
        let map = OccupancyMap::build(&grid, &positions);

        assert_eq!(map.total_binned(), 1);
        assert_eq!(map.out_of_bounds(), 2);
    }

    #[test]
    fn test_empty_table_yields_zero_map() {
        let grid = VoxelGrid::new(20.0, 20.0, 20.0, 10.0).unwrap();
        let positions = PositionTable::new(Vec::new()).unwrap();
        let map = OccupancyMap::build(&grid, &positions);

        assert_eq!(map.total_binned(), 0);
        assert!(map.counts().iter().all(|&c| c == 0));
    }
}
