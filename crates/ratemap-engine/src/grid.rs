// Copyright 2025 The Ratemap Authors
// SPDX-License-Identifier: Apache-2.0

//! Voxel lattice definition and coordinate binning.

const AXES: [char; 3] = ['x', 'y', 'z'];

/// 3D bin index (bx, by, bz) identifying one voxel in the lattice
pub type VoxelIndex = (usize, usize, usize);

#[derive(Debug, Clone, thiserror::Error)]
pub enum GridError {
    #[error("{axis} extent must be > 0, got {extent}")]
    NonPositiveExtent { axis: char, extent: f32 },

    #[error("voxel size must be > 0, got {0}")]
    NonPositiveVoxelSize(f32),

    #[error("{axis} extent {extent} is smaller than one voxel ({voxel_size}); the lattice would be empty")]
    ExtentSmallerThanVoxel {
        axis: char,
        extent: f32,
        voxel_size: f32,
    },
}

/// Immutable lattice of cubic voxels covering the recording arena.
///
/// Key semantics:
/// - Per axis, left-closed bin edges run `0, v, 2v, ...`, stopping strictly
///   before the axis extent; a trailing partial bin is dropped.
/// - Bin count per axis is `floor(extent / voxel_size)`, so the covered
///   domain per axis is `[0, bins * voxel_size)`.
/// - Shape depends only on configuration, never on recorded data.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    voxel_size: f32,
    dims: [usize; 3],
}

impl VoxelGrid {
    /// Create a grid from per-axis extents and a voxel edge length.
    ///
    /// All values are in the same spatial units as the position coordinates.
    pub fn new(
        x_extent: f32,
        y_extent: f32,
        z_extent: f32,
        voxel_size: f32,
    ) -> Result<Self, GridError> {
        if !(voxel_size > 0.0) {
            return Err(GridError::NonPositiveVoxelSize(voxel_size));
        }

        let extents = [x_extent, y_extent, z_extent];
        let mut dims = [0usize; 3];
        for (i, (&extent, &axis)) in extents.iter().zip(AXES.iter()).enumerate() {
            if !(extent > 0.0) {
                return Err(GridError::NonPositiveExtent { axis, extent });
            }
            let bins = (extent / voxel_size).floor() as usize;
            if bins == 0 {
                return Err(GridError::ExtentSmallerThanVoxel {
                    axis,
                    extent,
                    voxel_size,
                });
            }
            dims[i] = bins;
        }

        Ok(Self { voxel_size, dims })
    }

    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    /// Lattice shape as (bins_x, bins_y, bins_z)
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.dims[0], self.dims[1], self.dims[2])
    }

    /// Total number of voxels in the lattice
    pub fn voxel_count(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    /// Bin a continuous coordinate into its voxel index.
    ///
    /// Returns `None` for coordinates outside the covered domain on any axis
    /// (including non-finite values) - such samples are skipped by the map
    /// builders, never treated as errors.
    pub fn bin(&self, x: f32, y: f32, z: f32) -> Option<VoxelIndex> {
        let bx = self.bin_axis(0, x)?;
        let by = self.bin_axis(1, y)?;
        let bz = self.bin_axis(2, z)?;
        Some((bx, by, bz))
    }

    fn bin_axis(&self, axis: usize, value: f32) -> Option<usize> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let bin = (value / self.voxel_size).floor() as usize;
        (bin < self.dims[axis]).then_some(bin)
    }

    /// Left bin edges per axis, in lattice order `[x, y, z]`
    pub fn edges(&self) -> [Vec<f32>; 3] {
        self.axis_values(0.0)
    }

    /// Voxel center coordinates per axis, in lattice order `[x, y, z]`
    pub fn centers(&self) -> [Vec<f32>; 3] {
        self.axis_values(self.voxel_size / 2.0)
    }

    fn axis_values(&self, offset: f32) -> [Vec<f32>; 3] {
        let values = |bins: usize| {
            (0..bins)
                .map(|b| b as f32 * self.voxel_size + offset)
                .collect::<Vec<f32>>()
        };
        [values(self.dims[0]), values(self.dims[1]), values(self.dims[2])]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dims_depend_only_on_configuration() {
        let grid = VoxelGrid::new(360.0, 180.0, 70.0, 10.0).unwrap();
        assert_eq!(grid.dims(), (36, 18, 7));
        assert_eq!(grid.voxel_count(), 36 * 18 * 7);

        let again = VoxelGrid::new(360.0, 180.0, 70.0, 10.0).unwrap();
        assert_eq!(grid, again);
    }

    #[test]
    fn test_trailing_partial_bin_is_dropped() {
        let grid = VoxelGrid::new(365.0, 180.0, 70.0, 10.0).unwrap();
        assert_eq!(grid.dims().0, 36);
        // The partial slice [360, 365) is outside the lattice
        assert_eq!(grid.bin(362.0, 5.0, 5.0), None);
        assert_eq!(grid.bin(359.9, 5.0, 5.0), Some((35, 0, 0)));
    }

    #[test]
    fn test_bin_is_half_open() {
        let grid = VoxelGrid::new(20.0, 20.0, 20.0, 10.0).unwrap();
        assert_eq!(grid.dims(), (2, 2, 2));
        assert_eq!(grid.bin(0.0, 0.0, 0.0), Some((0, 0, 0)));
        assert_eq!(grid.bin(9.999, 0.0, 0.0), Some((0, 0, 0)));
        assert_eq!(grid.bin(10.0, 0.0, 0.0), Some((1, 0, 0)));
        // The upper extent itself is excluded
        assert_eq!(grid.bin(20.0, 0.0, 0.0), None);
    }

    #[test]
    fn test_out_of_domain_coordinates_are_none() {
        let grid = VoxelGrid::new(20.0, 20.0, 20.0, 10.0).unwrap();
        assert_eq!(grid.bin(-0.001, 5.0, 5.0), None);
        assert_eq!(grid.bin(5.0, 25.0, 5.0), None);
        assert_eq!(grid.bin(5.0, 5.0, f32::NAN), None);
        assert_eq!(grid.bin(f32::INFINITY, 5.0, 5.0), None);
    }

    #[test]
    fn test_non_positive_configuration_is_fatal() {
        assert!(matches!(
            VoxelGrid::new(0.0, 180.0, 70.0, 10.0),
            Err(GridError::NonPositiveExtent { axis: 'x', .. })
        ));
        assert!(matches!(
            VoxelGrid::new(360.0, -1.0, 70.0, 10.0),
            Err(GridError::NonPositiveExtent { axis: 'y', .. })
        ));
        assert!(matches!(
            VoxelGrid::new(360.0, 180.0, 70.0, 0.0),
            Err(GridError::NonPositiveVoxelSize(_))
        ));
        assert!(matches!(
            VoxelGrid::new(360.0, 180.0, 5.0, 10.0),
            Err(GridError::ExtentSmallerThanVoxel { axis: 'z', .. })
        ));
    }

    #[test]
    fn test_edges_and_centers() {
        let grid = VoxelGrid::new(30.0, 20.0, 10.0, 10.0).unwrap();
        let edges = grid.edges();
        assert_eq!(edges[0], vec![0.0, 10.0, 20.0]);
        assert_eq!(edges[1], vec![0.0, 10.0]);
        assert_eq!(edges[2], vec![0.0]);

        let centers = grid.centers();
        assert_eq!(centers[0], vec![5.0, 15.0, 25.0]);
        assert_eq!(centers[2], vec![5.0]);
    }
}
