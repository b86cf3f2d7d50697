// Copyright 2025 The Ratemap Authors
// SPDX-License-Identifier: Apache-2.0

//! Payloads handed to the (external) volumetric renderer.

use serde::{Deserialize, Serialize};

use crate::grid::VoxelGrid;
use crate::rate_map::FiringRateMap;
use crate::tables::PositionTable;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RenderError {
    #[error("grid shape {grid:?} does not match rate map shape {map:?}")]
    ShapeMismatch {
        grid: (usize, usize, usize),
        map: (usize, usize, usize),
    },

    #[error("movement trace step must be > 0")]
    ZeroTraceStep,
}

/// Flattened volume data for the downstream 3D renderer.
///
/// `x`, `y`, `z` hold the voxel-center coordinate of every lattice cell and
/// `values` the normalized rate, all four in the lattice's row-major
/// iteration order (z fastest). The renderer needs the complete grid, empty
/// voxels included, which is why the payload stays dense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumePayload {
    pub shape: (usize, usize, usize),
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
    pub values: Vec<f32>,
}

impl VolumePayload {
    /// Flatten a rate map and its lattice coordinates.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::ShapeMismatch` when the map was built from a
    /// different grid.
    pub fn new(grid: &VoxelGrid, map: &FiringRateMap) -> Result<Self, RenderError> {
        if grid.dims() != map.dims() {
            return Err(RenderError::ShapeMismatch {
                grid: grid.dims(),
                map: map.dims(),
            });
        }

        let centers = grid.centers();
        let count = grid.voxel_count();
        let mut x = Vec::with_capacity(count);
        let mut y = Vec::with_capacity(count);
        let mut z = Vec::with_capacity(count);
        let mut values = Vec::with_capacity(count);

        for ((bx, by, bz), &value) in map.values().indexed_iter() {
            x.push(centers[0][bx]);
            y.push(centers[1][by]);
            z.push(centers[2][bz]);
            values.push(value);
        }

        Ok(Self {
            shape: grid.dims(),
            x,
            y,
            z,
            values,
        })
    }
}

/// Downsampled position polyline for overlaying the subject's path on the
/// volume figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementTrace {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
}

impl MovementTrace {
    /// Keep every `step`-th sample, in time order.
    ///
    /// Deterministic because the position table is sorted by construction.
    /// `step = 1` keeps everything.
    pub fn downsample(positions: &PositionTable, step: usize) -> Result<Self, RenderError> {
        if step == 0 {
            return Err(RenderError::ZeroTraceStep);
        }

        let kept = positions.samples().iter().step_by(step);
        let mut x = Vec::new();
        let mut y = Vec::new();
        let mut z = Vec::new();
        for sample in kept {
            x.push(sample.x);
            y.push(sample.y);
            z.push(sample.z);
        }

        Ok(Self { x, y, z })
    }
}
