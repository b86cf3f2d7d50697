// Copyright 2025 The Ratemap Authors
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `ratemap_configuration.toml`.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RatemapConfig {
    pub pool: PoolConfig,
    pub binning: BinningConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

/// Spatial extents of the recording arena, in the same units as the
/// position coordinates.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PoolConfig {
    pub x_extent: f32,
    pub y_extent: f32,
    pub z_extent: f32,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            x_extent: 360.0,
            y_extent: 180.0,
            z_extent: 70.0,
        }
    }
}

/// Voxel lattice parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BinningConfig {
    /// Edge length of a cubic voxel, in the same units as the pool extents
    pub voxel_size: f32,
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self { voxel_size: 10.0 }
    }
}

/// Parameters handed to the rendering boundary
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Keep every Nth position sample when building the movement trace
    pub movement_trace_step: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            movement_trace_step: 1000,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is not set (trace/debug/info/warn/error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
