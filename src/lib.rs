// Copyright 2025 The Ratemap Authors
// SPDX-License-Identifier: Apache-2.0

//! # Ratemap - Occupancy-normalized 3D firing-rate maps
//!
//! Ratemap turns two time-indexed recordings of a freely moving subject -
//! a 3D position trace and a spike-event log - into per-voxel firing-rate
//! maps that correct for unequal time spent per voxel. The output drives a
//! volumetric heatmap renderer; this crate owns only the computation.
//!
//! ## Quick Start
//!
//! ```rust
//! use ratemap::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Grid from configuration (defaults: 360 x 180 x 70 arena, voxel 10)
//! let config = RatemapConfig::default();
//! let grid = ratemap::grid_from_config(&config)?;
//!
//! // Tables come from the hosting application's data loader
//! let positions = PositionTable::new(vec![
//!     PositionSample { time: 0, x: 5.0, y: 5.0, z: 5.0 },
//!     PositionSample { time: 1, x: 15.0, y: 5.0, z: 5.0 },
//! ])?;
//! let spikes = SpikeTable::new(vec![
//!     SpikeEvent { time: 0, neuron: "unit-7".into() },
//! ]);
//!
//! // One session per dataset; one map per neuron selection
//! let session = RecordingSession::new(grid, positions);
//! let map = session.firing_rate_map(&spikes, &NeuronId::new("unit-7"));
//! assert!(map.values().iter().all(|&v| (0.0..=1.0).contains(&v)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: ratemap-config                             │
//! │  (TOML + env/CLI overrides, validation)                 │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Engine: ratemap-engine                                 │
//! │  (voxel grid, occupancy, spike join, normalization)     │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Boundary payloads: VolumePayload, MovementTrace        │
//! │  (handed to the external renderer, serde-serializable)  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The data loader, web server, and 3D renderer are external collaborators;
//! the engine is a pure function boundary over in-memory tables.
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use ratemap_config as config;

// Re-export engine
pub use ratemap_engine as engine;

pub mod logging;

pub use ratemap_config::{load_config, validate_config, ConfigError, RatemapConfig};
pub use ratemap_engine::{
    firing_rate_map, FiringRateMap, GridError, MovementTrace, NeuronId, OccupancyMap,
    PositionSample, PositionTable, RecordingSession, SpikeCountMap, SpikeEvent, SpikeTable,
    VolumePayload, VoxelGrid,
};

/// Build the voxel grid described by a (validated) configuration.
///
/// The grid is fixed for the lifetime of the process: it depends only on
/// configuration, never on the loaded data.
pub fn grid_from_config(config: &RatemapConfig) -> Result<VoxelGrid, GridError> {
    VoxelGrid::new(
        config.pool.x_extent,
        config.pool.y_extent,
        config.pool.z_extent,
        config.binning.voxel_size,
    )
}

/// Prelude - commonly used types
pub mod prelude {
    pub use crate::config::RatemapConfig;
    pub use crate::engine::{
        FiringRateMap, MovementTrace, NeuronId, PositionSample, PositionTable, RecordingSession,
        SpikeEvent, SpikeTable, VolumePayload, VoxelGrid,
    };
}
