// Copyright 2025 The Ratemap Authors
// SPDX-License-Identifier: Apache-2.0

//! Spatial binning and occupancy-normalization engine for 3D firing-rate maps.
//!
//! The engine turns two time-indexed recordings - a 3D position trace and a
//! spike-event log - into a per-voxel firing-rate estimate that corrects for
//! unequal time spent per voxel:
//!
//! ```text
//! positions ──> OccupancyMap ──┐
//!                              ├──> FiringRateMap (dense, [0, 1])
//! spikes ────> SpikeCountMap ──┘
//!        (exact-timestamp join)
//! ```
//!
//! Everything here is a pure, synchronous computation over in-memory tables:
//! no I/O, no hidden state, no locking. The only state worth reusing across
//! neuron selections - the neuron-independent occupancy map - lives in an
//! explicit [`RecordingSession`] that is immutable after construction and
//! safe to share read-only between threads.

pub mod grid;
pub mod occupancy;
pub mod rate_map;
pub mod render;
pub mod session;
pub mod spike_binning;
pub mod tables;

pub use grid::{GridError, VoxelGrid, VoxelIndex};
pub use occupancy::OccupancyMap;
pub use rate_map::{FiringRateMap, RateMapError};
pub use render::{MovementTrace, RenderError, VolumePayload};
pub use session::{firing_rate_map, RecordingSession};
pub use spike_binning::SpikeCountMap;
pub use tables::{NeuronId, PositionSample, PositionTable, SpikeEvent, SpikeTable, TableError};
