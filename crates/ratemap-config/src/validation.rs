// Copyright 2025 The Ratemap Authors
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! This module provides validation logic to ensure configuration values are
//! consistent and within valid ranges before the engine is constructed.

use crate::{ConfigError, ConfigResult, RatemapConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    NonPositiveValue { field: String, value: f32 },
    VoxelExceedsExtent { axis: String, extent: f32, voxel_size: f32 },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveValue { field, value } => {
                write!(f, "{} = {} must be > 0", field, value)
            }
            Self::VoxelExceedsExtent {
                axis,
                extent,
                voxel_size,
            } => {
                write!(
                    f,
                    "binning.voxel_size = {} exceeds pool.{}_extent = {}; the lattice would be empty along {}",
                    voxel_size, axis, extent, axis
                )
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Positive pool extents and voxel size (fatal for the binning engine)
/// - Voxel size no larger than any pool extent
/// - Positive movement-trace step
/// - Known log level
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with details if validation fails
pub fn validate_config(config: &RatemapConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_pool(config, &mut errors);
    validate_binning(config, &mut errors);
    validate_render(config, &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_pool(config: &RatemapConfig, errors: &mut Vec<ConfigValidationError>) {
    let extents = [
        ("pool.x_extent", config.pool.x_extent),
        ("pool.y_extent", config.pool.y_extent),
        ("pool.z_extent", config.pool.z_extent),
    ];
    for (field, value) in extents {
        // NaN fails the comparison too
        if !(value > 0.0) {
            errors.push(ConfigValidationError::NonPositiveValue {
                field: field.to_string(),
                value,
            });
        }
    }
}

fn validate_binning(config: &RatemapConfig, errors: &mut Vec<ConfigValidationError>) {
    let voxel_size = config.binning.voxel_size;
    if !(voxel_size > 0.0) {
        errors.push(ConfigValidationError::NonPositiveValue {
            field: "binning.voxel_size".to_string(),
            value: voxel_size,
        });
        return;
    }

    let extents = [
        ("x", config.pool.x_extent),
        ("y", config.pool.y_extent),
        ("z", config.pool.z_extent),
    ];
    for (axis, extent) in extents {
        if extent > 0.0 && voxel_size > extent {
            errors.push(ConfigValidationError::VoxelExceedsExtent {
                axis: axis.to_string(),
                extent,
                voxel_size,
            });
        }
    }
}

fn validate_render(config: &RatemapConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.render.movement_trace_step == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "render.movement_trace_step".to_string(),
            reason: "must be >= 1 (1 keeps every sample)".to_string(),
        });
    }
}

fn validate_logging(config: &RatemapConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("'{}' is not one of {:?}", config.logging.level, LOG_LEVELS),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RatemapConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_non_positive_extent_rejected() {
        let mut config = RatemapConfig::default();
        config.pool.y_extent = 0.0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("pool.y_extent"));
    }

    #[test]
    fn test_non_positive_voxel_size_rejected() {
        let mut config = RatemapConfig::default();
        config.binning.voxel_size = -1.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_voxel_larger_than_extent_rejected() {
        let mut config = RatemapConfig::default();
        config.binning.voxel_size = 100.0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("pool.z_extent"));
    }

    #[test]
    fn test_nan_extent_rejected() {
        let mut config = RatemapConfig::default();
        config.pool.x_extent = f32::NAN;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_trace_step_rejected() {
        let mut config = RatemapConfig::default();
        config.render.movement_trace_step = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let mut config = RatemapConfig::default();
        config.logging.level = "verbose".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_all_failures_collected() {
        let mut config = RatemapConfig::default();
        config.pool.x_extent = -5.0;
        config.logging.level = "loud".to_string();
        let err = validate_config(&config).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("pool.x_extent"));
        assert!(msg.contains("logging.level"));
    }
}
