// Copyright 2025 The Ratemap Authors
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, RatemapConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Find the ratemap configuration file
///
/// Search order:
/// 1. `RATEMAP_CONFIG_PATH` environment variable
/// 2. Current working directory: `./ratemap_configuration.toml`
/// 3. Parent directories (searches up to 5 levels for the workspace root)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    // 1. Check environment variable first
    if let Ok(env_path) = env::var("RATEMAP_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by RATEMAP_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    // 2. Search in common locations
    let mut search_paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join("ratemap_configuration.toml"));

        // Search up to 5 levels for workspace root
        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join("ratemap_configuration.toml"));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "Configuration file 'ratemap_configuration.toml' not found in any of these locations:\n{}\n\nSet RATEMAP_CONFIG_PATH environment variable to specify custom location.",
        search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Returns
///
/// Complete `RatemapConfig` with all overrides applied
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<RatemapConfig> {
    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        find_config_file()?
    };

    let content = fs::read_to_string(&config_file)?;

    let mut config: RatemapConfig = toml::from_str(&content)?;

    // Apply overrides in order
    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `RATEMAP_POOL_X_EXTENT` -> `pool.x_extent`
/// - `RATEMAP_POOL_Y_EXTENT` -> `pool.y_extent`
/// - `RATEMAP_POOL_Z_EXTENT` -> `pool.z_extent`
/// - `RATEMAP_VOXEL_SIZE` -> `binning.voxel_size`
/// - `RATEMAP_MOVEMENT_TRACE_STEP` -> `render.movement_trace_step`
/// - `RATEMAP_LOG_LEVEL` -> `logging.level`
pub fn apply_environment_overrides(config: &mut RatemapConfig) {
    // Pool extents
    if let Ok(value) = env::var("RATEMAP_POOL_X_EXTENT") {
        if let Ok(extent) = value.parse::<f32>() {
            config.pool.x_extent = extent;
        }
    }
    if let Ok(value) = env::var("RATEMAP_POOL_Y_EXTENT") {
        if let Ok(extent) = value.parse::<f32>() {
            config.pool.y_extent = extent;
        }
    }
    if let Ok(value) = env::var("RATEMAP_POOL_Z_EXTENT") {
        if let Ok(extent) = value.parse::<f32>() {
            config.pool.z_extent = extent;
        }
    }

    // Binning settings
    if let Ok(value) = env::var("RATEMAP_VOXEL_SIZE") {
        if let Ok(size) = value.parse::<f32>() {
            config.binning.voxel_size = size;
        }
    }

    // Render settings
    if let Ok(value) = env::var("RATEMAP_MOVEMENT_TRACE_STEP") {
        if let Ok(step) = value.parse::<usize>() {
            config.render.movement_trace_step = step;
        }
    }

    // Logging settings
    if let Ok(value) = env::var("RATEMAP_LOG_LEVEL") {
        config.logging.level = value;
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"voxel_size": "5.0", "log_level": "debug"}`)
pub fn apply_cli_overrides(config: &mut RatemapConfig, cli_args: &HashMap<String, String>) {
    // Pool extents
    if let Some(value) = cli_args.get("pool_x_extent") {
        if let Ok(extent) = value.parse::<f32>() {
            config.pool.x_extent = extent;
        }
    }
    if let Some(value) = cli_args.get("pool_y_extent") {
        if let Ok(extent) = value.parse::<f32>() {
            config.pool.y_extent = extent;
        }
    }
    if let Some(value) = cli_args.get("pool_z_extent") {
        if let Ok(extent) = value.parse::<f32>() {
            config.pool.z_extent = extent;
        }
    }

    // Binning settings
    if let Some(value) = cli_args.get("voxel_size") {
        if let Ok(size) = value.parse::<f32>() {
            config.binning.voxel_size = size;
        }
    }

    // Render settings
    if let Some(value) = cli_args.get("movement_trace_step") {
        if let Ok(step) = value.parse::<usize>() {
            config.render.movement_trace_step = step;
        }
    }

    // Logging settings
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("RATEMAP_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("RATEMAP_CONFIG_PATH");

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let saved_voxel = env::var("RATEMAP_VOXEL_SIZE").ok();
        env::remove_var("RATEMAP_VOXEL_SIZE");
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("ratemap_configuration.toml");

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[pool]").unwrap();
        writeln!(file, "x_extent = 100.0").unwrap();
        writeln!(file, "[binning]").unwrap();
        writeln!(file, "voxel_size = 5.0").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.pool.x_extent, 100.0);
        assert_eq!(config.binning.voxel_size, 5.0);
        // Sections absent from the file keep their defaults
        assert_eq!(config.pool.y_extent, 180.0);
        assert_eq!(config.logging.level, "info");

        if let Some(value) = saved_voxel {
            env::set_var("RATEMAP_VOXEL_SIZE", value);
        }
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = RatemapConfig::default();

        env::set_var("RATEMAP_VOXEL_SIZE", "2.5");
        env::set_var("RATEMAP_LOG_LEVEL", "debug");

        apply_environment_overrides(&mut config);

        env::remove_var("RATEMAP_VOXEL_SIZE");
        env::remove_var("RATEMAP_LOG_LEVEL");

        assert_eq!(config.binning.voxel_size, 2.5);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = RatemapConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("voxel_size".to_string(), "20.0".to_string());
        cli_args.insert("pool_z_extent".to_string(), "80.0".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.binning.voxel_size, 20.0);
        assert_eq!(config.pool.z_extent, 80.0);
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        // CLI overrides take precedence over environment variables
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("ratemap_configuration.toml");

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[binning]").unwrap();
        writeln!(file, "voxel_size = 10.0").unwrap();
        writeln!(file, "[logging]").unwrap();
        writeln!(file, "level = \"warn\"").unwrap();

        env::set_var("RATEMAP_VOXEL_SIZE", "5.0");
        env::set_var("RATEMAP_LOG_LEVEL", "error");

        let mut cli_args = HashMap::new();
        cli_args.insert("voxel_size".to_string(), "2.0".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();

        env::remove_var("RATEMAP_VOXEL_SIZE");
        env::remove_var("RATEMAP_LOG_LEVEL");

        // CLI wins for voxel_size, env wins for log level (no CLI override)
        assert_eq!(config.binning.voxel_size, 2.0);
        assert_eq!(config.logging.level, "error");
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("ratemap_configuration.toml");

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[binning").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
