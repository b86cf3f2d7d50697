// Copyright 2025 The Ratemap Authors
// SPDX-License-Identifier: Apache-2.0

//! Console logging initialization
//!
//! The workspace members only emit diagnostics through `tracing`; this is
//! the single place a hosting application installs a subscriber.

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Initialize console logging.
///
/// Filter precedence: the `RUST_LOG` environment variable when set,
/// otherwise `fallback_level` (typically `config.logging.level`).
///
/// # Errors
///
/// Fails when the fallback level is not a valid filter directive or when a
/// global subscriber is already installed.
pub fn init_logging(fallback_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_level))
        .with_context(|| format!("invalid log filter '{}'", fallback_level))?;
    let directives = filter.to_string();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))?;

    tracing::debug!(filter = %directives, "console logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_accepts_configured_level() {
        // First call installs; a second would fail, so this test owns init
        init_logging("debug").unwrap();
        assert!(init_logging("info").is_err());
    }
}
