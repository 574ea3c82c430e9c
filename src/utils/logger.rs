// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use tracing_subscriber::{EnvFilter, Registry, prelude::*};

use crate::config::LogConfig;

/// Installs the global `tracing` subscriber. `RUST_LOG`, when set, takes
/// precedence over the configured filter.
pub fn setup_logger(config: &LogConfig) -> anyhow::Result<()> {
    let layer: Box<dyn tracing_subscriber::layer::Layer<Registry> + Send + Sync> = if config.json
    {
        Box::new(
            tracing_subscriber::fmt::Layer::new()
                .json()
                .with_filter(get_env_filter(&config.filter)),
        )
    } else {
        Box::new(
            tracing_subscriber::fmt::Layer::new()
                .with_ansi(false)
                .with_filter(get_env_filter(&config.filter)),
        )
    };

    tracing_subscriber::registry().with(layer).try_init()?;
    Ok(())
}

fn get_env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}
