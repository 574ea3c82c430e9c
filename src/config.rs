// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::fpost::FPostConfig;
use crate::utils::io::{read_toml, read_toml_file};

/// Logging options consumed by [`crate::utils::logger::setup_logger`].
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber` filter directives, e.g. `info,forest_fpost=debug`
    pub filter: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".into(),
            json: false,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub fpost: FPostConfig,
    pub log: LogConfig,
}

impl Config {
    pub fn from_toml(toml_string: &str) -> anyhow::Result<Self> {
        read_toml(toml_string)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        read_toml_file(path)
    }
}
