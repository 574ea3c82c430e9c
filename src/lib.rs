// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Fallback proof-of-spacetime scheduling for Filecoin storage miners.
//!
//! The node drives a [`FallbackPostScheduler`] by calling
//! [`FallbackPostScheduler::start_cycle`] whenever the miner's proving period
//! requires a fallback PoSt. Chain access and proof generation are supplied
//! through the [`ChainAdapter`] and [`ProofEngine`] traits.

mod blocks;
mod config;
mod fpost;
mod metrics;
mod shim;
mod utils;

pub use blocks::{ChainHead, TipsetKey};
pub use config::{Config, LogConfig};
pub use fpost::*;
pub use metrics::encode as encode_metrics;
pub use shim::{
    address::Address, clock::ChainEpoch, econ::TokenAmount, error::ExitCode, executor::Receipt,
    message::Message, message::MethodNum, sector::SectorNumber,
};
pub use utils::io::{read_toml, read_toml_file};
pub use utils::logger::setup_logger;
