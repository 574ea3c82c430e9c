// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

// Fallback proof-of-spacetime scheduling for a storage miner. On every eligible
// epoch the scheduler checks its sectors for faults, declares new ones on
// chain, generates a proof over the proving set and submits it to the miner
// actor.

mod config;
mod errors;
mod faults;
mod metrics;
mod proving_set;
mod provider;
mod run;
mod scheduler;
mod submit;
mod types;

#[cfg(test)]
mod test_provider;

pub use self::{
    config::*,
    errors::Error,
    faults::FaultCheck,
    provider::{ChainAdapter, ProofEngine},
    scheduler::FallbackPostScheduler,
    types::*,
};
