// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use cid::Cid;
use thiserror::Error;

/// Fallback PoSt scheduler error.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("failed to get chain randomness for fPoSt: {0}")]
    RandomnessUnavailable(String),
    #[error("failed to get proving set for miner: {0}")]
    ProvingSetUnavailable(String),
    #[error("checking on-chain faults: {0}")]
    FaultQueryFailed(String),
    #[error("running fPoSt failed: {0}")]
    ProofGenerationFailed(String),
    #[error("could not serialize message parameters: {0}")]
    SerializationFailed(String),
    #[error("pushing message to mpool: {0}")]
    BroadcastFailed(String),
    #[error("waiting for message {cid}: {reason}")]
    InclusionWaitFailed { cid: Cid, reason: String },
    #[error("message {cid} failed: exit {exit_code}")]
    ChainRejected { cid: Cid, exit_code: u32 },
    /// The cycle was superseded by a newer one or the scheduler shut down.
    #[error("proving cycle cancelled")]
    Cancelled,
}
