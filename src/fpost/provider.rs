// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::BTreeSet;

use async_trait::async_trait;
use cid::Cid;

use crate::blocks::ChainHead;
use crate::fpost::types::{ChainSectorInfo, EngineCandidate, Fault, PoStRandomness, SortedSectorInfo};
use crate::shim::{
    address::Address, clock::ChainEpoch, executor::Receipt, message::Message,
    sector::SectorNumber,
};

/// Chain state queries and message pool access needed by the scheduler.
///
/// Implementations are expected to suspend for as long as the underlying node
/// needs; the scheduler bounds these calls only by cycle cancellation.
#[async_trait]
pub trait ChainAdapter: Send + Sync {
    /// Randomness drawn from the chain at `epoch`, looked back from `head`.
    async fn chain_get_randomness(
        &self,
        head: &ChainHead,
        epoch: ChainEpoch,
    ) -> anyhow::Result<Vec<u8>>;

    async fn state_miner_proving_set(
        &self,
        actor: &Address,
        head: &ChainHead,
    ) -> anyhow::Result<Vec<ChainSectorInfo>>;

    /// Sectors already declared faulty on chain.
    async fn state_miner_faults(
        &self,
        actor: &Address,
        head: &ChainHead,
    ) -> anyhow::Result<Vec<SectorNumber>>;

    /// Signs and publishes the message from its `from` address, returning
    /// the CID to wait on.
    async fn mpool_push_message(&self, message: Message) -> anyhow::Result<Cid>;

    /// Resolves once the message has been included and executed.
    async fn state_wait_msg(&self, cid: Cid) -> anyhow::Result<Receipt>;
}

/// Storage proof capabilities over sealed sectors.
#[async_trait]
pub trait ProofEngine: Send + Sync {
    /// Checks every sector in the set and reports those that cannot be proven.
    async fn scrub(&self, sectors: &SortedSectorInfo) -> Vec<Fault>;

    /// Returns the winning candidates, in the order they must be submitted,
    /// and the proof bytes.
    async fn generate_fallback_post(
        &self,
        sectors: &SortedSectorInfo,
        seed: PoStRandomness,
        faults: &BTreeSet<SectorNumber>,
    ) -> anyhow::Result<(Vec<EngineCandidate>, Vec<u8>)>;
}
