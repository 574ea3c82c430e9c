// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! In-memory chain and proof engine used by the scheduler tests.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::{Context as _, anyhow, bail};
use num_traits::FromPrimitive as _;
use async_trait::async_trait;
use cid::Cid;
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use crate::blocks::{ChainHead, TipsetKey};
use crate::fpost::{
    FPostConfig,
    provider::{ChainAdapter, ProofEngine},
    run::PostRunner,
    types::*,
};
use crate::shim::{
    address::Address,
    clock::ChainEpoch,
    error::ExitCode,
    executor::Receipt,
    message::Message,
    sector::SectorNumber,
};

pub(super) fn actor() -> Address {
    Address::new_id(1000)
}

pub(super) fn worker() -> Address {
    Address::new_id(1001)
}

pub(super) fn head(epoch: ChainEpoch) -> ChainHead {
    ChainHead::new(TipsetKey::default(), epoch)
}

pub(super) fn sector(sector_id: SectorNumber) -> ChainSectorInfo {
    ChainSectorInfo {
        sector_id,
        comm_r: vec![sector_id as u8; COMM_LEN],
    }
}

pub(super) fn fault(sector_id: SectorNumber) -> Fault {
    Fault {
        sector_id,
        err: Some(format!("sector {sector_id} unreadable")),
    }
}

pub(super) fn runner(
    chain: &Arc<TestChain>,
    prover: &Arc<TestProver>,
) -> PostRunner<TestChain, TestProver> {
    PostRunner {
        api: Arc::clone(chain),
        prover: Arc::clone(prover),
        actor: actor(),
        worker: worker(),
        config: FPostConfig::default(),
    }
}

/// `None` in any of the state fields makes the matching query fail.
pub(super) struct TestChain {
    pub randomness: Mutex<Option<Vec<u8>>>,
    pub proving_set: Mutex<Option<Vec<ChainSectorInfo>>>,
    pub faults: Mutex<Option<BTreeSet<SectorNumber>>>,
    /// Challenge rounds whose randomness never resolves
    pub stalled_rounds: Mutex<HashSet<ChainEpoch>>,
    /// Methods whose inclusion is never observed
    pub stalled_waits: Mutex<HashSet<Method>>,
    pub exit_code: Mutex<u32>,
    pub push_fails: AtomicBool,
    pub wait_fails: AtomicBool,
    pub randomness_requests: Mutex<Vec<ChainEpoch>>,
    pub pushed: Mutex<Vec<Message>>,
    pub wait_requests: Mutex<Vec<Cid>>,
}

impl TestChain {
    pub fn new(randomness: Vec<u8>, proving_set: Vec<ChainSectorInfo>) -> Arc<Self> {
        Arc::new(Self {
            randomness: Mutex::new(Some(randomness)),
            proving_set: Mutex::new(Some(proving_set)),
            faults: Mutex::new(Some(BTreeSet::new())),
            stalled_rounds: Default::default(),
            stalled_waits: Default::default(),
            exit_code: Mutex::new(0),
            push_fails: AtomicBool::new(false),
            wait_fails: AtomicBool::new(false),
            randomness_requests: Default::default(),
            pushed: Default::default(),
            wait_requests: Default::default(),
        })
    }

    pub fn pushed(&self) -> Vec<Message> {
        self.pushed.lock().clone()
    }

    pub fn pushed_with(&self, method: Method) -> Vec<Message> {
        self.pushed()
            .into_iter()
            .filter(|msg| Method::from_u64(msg.method_num()) == Some(method))
            .collect()
    }
}

#[async_trait]
impl ChainAdapter for TestChain {
    async fn chain_get_randomness(
        &self,
        _head: &ChainHead,
        epoch: ChainEpoch,
    ) -> anyhow::Result<Vec<u8>> {
        self.randomness_requests.lock().push(epoch);
        let stalled = self.stalled_rounds.lock().contains(&epoch);
        if stalled {
            std::future::pending::<()>().await;
        }
        self.randomness
            .lock()
            .clone()
            .context("tipset not found")
    }

    async fn state_miner_proving_set(
        &self,
        miner: &Address,
        _head: &ChainHead,
    ) -> anyhow::Result<Vec<ChainSectorInfo>> {
        assert_eq!(miner, &actor());
        self.proving_set
            .lock()
            .clone()
            .context("actor state unavailable")
    }

    async fn state_miner_faults(
        &self,
        _actor: &Address,
        _head: &ChainHead,
    ) -> anyhow::Result<Vec<SectorNumber>> {
        let faults = self.faults.lock().clone().context("actor state unavailable")?;
        Ok(faults.into_iter().collect())
    }

    async fn mpool_push_message(&self, message: Message) -> anyhow::Result<Cid> {
        if self.push_fails.load(Ordering::SeqCst) {
            bail!("mpool full");
        }
        let cid = message.cid()?;
        self.pushed.lock().push(message);
        Ok(cid)
    }

    async fn state_wait_msg(&self, cid: Cid) -> anyhow::Result<Receipt> {
        self.wait_requests.lock().push(cid);
        if self.wait_fails.load(Ordering::SeqCst) {
            bail!("lookback limit exceeded");
        }
        let message = self
            .pushed()
            .into_iter()
            .find(|msg| msg.cid().ok() == Some(cid))
            .ok_or_else(|| anyhow!("unknown message {cid}"))?;
        let method = Method::from_u64(message.method_num())
            .ok_or_else(|| anyhow!("unexpected method {}", message.method_num()))?;
        let stalled = self.stalled_waits.lock().contains(&method);
        if stalled {
            std::future::pending::<()>().await;
        }
        let exit_code = ExitCode::new(*self.exit_code.lock());

        // a successful declaration shows up in the actor's fault state
        if exit_code.is_success() && method == Method::DeclareFaults {
            let params: DeclareFaultsParams = message.params.deserialize()?;
            let mut faults = self.faults.lock();
            if let Some(faults) = faults.as_mut() {
                faults.extend(params.faults.iter());
            }
        }
        Ok(Receipt::new(exit_code))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct PostCall {
    pub sectors: Vec<PublicSectorInfo>,
    pub seed: PoStRandomness,
    pub faults: BTreeSet<SectorNumber>,
}

#[derive(Default)]
pub(super) struct TestProver {
    pub scrub_faults: Mutex<Vec<Fault>>,
    pub candidates: Mutex<Vec<EngineCandidate>>,
    pub proof: Mutex<Vec<u8>>,
    pub fails: AtomicBool,
    /// When set, proof generation waits for a permit
    pub gate: Mutex<Option<Arc<Semaphore>>>,
    pub started: AtomicUsize,
    pub calls: Mutex<Vec<PostCall>>,
}

impl TestProver {
    pub fn new() -> Arc<Self> {
        let prover = Self::default();
        *prover.proof.lock() = vec![0xC0, 0xFF, 0xEE];
        Arc::new(prover)
    }

    pub fn calls(&self) -> Vec<PostCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ProofEngine for TestProver {
    async fn scrub(&self, _sectors: &SortedSectorInfo) -> Vec<Fault> {
        self.scrub_faults.lock().clone()
    }

    async fn generate_fallback_post(
        &self,
        sectors: &SortedSectorInfo,
        seed: PoStRandomness,
        faults: &BTreeSet<SectorNumber>,
    ) -> anyhow::Result<(Vec<EngineCandidate>, Vec<u8>)> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().clone();
        if let Some(gate) = gate {
            gate.acquire().await?.forget();
        }
        self.calls.lock().push(PostCall {
            sectors: sectors.values().to_vec(),
            seed,
            faults: faults.clone(),
        });
        if self.fails.load(Ordering::SeqCst) {
            bail!("vanilla proof failed");
        }
        Ok((self.candidates.lock().clone(), self.proof.lock().clone()))
    }
}
