// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::blocks::ChainHead;
use crate::fpost::{
    config::FPostConfig,
    errors::Error,
    metrics::{self, values},
    provider::{ChainAdapter, ProofEngine},
    run::PostRunner,
};
use crate::shim::address::Address;

struct ActiveCycle {
    epoch: u64,
    abort: CancellationToken,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct SchedulerState {
    active: Option<ActiveCycle>,
    /// Highest epoch a cycle is known to have failed for
    failed: u64,
}

/// Drives one fallback PoSt cycle at a time for a single miner actor.
///
/// Starting a cycle supersedes the previous one: the previous cycle is told
/// to stop through its cancellation token and gives up at its next chain call.
/// Once a cycle has started generating its proof it runs to completion and its
/// proof is submitted. Failed cycles are only reported through
/// [`FallbackPostScheduler::last_failed_epoch`] and the logs.
pub struct FallbackPostScheduler<C, P> {
    runner: Arc<PostRunner<C, P>>,
    state: Arc<Mutex<SchedulerState>>,
}

impl<C, P> FallbackPostScheduler<C, P>
where
    C: ChainAdapter + 'static,
    P: ProofEngine + 'static,
{
    pub fn new(
        api: Arc<C>,
        prover: Arc<P>,
        actor: Address,
        worker: Address,
        config: FPostConfig,
    ) -> Self {
        Self {
            runner: Arc::new(PostRunner {
                api,
                prover,
                actor,
                worker,
                config,
            }),
            state: Default::default(),
        }
    }

    /// Starts proving `epoch` against `head` in a background task, cancelling
    /// any cycle that is still in flight. Must be called within a tokio
    /// runtime.
    pub fn start_cycle(&self, epoch: u64, head: Arc<ChainHead>) {
        let abort = CancellationToken::new();

        let mut state = self.state.lock();
        if let Some(prev) = state.active.take() {
            if !prev.abort.is_cancelled() {
                debug!("superseding fPoSt for epoch {} with {epoch}", prev.epoch);
            }
            if epoch <= prev.epoch {
                warn!(
                    "starting fPoSt for epoch {epoch} after epoch {}",
                    prev.epoch
                );
            }
            prev.abort.cancel();
        }

        metrics::CYCLES_STARTED.inc();
        let handle = tokio::spawn(run_cycle(
            Arc::clone(&self.runner),
            Arc::clone(&self.state),
            epoch,
            head,
            abort.clone(),
        ));
        state.active = Some(ActiveCycle {
            epoch,
            abort,
            handle,
        });
    }

    /// Raises the failure watermark to `epoch`. Never lowers it.
    pub fn record_failure(&self, epoch: u64) {
        record_failure(&self.state, epoch)
    }

    pub fn last_failed_epoch(&self) -> u64 {
        self.state.lock().failed
    }

    /// Epoch of the cycle currently in flight, if any.
    pub fn active_epoch(&self) -> Option<u64> {
        self.state
            .lock()
            .active
            .as_ref()
            .filter(|active| !active.abort.is_cancelled())
            .map(|active| active.epoch)
    }

    /// Cancels the cycle in flight and waits for its task to finish.
    /// Submissions already being watched are left alone.
    pub async fn shutdown(&self) {
        let active = self.state.lock().active.take();
        if let Some(active) = active {
            active.abort.cancel();
            if let Err(e) = active.handle.await {
                error!("fPoSt task for epoch {} panicked: {e}", active.epoch);
            }
        }
    }

    #[cfg(test)]
    pub(super) fn active_token(&self) -> Option<CancellationToken> {
        self.state
            .lock()
            .active
            .as_ref()
            .map(|active| active.abort.clone())
    }
}

fn record_failure(state: &Mutex<SchedulerState>, epoch: u64) {
    let mut state = state.lock();
    state.failed = state.failed.max(epoch);
}

async fn run_cycle<C, P>(
    runner: Arc<PostRunner<C, P>>,
    state: Arc<Mutex<SchedulerState>>,
    epoch: u64,
    head: Arc<ChainHead>,
    abort: CancellationToken,
) where
    C: ChainAdapter + 'static,
    P: ProofEngine,
{
    // marks the cycle as finished for `active_epoch`
    let _abort = abort.clone().drop_guard();

    match runner.do_post(epoch, &head, &abort).await {
        Ok(cid) => {
            debug!("fPoSt for epoch {epoch} submitted as {cid}");
            metrics::CYCLE_OUTCOME.get_or_create(&values::SUCCESS).inc();
        }
        Err(Error::Cancelled) => {
            warn!("fPoSt for epoch {epoch} cancelled");
            metrics::CYCLE_OUTCOME.get_or_create(&values::CANCELLED).inc();
        }
        Err(e) => {
            error!("fPoSt for epoch {epoch} failed: {e}");
            record_failure(&state, epoch);
            metrics::CYCLE_OUTCOME.get_or_create(&values::FAILURE).inc();
        }
    }
}
