// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use cid::Cid;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

use crate::blocks::ChainHead;
use crate::fpost::{
    config::FPostConfig,
    errors::Error,
    metrics,
    provider::{ChainAdapter, ProofEngine},
    types::{PoStRandomness, SubmitFallbackPoStParams, to_fixed},
};
use crate::shim::{address::Address, clock::ChainEpoch};

/// Everything a single proving cycle needs. Shared read-only between cycles.
pub(super) struct PostRunner<C, P> {
    pub(super) api: Arc<C>,
    pub(super) prover: Arc<P>,
    /// Miner actor the proofs are submitted to
    pub(super) actor: Address,
    /// Address that signs and pays for the messages
    pub(super) worker: Address,
    pub(super) config: FPostConfig,
}

/// Races `fut` against cancellation of the cycle, preferring cancellation.
pub(super) async fn checkpoint<F: Future>(
    token: &CancellationToken,
    fut: F,
) -> Result<F::Output, Error> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(Error::Cancelled),
        output = fut => Ok(output),
    }
}

impl<C, P> PostRunner<C, P>
where
    C: ChainAdapter + 'static,
    P: ProofEngine,
{
    /// Generates a proof for `epoch` and submits it. Returns the CID of the
    /// submission message.
    #[instrument(name = "fpost_cycle", skip_all, fields(eps = epoch))]
    pub(super) async fn do_post(
        &self,
        epoch: u64,
        head: &ChainHead,
        token: &CancellationToken,
    ) -> Result<Cid, Error> {
        let proof = self.run_post(epoch, head, token).await?;
        self.submit_post(&proof).await
    }

    #[instrument(skip_all, fields(height = head.epoch(), tipset = %head.key()))]
    pub(super) async fn run_post(
        &self,
        epoch: u64,
        head: &ChainHead,
        token: &CancellationToken,
    ) -> Result<SubmitFallbackPoStParams, Error> {
        let challenge_round = challenge_epoch(epoch, self.config.fallback_post_delay)?;

        let rand = checkpoint(token, self.api.chain_get_randomness(head, challenge_round))
            .await?
            .map_err(|e| {
                Error::RandomnessUnavailable(format!(
                    "ts={}; eps={epoch}: {e:#}",
                    head.epoch()
                ))
            })?;

        let ssi = checkpoint(token, self.sorted_sector_info(head)).await??;

        info!(
            chain_random = %hex::encode(&rand),
            eps = epoch,
            height = head.epoch(),
            "running fPoSt"
        );

        let faults = match self.check_faults(head, &ssi, token).await {
            Ok(check) => {
                if let Some(Err(e)) = &check.declaration {
                    error!("Failed to declare faults: {e}");
                }
                check.faults
            }
            Err(Error::Cancelled) => return Err(Error::Cancelled),
            Err(e) => {
                error!("Failed to check faults, proving without a fault set: {e}");
                BTreeSet::new()
            }
        };

        // A superseded cycle is abandoned here at the latest. Once the proof
        // engine runs, its result is submitted.
        if token.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let seed: PoStRandomness = to_fixed(&rand);

        info!(sectors = ssi.len(), faults = faults.len(), "generating fPoSt");

        let start = Instant::now();
        let (candidates, proof) = self
            .prover
            .generate_fallback_post(&ssi, seed, &faults)
            .await
            .map_err(|e| Error::ProofGenerationFailed(format!("{e:#}")))?;
        let elapsed = start.elapsed();
        metrics::PROOF_GENERATION_TIME.observe(elapsed.as_secs_f64());

        info!(p_len = proof.len(), elapsed = ?elapsed, "submitting PoSt");

        Ok(SubmitFallbackPoStParams::new(proof, candidates))
    }
}

/// Epoch whose randomness seeds the proof answering for `epoch`.
fn challenge_epoch(epoch: u64, delay: u64) -> Result<ChainEpoch, Error> {
    epoch
        .checked_add(delay)
        .and_then(|round| ChainEpoch::try_from(round).ok())
        .ok_or_else(|| {
            Error::RandomnessUnavailable(format!(
                "challenge epoch out of range (eps={epoch}; delay={delay})"
            ))
        })
}
