// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::BTreeSet;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::blocks::ChainHead;
use crate::fpost::{
    errors::Error,
    provider::{ChainAdapter, ProofEngine},
    run::{PostRunner, checkpoint},
    types::SortedSectorInfo,
};
use crate::shim::{executor::Receipt, sector::SectorNumber};

/// Outcome of reconciling the local scrub with on-chain fault state.
#[derive(Debug)]
pub struct FaultCheck {
    /// Every sector known to be faulty, whether declared before or during
    /// this cycle. The proof must skip all of them.
    pub faults: BTreeSet<SectorNumber>,
    /// Faults seen by the scrub that were not yet declared on chain.
    pub new_faults: BTreeSet<SectorNumber>,
    /// Result of the declaration message; `None` when nothing needed
    /// declaring.
    pub declaration: Option<Result<Receipt, Error>>,
}

impl<C, P> PostRunner<C, P>
where
    C: ChainAdapter + 'static,
    P: ProofEngine,
{
    /// Fails only when on-chain faults can't be read. A failed declaration is
    /// reported through [`FaultCheck::declaration`].
    pub(super) async fn check_faults(
        &self,
        head: &ChainHead,
        ssi: &SortedSectorInfo,
        token: &CancellationToken,
    ) -> Result<FaultCheck, Error> {
        let local_faults = self.prover.scrub(ssi).await;

        let declared: BTreeSet<SectorNumber> =
            checkpoint(token, self.api.state_miner_faults(&self.actor, head))
                .await?
                .map_err(|e| Error::FaultQueryFailed(format!("{e:#}")))?
                .into_iter()
                .collect();

        let mut new_faults = BTreeSet::new();
        for fault in local_faults {
            if declared.contains(&fault.sector_id) || !new_faults.insert(fault.sector_id) {
                continue;
            }
            warn!(
                "new fault detected: sector {}: {}",
                fault.sector_id,
                fault.err.as_deref().unwrap_or("no cause reported")
            );
        }

        let declaration = if new_faults.is_empty() {
            None
        } else {
            Some(self.declare_faults(&new_faults, token).await)
        };

        Ok(FaultCheck {
            faults: declared.union(&new_faults).copied().collect(),
            new_faults,
            declaration,
        })
    }
}
