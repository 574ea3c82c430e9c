// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use tracing::warn;

use crate::blocks::ChainHead;
use crate::fpost::{
    errors::Error,
    provider::ChainAdapter,
    run::PostRunner,
    types::{COMM_LEN, PublicSectorInfo, SortedSectorInfo, to_fixed},
};

impl<C: ChainAdapter, P> PostRunner<C, P> {
    /// Proving set of the miner as of `head`, in the order the proof engine
    /// requires.
    pub(super) async fn sorted_sector_info(
        &self,
        head: &ChainHead,
    ) -> Result<SortedSectorInfo, Error> {
        let sset = self
            .api
            .state_miner_proving_set(&self.actor, head)
            .await
            .map_err(|e| Error::ProvingSetUnavailable(format!("tsH: {}: {e:#}", head.epoch())))?;
        if sset.is_empty() {
            warn!("empty proving set! (ts.H: {})", head.epoch());
        }

        let sectors = sset
            .into_iter()
            .map(|sector| {
                if sector.comm_r.len() != COMM_LEN {
                    warn!(
                        sector = sector.sector_id,
                        len = sector.comm_r.len(),
                        "unexpected replica commitment length"
                    );
                }
                PublicSectorInfo {
                    sector_id: sector.sector_id,
                    comm_r: to_fixed(&sector.comm_r),
                }
            })
            .collect();

        Ok(SortedSectorInfo::new(sectors))
    }
}
