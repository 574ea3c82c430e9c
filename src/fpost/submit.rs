// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::BTreeSet;
use std::sync::Arc;

use cid::Cid;
use fvm_ipld_encoding::RawBytes;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

use crate::fpost::{
    errors::Error,
    metrics::{self, values},
    provider::ChainAdapter,
    run::{PostRunner, checkpoint},
    types::{DeclareFaultsParams, Method, SubmitFallbackPoStParams},
};
use crate::shim::{
    econ::TokenAmount, executor::Receipt, message::Message, sector::SectorNumber,
};

impl<C: ChainAdapter + 'static, P> PostRunner<C, P> {
    fn build_message<T: Serialize>(
        &self,
        method: Method,
        params: &T,
        value: TokenAmount,
    ) -> Result<Message, Error> {
        let params =
            RawBytes::serialize(params).map_err(|e| Error::SerializationFailed(e.to_string()))?;
        Ok(Message {
            version: 0,
            to: self.actor,
            from: self.worker,
            // assigned by the message pool
            sequence: 0,
            value,
            gas_limit: self.config.gas_limit,
            gas_fee_cap: self.config.gas_fee_cap(),
            gas_premium: self.config.gas_premium(),
            method_num: method.into(),
            params,
        })
    }

    /// Declares `faults` on chain and blocks until the declaration is
    /// executed. A non-zero exit code is an error.
    #[instrument(skip_all, fields(faults = faults.len()))]
    pub(super) async fn declare_faults(
        &self,
        faults: &BTreeSet<SectorNumber>,
        token: &CancellationToken,
    ) -> Result<Receipt, Error> {
        warn!("DECLARING {} FAULTS", faults.len());

        let params = DeclareFaultsParams::new(faults);
        let msg = self.build_message(Method::DeclareFaults, &params, TokenAmount::from_atto(0))?;

        let cid = checkpoint(token, self.api.mpool_push_message(msg))
            .await?
            .map_err(|e| Error::BroadcastFailed(format!("faults message: {e:#}")))?;
        metrics::MESSAGES_PUSHED
            .get_or_create(&values::DECLARE_FAULTS)
            .inc();

        let receipt = checkpoint(token, self.api.state_wait_msg(cid))
            .await?
            .map_err(|e| Error::InclusionWaitFailed {
                cid,
                reason: format!("{e:#}"),
            })?;
        if !receipt.is_success() {
            return Err(Error::ChainRejected {
                cid,
                exit_code: receipt.exit_code().value(),
            });
        }

        metrics::FAULTS_DECLARED.inc_by(faults.len() as u64);
        info!("Faults declared successfully");
        Ok(receipt)
    }

    /// Publishes the proof and returns as soon as the message is in the
    /// message pool. Inclusion is only watched and logged in the background.
    #[instrument(skip_all, fields(candidates = proof.candidates.len()))]
    pub(super) async fn submit_post(&self, proof: &SubmitFallbackPoStParams) -> Result<Cid, Error> {
        let msg = self.build_message(Method::SubmitFallbackPoSt, proof, self.config.late_fee())?;

        let cid = self
            .api
            .mpool_push_message(msg)
            .await
            .map_err(|e| Error::BroadcastFailed(format!("{e:#}")))?;
        metrics::MESSAGES_PUSHED
            .get_or_create(&values::SUBMIT_POST)
            .inc();

        info!("Submitted fallback post: {cid}");

        tokio::spawn(watch_submission(Arc::clone(&self.api), cid));

        Ok(cid)
    }
}

async fn watch_submission<C: ChainAdapter>(api: Arc<C>, cid: Cid) {
    match api.state_wait_msg(cid).await {
        Ok(receipt) if receipt.is_success() => info!("Fallback post {cid} landed on chain"),
        Ok(receipt) => error!(
            "Submitting fallback post failed: {}",
            Error::ChainRejected {
                cid,
                exit_code: receipt.exit_code().value(),
            }
        ),
        Err(e) => error!(
            "{}",
            Error::InclusionWaitFailed {
                cid,
                reason: format!("{e:#}"),
            }
        ),
    }
}
