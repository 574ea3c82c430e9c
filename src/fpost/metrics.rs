// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use prometheus_client::{
    encoding::{EncodeLabelKey, EncodeLabelSet, EncodeLabelValue, LabelSetEncoder},
    metrics::{
        counter::Counter,
        family::Family,
        histogram::{Histogram, exponential_buckets},
    },
};
use std::sync::LazyLock;

pub static CYCLES_STARTED: LazyLock<Counter> = LazyLock::new(|| {
    let metric = Counter::default();
    crate::metrics::default_registry().register(
        "fpost_cycles_started",
        "Number of fallback PoSt cycles started",
        metric.clone(),
    );
    metric
});
pub static CYCLE_OUTCOME: LazyLock<Family<LabelPair, Counter>> = LazyLock::new(|| {
    let metric = Family::default();
    crate::metrics::default_registry().register(
        "fpost_cycle_outcome",
        "Number of finished fallback PoSt cycles by outcome",
        metric.clone(),
    );
    metric
});
pub static FAULTS_DECLARED: LazyLock<Counter> = LazyLock::new(|| {
    let metric = Counter::default();
    crate::metrics::default_registry().register(
        "fpost_faults_declared",
        "Number of sectors declared faulty by the scheduler",
        metric.clone(),
    );
    metric
});
pub static MESSAGES_PUSHED: LazyLock<Family<LabelPair, Counter>> = LazyLock::new(|| {
    let metric = Family::default();
    crate::metrics::default_registry().register(
        "fpost_messages_pushed",
        "Number of messages pushed to the message pool by kind",
        metric.clone(),
    );
    metric
});
pub static PROOF_GENERATION_TIME: LazyLock<Histogram> = LazyLock::new(|| {
    // 1s up to roughly 34 minutes
    let metric = Histogram::new(exponential_buckets(1.0, 2.0, 12));
    crate::metrics::default_registry().register(
        "fpost_proof_generation_time",
        "Duration of fallback PoSt generation in seconds",
        metric.clone(),
    );
    metric
});

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct LabelPair {
    key: &'static str,
    value: &'static str,
}

impl EncodeLabelSet for LabelPair {
    fn encode(&self, mut encoder: LabelSetEncoder) -> Result<(), std::fmt::Error> {
        let mut label_encoder = encoder.encode_label();
        let mut label_key_encoder = label_encoder.encode_label_key()?;
        EncodeLabelKey::encode(&self.key, &mut label_key_encoder)?;
        let mut label_value_encoder = label_key_encoder.encode_label_value()?;
        EncodeLabelValue::encode(&self.value, &mut label_value_encoder)?;
        label_value_encoder.finish()
    }
}

pub mod values {
    use super::LabelPair;

    pub const SUCCESS: LabelPair = outcome("success");
    pub const FAILURE: LabelPair = outcome("failure");
    pub const CANCELLED: LabelPair = outcome("cancelled");

    pub const DECLARE_FAULTS: LabelPair = kind("declare_faults");
    pub const SUBMIT_POST: LabelPair = kind("submit_post");

    const fn outcome(value: &'static str) -> LabelPair {
        LabelPair {
            key: "outcome",
            value,
        }
    }

    const fn kind(value: &'static str) -> LabelPair {
        LabelPair { key: "kind", value }
    }
}
