// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use parking_lot::{RwLock, RwLockWriteGuard};
use std::sync::LazyLock;

static DEFAULT_REGISTRY: LazyLock<RwLock<prometheus_client::registry::Registry>> =
    LazyLock::new(Default::default);

pub fn default_registry<'a>() -> RwLockWriteGuard<'a, prometheus_client::registry::Registry> {
    DEFAULT_REGISTRY.write()
}

/// Renders every registered metric in the Prometheus text exposition format.
pub fn encode() -> anyhow::Result<String> {
    let mut metrics = String::new();
    prometheus_client::encoding::text::encode(&mut metrics, &DEFAULT_REGISTRY.read())?;
    Ok(metrics)
}
