// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use serde::{Deserialize, Serialize};

use crate::shim::econ::TokenAmount;

/// Epochs between the challenge and the response of a fallback PoSt.
pub const DEFAULT_FALLBACK_POST_DELAY: u64 = 30;
/// Late fee attached to every submission, refunded by the miner actor when the
/// proof is on time.
pub const DEFAULT_LATE_FEE: u64 = 1000;
const DEFAULT_GAS_LIMIT: u64 = 10_000_000;
const DEFAULT_GAS_FEE_CAP: u64 = 1;
const DEFAULT_GAS_PREMIUM: u64 = 1;

/// Fallback PoSt scheduler options. Token amounts are in attoFIL.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[cfg_attr(test, derive(derive_quickcheck_arbitrary::Arbitrary))]
#[serde(default)]
pub struct FPostConfig {
    pub fallback_post_delay: u64,
    pub late_fee: u64,
    pub gas_limit: u64,
    pub gas_fee_cap: u64,
    pub gas_premium: u64,
}

impl Default for FPostConfig {
    fn default() -> Self {
        Self {
            fallback_post_delay: DEFAULT_FALLBACK_POST_DELAY,
            late_fee: DEFAULT_LATE_FEE,
            gas_limit: DEFAULT_GAS_LIMIT,
            gas_fee_cap: DEFAULT_GAS_FEE_CAP,
            gas_premium: DEFAULT_GAS_PREMIUM,
        }
    }
}

impl FPostConfig {
    pub fn late_fee(&self) -> TokenAmount {
        TokenAmount::from_atto(self.late_fee)
    }

    pub fn gas_fee_cap(&self) -> TokenAmount {
        TokenAmount::from_atto(self.gas_fee_cap)
    }

    pub fn gas_premium(&self) -> TokenAmount {
        TokenAmount::from_atto(self.gas_premium)
    }
}
