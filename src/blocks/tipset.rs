// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt;

use cid::Cid;
use itertools::Itertools as _;

use crate::shim::clock::ChainEpoch;

/// An immutable set of CIDs forming a unique key for a tipset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TipsetKey(Vec<Cid>);

impl TipsetKey {
    pub fn new(cids: Vec<Cid>) -> Self {
        Self(cids)
    }

    pub fn cids(&self) -> &[Cid] {
        &self.0
    }
}

impl From<Vec<Cid>> for TipsetKey {
    fn from(cids: Vec<Cid>) -> Self {
        Self::new(cids)
    }
}

impl fmt::Display for TipsetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

/// Reference to a point in chain history that all state queries of a proving
/// cycle are scoped to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChainHead {
    key: TipsetKey,
    epoch: ChainEpoch,
}

impl ChainHead {
    pub fn new(key: TipsetKey, epoch: ChainEpoch) -> Self {
        Self { key, epoch }
    }

    pub fn key(&self) -> &TipsetKey {
        &self.key
    }

    /// Height of the tipset.
    pub fn epoch(&self) -> ChainEpoch {
        self.epoch
    }
}
