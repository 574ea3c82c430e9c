// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use cid::Cid;
use fvm_ipld_encoding::{DAG_CBOR, RawBytes, tuple::*};
use multihash_codetable::Code;
use multihash_derive::MultihashDigest as _;

use crate::shim::{address::Address, econ::TokenAmount};

/// Method number indicator for calling actor methods.
pub type MethodNum = u64;

/// Unsigned chain message. Field order follows the on-chain tuple encoding.
#[derive(Clone, PartialEq, Eq, Debug, Serialize_tuple, Deserialize_tuple)]
pub struct Message {
    pub version: u64,
    pub to: Address,
    pub from: Address,
    pub sequence: u64,
    pub value: TokenAmount,
    pub gas_limit: u64,
    pub gas_fee_cap: TokenAmount,
    pub gas_premium: TokenAmount,
    pub method_num: MethodNum,
    pub params: RawBytes,
}

impl Message {
    pub fn from(&self) -> &Address {
        &self.from
    }

    pub fn to(&self) -> &Address {
        &self.to
    }

    pub fn method_num(&self) -> MethodNum {
        self.method_num
    }

    pub fn params(&self) -> &RawBytes {
        &self.params
    }

    pub fn value(&self) -> &TokenAmount {
        &self.value
    }

    /// Content identifier of the DAG-CBOR encoded message.
    pub fn cid(&self) -> Result<Cid, fvm_ipld_encoding::Error> {
        let bytes = fvm_ipld_encoding::to_vec(self)?;
        Ok(Cid::new_v1(DAG_CBOR, Code::Blake2b256.digest(&bytes)))
    }
}
