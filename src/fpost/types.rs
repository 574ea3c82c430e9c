// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use fvm_ipld_bitfield::BitField;
use fvm_ipld_encoding::{strict_bytes, tuple::*};
use num_derive::FromPrimitive;

use crate::shim::{message::MethodNum, sector::SectorNumber};

/// Length of a replica commitment and of the PoSt seed.
pub const COMM_LEN: usize = 32;
/// Width of a partial ticket in a submitted candidate.
pub const PARTIAL_TICKET_LEN: usize = 32;

pub type Commitment = [u8; COMM_LEN];
pub type PoStRandomness = [u8; 32];

/// Storage miner actor methods invoked by the scheduler.
#[derive(FromPrimitive, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u64)]
pub enum Method {
    SubmitFallbackPoSt = 8,
    DeclareFaults = 19,
}

impl From<Method> for MethodNum {
    fn from(method: Method) -> Self {
        method as MethodNum
    }
}

/// Proving set entry as listed by chain state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainSectorInfo {
    pub sector_id: SectorNumber,
    pub comm_r: Vec<u8>,
}

/// Proving set entry in the form the proof engine consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicSectorInfo {
    pub sector_id: SectorNumber,
    pub comm_r: Commitment,
}

/// Proving set ordered by sector number, without duplicate sectors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortedSectorInfo(Vec<PublicSectorInfo>);

impl SortedSectorInfo {
    pub fn new(mut sectors: Vec<PublicSectorInfo>) -> Self {
        // stable sort keeps the first listing of a sector ahead of its duplicates
        sectors.sort_by_key(|s| s.sector_id);
        sectors.dedup_by_key(|s| s.sector_id);
        Self(sectors)
    }

    pub fn values(&self) -> &[PublicSectorInfo] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sector_ids(&self) -> impl Iterator<Item = SectorNumber> + '_ {
        self.0.iter().map(|s| s.sector_id)
    }
}

/// Sector that failed the local scrub.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fault {
    pub sector_id: SectorNumber,
    pub err: Option<String>,
}

/// Candidate as produced by the proof engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineCandidate {
    pub sector_id: SectorNumber,
    pub sector_challenge_index: u64,
    pub partial_ticket: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct PoStCandidate {
    #[serde(with = "strict_bytes")]
    pub partial: Vec<u8>,
    pub sector_id: SectorNumber,
    pub challenge_index: u64,
}

impl From<EngineCandidate> for PoStCandidate {
    fn from(candidate: EngineCandidate) -> Self {
        Self {
            partial: to_fixed::<PARTIAL_TICKET_LEN>(&candidate.partial_ticket).to_vec(),
            sector_id: candidate.sector_id,
            challenge_index: candidate.sector_challenge_index,
        }
    }
}

/// Parameters of the `SubmitFallbackPoSt` miner method.
#[derive(Clone, Debug, PartialEq, Eq, Serialize_tuple, Deserialize_tuple)]
pub struct SubmitFallbackPoStParams {
    #[serde(with = "strict_bytes")]
    pub proof: Vec<u8>,
    pub candidates: Vec<PoStCandidate>,
}

impl SubmitFallbackPoStParams {
    pub fn new(proof: Vec<u8>, candidates: Vec<EngineCandidate>) -> Self {
        Self {
            proof,
            candidates: candidates.into_iter().map(PoStCandidate::from).collect(),
        }
    }
}

/// Parameters of the `DeclareFaults` miner method.
#[derive(Clone, Debug, Serialize_tuple, Deserialize_tuple)]
pub struct DeclareFaultsParams {
    pub faults: BitField,
}

impl DeclareFaultsParams {
    pub fn new<'a>(faults: impl IntoIterator<Item = &'a SectorNumber>) -> Self {
        let mut bitfield = BitField::new();
        for sector in faults {
            bitfield.set(*sector);
        }
        Self { faults: bitfield }
    }
}

/// Copies up to `N` leading bytes into a zeroed buffer.
pub(super) fn to_fixed<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0; N];
    let n = bytes.len().min(N);
    out[..n].copy_from_slice(&bytes[..n]);
    out
}
