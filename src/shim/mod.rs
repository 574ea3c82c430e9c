// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod executor;
pub mod message;

pub mod address {
    pub use fvm_shared4::address::Address;
}

pub mod clock {
    pub use fvm_shared4::clock::ChainEpoch;
}

pub mod econ {
    pub use fvm_shared4::econ::TokenAmount;
}

pub mod error {
    pub use fvm_shared4::error::ExitCode;
}

pub mod sector {
    pub use fvm_shared4::sector::SectorNumber;
}
