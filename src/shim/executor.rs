// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::shim::error::ExitCode;

/// Result of a message once it has been executed on chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub exit_code: ExitCode,
}

impl Receipt {
    pub fn new(exit_code: ExitCode) -> Self {
        Self { exit_code }
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    pub fn is_success(&self) -> bool {
        self.exit_code.is_success()
    }
}
