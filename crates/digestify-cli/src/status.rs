//! Process exit status

use std::process::ExitCode;

use digestify_core::Verification;

/// Final result of one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Stream signed
    Signed,
    /// Trailer present and matching
    Verified,
    /// Trailer present but not matching
    Mismatch,
    /// Trailer missing or malformed
    Indeterminate,
    /// I/O, configuration or algorithm error
    Failed,
}

impl Status {
    pub fn code(self) -> u8 {
        match self {
            Status::Signed | Status::Verified => 0,
            Status::Mismatch => 1,
            Status::Indeterminate => 2,
            Status::Failed => 3,
        }
    }
}

impl From<&Verification> for Status {
    fn from(outcome: &Verification) -> Self {
        match outcome {
            Verification::Valid => Status::Verified,
            Verification::Mismatch => Status::Mismatch,
            Verification::Indeterminate(_) => Status::Indeterminate,
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status.code())
    }
}
