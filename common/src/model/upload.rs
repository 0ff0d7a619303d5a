use serde::{Deserialize, Serialize};

/// Aggregate outcome of a bulk upload.
///
/// `total_count` is the number of non-blank data rows found in the sheet,
/// `inserted_count` the number that made it into the store. A gap between the
/// two tells the operator that some rows need manual correction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub inserted_count: usize,
    pub total_count: usize,
}

impl UploadResult {
    pub fn failed_count(&self) -> usize {
        self.total_count - self.inserted_count
    }
}

/// Lifecycle of one upload attempt.
///
/// `Idle -> Validating -> Processing -> Success`, with `Error` reachable from
/// any non-terminal phase. `Success` and `Error` are terminal: a corrected
/// file starts a new attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadPhase {
    Idle,
    Validating,
    Processing,
    Success,
    Error,
}

impl UploadPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, UploadPhase::Success | UploadPhase::Error)
    }

    pub fn can_transition_to(self, next: UploadPhase) -> bool {
        use UploadPhase::*;
        match (self, next) {
            (Idle, Validating) | (Validating, Processing) | (Processing, Success) => true,
            (from, Error) => !from.is_terminal(),
            _ => false,
        }
    }
}
