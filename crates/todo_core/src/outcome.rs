use std::fmt;

use crate::TaskId;

/// Why a request to the task service did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// The request never produced a response.
    Network(String),
    /// The server answered with a non-success status.
    Status(u16),
    /// The server answered 2xx but the body could not be understood.
    InvalidResponse(String),
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestFailure::Network(detail) => write!(f, "network error: {detail}"),
            RequestFailure::Status(code) => write!(f, "HTTP {code}"),
            RequestFailure::InvalidResponse(detail) => write!(f, "invalid response: {detail}"),
        }
    }
}

/// Result of a clear-all batch. `failures` keeps task order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClearOutcome {
    pub attempted: usize,
    pub failures: Vec<(TaskId, RequestFailure)>,
}

impl ClearOutcome {
    pub fn succeeded(&self) -> usize {
        self.attempted.saturating_sub(self.failures.len())
    }
}
