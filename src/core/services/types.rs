use crate::api::models::ReportResponseStatus;
use std::path::PathBuf;

/// What happened to the stream (or inline content) of a successful report
#[derive(Debug, Clone, PartialEq)]
pub enum RetrievalOutcome {
    Written { path: PathBuf, bytes: u64 },
    NotReady {
        status: ReportResponseStatus,
        message: String,
    },
}

/// Final result of one report run
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed { path: PathBuf, bytes: u64 },
    AuthenticationRejected { message: String },
    ReportRejected { message: String },
    RetrievalIncomplete {
        status: ReportResponseStatus,
        message: String,
    },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }
}
