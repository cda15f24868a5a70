/// Result of one worker invocation. Every worker is idempotent: a repeated
/// `run` after a prior success reports `SkippedAlreadyDone` rather than
/// redoing the work, and missing prerequisites are distinct outcome kinds
/// rather than being folded into a generic error.
#[derive(Debug, Clone)]
pub enum WorkerOutcome {
    Success { summary: String, next_worker: Option<&'static str> },
    SkippedAlreadyDone { reason: String },
    NoDataset,
    NoHubStops,
    InsufficientStops { found: usize, required: usize },
    ExecutionError { message: String },
}

impl WorkerOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, WorkerOutcome::Success { .. })
    }
}
