use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("no dataset has been ingested yet")]
    NoDataset,
    #[error("no hub stop could be resolved for city {0:?}")]
    NoHubStops(Option<String>),
    #[error("fewer than {required} valid stops ({found} found)")]
    InsufficientStops { found: usize, required: usize },
    #[error("structural or transfer validation failed: {0:?}")]
    ValidationFailed(Vec<String>),
    #[error(transparent)]
    Storage(#[from] storage::error::StorageError),
    #[error(transparent)]
    GraphStore(#[from] graphstore::GraphStoreError),
    #[error("{0}")]
    Execution(String),
}

pub type Result<T> = core::result::Result<T, WorkerError>;
