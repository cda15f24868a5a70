use thiserror::Error;

/// Explicit error kinds for the persistence layer, matching the
/// not-found/invariant/transient split the rest of the pipeline's error
/// handling relies on, rather than a single opaque passthrough.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no row found")]
    NotFound,
    #[error("refused to delete active row")]
    ActiveRowProtected,
    #[error("target row for activation does not exist")]
    ActivationTargetMissing,
    #[error("database error: {0}")]
    Other(#[from] sqlx::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

pub(crate) fn convert_error(why: sqlx::Error) -> StorageError {
    match why {
        sqlx::Error::RowNotFound => StorageError::NotFound,
        other => StorageError::Other(other),
    }
}
