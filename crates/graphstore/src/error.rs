use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphStoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("failed to (de)serialize graph payload: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, GraphStoreError>;
