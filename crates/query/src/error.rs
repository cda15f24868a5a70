use serde::{Deserialize, Serialize};

/// Machine-readable failure kind (§6 "a machine-readable code", §7). The
/// query path never throws to its caller — every failure becomes one of
/// these attached to a `QueryResponse` with `success = false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryErrorCode {
    Validation,
    GraphUnavailable,
    NoStopsFound,
    GraphOutOfSync,
    NoRoute,
    DeadlineExceeded,
    Internal,
}

/// Internal failure carrying enough context for the engine to finish a
/// `QueryResponse`. Not exposed to callers directly — `RouteQueryEngine::query`
/// always converts this into a response object.
#[derive(Debug, Clone)]
pub struct QueryError {
    pub code: QueryErrorCode,
    pub message: String,
    pub missing_nodes: Vec<String>,
}

impl QueryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self { code: QueryErrorCode::Validation, message: message.into(), missing_nodes: Vec::new() }
    }

    pub fn graph_unavailable() -> Self {
        Self {
            code: QueryErrorCode::GraphUnavailable,
            message: "the materialized graph has no active version".to_string(),
            missing_nodes: Vec::new(),
        }
    }

    pub fn no_stops_found(city: &str) -> Self {
        Self {
            code: QueryErrorCode::NoStopsFound,
            message: format!("No stops found for city {city:?}"),
            missing_nodes: Vec::new(),
        }
    }

    pub fn graph_out_of_sync(missing_nodes: Vec<String>) -> Self {
        Self {
            code: QueryErrorCode::GraphOutOfSync,
            message: format!("stops exist but are absent from the active graph: {missing_nodes:?}"),
            missing_nodes,
        }
    }

    pub fn no_route() -> Self {
        Self { code: QueryErrorCode::NoRoute, message: "no path exists between the resolved stops".to_string(), missing_nodes: Vec::new() }
    }

    pub fn deadline_exceeded() -> Self {
        Self { code: QueryErrorCode::DeadlineExceeded, message: "query deadline exceeded".to_string(), missing_nodes: Vec::new() }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self { code: QueryErrorCode::Internal, message: message.into(), missing_nodes: Vec::new() }
    }
}

impl From<storage::StorageError> for QueryError {
    fn from(why: storage::StorageError) -> Self {
        QueryError::internal(why.to_string())
    }
}

impl From<graphstore::GraphStoreError> for QueryError {
    fn from(why: graphstore::GraphStoreError) -> Self {
        QueryError::internal(why.to_string())
    }
}

pub type Result<T> = core::result::Result<T, QueryError>;
