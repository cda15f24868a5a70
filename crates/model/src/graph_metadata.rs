use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utility::id::HasId;

/// Bookkeeping row for one materialized graph snapshot. The snapshot itself
/// lives in the hot KV store (see the `graphstore` crate); this row is what
/// lets the relational store answer "what's the current graph" without
/// touching Redis, and is what `setActiveGraphMetadata` flips transactionally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMetadata {
    pub id: i64,
    pub version: String,
    pub dataset_version: String,
    pub total_nodes: u64,
    pub total_edges: u64,
    pub build_duration_ms: u64,
    pub store_key: String,
    pub backup_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

impl HasId for GraphMetadata {
    type IdType = i64;
}
