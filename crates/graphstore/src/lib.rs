use std::collections::HashMap;

use async_trait::async_trait;
use model::GraphMetadata;

pub mod error;
pub mod redis_store;
pub mod types;

pub use error::{GraphStoreError, Result};
pub use redis_store::RedisGraphStore;
pub use types::{EdgeMetadata, GraphStatistics, GraphStructure, Neighbor};

/// Versioned adjacency store contract (§4.C). Implementations must only
/// ever flip `current_version` after the snapshot under the new version key
/// has been written in full, so concurrent readers never observe a partial
/// graph under a version they can already see.
#[async_trait]
pub trait GraphStore: Send + Sync {
    async fn save_graph(
        &self,
        version: &str,
        nodes: &[String],
        edges_by_from: &HashMap<String, Vec<Neighbor>>,
        metadata: &GraphMetadata,
    ) -> Result<()>;

    /// Atomically flips both `current_version` and `current_metadata` to
    /// `version`/`metadata`. Called only after the relational `graphs` row
    /// has already been marked active (§5's two-step activation sequence),
    /// so this is the KV half of that sequence, not `save_graph`'s job.
    async fn set_current_version(&self, version: &str, metadata: &GraphMetadata) -> Result<()>;

    async fn current_version(&self) -> Result<Option<String>>;

    async fn current_metadata(&self) -> Result<Option<GraphMetadata>>;

    async fn delete_graph(&self, version: &str) -> Result<()>;

    async fn get_neighbors(&self, node_id: &str) -> Result<Vec<Neighbor>>;

    async fn has_node(&self, node_id: &str) -> Result<bool>;

    async fn has_edge(&self, from: &str, to: &str) -> Result<bool>;

    async fn get_edge_weight(&self, from: &str, to: &str) -> Result<Option<f64>>;

    async fn get_edge_metadata(&self, from: &str, to: &str) -> Result<Option<EdgeMetadata>>;

    async fn export_graph_structure(&self) -> Result<GraphStructure>;

    async fn import_graph_structure(
        &self,
        version: &str,
        structure: &GraphStructure,
        metadata: &GraphMetadata,
    ) -> Result<()>;

    async fn get_graph_statistics(&self) -> Result<GraphStatistics>;
}
