use chrono::{DateTime, Utc};
use model::GraphMetadata;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct GraphMetadataRow {
    pub id: i64,
    pub version: String,
    pub dataset_version: String,
    pub total_nodes: i64,
    pub total_edges: i64,
    pub build_duration_ms: i64,
    pub store_key: String,
    pub backup_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

impl GraphMetadataRow {
    pub fn into_model(self) -> GraphMetadata {
        GraphMetadata {
            id: self.id,
            version: self.version,
            dataset_version: self.dataset_version,
            total_nodes: self.total_nodes.max(0) as u64,
            total_edges: self.total_edges.max(0) as u64,
            build_duration_ms: self.build_duration_ms.max(0) as u64,
            store_key: self.store_key,
            backup_path: self.backup_path,
            created_at: self.created_at,
            active: self.active,
        }
    }
}
