use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utility::id::HasId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DatasetSource {
    Odata,
    Mock,
    Hybrid,
}

/// Counts of the entities an ingested snapshot produced. Updated in place by
/// the virtual-entities worker once it has generated synthesized stops and
/// routes (§4.E step 6).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetCounts {
    pub stops: u64,
    pub routes: u64,
    pub flights: u64,
    pub virtual_stops: u64,
    pub virtual_routes: u64,
}

/// Metadata for one ingested snapshot. At most one dataset is ever active; the
/// `active` flag is flipped transactionally by the storage layer, never by
/// mutating a dataset in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub id: i64,
    pub version: String,
    pub source: DatasetSource,
    pub quality_score: f64,
    pub counts: DatasetCounts,
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

impl HasId for Dataset {
    type IdType = i64;
}
