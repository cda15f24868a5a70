use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeMetadata {
    pub distance_km: Option<f64>,
    pub transport_type: Option<String>,
    pub route_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neighbor {
    pub neighbor_id: String,
    pub weight: f64,
    pub metadata: EdgeMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub nodes: u64,
    pub edges: u64,
    pub avg_out_degree: f64,
    pub density_percent: f64,
}

/// A full adjacency snapshot, the shape `exportGraphStructure` /
/// `importGraphStructure` exchange symmetrically for backup and restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStructure {
    pub nodes: Vec<String>,
    pub neighbors: Vec<(String, Vec<Neighbor>)>,
}
