/// A built node, carrying just what structural validation needs. The graph
/// builder's own node type carries more (lat/lon, isVirtual); this is the
/// narrow view validators operate on.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub id: String,
    pub city_id: Option<String>,
}

/// A built edge prior to being written into the graph store. `transport_type`
/// uses the same uppercase tags as `model::TransportType::as_tag`, plus the
/// two edge-only kinds `TRANSFER` and the virtual-route tags.
#[derive(Debug, Clone)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub weight: f64,
    pub transport_type: String,
}

/// Stop facts needed to classify an edge endpoint as a ferry terminal,
/// independent of whether the stop is real or virtual.
#[derive(Debug, Clone)]
pub struct StopFacts {
    pub id: String,
    pub name: String,
    pub is_airport: bool,
    pub metadata_type: Option<String>,
}
