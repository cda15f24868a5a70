use std::collections::HashMap;

use crate::{
    graph::{GraphEdge, GraphNode},
    report::ValidationReport,
};

const MIN_WEIGHT: f64 = 30.0;
const MAX_WEIGHT: f64 = 120.0;

/// §4.D transfer-edge check: both endpoints share a non-empty normalized
/// cityId and weight falls in [30,120].
pub fn validate_transfer_edges(nodes: &[GraphNode], edges: &[GraphEdge]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let city_by_node: HashMap<&str, Option<&str>> =
        nodes.iter().map(|n| (n.id.as_str(), n.city_id.as_deref())).collect();

    for edge in edges.iter().filter(|e| e.transport_type == "TRANSFER") {
        let from_city = city_by_node.get(edge.from.as_str()).copied().flatten();
        let to_city = city_by_node.get(edge.to.as_str()).copied().flatten();

        match (from_city, to_city) {
            (Some(a), Some(b)) if !a.is_empty() && a == b => {}
            _ => report.error(format!(
                "transfer edge {}->{} does not share a non-empty cityId ({:?} vs {:?})",
                edge.from, edge.to, from_city, to_city
            )),
        }

        if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&edge.weight) {
            report.error(format!(
                "transfer edge {}->{} weight {} is outside [{MIN_WEIGHT},{MAX_WEIGHT}]",
                edge.from, edge.to, edge.weight
            ));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, city: Option<&str>) -> GraphNode {
        GraphNode { id: id.to_string(), city_id: city.map(String::from) }
    }

    fn transfer(from: &str, to: &str, weight: f64) -> GraphEdge {
        GraphEdge { from: from.to_string(), to: to.to_string(), weight, transport_type: "TRANSFER".to_string() }
    }

    #[test]
    fn accepts_same_city_within_range() {
        let nodes = vec![node("a", Some("якутск")), node("b", Some("якутск"))];
        let edges = vec![transfer("a", "b", 90.0)];
        assert!(validate_transfer_edges(&nodes, &edges).is_valid());
    }

    #[test]
    fn rejects_mismatched_city() {
        let nodes = vec![node("a", Some("якутск")), node("b", Some("мирный"))];
        let edges = vec![transfer("a", "b", 90.0)];
        assert!(!validate_transfer_edges(&nodes, &edges).is_valid());
    }

    #[test]
    fn rejects_out_of_range_weight() {
        let nodes = vec![node("a", Some("якутск")), node("b", Some("якутск"))];
        let edges = vec![transfer("a", "b", 200.0)];
        assert!(!validate_transfer_edges(&nodes, &edges).is_valid());
    }
}
