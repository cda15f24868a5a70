use std::collections::{HashMap, HashSet, VecDeque};

use reference::normalize_city_name;

use crate::{
    graph::{GraphEdge, GraphNode},
    report::ValidationReport,
};

/// §4.D structural checks 1-5: finite positive weights, endpoints in the
/// node set, isolated nodes, hub reachability, weakly-connected components.
pub fn validate_structure(nodes: &[GraphNode], edges: &[GraphEdge]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let node_ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

    for edge in edges {
        if !edge.weight.is_finite() || edge.weight <= 0.0 {
            report.error(format!(
                "edge {}->{} has non-positive or non-finite weight {}",
                edge.from, edge.to, edge.weight
            ));
        }
        if !node_ids.contains(edge.from.as_str()) {
            report.error(format!("edge endpoint {} is not in the node set", edge.from));
        }
        if !node_ids.contains(edge.to.as_str()) {
            report.error(format!("edge endpoint {} is not in the node set", edge.to));
        }
    }

    let adjacency = undirected_adjacency(nodes, edges);

    let mut incident_degree: HashMap<&str, usize> = nodes.iter().map(|n| (n.id.as_str(), 0)).collect();
    for edge in edges {
        *incident_degree.entry(edge.from.as_str()).or_insert(0) += 1;
        *incident_degree.entry(edge.to.as_str()).or_insert(0) += 1;
    }
    for node in nodes {
        if incident_degree.get(node.id.as_str()).copied().unwrap_or(0) == 0 {
            report.warn(format!("node {} has no incident edges", node.id));
        }
    }

    let hub_city = normalize_city_name("Якутск");
    if let Some(hub) = nodes.iter().find(|n| n.city_id.as_deref() == Some(hub_city.as_str())) {
        let reachable = bfs_reachable(&adjacency, &hub.id);
        let coverage = reachable.len() as f64 / nodes.len().max(1) as f64;
        if coverage < 0.5 {
            report.warn(format!(
                "only {:.1}% of nodes are reachable from the hub {}",
                coverage * 100.0,
                hub.id
            ));
        }
    }

    let components = count_weakly_connected_components(nodes, &adjacency);
    if components > 1 {
        report.warn(format!("graph has {components} weakly-connected components"));
    }

    report
}

fn undirected_adjacency<'a>(
    nodes: &'a [GraphNode],
    edges: &'a [GraphEdge],
) -> HashMap<&'a str, Vec<&'a str>> {
    let mut adjacency: HashMap<&str, Vec<&str>> = nodes.iter().map(|n| (n.id.as_str(), Vec::new())).collect();
    for edge in edges {
        adjacency.entry(edge.from.as_str()).or_default().push(edge.to.as_str());
        adjacency.entry(edge.to.as_str()).or_default().push(edge.from.as_str());
    }
    adjacency
}

fn bfs_reachable<'a>(adjacency: &HashMap<&'a str, Vec<&'a str>>, start: &str) -> HashSet<&'a str> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue = VecDeque::new();

    if let Some((&key, _)) = adjacency.get_key_value(start) {
        visited.insert(key);
        queue.push_back(key);
    }

    while let Some(current) = queue.pop_front() {
        if let Some(neighbors) = adjacency.get(current) {
            for &next in neighbors {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }

    visited
}

fn count_weakly_connected_components(nodes: &[GraphNode], adjacency: &HashMap<&str, Vec<&str>>) -> usize {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut components = 0;

    for node in nodes {
        if seen.contains(node.id.as_str()) {
            continue;
        }
        components += 1;
        for reached in bfs_reachable(adjacency, &node.id) {
            seen.insert(reached);
        }
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, city: Option<&str>) -> GraphNode {
        GraphNode { id: id.to_string(), city_id: city.map(String::from) }
    }

    fn edge(from: &str, to: &str, weight: f64) -> GraphEdge {
        GraphEdge { from: from.to_string(), to: to.to_string(), weight, transport_type: "BUS".to_string() }
    }

    #[test]
    fn flags_non_positive_weight() {
        let nodes = vec![node("a", None), node("b", None)];
        let edges = vec![edge("a", "b", 0.0)];
        let report = validate_structure(&nodes, &edges);
        assert!(!report.is_valid());
    }

    #[test]
    fn flags_dangling_endpoint() {
        let nodes = vec![node("a", None)];
        let edges = vec![edge("a", "ghost", 10.0)];
        let report = validate_structure(&nodes, &edges);
        assert!(!report.is_valid());
    }

    #[test]
    fn warns_on_isolated_node() {
        let nodes = vec![node("a", None), node("b", None)];
        let edges = vec![];
        let report = validate_structure(&nodes, &edges);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn multiple_components_warn() {
        let nodes = vec![node("a", None), node("b", None), node("c", None), node("d", None)];
        let edges = vec![edge("a", "b", 10.0), edge("c", "d", 10.0)];
        let report = validate_structure(&nodes, &edges);
        assert!(report.warnings.iter().any(|w| w.contains("weakly-connected components")));
    }
}
