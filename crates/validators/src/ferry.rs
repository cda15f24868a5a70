use std::collections::HashMap;

use model::{classify_stop, StopType};

use crate::{graph::{GraphEdge, StopFacts}, report::ValidationReport};

const MIN_WEIGHT: f64 = 20.0;
const MAX_WEIGHT: f64 = 65.0;

/// §4.D ferry-edge check: both endpoints classify as ferry terminals and
/// weight falls in [20,65]. Non-compliance is logged as a warning only —
/// it never aborts a graph build.
pub fn validate_ferry_edges(stops: &[StopFacts], edges: &[GraphEdge]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let facts_by_id: HashMap<&str, &StopFacts> = stops.iter().map(|s| (s.id.as_str(), s)).collect();

    for edge in edges.iter().filter(|e| e.transport_type == "FERRY") {
        let from_type = facts_by_id.get(edge.from.as_str()).map(|s| {
            classify_stop(&s.id, &s.name, s.is_airport, s.metadata_type.as_deref())
        });
        let to_type = facts_by_id.get(edge.to.as_str()).map(|s| {
            classify_stop(&s.id, &s.name, s.is_airport, s.metadata_type.as_deref())
        });

        if from_type != Some(StopType::FerryTerminal) || to_type != Some(StopType::FerryTerminal) {
            report.warn(format!(
                "ferry edge {}->{} has a non-ferry-terminal endpoint",
                edge.from, edge.to
            ));
        }

        if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&edge.weight) {
            report.warn(format!(
                "ferry edge {}->{} weight {} is outside [{MIN_WEIGHT},{MAX_WEIGHT}]",
                edge.from, edge.to, edge.weight
            ));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str, name: &str) -> StopFacts {
        StopFacts { id: id.to_string(), name: name.to_string(), is_airport: false, metadata_type: None }
    }

    fn ferry_edge(from: &str, to: &str, weight: f64) -> GraphEdge {
        GraphEdge { from: from.to_string(), to: to.to_string(), weight, transport_type: "FERRY".to_string() }
    }

    #[test]
    fn accepts_two_ferry_terminals_in_range() {
        let stops = vec![stop("a", "Паромная переправа"), stop("b", "Пристань")];
        let edges = vec![ferry_edge("a", "b", 40.0)];
        let report = validate_ferry_edges(&stops, &edges);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn warns_on_non_terminal_endpoint() {
        let stops = vec![stop("a", "Автовокзал"), stop("b", "Пристань")];
        let edges = vec![ferry_edge("a", "b", 40.0)];
        let report = validate_ferry_edges(&stops, &edges);
        assert!(!report.warnings.is_empty());
        assert!(report.is_valid());
    }

    #[test]
    fn warns_on_out_of_range_weight() {
        let stops = vec![stop("a", "Паром"), stop("b", "Паром")];
        let edges = vec![ferry_edge("a", "b", 5.0)];
        let report = validate_ferry_edges(&stops, &edges);
        assert!(!report.warnings.is_empty());
    }
}
