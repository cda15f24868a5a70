use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use graphstore::GraphStore;

use crate::error::Result;

/// A priority queue entry for Dijkstra's algorithm. Reversed ordering so
/// `BinaryHeap` (a max-heap) behaves as a min-heap, the same trick used by
/// the knowledge-graph shortest-path search this is adapted from — except
/// here the weight is a plain minute duration, not an inverted frequency.
#[derive(Debug, Clone)]
struct State {
    distance: f64,
    node: String,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.distance.total_cmp(&other.distance) == Ordering::Equal && self.node == other.node
    }
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other.distance.total_cmp(&self.distance)
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-source shortest path over the active materialized graph (§4.H
/// step 4). `excluded_edges` lets k-alternatives search re-run Dijkstra with
/// the previously found path's edges removed, without mutating the store.
/// A lazy linear-scan style priority queue would also satisfy the spec; this
/// uses a binary heap, which is the teacher's idiom for the same algorithm.
pub async fn shortest_path<G: GraphStore>(
    graph: &G,
    from: &str,
    to: &str,
    excluded_edges: &HashSet<(String, String)>,
) -> Result<Option<(Vec<String>, f64)>> {
    if from == to {
        return Ok(Some((vec![from.to_string()], 0.0)));
    }

    let mut dist: HashMap<String, f64> = HashMap::new();
    let mut prev: HashMap<String, String> = HashMap::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut heap = std::collections::BinaryHeap::new();

    dist.insert(from.to_string(), 0.0);
    heap.push(State { distance: 0.0, node: from.to_string() });

    while let Some(State { distance, node }) = heap.pop() {
        if !visited.insert(node.clone()) {
            continue;
        }
        if node == to {
            return Ok(Some((reconstruct_path(&prev, from, to), distance)));
        }

        for neighbor in graph.get_neighbors(&node).await? {
            if excluded_edges.contains(&(node.clone(), neighbor.neighbor_id.clone())) {
                continue;
            }
            if visited.contains(&neighbor.neighbor_id) {
                continue;
            }
            let candidate = distance + neighbor.weight;
            let known = *dist.get(&neighbor.neighbor_id).unwrap_or(&f64::INFINITY);
            if candidate < known {
                dist.insert(neighbor.neighbor_id.clone(), candidate);
                prev.insert(neighbor.neighbor_id.clone(), node.clone());
                heap.push(State { distance: candidate, node: neighbor.neighbor_id });
            }
        }
    }

    Ok(None)
}

fn reconstruct_path(prev: &HashMap<String, String>, from: &str, to: &str) -> Vec<String> {
    let mut path = vec![to.to_string()];
    let mut current = to.to_string();
    while current != from {
        current = prev.get(&current).expect("broken predecessor chain").clone();
        path.push(current.clone());
    }
    path.reverse();
    path
}

/// The join-by-separator path key used to deduplicate alternatives (§9
/// "path key").
pub fn path_key(path: &[String]) -> String {
    path.join("|")
}

/// Every consecutive-pair edge along a path, the unit k-alternatives search
/// excludes to force a re-route.
pub fn edges_of(path: &[String]) -> HashSet<(String, String)> {
    path.windows(2).map(|pair| (pair[0].clone(), pair[1].clone())).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use graphstore::{EdgeMetadata, GraphStatistics, GraphStructure, Neighbor};
    use model::GraphMetadata;

    use super::*;

    struct FakeGraph {
        edges: HashMap<&'static str, Vec<(&'static str, f64)>>,
    }

    #[async_trait]
    impl GraphStore for FakeGraph {
        async fn save_graph(
            &self,
            _version: &str,
            _nodes: &[String],
            _edges_by_from: &HashMap<String, Vec<Neighbor>>,
            _metadata: &GraphMetadata,
        ) -> graphstore::Result<()> {
            unimplemented!()
        }

        async fn set_current_version(&self, _version: &str, _metadata: &GraphMetadata) -> graphstore::Result<()> {
            unimplemented!()
        }

        async fn current_version(&self) -> graphstore::Result<Option<String>> {
            unimplemented!()
        }

        async fn current_metadata(&self) -> graphstore::Result<Option<GraphMetadata>> {
            unimplemented!()
        }

        async fn delete_graph(&self, _version: &str) -> graphstore::Result<()> {
            unimplemented!()
        }

        async fn get_neighbors(&self, node_id: &str) -> graphstore::Result<Vec<Neighbor>> {
            Ok(self
                .edges
                .get(node_id)
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .map(|(neighbor_id, weight)| Neighbor {
                    neighbor_id: neighbor_id.to_string(),
                    weight,
                    metadata: EdgeMetadata { distance_km: None, transport_type: None, route_id: None },
                })
                .collect())
        }

        async fn has_node(&self, node_id: &str) -> graphstore::Result<bool> {
            Ok(self.edges.contains_key(node_id))
        }

        async fn has_edge(&self, _from: &str, _to: &str) -> graphstore::Result<bool> {
            unimplemented!()
        }

        async fn get_edge_weight(&self, from: &str, to: &str) -> graphstore::Result<Option<f64>> {
            Ok(self.edges.get(from).and_then(|edges| edges.iter().find(|(n, _)| *n == to).map(|(_, w)| *w)))
        }

        async fn get_edge_metadata(&self, _from: &str, _to: &str) -> graphstore::Result<Option<EdgeMetadata>> {
            unimplemented!()
        }

        async fn export_graph_structure(&self) -> graphstore::Result<GraphStructure> {
            unimplemented!()
        }

        async fn import_graph_structure(
            &self,
            _version: &str,
            _structure: &GraphStructure,
            _metadata: &GraphMetadata,
        ) -> graphstore::Result<()> {
            unimplemented!()
        }

        async fn get_graph_statistics(&self) -> graphstore::Result<GraphStatistics> {
            unimplemented!()
        }
    }

    fn diamond() -> FakeGraph {
        let mut edges = HashMap::new();
        edges.insert("a", vec![("b", 1.0), ("c", 5.0)]);
        edges.insert("b", vec![("d", 1.0)]);
        edges.insert("c", vec![("d", 1.0)]);
        edges.insert("d", vec![]);
        FakeGraph { edges }
    }

    #[tokio::test]
    async fn picks_cheapest_path() {
        let graph = diamond();
        let (path, distance) = shortest_path(&graph, "a", "d", &HashSet::new()).await.unwrap().unwrap();
        assert_eq!(path, vec!["a", "b", "d"]);
        assert_eq!(distance, 2.0);
    }

    #[tokio::test]
    async fn excluding_cheapest_edges_reroutes() {
        let graph = diamond();
        let excluded = edges_of(&["a".to_string(), "b".to_string(), "d".to_string()]);
        let (path, distance) = shortest_path(&graph, "a", "d", &excluded).await.unwrap().unwrap();
        assert_eq!(path, vec!["a", "c", "d"]);
        assert_eq!(distance, 6.0);
    }

    #[tokio::test]
    async fn same_node_is_trivial() {
        let graph = diamond();
        let (path, distance) = shortest_path(&graph, "a", "a", &HashSet::new()).await.unwrap().unwrap();
        assert_eq!(path, vec!["a"]);
        assert_eq!(distance, 0.0);
    }

    #[tokio::test]
    async fn disconnected_nodes_yield_no_path() {
        let mut edges = HashMap::new();
        edges.insert("a", vec![]);
        edges.insert("b", vec![]);
        let graph = FakeGraph { edges };
        assert!(shortest_path(&graph, "a", "b", &HashSet::new()).await.unwrap().is_none());
    }
}
