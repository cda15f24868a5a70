use std::collections::HashMap;

use async_trait::async_trait;
use model::GraphMetadata;
use redis::{aio::ConnectionManager, AsyncCommands, AsyncIter};

use crate::{
    error::Result,
    types::{EdgeMetadata, GraphStatistics, GraphStructure, Neighbor},
    GraphStore,
};

const CURRENT_VERSION_KEY: &str = "graph:current:version";
const CURRENT_METADATA_KEY: &str = "graph:current:metadata";
const SCAN_COUNT: usize = 500;

fn nodes_key(version: &str) -> String {
    format!("graph:{version}:nodes")
}

fn neighbors_key(version: &str, node_id: &str) -> String {
    format!("graph:{version}:neighbors:{node_id}")
}

/// Redis-backed implementation of the materialized graph store. Every write
/// path goes through exactly one worker instance at a time (the pipeline is
/// serial) — readers only ever observe `current_version`, which is flipped
/// after a new snapshot is fully written under its own version keyspace.
#[derive(Clone)]
pub struct RedisGraphStore {
    manager: ConnectionManager,
}

impl RedisGraphStore {
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        let manager = client.get_connection_manager().await?;
        Ok(Self { manager })
    }

    async fn current_version_and_conn(&self) -> Result<(Option<String>, ConnectionManager)> {
        let mut conn = self.manager.clone();
        let version: Option<String> = conn.get(CURRENT_VERSION_KEY).await?;
        Ok((version, conn))
    }
}

#[async_trait]
impl GraphStore for RedisGraphStore {
    async fn save_graph(
        &self,
        version: &str,
        nodes: &[String],
        edges_by_from: &HashMap<String, Vec<Neighbor>>,
        _metadata: &GraphMetadata,
    ) -> Result<()> {
        let mut conn = self.manager.clone();
        let mut pipe = redis::pipe();
        pipe.atomic();

        if !nodes.is_empty() {
            pipe.sadd(nodes_key(version), nodes);
        }
        for node_id in nodes {
            let neighbors = edges_by_from.get(node_id).cloned().unwrap_or_default();
            let payload = serde_json::to_string(&neighbors)?;
            pipe.set(neighbors_key(version, node_id), payload);
        }

        let _: () = pipe.query_async(&mut conn).await?;
        Ok(())
    }

    async fn set_current_version(&self, version: &str, metadata: &GraphMetadata) -> Result<()> {
        let mut conn = self.manager.clone();
        let metadata_payload = serde_json::to_string(metadata)?;

        let mut pipe = redis::pipe();
        pipe.atomic();
        pipe.set(CURRENT_VERSION_KEY, version);
        pipe.set(CURRENT_METADATA_KEY, metadata_payload);

        let _: () = pipe.query_async(&mut conn).await?;
        Ok(())
    }

    async fn current_version(&self) -> Result<Option<String>> {
        let mut conn = self.manager.clone();
        let version: Option<String> = conn.get(CURRENT_VERSION_KEY).await?;
        Ok(version)
    }

    async fn current_metadata(&self) -> Result<Option<GraphMetadata>> {
        let mut conn = self.manager.clone();
        let payload: Option<String> = conn.get(CURRENT_METADATA_KEY).await?;
        Ok(payload.map(|raw| serde_json::from_str(&raw)).transpose()?)
    }

    /// Enumerates `<version>:*` via cursor-based SCAN (never the blocking
    /// KEYS command) and deletes whatever is found in batches.
    async fn delete_graph(&self, version: &str) -> Result<()> {
        let mut conn = self.manager.clone();
        let pattern = format!("graph:{version}:*");

        let mut keys = Vec::new();
        {
            let mut iter: AsyncIter<String> = conn.scan_match(&pattern).await?;
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
        }

        for chunk in keys.chunks(SCAN_COUNT) {
            let _: () = conn.del(chunk).await?;
        }
        Ok(())
    }

    async fn get_neighbors(&self, node_id: &str) -> Result<Vec<Neighbor>> {
        let (version, mut conn) = self.current_version_and_conn().await?;
        let Some(version) = version else {
            return Ok(Vec::new());
        };
        let payload: Option<String> = conn.get(neighbors_key(&version, node_id)).await?;
        Ok(match payload {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        })
    }

    async fn has_node(&self, node_id: &str) -> Result<bool> {
        let (version, mut conn) = self.current_version_and_conn().await?;
        let Some(version) = version else {
            return Ok(false);
        };
        let exists: bool = conn.sismember(nodes_key(&version), node_id).await?;
        Ok(exists)
    }

    async fn has_edge(&self, from: &str, to: &str) -> Result<bool> {
        Ok(self.get_neighbors(from).await?.iter().any(|n| n.neighbor_id == to))
    }

    async fn get_edge_weight(&self, from: &str, to: &str) -> Result<Option<f64>> {
        Ok(self
            .get_neighbors(from)
            .await?
            .into_iter()
            .find(|n| n.neighbor_id == to)
            .map(|n| n.weight))
    }

    async fn get_edge_metadata(&self, from: &str, to: &str) -> Result<Option<EdgeMetadata>> {
        Ok(self
            .get_neighbors(from)
            .await?
            .into_iter()
            .find(|n| n.neighbor_id == to)
            .map(|n| n.metadata))
    }

    async fn export_graph_structure(&self) -> Result<GraphStructure> {
        let (version, mut conn) = self.current_version_and_conn().await?;
        let Some(version) = version else {
            return Ok(GraphStructure {
                nodes: Vec::new(),
                neighbors: Vec::new(),
            });
        };

        let nodes: Vec<String> = conn.smembers(nodes_key(&version)).await?;
        let mut neighbors = Vec::with_capacity(nodes.len());
        for node_id in &nodes {
            let payload: Option<String> = conn.get(neighbors_key(&version, node_id)).await?;
            let parsed: Vec<Neighbor> = match payload {
                Some(raw) => serde_json::from_str(&raw)?,
                None => Vec::new(),
            };
            neighbors.push((node_id.clone(), parsed));
        }

        Ok(GraphStructure { nodes, neighbors })
    }

    async fn import_graph_structure(
        &self,
        version: &str,
        structure: &GraphStructure,
        metadata: &GraphMetadata,
    ) -> Result<()> {
        let edges_by_from: HashMap<String, Vec<Neighbor>> =
            structure.neighbors.iter().cloned().collect();
        self.save_graph(version, &structure.nodes, &edges_by_from, metadata).await
    }

    async fn get_graph_statistics(&self) -> Result<GraphStatistics> {
        let (version, mut conn) = self.current_version_and_conn().await?;
        let Some(version) = version else {
            return Ok(GraphStatistics {
                nodes: 0,
                edges: 0,
                avg_out_degree: 0.0,
                density_percent: 0.0,
            });
        };

        let nodes: Vec<String> = conn.smembers(nodes_key(&version)).await?;
        let node_count = nodes.len() as u64;

        let mut edge_count: u64 = 0;
        for node_id in &nodes {
            let payload: Option<String> = conn.get(neighbors_key(&version, node_id)).await?;
            if let Some(raw) = payload {
                let neighbors: Vec<Neighbor> = serde_json::from_str(&raw)?;
                edge_count += neighbors.len() as u64;
            }
        }

        let avg_out_degree = if node_count > 0 {
            edge_count as f64 / node_count as f64
        } else {
            0.0
        };
        let max_possible_edges = node_count.saturating_mul(node_count.saturating_sub(1));
        let density_percent = if max_possible_edges > 0 {
            edge_count as f64 / max_possible_edges as f64 * 100.0
        } else {
            0.0
        };

        Ok(GraphStatistics {
            nodes: node_count,
            edges: edge_count,
            avg_out_degree,
            density_percent,
        })
    }
}
