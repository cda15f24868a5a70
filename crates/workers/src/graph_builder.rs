use std::collections::{HashMap, HashSet};
use std::time::Instant;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use graphstore::{EdgeMetadata, GraphStore, Neighbor};
use model::{classify_stop, EdgeSource, Flight, GraphMetadata, RealStop, Route, StopType, VirtualStop};
use reference::normalize_city_name;
use storage::{Database, DatasetRepo, FlightRepo, GraphMetadataRepo, RouteRepo, StopRepo, VirtualRouteRepo, VirtualStopRepo};
use validators::{is_admissible_stop, validate_ferry_edges, validate_structure, validate_transfer_edges};

use crate::{
    error::{Result, WorkerError},
    outcome::WorkerOutcome,
    worker::Worker,
};

const MIN_VALID_STOPS: usize = 10;
const WARN_STOP_THRESHOLD: usize = 30;
const DEFAULT_FLIGHT_DURATION: f64 = 180.0;
const FERRY_WEIGHT_MIN: f64 = 20.0;
const FERRY_WEIGHT_MAX: f64 = 65.0;
const FERRY_SEASON_WAIT_SUMMER: f64 = 17.5;
const FERRY_SEASON_WAIT_WINTER: f64 = 37.5;
const FALLBACK_ROUTE_DURATION: f64 = 60.0;

const TRANSFER_AIRPORT_TO_GROUND: f64 = 90.0;
const TRANSFER_GROUND_TO_AIRPORT: f64 = 120.0;
const TRANSFER_AIRPORT_TO_FERRY: f64 = 90.0;
const TRANSFER_FERRY_TO_GROUND: f64 = 30.0;
const TRANSFER_GROUND_TO_GROUND: f64 = 60.0;
const TRANSFER_FALLBACK: f64 = 60.0;

struct BuilderNode {
    id: String,
    name: String,
    city_id: Option<String>,
    latitude: f64,
    longitude: f64,
    is_virtual: bool,
    is_airport: bool,
    metadata_type: Option<String>,
}

struct BuiltEdge {
    from: String,
    to: String,
    weight: f64,
    distance_km: Option<f64>,
    transport_type: String,
    route_id: Option<String>,
}

/// §4.G: materializes the directed weighted graph from stops, routes and
/// flights, then validates and activates it. Owns the `GraphStore` handle
/// since, unlike the other two workers, it is also the graph's sole writer.
pub struct GraphBuilderWorker<G: GraphStore> {
    graph_store: G,
}

impl<G: GraphStore> GraphBuilderWorker<G> {
    pub fn new(graph_store: G) -> Self {
        Self { graph_store }
    }
}

#[async_trait]
impl<D: Database, G: GraphStore + Send + Sync> Worker<D> for GraphBuilderWorker<G> {
    fn id(&self) -> &'static str {
        "graph-builder"
    }

    async fn can_run(&self, database: &D) -> Result<bool> {
        let mut auto = database.auto();
        let Some(dataset) = auto.latest_dataset().await? else {
            return Ok(false);
        };
        Ok(auto.graph_metadata_for_dataset_version(&dataset.version).await?.is_none())
    }

    async fn run(&self, database: &D) -> WorkerOutcome {
        match run_inner(database, &self.graph_store).await {
            Ok(outcome) => outcome,
            Err(WorkerError::NoDataset) => WorkerOutcome::NoDataset,
            Err(WorkerError::InsufficientStops { found, required }) => {
                WorkerOutcome::InsufficientStops { found, required }
            }
            Err(why) => WorkerOutcome::ExecutionError { message: why.to_string() },
        }
    }
}

async fn run_inner<D: Database, G: GraphStore>(database: &D, graph_store: &G) -> Result<WorkerOutcome> {
    let started = Instant::now();
    let mut auto = database.auto();

    let dataset = auto.latest_dataset().await?.ok_or(WorkerError::NoDataset)?;
    if auto.graph_metadata_for_dataset_version(&dataset.version).await?.is_some() {
        return Ok(WorkerOutcome::SkippedAlreadyDone {
            reason: format!("a graph already references dataset version {}", dataset.version),
        });
    }

    let real_stops = auto.get_all_real_stops().await?;
    let virtual_stops = auto.get_all_virtual_stops().await?;
    let nodes = build_nodes(&real_stops, &virtual_stops);

    if nodes.len() < MIN_VALID_STOPS {
        return Err(WorkerError::InsufficientStops { found: nodes.len(), required: MIN_VALID_STOPS });
    }
    if nodes.len() < WARN_STOP_THRESHOLD {
        log::warn!("graph builder: only {} valid stops (warn threshold {WARN_STOP_THRESHOLD})", nodes.len());
    }

    let routes = auto.get_all_routes().await?;
    let virtual_routes = auto.get_all_virtual_routes().await?;
    let flights = auto.get_all_flights().await?;
    let routes_by_id: HashMap<&str, &Route> = routes.iter().map(|r| (r.id.as_str(), r)).collect();
    let node_ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let nodes_by_id: HashMap<&str, &BuilderNode> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    let current_month = Utc::now().month();
    let mut seen_keys: HashSet<(String, String, String)> = HashSet::new();
    let mut edges = Vec::new();

    for flight in &flights {
        if !node_ids.contains(flight.from_stop_id.as_str()) || !node_ids.contains(flight.to_stop_id.as_str()) {
            continue;
        }
        let key = (flight.from_stop_id.clone(), flight.to_stop_id.clone(), flight.route_id.clone().unwrap_or_else(|| "direct".to_string()));
        if !seen_keys.insert(key) {
            continue;
        }

        let referencing_route = flight.route_id.as_deref().and_then(|id| routes_by_id.get(id)).copied();
        let is_ferry = referencing_route.map(|r| r.transport_type.as_tag() == "FERRY").unwrap_or(false);

        if is_ferry {
            let from_node = nodes_by_id[flight.from_stop_id.as_str()];
            let to_node = nodes_by_id[flight.to_stop_id.as_str()];
            if !is_ferry_terminal(from_node) || !is_ferry_terminal(to_node) {
                log::warn!("dropping ferry edge {}->{}: endpoint is not a ferry terminal", flight.from_stop_id, flight.to_stop_id);
                continue;
            }

            let weight = ferry_weight(flight.duration_minutes(), referencing_route.and_then(|r| r.duration_minutes), current_month);
            edges.push(BuiltEdge {
                from: flight.from_stop_id.clone(),
                to: flight.to_stop_id.clone(),
                weight,
                distance_km: referencing_route.and_then(|r| r.distance_km),
                transport_type: "FERRY".to_string(),
                route_id: flight.route_id.clone(),
            });
            continue;
        }

        let weight = match flight.duration_minutes() {
            Some(minutes) if (1..10_000).contains(&minutes) => minutes as f64,
            _ => DEFAULT_FLIGHT_DURATION,
        };

        edges.push(BuiltEdge {
            from: flight.from_stop_id.clone(),
            to: flight.to_stop_id.clone(),
            weight,
            distance_km: referencing_route.and_then(|r| r.distance_km),
            transport_type: referencing_route
                .map(|r| r.transport_type.as_tag().to_string())
                .or_else(|| flight.transport_type.map(|t| t.as_tag().to_string()))
                .unwrap_or_else(|| "BUS".to_string()),
            route_id: flight.route_id.clone(),
        });
    }

    for route in &routes {
        add_stops_sequence_edges(route, route.id.as_str(), &node_ids, current_month, &mut seen_keys, &mut edges);
    }
    for route in &virtual_routes {
        add_stops_sequence_edges(route, route.id.as_str(), &node_ids, current_month, &mut seen_keys, &mut edges);
    }

    let mut by_city: HashMap<&str, Vec<&BuilderNode>> = HashMap::new();
    for node in &nodes {
        if let Some(city_id) = &node.city_id {
            by_city.entry(city_id.as_str()).or_default().push(node);
        }
    }
    for stops in by_city.values() {
        if stops.len() < 2 {
            continue;
        }
        for (i, a) in stops.iter().enumerate() {
            for b in &stops[i + 1..] {
                let weight = transfer_weight(stop_type_of(a), stop_type_of(b));
                edges.push(BuiltEdge {
                    from: a.id.clone(),
                    to: b.id.clone(),
                    weight,
                    distance_km: None,
                    transport_type: "TRANSFER".to_string(),
                    route_id: None,
                });
                edges.push(BuiltEdge {
                    from: b.id.clone(),
                    to: a.id.clone(),
                    weight,
                    distance_km: None,
                    transport_type: "TRANSFER".to_string(),
                    route_id: None,
                });
            }
        }
    }

    let validation_nodes: Vec<validators::GraphNode> = nodes
        .iter()
        .map(|n| validators::GraphNode { id: n.id.clone(), city_id: n.city_id.clone() })
        .collect();
    let validation_edges: Vec<validators::GraphEdge> = edges
        .iter()
        .map(|e| validators::GraphEdge { from: e.from.clone(), to: e.to.clone(), weight: e.weight, transport_type: e.transport_type.clone() })
        .collect();
    let validation_stops: Vec<validators::StopFacts> = nodes
        .iter()
        .map(|n| validators::StopFacts {
            id: n.id.clone(),
            name: n.name.clone(),
            is_airport: n.is_airport,
            metadata_type: n.metadata_type.clone(),
        })
        .collect();

    let structural = validate_structure(&validation_nodes, &validation_edges);
    let transfer = validate_transfer_edges(&validation_nodes, &validation_edges);
    let ferry = validate_ferry_edges(&validation_stops, &validation_edges);

    for warning in structural.warnings.iter().chain(&ferry.warnings) {
        log::warn!("graph validation warning: {warning}");
    }

    if !structural.is_valid() || !transfer.is_valid() {
        let mut errors = structural.errors.clone();
        errors.extend(transfer.errors.clone());
        return Err(WorkerError::ValidationFailed(errors));
    }

    let version = format!("graph-v{}", Utc::now().timestamp_millis());
    let node_ids_vec: Vec<String> = nodes.iter().map(|n| n.id.clone()).collect();
    let mut edges_by_from: HashMap<String, Vec<Neighbor>> = HashMap::new();
    for edge in &edges {
        edges_by_from.entry(edge.from.clone()).or_default().push(Neighbor {
            neighbor_id: edge.to.clone(),
            weight: edge.weight,
            metadata: EdgeMetadata {
                distance_km: edge.distance_km,
                transport_type: Some(edge.transport_type.clone()),
                route_id: edge.route_id.clone(),
            },
        });
    }

    let build_duration_ms = started.elapsed().as_millis() as u64;
    let metadata = GraphMetadata {
        id: 0,
        version: version.clone(),
        dataset_version: dataset.version.clone(),
        total_nodes: node_ids_vec.len() as u64,
        total_edges: edges.len() as u64,
        build_duration_ms,
        store_key: format!("graph:{version}"),
        backup_path: None,
        created_at: Utc::now(),
        active: false,
    };

    graph_store.save_graph(&version, &node_ids_vec, &edges_by_from, &metadata).await?;
    let inserted = auto.insert_graph_metadata(metadata.clone()).await?;
    auto.set_active_graph_metadata(&inserted.version).await?;
    graph_store.set_current_version(&inserted.version, &inserted).await?;

    log_per_federal_city_stats(&nodes, &edges);

    Ok(WorkerOutcome::Success {
        summary: format!(
            "built graph {version}: {} nodes, {} edges in {build_duration_ms}ms",
            node_ids_vec.len(),
            edges.len()
        ),
        next_worker: None,
    })
}

fn build_nodes(real_stops: &[RealStop], virtual_stops: &[VirtualStop]) -> Vec<BuilderNode> {
    let mut nodes = Vec::new();

    for stop in real_stops {
        let metadata_type = stop.metadata.get_str("type").map(str::to_string);
        if !is_admissible_stop(&stop.id, &stop.name, Some(&stop.city_id), stop.is_airport, metadata_type.as_deref()) {
            continue;
        }
        nodes.push(BuilderNode {
            id: stop.id.clone(),
            name: stop.name.clone(),
            city_id: Some(stop.city_id.clone()),
            latitude: stop.latitude,
            longitude: stop.longitude,
            is_virtual: false,
            is_airport: stop.is_airport,
            metadata_type,
        });
    }

    for stop in virtual_stops {
        if !is_admissible_stop(&stop.id, &stop.name, Some(&stop.city_id), false, None) {
            continue;
        }
        nodes.push(BuilderNode {
            id: stop.id.clone(),
            name: stop.name.clone(),
            city_id: Some(stop.city_id.clone()),
            latitude: stop.latitude,
            longitude: stop.longitude,
            is_virtual: true,
            is_airport: false,
            metadata_type: None,
        });
    }

    nodes
}

fn is_ferry_terminal(node: &BuilderNode) -> bool {
    stop_type_of(node) == StopType::FerryTerminal
}

fn stop_type_of(node: &BuilderNode) -> StopType {
    classify_stop(&node.id, &node.name, node.is_airport, node.metadata_type.as_deref())
}

fn transfer_weight(a: StopType, b: StopType) -> f64 {
    match (a, b) {
        (StopType::Airport, StopType::Ground) => TRANSFER_AIRPORT_TO_GROUND,
        (StopType::Ground, StopType::Airport) => TRANSFER_GROUND_TO_AIRPORT,
        (StopType::Airport, StopType::FerryTerminal) | (StopType::FerryTerminal, StopType::Airport) => TRANSFER_AIRPORT_TO_FERRY,
        (StopType::FerryTerminal, StopType::Ground) | (StopType::Ground, StopType::FerryTerminal) => TRANSFER_FERRY_TO_GROUND,
        (StopType::Ground, StopType::Ground) => TRANSFER_GROUND_TO_GROUND,
        _ => TRANSFER_FALLBACK,
    }
}

fn ferry_weight(scheduled_minutes: Option<i64>, route_duration: Option<f64>, month: u32) -> f64 {
    let base = match scheduled_minutes {
        Some(minutes) if minutes > 0 => minutes as f64,
        _ => route_duration.unwrap_or(FERRY_WEIGHT_MIN).clamp(FERRY_WEIGHT_MIN, FERRY_WEIGHT_MAX),
    };
    base + seasonal_wait(month)
}

fn seasonal_wait(month: u32) -> f64 {
    if (4..=9).contains(&month) {
        FERRY_SEASON_WAIT_SUMMER
    } else {
        FERRY_SEASON_WAIT_WINTER
    }
}

fn add_stops_sequence_edges<S: EdgeSource>(
    source: &S,
    route_id: &str,
    node_ids: &HashSet<&str>,
    current_month: u32,
    seen_keys: &mut HashSet<(String, String, String)>,
    edges: &mut Vec<BuiltEdge>,
) {
    let Some(stops) = source.stops_sequence() else {
        return;
    };
    let is_ferry = source.transport_type_tag() == "FERRY";

    for pair in stops.windows(2) {
        let from = pair[0].stop_id.as_str();
        let to = pair[1].stop_id.as_str();
        if !node_ids.contains(from) || !node_ids.contains(to) {
            continue;
        }
        let key = (from.to_string(), to.to_string(), route_id.to_string());
        if !seen_keys.insert(key) {
            continue;
        }

        let weight = if is_ferry {
            ferry_weight(None, source.duration_minutes(), current_month)
        } else {
            source.duration_minutes().unwrap_or(FALLBACK_ROUTE_DURATION)
        };

        edges.push(BuiltEdge {
            from: from.to_string(),
            to: to.to_string(),
            weight,
            distance_km: source.distance_km(),
            transport_type: source.transport_type_tag().to_string(),
            route_id: Some(route_id.to_string()),
        });
    }
}

fn log_per_federal_city_stats(nodes: &[BuilderNode], edges: &[BuiltEdge]) {
    let hub_city_id = normalize_city_name("Якутск");
    for city in reference::get_all_federal_cities() {
        let city_id = normalize_city_name(&city.name);
        let nodes_in_city = nodes.iter().filter(|n| n.city_id.as_deref() == Some(city_id.as_str())).count();
        let connects_to_hub = edges.iter().any(|e| {
            let from_city = nodes.iter().find(|n| n.id == e.from).and_then(|n| n.city_id.as_deref());
            let to_city = nodes.iter().find(|n| n.id == e.to).and_then(|n| n.city_id.as_deref());
            (from_city == Some(city_id.as_str()) && to_city == Some(hub_city_id.as_str()))
                || (to_city == Some(city_id.as_str()) && from_city == Some(hub_city_id.as_str()))
        });
        log::info!("federal city {}: {nodes_in_city} nodes, direct hub edge: {connects_to_hub}", city.name);
    }
}
