use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use graphstore::GraphStore;
use storage::{Database, FlightRepo};

use crate::city::{self, ResolvedStop};
use crate::dijkstra::{self, edges_of, path_key};
use crate::error::{QueryError, Result};
use crate::request::RouteQueryRequest;
use crate::response::QueryResponse;
use crate::risk::RiskFn;
use crate::route::{BuiltRoute, RouteResult};
use crate::segment::Segment;
use crate::transport_type::TransportTypeTag;

const MAX_ALTERNATIVES: usize = 2;

struct QueryOutcome {
    primary: RouteResult,
    alternatives: Vec<RouteResult>,
    risk_assessment: Option<serde_json::Value>,
    graph_version: String,
}

/// Read-only route query engine (§4.H). Holds no state of its own beyond its
/// collaborators — the relational store, the hot KV graph store, and an
/// optional risk-scoring callback — and never writes to either store.
pub struct RouteQueryEngine<D: Database, G: GraphStore> {
    database: D,
    graph_store: G,
    risk_fn: Option<Arc<RiskFn>>,
}

impl<D: Database, G: GraphStore> RouteQueryEngine<D, G> {
    pub fn new(database: D, graph_store: G) -> Self {
        Self { database, graph_store, risk_fn: None }
    }

    pub fn with_risk_fn<F>(mut self, risk_fn: F) -> Self
    where
        F: Fn(&BuiltRoute) -> Option<serde_json::Value> + Send + Sync + 'static,
    {
        self.risk_fn = Some(Arc::new(risk_fn));
        self
    }

    /// Runs one query to completion. Never returns an `Err`: every failure
    /// path produces a `QueryResponse` with `success = false` and a
    /// machine-readable `error_code` (§7).
    pub async fn query(&self, request: RouteQueryRequest) -> QueryResponse {
        let started = Instant::now();
        let deadline = request.deadline;

        let outcome = match deadline {
            Some(budget) => match tokio::time::timeout(budget, self.run(request)).await {
                Ok(result) => result,
                Err(_) => Err((QueryError::deadline_exceeded(), None)),
            },
            None => self.run(request).await,
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match outcome {
            Ok(outcome) => QueryResponse::success(
                outcome.primary,
                outcome.alternatives,
                outcome.risk_assessment,
                elapsed_ms,
                outcome.graph_version,
            ),
            Err((error, graph_version)) => QueryResponse::failure(error, elapsed_ms, graph_version),
        }
    }

    async fn run(&self, request: RouteQueryRequest) -> core::result::Result<QueryOutcome, (QueryError, Option<String>)> {
        request.validate().map_err(|error| (error, None))?;

        // §4.H step 1: availability gate.
        let version = self
            .graph_store
            .current_version()
            .await
            .map_err(QueryError::from)
            .map_err(|error| (error, None))?;
        let Some(version) = version else {
            return Err((QueryError::graph_unavailable(), None));
        };

        self.run_against_version(&request, &version).await.map_err(|error| (error, Some(version)))
    }

    async fn run_against_version(&self, request: &RouteQueryRequest, version: &str) -> Result<QueryOutcome> {
        // §4.H step 2: city -> representative stop resolution.
        let from_stop = city::resolve_city(&self.database, &request.from_city).await?;
        let to_stop = city::resolve_city(&self.database, &request.to_city).await?;

        // §4.H step 3: node-existence gate, distinguishing stale-graph from not-found.
        let mut missing = Vec::new();
        if !self.graph_store.has_node(&from_stop.id).await? {
            missing.push(from_stop.id.clone());
        }
        if !self.graph_store.has_node(&to_stop.id).await? {
            missing.push(to_stop.id.clone());
        }
        if !missing.is_empty() {
            return Err(QueryError::graph_out_of_sync(missing));
        }

        // §4.H step 4: least-time path.
        let (best_path, _) = dijkstra::shortest_path(&self.graph_store, &from_stop.id, &to_stop.id, &HashSet::new())
            .await?
            .ok_or_else(QueryError::no_route)?;

        // §4.H step 5: segment hydration.
        let primary_segments = self.hydrate_path(&best_path, request.date).await?;
        let primary = self.build_route_result(&from_stop, &to_stop, primary_segments, request.passengers, request.date);

        // §4.H step 6: up to two alternatives via cumulative edge exclusion.
        let alternatives = self
            .find_alternatives(&from_stop, &to_stop, &best_path, request.passengers, request.date)
            .await?;

        // §4.H step 7: risk annotation, never fatal.
        let risk_assessment = self.assess_risk(&primary.segments);

        Ok(QueryOutcome { primary, alternatives, risk_assessment, graph_version: version.to_string() })
    }

    async fn find_alternatives(
        &self,
        from_stop: &ResolvedStop,
        to_stop: &ResolvedStop,
        best_path: &[String],
        passengers: u32,
        date: NaiveDate,
    ) -> Result<Vec<RouteResult>> {
        let mut excluded = edges_of(best_path);
        let mut seen_keys: HashSet<String> = HashSet::from([path_key(best_path)]);
        let mut alternatives = Vec::new();

        while alternatives.len() < MAX_ALTERNATIVES {
            let Some((path, _)) =
                dijkstra::shortest_path(&self.graph_store, &from_stop.id, &to_stop.id, &excluded).await?
            else {
                break;
            };

            let key = path_key(&path);
            if !seen_keys.insert(key) {
                break;
            }
            excluded.extend(edges_of(&path));

            let segments = self.hydrate_path(&path, date).await?;
            alternatives.push(self.build_route_result(from_stop, to_stop, segments, passengers, date));
        }

        alternatives.sort_by(|a, b| a.total_duration_minutes.total_cmp(&b.total_duration_minutes));
        Ok(alternatives)
    }

    fn build_route_result(
        &self,
        from_stop: &ResolvedStop,
        to_stop: &ResolvedStop,
        segments: Vec<Segment>,
        passengers: u32,
        date: NaiveDate,
    ) -> RouteResult {
        let total_distance_km = segments.iter().filter_map(|s| s.distance_km).sum();
        let total_duration_minutes = segments.iter().map(|s| s.duration_minutes).sum();
        let total_price_rub = segments.iter().map(|s| s.price_rub).sum::<f64>() * passengers as f64;

        RouteResult {
            segments,
            total_distance_km,
            total_duration_minutes,
            total_price_rub,
            from_city: city::display_name(from_stop.city_id.as_deref(), &from_stop.name),
            to_city: city::display_name(to_stop.city_id.as_deref(), &to_stop.name),
            departure_date: date,
        }
    }

    async fn hydrate_path(&self, path: &[String], date: NaiveDate) -> Result<Vec<Segment>> {
        let pairs = path.windows(2);
        let hydrated = futures::future::join_all(pairs.map(|pair| self.hydrate_segment(&pair[0], &pair[1], date))).await;

        let mut segments = Vec::with_capacity(hydrated.len());
        for result in hydrated {
            if let Some(segment) = result? {
                segments.push(segment);
            }
        }
        Ok(segments)
    }

    async fn hydrate_segment(&self, from_id: &str, to_id: &str, date: NaiveDate) -> Result<Option<Segment>> {
        let weight_fut = self.graph_store.get_edge_weight(from_id, to_id);
        let metadata_fut = self.graph_store.get_edge_metadata(from_id, to_id);
        let flights_fut = async {
            let mut autocommit = self.database.auto();
            FlightRepo::get_flights_between_stops(&mut autocommit, from_id, to_id, date).await
        };

        let (weight, metadata, flights) = futures::join!(weight_fut, metadata_fut, flights_fut);
        let weight = weight?;
        let metadata = metadata?;
        let flights = flights?;

        let Some(weight) = weight else {
            log::warn!("dropping segment {from_id}->{to_id}: no edge weight in the active graph");
            return Ok(None);
        };

        // §9 open question on flight selection: the first result is used as-is;
        // `get_flights_between_stops` already orders deterministically by
        // departure time so this choice is stable across repeated calls.
        let flight = flights.into_iter().next();

        let raw_transport_type = metadata
            .as_ref()
            .and_then(|m| m.transport_type.clone())
            .or_else(|| flight.as_ref().and_then(|f| f.transport_type).map(|t| t.as_tag().to_string()))
            .unwrap_or_else(|| "UNKNOWN".to_string());
        let transport_type = TransportTypeTag::from_tag(&raw_transport_type);

        let from_city = city::resolve_stop_city(&self.database, from_id).await?;
        let to_city = city::resolve_stop_city(&self.database, to_id).await?;

        Ok(Some(Segment {
            from_stop_id: from_id.to_string(),
            to_stop_id: to_id.to_string(),
            from_city,
            to_city,
            raw_transport_type,
            transport_type,
            duration_minutes: weight,
            distance_km: metadata.and_then(|m| m.distance_km),
            price_rub: flight.as_ref().map(|f| f.price_rub).unwrap_or(0.0),
            departure_time: flight.as_ref().map(|f| f.departure_time.clone()),
            arrival_time: flight.map(|f| f.arrival_time),
        }))
    }

    /// §4.H step 7: never lets a panicking or absent risk callback fail the
    /// query (§7 "non-fatal auxiliary failure").
    fn assess_risk(&self, segments: &[Segment]) -> Option<serde_json::Value> {
        let risk_fn = self.risk_fn.as_ref()?;
        let built_route = BuiltRoute::from_segments(segments);

        match std::panic::catch_unwind(AssertUnwindSafe(|| risk_fn(&built_route))) {
            Ok(assessment) => assessment,
            Err(_) => {
                log::warn!("risk assessment callback panicked; omitting riskAssessment from the response");
                None
            }
        }
    }
}
