use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::segment::Segment;
use crate::transport_type::TransportTypeTag;

/// One found itinerary: either the least-time path or one of its
/// alternatives (§6 query response shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    pub segments: Vec<Segment>,
    pub total_distance_km: f64,
    pub total_duration_minutes: f64,
    pub total_price_rub: f64,
    pub from_city: String,
    pub to_city: String,
    pub departure_date: NaiveDate,
}

/// Canonical shape handed to the external risk-assessment function (§4.H
/// step 7, §9): the risk algorithm's internals are out of scope here, but
/// the contract it consumes is this repository's to define.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltRoute {
    pub segments: Vec<Segment>,
    pub transfer_count: usize,
    pub transport_types: Vec<TransportTypeTag>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
}

impl BuiltRoute {
    pub fn from_segments(segments: &[Segment]) -> Self {
        let transfer_count = segments.iter().filter(|s| s.raw_transport_type.eq_ignore_ascii_case("TRANSFER")).count();
        let transport_types = segments.iter().map(|s| s.transport_type).collect();
        let departure_time = segments.first().and_then(|s| s.departure_time.clone());
        let arrival_time = segments.last().and_then(|s| s.arrival_time.clone());
        Self { segments: segments.to_vec(), transfer_count, transport_types, departure_time, arrival_time }
    }
}
