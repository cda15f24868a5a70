use serde::{Deserialize, Serialize};

use crate::transport_type::TransportTypeTag;

/// One hop of a hydrated route (§4.H step 5). `departure_time`/`arrival_time`
/// come from the flight picked for this leg, when one exists; legs with no
/// scheduled flight (pure transfer/ferry edges) leave them `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub from_stop_id: String,
    pub to_stop_id: String,
    pub from_city: String,
    pub to_city: String,
    /// The edge metadata's raw tag (e.g. `"TRANSFER"`), kept alongside the
    /// normalized `transport_type` since "transfer" has no dedicated tag in
    /// the normalized enum (it falls to `UNKNOWN`) but the risk contract
    /// still needs to count transfers specifically.
    pub raw_transport_type: String,
    pub transport_type: TransportTypeTag,
    pub duration_minutes: f64,
    pub distance_km: Option<f64>,
    pub price_rub: f64,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
}
