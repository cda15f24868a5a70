use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utility::id::HasId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GridType {
    MainGrid,
    DenseCity,
    AirportGrid,
}

/// A real stop found near a virtual stop at creation time, kept so the
/// graph builder can wire transfer edges without recomputing distances.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyStop {
    pub stop_id: String,
    pub distance_km: f64,
}

/// A stop synthesized by the virtual-entities worker to stand in for a city
/// that otherwise has zero real stops. Created once; never mutated — the
/// whole virtual set is regenerated (dropped and recreated) instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualStop {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub grid_type: GridType,
    pub city_id: String,
    pub grid_position: Option<(i32, i32)>,
    pub nearby_real_stops: Vec<NearbyStop>,
    pub created_at: DateTime<Utc>,
}

impl HasId for VirtualStop {
    type IdType = String;
}
