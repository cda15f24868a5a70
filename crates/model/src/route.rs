use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::metadata::Metadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransportType {
    Bus,
    Train,
    Plane,
    Water,
    Ferry,
}

impl TransportType {
    pub fn as_tag(&self) -> &'static str {
        match self {
            TransportType::Bus => "BUS",
            TransportType::Train => "TRAIN",
            TransportType::Plane => "PLANE",
            TransportType::Water => "WATER",
            TransportType::Ferry => "FERRY",
        }
    }
}

/// One stop within a route's ordered sequence. `sequence` starts at 1 and is
/// strictly increasing; a route must have at least two stops.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    pub stop_id: String,
    pub sequence: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    pub transport_type: TransportType,
    pub from_stop_id: String,
    pub to_stop_id: String,
    pub stops: Vec<RouteStop>,
    pub duration_minutes: Option<f64>,
    pub distance_km: Option<f64>,
    pub operator: Option<String>,
    pub route_number: Option<String>,
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HasId for Route {
    type IdType = String;
}

/// Common contract shared by `Route` and `VirtualRoute` so the graph builder
/// can treat both as edge producers without matching on which one it has.
pub trait EdgeSource {
    fn from_stop_id(&self) -> &str;
    fn to_stop_id(&self) -> &str;
    fn transport_type_tag(&self) -> &str;
    fn duration_minutes(&self) -> Option<f64>;
    fn distance_km(&self) -> Option<f64>;
    fn stops_sequence(&self) -> Option<&[RouteStop]>;
}

impl EdgeSource for Route {
    fn from_stop_id(&self) -> &str {
        &self.from_stop_id
    }

    fn to_stop_id(&self) -> &str {
        &self.to_stop_id
    }

    fn transport_type_tag(&self) -> &str {
        self.transport_type.as_tag()
    }

    fn duration_minutes(&self) -> Option<f64> {
        self.duration_minutes
    }

    fn distance_km(&self) -> Option<f64> {
        self.distance_km
    }

    fn stops_sequence(&self) -> Option<&[RouteStop]> {
        Some(&self.stops)
    }
}
