use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::{
    metadata::Metadata,
    route::{EdgeSource, RouteStop},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VirtualRouteType {
    RealToVirtual,
    VirtualToReal,
    VirtualToVirtual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransportMode {
    Walk,
    Transfer,
    Shuttle,
}

impl TransportMode {
    pub fn as_tag(&self) -> &'static str {
        match self {
            TransportMode::Walk => "WALK",
            TransportMode::Transfer => "TRANSFER",
            TransportMode::Shuttle => "SHUTTLE",
        }
    }
}

/// An edge synthesized by the virtual-entities worker to connect a real or
/// virtual stop to another. `metadata.transportType` records the "real"
/// transport tag (e.g. `"PLANE"`) the shuttle leg stands in for, which the
/// graph builder copies onto the resulting edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualRoute {
    pub id: String,
    pub route_type: VirtualRouteType,
    pub from_stop_id: String,
    pub to_stop_id: String,
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub transport_mode: TransportMode,
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
}

impl HasId for VirtualRoute {
    type IdType = String;
}

impl EdgeSource for VirtualRoute {
    fn from_stop_id(&self) -> &str {
        &self.from_stop_id
    }

    fn to_stop_id(&self) -> &str {
        &self.to_stop_id
    }

    fn transport_type_tag(&self) -> &str {
        self.metadata.transport_type().unwrap_or_else(|| self.transport_mode.as_tag())
    }

    fn duration_minutes(&self) -> Option<f64> {
        Some(self.duration_minutes)
    }

    fn distance_km(&self) -> Option<f64> {
        Some(self.distance_km)
    }

    fn stops_sequence(&self) -> Option<&[RouteStop]> {
        None
    }
}
