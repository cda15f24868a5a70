use chrono::{DateTime, Utc};
use model::{Metadata, TransportMode, VirtualRoute, VirtualRouteType};
use sqlx::{types::Json, FromRow};

#[derive(Debug, Clone, FromRow)]
pub struct VirtualRouteRow {
    pub id: String,
    pub route_type: String,
    pub from_stop_id: String,
    pub to_stop_id: String,
    pub distance_km: f64,
    pub duration_minutes: f64,
    pub transport_mode: String,
    pub metadata: Json<Metadata>,
    pub created_at: DateTime<Utc>,
}

pub fn route_type_tag(route_type: VirtualRouteType) -> &'static str {
    match route_type {
        VirtualRouteType::RealToVirtual => "REAL_TO_VIRTUAL",
        VirtualRouteType::VirtualToReal => "VIRTUAL_TO_REAL",
        VirtualRouteType::VirtualToVirtual => "VIRTUAL_TO_VIRTUAL",
    }
}

pub fn transport_mode_tag(transport_mode: TransportMode) -> &'static str {
    transport_mode.as_tag()
}

impl VirtualRouteRow {
    pub fn into_model(self) -> VirtualRoute {
        let route_type = match self.route_type.as_str() {
            "VIRTUAL_TO_REAL" => VirtualRouteType::VirtualToReal,
            "VIRTUAL_TO_VIRTUAL" => VirtualRouteType::VirtualToVirtual,
            _ => VirtualRouteType::RealToVirtual,
        };
        let transport_mode = match self.transport_mode.as_str() {
            "TRANSFER" => TransportMode::Transfer,
            "SHUTTLE" => TransportMode::Shuttle,
            _ => TransportMode::Walk,
        };
        VirtualRoute {
            id: self.id,
            route_type,
            from_stop_id: self.from_stop_id,
            to_stop_id: self.to_stop_id,
            distance_km: self.distance_km,
            duration_minutes: self.duration_minutes,
            transport_mode,
            metadata: self.metadata.0,
            created_at: self.created_at,
        }
    }
}
