use chrono::{DateTime, Utc};
use model::{Metadata, Route, RouteStop, TransportType};
use sqlx::{types::Json, FromRow};

#[derive(Debug, Clone, FromRow)]
pub struct RouteRow {
    pub id: String,
    pub transport_type: String,
    pub from_stop_id: String,
    pub to_stop_id: String,
    pub stops: Json<Vec<RouteStop>>,
    pub duration_minutes: Option<f64>,
    pub distance_km: Option<f64>,
    pub operator: Option<String>,
    pub route_number: Option<String>,
    pub metadata: Json<Metadata>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn transport_type_tag(transport_type: TransportType) -> &'static str {
    transport_type.as_tag()
}

pub fn parse_transport_type(tag: &str) -> TransportType {
    match tag {
        "TRAIN" => TransportType::Train,
        "PLANE" => TransportType::Plane,
        "WATER" => TransportType::Water,
        "FERRY" => TransportType::Ferry,
        _ => TransportType::Bus,
    }
}

impl RouteRow {
    pub fn into_model(self) -> Route {
        Route {
            id: self.id,
            transport_type: parse_transport_type(&self.transport_type),
            from_stop_id: self.from_stop_id,
            to_stop_id: self.to_stop_id,
            stops: self.stops.0,
            duration_minutes: self.duration_minutes,
            distance_km: self.distance_km,
            operator: self.operator,
            route_number: self.route_number,
            metadata: self.metadata.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
