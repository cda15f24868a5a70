use model::{Flight, Metadata, TransportType};
use sqlx::{types::Json, FromRow};

use super::route::parse_transport_type;

#[derive(Debug, Clone, FromRow)]
pub struct FlightRow {
    pub id: String,
    pub from_stop_id: String,
    pub to_stop_id: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub days_of_week: Vec<i16>,
    pub route_id: Option<String>,
    pub price_rub: f64,
    pub is_virtual: bool,
    pub transport_type: Option<String>,
    pub metadata: Json<Metadata>,
}

impl FlightRow {
    pub fn into_model(self) -> Flight {
        Flight {
            id: self.id,
            from_stop_id: self.from_stop_id,
            to_stop_id: self.to_stop_id,
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
            days_of_week: self.days_of_week.into_iter().map(|d| d as u8).collect(),
            route_id: self.route_id,
            price_rub: self.price_rub,
            is_virtual: self.is_virtual,
            transport_type: self.transport_type.as_deref().map(parse_transport_type),
            metadata: self.metadata.0,
        }
    }
}

pub fn transport_type_tag(transport_type: Option<TransportType>) -> Option<&'static str> {
    transport_type.map(|t| t.as_tag())
}
