use chrono::{DateTime, Utc};
use model::{GridType, NearbyStop, VirtualStop};
use sqlx::{types::Json, FromRow};

#[derive(Debug, Clone, FromRow)]
pub struct VirtualStopRow {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub grid_type: String,
    pub city_id: String,
    pub grid_position_x: Option<i32>,
    pub grid_position_y: Option<i32>,
    pub nearby_real_stops: Json<Vec<NearbyStop>>,
    pub created_at: DateTime<Utc>,
}

impl VirtualStopRow {
    pub fn into_model(self) -> VirtualStop {
        let grid_type = match self.grid_type.as_str() {
            "DENSE_CITY" => GridType::DenseCity,
            "AIRPORT_GRID" => GridType::AirportGrid,
            _ => GridType::MainGrid,
        };
        VirtualStop {
            id: self.id,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            grid_type,
            city_id: self.city_id,
            grid_position: self.grid_position_x.zip(self.grid_position_y),
            nearby_real_stops: self.nearby_real_stops.0,
            created_at: self.created_at,
        }
    }
}

pub fn grid_type_tag(grid_type: GridType) -> &'static str {
    match grid_type {
        GridType::MainGrid => "MAIN_GRID",
        GridType::DenseCity => "DENSE_CITY",
        GridType::AirportGrid => "AIRPORT_GRID",
    }
}
