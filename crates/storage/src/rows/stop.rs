use chrono::{DateTime, Utc};
use model::{Metadata, RealStop};
use sqlx::{types::Json, FromRow};

#[derive(Debug, Clone, FromRow)]
pub struct RealStopRow {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city_id: String,
    pub is_airport: bool,
    pub is_railway_station: bool,
    pub metadata: Json<Metadata>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RealStopRow {
    pub fn into_model(self) -> RealStop {
        RealStop {
            id: self.id,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            city_id: self.city_id,
            is_airport: self.is_airport,
            is_railway_station: self.is_railway_station,
            metadata: self.metadata.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
