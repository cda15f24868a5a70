use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utility::{geo, id::HasId};

use crate::metadata::Metadata;

/// A stop ingested from the transport dataset. Created and updated only by
/// ingestion (external to this repository); every worker here treats
/// `RealStop` rows as read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealStop {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city_id: String,
    pub is_airport: bool,
    pub is_railway_station: bool,
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RealStop {
    pub fn distance_km_to(&self, latitude: f64, longitude: f64) -> f64 {
        geo::haversine_distance(self.latitude, self.longitude, latitude, longitude)
    }
}

impl HasId for RealStop {
    type IdType = String;
}
