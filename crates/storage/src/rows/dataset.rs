use chrono::{DateTime, Utc};
use model::{Dataset, DatasetCounts, DatasetSource};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct DatasetRow {
    pub id: i64,
    pub version: String,
    pub source: String,
    pub quality_score: f64,
    pub stops_count: i64,
    pub routes_count: i64,
    pub flights_count: i64,
    pub virtual_stops_count: i64,
    pub virtual_routes_count: i64,
    pub content_hash: String,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

impl DatasetRow {
    pub fn into_model(self) -> Dataset {
        let source = match self.source.as_str() {
            "ODATA" => DatasetSource::Odata,
            "HYBRID" => DatasetSource::Hybrid,
            _ => DatasetSource::Mock,
        };
        Dataset {
            id: self.id,
            version: self.version,
            source,
            quality_score: self.quality_score,
            counts: DatasetCounts {
                stops: self.stops_count.max(0) as u64,
                routes: self.routes_count.max(0) as u64,
                flights: self.flights_count.max(0) as u64,
                virtual_stops: self.virtual_stops_count.max(0) as u64,
                virtual_routes: self.virtual_routes_count.max(0) as u64,
            },
            content_hash: self.content_hash,
            created_at: self.created_at,
            active: self.active,
        }
    }
}

pub fn source_tag(source: DatasetSource) -> &'static str {
    match source {
        DatasetSource::Odata => "ODATA",
        DatasetSource::Mock => "MOCK",
        DatasetSource::Hybrid => "HYBRID",
    }
}
