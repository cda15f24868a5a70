use model::{RealStop, VirtualStop};

/// A real or virtual stop reduced to the fields the connectivity-synthesis
/// steps need, so step 3 and step 4 of the virtual-entities worker can treat
/// both kinds uniformly without matching on which one they have.
#[derive(Debug, Clone)]
pub(crate) struct StopRef {
    pub id: String,
    pub city_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub is_airport: bool,
    pub is_railway_station: bool,
    pub is_virtual: bool,
}

impl From<&RealStop> for StopRef {
    fn from(stop: &RealStop) -> Self {
        Self {
            id: stop.id.clone(),
            city_id: stop.city_id.clone(),
            latitude: stop.latitude,
            longitude: stop.longitude,
            is_airport: stop.is_airport,
            is_railway_station: stop.is_railway_station,
            is_virtual: false,
        }
    }
}

impl From<&VirtualStop> for StopRef {
    fn from(stop: &VirtualStop) -> Self {
        Self {
            id: stop.id.clone(),
            city_id: stop.city_id.clone(),
            latitude: stop.latitude,
            longitude: stop.longitude,
            is_airport: false,
            is_railway_station: false,
            is_virtual: true,
        }
    }
}

/// Picks the representative stop for a city: airport first, then railway
/// station, then whatever comes first by id (a stable tie-break so repeated
/// runs pick the same stop).
pub(crate) fn select_main_stop(stops: &[StopRef]) -> Option<&StopRef> {
    stops.iter().min_by_key(|s| {
        let rank = if s.is_airport {
            0
        } else if s.is_railway_station {
            1
        } else {
            2
        };
        (rank, s.id.clone())
    })
}
