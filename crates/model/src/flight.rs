use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::{metadata::Metadata, route::TransportType};

/// A scheduled or synthesized departure between two stops. Times are stored
/// as `HH:MM` strings rather than a full timestamp: a flight recurs on the
/// days named in `days_of_week` independent of any particular calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: String,
    pub from_stop_id: String,
    pub to_stop_id: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub days_of_week: Vec<u8>,
    pub route_id: Option<String>,
    pub price_rub: f64,
    pub is_virtual: bool,
    pub transport_type: Option<TransportType>,
    pub metadata: Metadata,
}

impl HasId for Flight {
    type IdType = String;
}

impl Flight {
    /// Minutes between `departure_time` and `arrival_time`, wrapping by one
    /// day when arrival is numerically earlier (a flight spanning midnight).
    /// Returns `None` when either time fails to parse as `HH:MM`.
    pub fn duration_minutes(&self) -> Option<i64> {
        let departure = parse_hhmm(&self.departure_time)?;
        let arrival = parse_hhmm(&self.arrival_time)?;
        let delta = arrival - departure;
        Some(if delta < 0 { delta + 24 * 60 } else { delta })
    }
}

fn parse_hhmm(value: &str) -> Option<i64> {
    let (hours, minutes) = value.split_once(':')?;
    let hours: i64 = hours.trim().parse().ok()?;
    let minutes: i64 = minutes.trim().parse().ok()?;
    Some(hours * 60 + minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight(departure: &str, arrival: &str) -> Flight {
        Flight {
            id: "f".to_owned(),
            from_stop_id: "a".to_owned(),
            to_stop_id: "b".to_owned(),
            departure_time: departure.to_owned(),
            arrival_time: arrival.to_owned(),
            days_of_week: vec![1, 2, 3, 4, 5, 6, 7],
            route_id: None,
            price_rub: 15000.0,
            is_virtual: false,
            transport_type: Some(TransportType::Plane),
            metadata: Metadata::new(),
        }
    }

    #[test]
    fn same_day_duration() {
        assert_eq!(flight("08:00", "14:00").duration_minutes(), Some(360));
    }

    #[test]
    fn wraps_past_midnight() {
        assert_eq!(flight("23:30", "01:15").duration_minutes(), Some(105));
    }

    #[test]
    fn rejects_unparseable_times() {
        assert_eq!(flight("garbage", "14:00").duration_minutes(), None);
    }
}
