use async_trait::async_trait;
use chrono::Utc;
use model::{Flight, Metadata, RealStop, Route, RouteStop, TransportType};
use reference::normalize_city_name;
use storage::{Database, DatasetRepo, FlightRepo, RouteRepo, StopRepo};
use utility::stable_id::generate_stable_id;
use validators::is_admissible_stop;

use crate::{
    error::{Result, WorkerError},
    outcome::WorkerOutcome,
    worker::Worker,
};

const FLIGHT_DURATION_MINUTES: i64 = 240;
const FLIGHT_DISTANCE_KM: f64 = 2000.0;
const FLIGHT_BASE_FARE: f64 = 15000.0;
const DEPARTURES: [&str; 3] = ["08:00", "14:00", "20:00"];

/// §4.F: generates a scheduled hub-to-federal-city round trip for every
/// federal city that doesn't already have a direct real route to the hub.
pub struct AirRouteWorker;

#[async_trait]
impl<D: Database> Worker<D> for AirRouteWorker {
    fn id(&self) -> &'static str {
        "air-route-generator"
    }

    async fn can_run(&self, database: &D) -> Result<bool> {
        Ok(database.auto().latest_dataset().await?.is_some())
    }

    async fn run(&self, database: &D) -> WorkerOutcome {
        match run_inner(database).await {
            Ok(outcome) => outcome,
            Err(WorkerError::NoDataset) => WorkerOutcome::NoDataset,
            Err(WorkerError::NoHubStops(_)) => WorkerOutcome::NoHubStops,
            Err(why) => WorkerOutcome::ExecutionError { message: why.to_string() },
        }
    }
}

async fn run_inner<D: Database>(database: &D) -> Result<WorkerOutcome> {
    let mut auto = database.auto();
    auto.latest_dataset().await?.ok_or(WorkerError::NoDataset)?;

    let all_stops = auto.get_all_real_stops().await?;
    let hub_stop = select_hub_stop(&all_stops).ok_or(WorkerError::NoHubStops(None))?.clone();

    let mut created_routes = Vec::new();
    let mut created_flights = Vec::new();

    for city in reference::get_all_federal_cities() {
        let city_id = normalize_city_name(&city.name);

        let Some(city_stop) = all_stops.iter().find(|s| {
            let stop_city = normalize_city_name(&s.city_id);
            is_admissible_stop(&s.id, &s.name, Some(stop_city.as_str()), s.is_airport, s.metadata.get_str("type"))
                && stop_city == city_id
        }) else {
            continue;
        };

        if auto.find_real_stop_by_id(&hub_stop.id).await?.is_none()
            || auto.find_real_stop_by_id(&city_stop.id).await?.is_none()
        {
            continue;
        }

        for (from, to, direction) in [(&hub_stop, city_stop, "outbound"), (city_stop, &hub_stop, "inbound")] {
            if auto.find_direct_route(&from.id, &to.id).await?.is_some() {
                continue;
            }

            let route_id = format!(
                "air-route-{}-{}-{direction}",
                normalize_city_name(&from.city_id),
                normalize_city_name(&to.city_id)
            );

            let route = Route {
                id: route_id.clone(),
                transport_type: TransportType::Plane,
                from_stop_id: from.id.clone(),
                to_stop_id: to.id.clone(),
                stops: vec![
                    RouteStop { stop_id: from.id.clone(), sequence: 1 },
                    RouteStop { stop_id: to.id.clone(), sequence: 2 },
                ],
                duration_minutes: Some(FLIGHT_DURATION_MINUTES as f64),
                distance_km: Some(FLIGHT_DISTANCE_KM),
                operator: Some("air-route-generator".to_string()),
                route_number: None,
                metadata: Metadata::new().with("baseFare", FLIGHT_BASE_FARE),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };

            for day in 1u8..=7 {
                for departure in DEPARTURES {
                    let hhmm = departure.replace(':', "");
                    created_flights.push(Flight {
                        id: format!("flight-{route_id}-{day}-{hhmm}"),
                        from_stop_id: from.id.clone(),
                        to_stop_id: to.id.clone(),
                        departure_time: departure.to_string(),
                        arrival_time: add_minutes_wrapping(departure, FLIGHT_DURATION_MINUTES),
                        days_of_week: vec![day],
                        route_id: Some(route_id.clone()),
                        price_rub: FLIGHT_BASE_FARE,
                        is_virtual: false,
                        transport_type: Some(TransportType::Plane),
                        metadata: Metadata::new(),
                    });
                }
            }

            created_routes.push(route);
        }
    }

    if created_routes.is_empty() {
        return Ok(WorkerOutcome::SkippedAlreadyDone {
            reason: "all routes already exist".to_string(),
        });
    }

    let routes_created = created_routes.len() as u64;
    let flights_created = created_flights.len() as u64;

    database
        .perform_transaction(|tx| {
            let routes = created_routes.clone();
            let flights = created_flights.clone();
            Box::pin(async move {
                tx.save_routes_batch(&routes).await?;
                tx.save_flights_batch(&flights).await?;
                Ok(())
            })
        })
        .await?;

    Ok(WorkerOutcome::Success {
        summary: format!("created {routes_created} air routes, {flights_created} flights"),
        next_worker: None,
    })
}

fn add_minutes_wrapping(hhmm: &str, minutes: i64) -> String {
    let Some((hours, mins)) = hhmm.split_once(':') else {
        return hhmm.to_string();
    };
    let (Ok(hours), Ok(mins)) = (hours.parse::<i64>(), mins.parse::<i64>()) else {
        return hhmm.to_string();
    };
    let total = (hours * 60 + mins + minutes).rem_euclid(24 * 60);
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// §4.F step 1: prefer an `isAirport` stop among Yakutsk's own stops,
/// falling back to any Yakutsk stop. Never considers a federal city's
/// airport stop — the hub is Yakutsk by definition, not "wherever the
/// first airport happens to be".
fn select_hub_stop(all_stops: &[RealStop]) -> Option<&RealStop> {
    let hub_city = normalize_city_name("Якутск");
    let yakutsk_stops: Vec<&RealStop> = all_stops.iter().filter(|s| normalize_city_name(&s.city_id) == hub_city).collect();
    yakutsk_stops.iter().find(|s| s.is_airport).or_else(|| yakutsk_stops.first()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str, city: &str, is_airport: bool) -> RealStop {
        RealStop {
            id: id.to_string(),
            name: id.to_string(),
            latitude: 0.0,
            longitude: 0.0,
            city_id: city.to_string(),
            is_airport,
            is_railway_station: false,
            metadata: Metadata::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn wraps_past_midnight() {
        assert_eq!(add_minutes_wrapping("20:00", 240), "00:00");
    }

    #[test]
    fn stays_within_day() {
        assert_eq!(add_minutes_wrapping("08:00", 240), "12:00");
    }

    #[test]
    fn prefers_yakutsk_airport_over_other_city_airports() {
        let stops = vec![stop("moscow-airport", "Москва", true), stop("yakutsk-bus", "Якутск", false), stop(
            "yakutsk-airport",
            "Якутск",
            true,
        )];
        assert_eq!(select_hub_stop(&stops).unwrap().id, "yakutsk-airport");
    }

    #[test]
    fn falls_back_to_first_yakutsk_stop_without_airport() {
        let stops = vec![stop("moscow-airport", "Москва", true), stop("yakutsk-bus", "Якутск", false)];
        assert_eq!(select_hub_stop(&stops).unwrap().id, "yakutsk-bus");
    }

    #[test]
    fn none_when_no_yakutsk_stop_exists() {
        let stops = vec![stop("moscow-airport", "Москва", true)];
        assert!(select_hub_stop(&stops).is_none());
    }
}
