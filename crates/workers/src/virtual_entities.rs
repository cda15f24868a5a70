use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Datelike, Duration, Utc};
use model::{
    Flight, GridType, Metadata, TransportMode, TransportType, VirtualRoute, VirtualRouteType, VirtualStop,
};
use reference::normalize_city_name;
use storage::{Database, DatasetRepo, FlightRepo, RouteRepo, StopRepo, VirtualRouteRepo, VirtualStopRepo};
use utility::{geo::haversine_distance, stable_id::generate_stable_id};

use crate::{
    error::{Result, WorkerError},
    outcome::WorkerOutcome,
    stop_ref::{select_main_stop, StopRef},
    worker::Worker,
};

const FEDERAL_YAKUTIA_PLANE_DURATION: f64 = 240.0;
const HUB_BUS_DURATION: f64 = 180.0;
const FEDERAL_PLANE_DURATION: f64 = 180.0;
const NEARBY_STOP_RADIUS_KM: f64 = 50.0;
const DAILY_DEPARTURES: [&str; 2] = ["08:00", "16:00"];
const DAYS_AHEAD: i64 = 365;

/// §4.E: ensures every reference city has at least one stop and that every
/// pair of cities with a stop is reachable through either a direct link or a
/// hub-routed pair of synthesized legs.
pub struct VirtualEntitiesWorker;

#[async_trait]
impl<D: Database> Worker<D> for VirtualEntitiesWorker {
    fn id(&self) -> &'static str {
        "virtual-entities-generator"
    }

    async fn can_run(&self, database: &D) -> Result<bool> {
        let mut auto = database.auto();
        if auto.latest_dataset().await?.is_none() {
            return Ok(false);
        }
        Ok(auto.virtual_stop_count().await? == 0)
    }

    async fn run(&self, database: &D) -> WorkerOutcome {
        match run_inner(database).await {
            Ok(outcome) => outcome,
            Err(WorkerError::NoDataset) => WorkerOutcome::NoDataset,
            Err(why) => WorkerOutcome::ExecutionError { message: why.to_string() },
        }
    }
}

async fn run_inner<D: Database>(database: &D) -> Result<WorkerOutcome> {
    let mut auto = database.auto();

    let dataset = auto.latest_dataset().await?.ok_or(WorkerError::NoDataset)?;
    if auto.virtual_stop_count().await? > 0 {
        return Ok(WorkerOutcome::SkippedAlreadyDone {
            reason: "at least one virtual stop already exists".to_string(),
        });
    }

    let real_stops = auto.get_all_real_stops().await?;
    let present_cities: std::collections::HashSet<String> =
        real_stops.iter().map(|s| normalize_city_name(&s.city_id)).collect();

    let mut reference_cities = reference::get_all_federal_cities();
    reference_cities.extend(reference::get_all_yakutia_cities());

    let missing_cities: Vec<_> = reference_cities
        .into_iter()
        .filter(|city| !present_cities.contains(&normalize_city_name(&city.name)))
        .collect();

    let mut created_virtual_stops = Vec::new();
    for city in &missing_cities {
        let city_id = normalize_city_name(&city.name);
        let nearby = auto
            .find_real_stops_nearby(city.latitude, city.longitude, NEARBY_STOP_RADIUS_KM)
            .await?
            .into_iter()
            .map(|stop| model::NearbyStop {
                distance_km: stop.distance_km_to(city.latitude, city.longitude),
                stop_id: stop.id,
            })
            .collect();

        created_virtual_stops.push(VirtualStop {
            id: format!("virtual-stop-{}", generate_stable_id(&[&city.name])),
            name: format!("г. {}", city.name),
            latitude: city.latitude,
            longitude: city.longitude,
            grid_type: GridType::MainGrid,
            city_id,
            grid_position: None,
            nearby_real_stops: nearby,
            created_at: Utc::now(),
        });
    }

    let mut by_city: HashMap<String, Vec<StopRef>> = HashMap::new();
    for stop in &real_stops {
        by_city.entry(normalize_city_name(&stop.city_id)).or_default().push(StopRef::from(stop));
    }
    for stop in &created_virtual_stops {
        by_city.entry(stop.city_id.clone()).or_default().push(StopRef::from(stop));
    }

    let hub_city_id = normalize_city_name("Якутск");
    let hub_stop = by_city.get(&hub_city_id).and_then(|stops| select_main_stop(stops)).cloned();

    let mut virtual_routes = Vec::new();

    match &hub_stop {
        Some(hub) => {
            for stop in &created_virtual_stops {
                if stop.id == hub.id {
                    continue;
                }
                let stop_ref = StopRef::from(stop);
                let distance = haversine_distance(stop.latitude, stop.longitude, hub.latitude, hub.longitude);
                let duration = hub_leg_duration_minutes(distance);
                virtual_routes.push(make_virtual_route(&stop_ref, hub, distance, duration, "BUS"));
                virtual_routes.push(make_virtual_route(hub, &stop_ref, distance, duration, "BUS"));
            }
        }
        None => {
            for (i, a) in created_virtual_stops.iter().enumerate() {
                for b in &created_virtual_stops[i + 1..] {
                    let a_ref = StopRef::from(a);
                    let b_ref = StopRef::from(b);
                    let distance = haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude);
                    let duration = hub_leg_duration_minutes(distance);
                    virtual_routes.push(make_virtual_route(&a_ref, &b_ref, distance, duration, "BUS"));
                    virtual_routes.push(make_virtual_route(&b_ref, &a_ref, distance, duration, "BUS"));
                }
            }
        }
    }

    let mut city_ids: Vec<String> = by_city.keys().cloned().collect();
    city_ids.sort();

    for (i, city_a) in city_ids.iter().enumerate() {
        for city_b in &city_ids[i + 1..] {
            let stops_a = &by_city[city_a];
            let stops_b = &by_city[city_b];
            let Some(main_a) = select_main_stop(stops_a).cloned() else { continue };
            let Some(main_b) = select_main_stop(stops_b).cloned() else { continue };

            if route_exists(database, &main_a.id, &main_b.id).await? {
                continue;
            }

            let a_federal = is_federal_city(city_a);
            let b_federal = is_federal_city(city_b);

            match (a_federal, b_federal) {
                (true, true) => {
                    virtual_routes.push(make_virtual_route(&main_a, &main_b, 0.0, FEDERAL_PLANE_DURATION, "PLANE"));
                    virtual_routes.push(make_virtual_route(&main_b, &main_a, 0.0, FEDERAL_PLANE_DURATION, "PLANE"));
                }
                (false, false) => {
                    let distance = haversine_distance(main_a.latitude, main_a.longitude, main_b.latitude, main_b.longitude);
                    let duration = hub_leg_duration_minutes(distance);
                    virtual_routes.push(make_virtual_route(&main_a, &main_b, distance, duration, "BUS"));
                    virtual_routes.push(make_virtual_route(&main_b, &main_a, distance, duration, "BUS"));
                }
                _ => {
                    let (federal, yakutia) = if a_federal {
                        (main_a.clone(), main_b.clone())
                    } else {
                        (main_b.clone(), main_a.clone())
                    };

                    if yakutia.city_id == hub_city_id {
                        let distance = haversine_distance(federal.latitude, federal.longitude, yakutia.latitude, yakutia.longitude);
                        virtual_routes.push(make_virtual_route(&federal, &yakutia, distance, FEDERAL_YAKUTIA_PLANE_DURATION, "PLANE"));
                        virtual_routes.push(make_virtual_route(&yakutia, &federal, distance, FEDERAL_YAKUTIA_PLANE_DURATION, "PLANE"));
                    } else if let Some(hub) = &hub_stop {
                        let hub_to_fed_distance = haversine_distance(hub.latitude, hub.longitude, federal.latitude, federal.longitude);
                        let hub_to_yak_distance = haversine_distance(hub.latitude, hub.longitude, yakutia.latitude, yakutia.longitude);

                        virtual_routes.push(make_virtual_route(&federal, hub, hub_to_fed_distance, FEDERAL_YAKUTIA_PLANE_DURATION, "PLANE"));
                        virtual_routes.push(make_virtual_route(hub, &federal, hub_to_fed_distance, FEDERAL_YAKUTIA_PLANE_DURATION, "PLANE"));
                        virtual_routes.push(make_virtual_route(hub, &yakutia, hub_to_yak_distance, HUB_BUS_DURATION, "BUS"));
                        virtual_routes.push(make_virtual_route(&yakutia, hub, hub_to_yak_distance, HUB_BUS_DURATION, "BUS"));
                    }
                }
            }
        }
    }

    let virtual_flights: Vec<Flight> = virtual_routes.iter().flat_map(make_daily_flights).collect();

    let stops_created = created_virtual_stops.len() as u64;
    let routes_created = virtual_routes.len() as u64;
    let flights_created = virtual_flights.len() as u64;

    database
        .perform_transaction(|tx| {
            let stops = created_virtual_stops.clone();
            let routes = virtual_routes.clone();
            let flights = virtual_flights.clone();
            Box::pin(async move {
                tx.save_virtual_stops_batch(&stops).await?;
                tx.save_virtual_routes_batch(&routes).await?;
                tx.save_flights_batch(&flights).await?;
                Ok(())
            })
        })
        .await?;

    let mut counts = dataset.counts;
    counts.virtual_stops = stops_created;
    counts.virtual_routes = routes_created;
    counts.flights += flights_created;
    auto.update_dataset_counts(&dataset.version, counts).await?;

    Ok(WorkerOutcome::Success {
        summary: format!(
            "created {stops_created} virtual stops, {routes_created} virtual routes, {flights_created} virtual flights"
        ),
        next_worker: Some("graph-builder"),
    })
}

fn is_federal_city(normalized_city_id: &str) -> bool {
    reference::unified_city_by_normalized_name(normalized_city_id)
        .map(|city| city.is_federal_city)
        .unwrap_or(false)
}

/// Mirrors the literal §4.E formula (distance at an assumed 60 km/h), never
/// under an hour even for very short hops.
fn hub_leg_duration_minutes(distance_km: f64) -> f64 {
    (distance_km / 60.0 * 60.0).round().max(60.0)
}

async fn route_exists<D: Database>(database: &D, from: &str, to: &str) -> Result<bool> {
    let mut auto = database.auto();
    if auto.find_direct_route(from, to).await?.is_some() {
        return Ok(true);
    }
    if auto.find_direct_route(to, from).await?.is_some() {
        return Ok(true);
    }
    if auto.find_direct_virtual_route(from, to).await?.is_some() {
        return Ok(true);
    }
    if auto.find_direct_virtual_route(to, from).await?.is_some() {
        return Ok(true);
    }
    Ok(false)
}

fn make_virtual_route(
    from: &StopRef,
    to: &StopRef,
    distance_km: f64,
    duration_minutes: f64,
    real_transport_tag: &str,
) -> VirtualRoute {
    VirtualRoute {
        id: format!("virtual-route-{}", generate_stable_id(&[&from.id, &to.id])),
        route_type: route_type_for(from.is_virtual, to.is_virtual),
        from_stop_id: from.id.clone(),
        to_stop_id: to.id.clone(),
        distance_km,
        duration_minutes,
        transport_mode: TransportMode::Shuttle,
        metadata: Metadata::new().with("transportType", real_transport_tag),
        created_at: Utc::now(),
    }
}

/// The enum only distinguishes strictly mixed endpoints; same-kind pairs
/// (real-real or virtual-virtual) both fall back to `VirtualToVirtual`,
/// since this field exists for the graph builder to spot a real/virtual
/// seam, not to re-describe a stop's own kind.
fn route_type_for(from_is_virtual: bool, to_is_virtual: bool) -> VirtualRouteType {
    match (from_is_virtual, to_is_virtual) {
        (false, true) => VirtualRouteType::RealToVirtual,
        (true, false) => VirtualRouteType::VirtualToReal,
        _ => VirtualRouteType::VirtualToVirtual,
    }
}

/// §4.E step 5: one year of daily departures at 08:00 and 16:00 — 365 days
/// times two departures, 730 flights per virtual route. Each flight is
/// pinned to its own calendar day (`days_of_week` carries that single day's
/// weekday) rather than recurring on all seven, since these are concrete
/// one-year-ahead departures, not a weekly template.
fn make_daily_flights(route: &VirtualRoute) -> Vec<Flight> {
    let price = route.metadata.base_fare().unwrap_or(1000.0);
    let transport_type = route.metadata.transport_type().and_then(parse_transport_tag);
    let duration = route.duration_minutes.round() as i64;
    let start_date = Utc::now().date_naive();

    let mut flights = Vec::with_capacity(DAYS_AHEAD as usize * DAILY_DEPARTURES.len());
    for offset in 0..DAYS_AHEAD {
        let date = start_date + Duration::days(offset);
        let weekday = date.weekday().number_from_monday() as u8;
        for departure in DAILY_DEPARTURES {
            flights.push(Flight {
                id: format!("flight-{}-{}-{}", route.id, date.format("%Y%m%d"), departure.replace(':', "")),
                from_stop_id: route.from_stop_id.clone(),
                to_stop_id: route.to_stop_id.clone(),
                departure_time: departure.to_string(),
                arrival_time: add_minutes_wrapping(departure, duration),
                days_of_week: vec![weekday],
                route_id: None,
                price_rub: price,
                is_virtual: true,
                transport_type,
                metadata: Metadata::new(),
            });
        }
    }
    flights
}

fn parse_transport_tag(tag: &str) -> Option<TransportType> {
    match tag {
        "BUS" => Some(TransportType::Bus),
        "TRAIN" => Some(TransportType::Train),
        "PLANE" => Some(TransportType::Plane),
        "WATER" => Some(TransportType::Water),
        "FERRY" => Some(TransportType::Ferry),
        _ => None,
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_route() -> VirtualRoute {
        VirtualRoute {
            id: "vr-1".to_string(),
            route_type: VirtualRouteType::VirtualToVirtual,
            from_stop_id: "stop-a".to_string(),
            to_stop_id: "stop-b".to_string(),
            distance_km: 500.0,
            duration_minutes: HUB_BUS_DURATION,
            transport_mode: TransportMode::Bus,
            metadata: Metadata::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn generates_730_flights_per_route() {
        let flights = make_daily_flights(&sample_route());
        assert_eq!(flights.len(), 365 * 2);
    }

    #[test]
    fn flight_ids_are_unique_per_day() {
        let flights = make_daily_flights(&sample_route());
        let ids: std::collections::HashSet<_> = flights.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids.len(), flights.len());
    }

    #[test]
    fn each_flight_carries_its_own_weekday() {
        let flights = make_daily_flights(&sample_route());
        assert!(flights.iter().all(|f| f.days_of_week.len() == 1));
    }
}
