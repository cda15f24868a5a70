use std::collections::HashMap;

use model::UnifiedCity;
use once_cell::sync::Lazy;

pub use utility::normalize::normalize_city_name;

const UNIFIED_CITIES_JSON: &str = include_str!("../assets/unified_cities.json");
const AIRPORTS_JSON: &str = include_str!("../assets/airports.json");
const SUBURBS_JSON: &str = include_str!("../assets/suburbs.json");

/// Parsed and indexed form of the static reference assets, built once and
/// kept for the process lifetime. Readers only ever see a shared immutable
/// view (`&ReferenceData`); there is no mutation path after `Lazy` first
/// forces this.
pub struct ReferenceData {
    cities: Vec<UnifiedCity>,
    by_normalized_name: HashMap<String, usize>,
    airport_to_city: HashMap<String, String>,
    suburb_to_city: HashMap<String, String>,
}

impl ReferenceData {
    fn load() -> Self {
        let cities: Vec<UnifiedCity> = serde_json::from_str(UNIFIED_CITIES_JSON)
            .expect("unified_cities.json must be valid and match UnifiedCity");
        let airport_to_city: HashMap<String, String> =
            serde_json::from_str(AIRPORTS_JSON).expect("airports.json must be a string map");
        let suburb_to_city: HashMap<String, String> =
            serde_json::from_str(SUBURBS_JSON).expect("suburbs.json must be a string map");

        let by_normalized_name = cities
            .iter()
            .enumerate()
            .map(|(index, city)| (normalize_city_name(&city.name), index))
            .collect();

        Self {
            cities,
            by_normalized_name,
            airport_to_city,
            suburb_to_city,
        }
    }
}

static REFERENCE: Lazy<ReferenceData> = Lazy::new(ReferenceData::load);

/// Looks up a unified city whose normalized name matches `name` (which is
/// itself normalized before comparison, so callers may pass raw input).
pub fn unified_city_by_normalized_name(name: &str) -> Option<&'static UnifiedCity> {
    let key = normalize_city_name(name);
    REFERENCE
        .by_normalized_name
        .get(&key)
        .map(|&index| &REFERENCE.cities[index])
}

pub fn is_city_in_reference(name: &str) -> bool {
    unified_city_by_normalized_name(name).is_some()
}

pub fn get_all_federal_cities() -> Vec<&'static UnifiedCity> {
    REFERENCE.cities.iter().filter(|city| city.is_federal_city).collect()
}

pub fn get_all_yakutia_cities() -> Vec<&'static UnifiedCity> {
    REFERENCE.cities.iter().filter(|city| !city.is_federal_city).collect()
}

/// Resolves an airport name to the city it serves. Airport aliases carry
/// their original form; the returned city name is looked up again through
/// `unified_city_by_normalized_name` so callers get the canonical entry.
pub fn get_city_by_airport_name(airport_name: &str) -> Option<&'static UnifiedCity> {
    let city_name = REFERENCE.airport_to_city.get(airport_name)?;
    unified_city_by_normalized_name(city_name)
}

/// Resolves a suburb name to its main city, the way `getRealStopsByCityName`
/// falls back for stops tagged with a suburb rather than the city proper.
pub fn get_main_city_by_suburb(suburb_name: &str) -> Option<&'static UnifiedCity> {
    let city_name = REFERENCE.suburb_to_city.get(suburb_name)?;
    unified_city_by_normalized_name(city_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hub_city_is_in_reference() {
        assert!(is_city_in_reference("якутск"));
        assert!(is_city_in_reference("г. Якутск"));
    }

    #[test]
    fn unknown_city_is_absent() {
        assert!(!is_city_in_reference("Атлантида"));
    }

    #[test]
    fn federal_and_yakutia_sets_partition_reference() {
        let federal = get_all_federal_cities();
        let yakutia = get_all_yakutia_cities();
        assert!(!federal.is_empty());
        assert!(!yakutia.is_empty());
        assert_eq!(federal.len() + yakutia.len(), REFERENCE.cities.len());
    }

    #[test]
    fn airport_resolves_to_its_city() {
        let city = get_city_by_airport_name("Пулково").expect("known airport");
        assert_eq!(normalize_city_name(&city.name), normalize_city_name("Санкт-Петербург"));
    }

    #[test]
    fn suburb_resolves_to_main_city() {
        let city = get_main_city_by_suburb("Нижний Бестях").expect("known suburb");
        assert_eq!(normalize_city_name(&city.name), normalize_city_name("Якутск"));
    }
}
