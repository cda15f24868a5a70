use storage::{Database, StopRepo, VirtualStopRepo};

use crate::error::{QueryError, Result};

/// City-resolution result (§4.H step 2): the representative stop picked to
/// stand in for a requested city, whichever of the real/virtual lookups
/// found it first.
pub(crate) struct ResolvedStop {
    pub id: String,
    pub city_id: Option<String>,
    pub name: String,
}

/// `getRealStopsByCityName`, falling back to `getVirtualStopsByCityName`
/// when the real lookup is empty; fails `NO_STOPS_FOUND` only when both are.
pub(crate) async fn resolve_city<D: Database>(database: &D, city: &str) -> Result<ResolvedStop> {
    let mut auto = database.auto();

    if let Some(stop) = auto.get_real_stops_by_city_name(city).await?.into_iter().next() {
        return Ok(ResolvedStop { id: stop.id, city_id: Some(stop.city_id), name: stop.name });
    }
    if let Some(stop) = auto.get_virtual_stops_by_city_name(city).await?.into_iter().next() {
        return Ok(ResolvedStop { id: stop.id, city_id: Some(stop.city_id), name: stop.name });
    }

    Err(QueryError::no_stops_found(city))
}

/// Human-readable city name for display, preferring the unified reference's
/// original-cased entry over a raw stop/city id; falls back to stripping the
/// `"г. "` prefix synthetic stop names carry (§4.E step 2).
pub(crate) fn display_name(city_id: Option<&str>, stop_name: &str) -> String {
    if let Some(city) = city_id.and_then(reference::unified_city_by_normalized_name) {
        return city.name.clone();
    }
    stop_name.strip_prefix("г. ").unwrap_or(stop_name).to_string()
}

/// Resolves a path node back to a display city name for segment hydration
/// (§4.H step 5): `findRealStopById` first, then `findVirtualStopById`.
/// Falls back to the raw stop id only if neither lookup finds it, which
/// would itself indicate the graph has drifted from the relational store.
pub(crate) async fn resolve_stop_city<D: Database>(database: &D, stop_id: &str) -> Result<String> {
    let mut auto = database.auto();

    if let Some(stop) = auto.find_real_stop_by_id(stop_id).await? {
        return Ok(display_name(Some(&stop.city_id), &stop.name));
    }
    if let Some(stop) = auto.find_virtual_stop_by_id(stop_id).await? {
        return Ok(display_name(Some(&stop.city_id), &stop.name));
    }

    Ok(stop_id.to_string())
}
