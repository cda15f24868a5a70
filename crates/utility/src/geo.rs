pub const EARTH_RADIUS_KM: f64 = 6371.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

pub fn calculate_bounding_box(
    lat: f64,
    lon: f64,
    radius_km: f64,
) -> ((f64, f64), (f64, f64)) {
    // Convert latitude and longitude from degrees to radians
    let lat_rad = to_radians(lat);
    let lon_rad = to_radians(lon);

    // Latitude bounds
    let min_lat = lat_rad - radius_km / EARTH_RADIUS_KM;
    let max_lat = lat_rad + radius_km / EARTH_RADIUS_KM;

    // Longitude bounds (adjusted by latitude)
    let min_lon = lon_rad - radius_km / (EARTH_RADIUS_KM * lat_rad.cos());
    let max_lon = lon_rad + radius_km / (EARTH_RADIUS_KM * lat_rad.cos());

    // Convert bounds back to degrees
    let min_lat_deg = to_degrees(min_lat);
    let max_lat_deg = to_degrees(max_lat);
    let min_lon_deg = to_degrees(min_lon);
    let max_lon_deg = to_degrees(max_lon);

    ((min_lat_deg, min_lon_deg), (max_lat_deg, max_lon_deg))
}

pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance via the spherical law of cosines, matching the
/// formula `findRealStopsNearby` evaluates at the database level so that
/// in-memory callers (tests, dry runs without a database) agree with it.
pub fn spherical_law_of_cosines_km(
    center_latitude: f64,
    center_longitude: f64,
    point_latitude: f64,
    point_longitude: f64,
) -> f64 {
    let lat1 = to_radians(center_latitude);
    let lat2 = to_radians(point_latitude);
    let dlon = to_radians(point_longitude - center_longitude);

    let cos_angle =
        (lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * dlon.cos()).clamp(-1.0, 1.0);

    EARTH_RADIUS_KM * cos_angle.acos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_has_zero_distance() {
        let distance = spherical_law_of_cosines_km(62.0355, 129.6755, 62.0355, 129.6755);
        assert!(distance.abs() < 1e-6);
    }

    #[test]
    fn haversine_and_cosine_law_roughly_agree() {
        let a = haversine_distance(62.0355, 129.6755, 55.9736, 37.4145);
        let b = spherical_law_of_cosines_km(62.0355, 129.6755, 55.9736, 37.4145);
        assert!((a - b).abs() < 1.0, "a={a} b={b}");
    }

    #[test]
    fn bounding_box_contains_center() {
        let ((min_lat, min_lon), (max_lat, max_lon)) =
            calculate_bounding_box(62.0355, 129.6755, 50.0);
        assert!(min_lat < 62.0355 && 62.0355 < max_lat);
        assert!(min_lon < 129.6755 && 129.6755 < max_lon);
    }
}
