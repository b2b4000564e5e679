use crate::config::constant::EARTH_RADIUS_KM;

/// Great-circle distance in kilometers between two lat/lon pairs (degrees).
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_for_identical_points() {
        assert!(haversine_km(4.711, -74.0721, 4.711, -74.0721).abs() < 1e-9);
    }

    #[test]
    fn symmetric() {
        let d1 = haversine_km(4.711, -74.0721, 6.2442, -75.5812);
        let d2 = haversine_km(6.2442, -75.5812, 4.711, -74.0721);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn bogota_to_medellin_is_about_246_km() {
        // Bogotá (4.7110, -74.0721) to Medellín (6.2442, -75.5812).
        let d = haversine_km(4.7110, -74.0721, 6.2442, -75.5812);
        assert!((d - 246.0).abs() < 5.0, "got {}", d);
    }

    #[test]
    fn one_degree_longitude_at_equator() {
        // ~111.19 km per degree of longitude on the equator.
        let d = haversine_km(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111.19).abs() < 0.5, "got {}", d);
    }
}
