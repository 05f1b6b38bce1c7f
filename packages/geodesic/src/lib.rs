#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Circular area-of-interest rings on a spherical Earth.
//!
//! Solves the direct geodesic problem (start point, initial bearing and
//! distance to destination point) on a sphere of radius
//! [`EARTH_RADIUS_KM`], and samples it at fixed bearings to approximate a
//! circle around a center point.
//!
//! # Coordinate System
//!
//! - Latitude: degrees north (-90 to 90)
//! - Longitude: degrees east (-180 to 180)
//! - Bearing: degrees clockwise from true north (0-360)
//! - Distance: kilometers
//!
//! Inputs are not validated. Out-of-range values flow straight into the
//! trigonometry and may yield `NaN` coordinates. Longitudes are not
//! renormalized, so rings near the poles or across the antimeridian can be
//! self-intersecting.

/// Earth radius in kilometers used for all destination calculations.
pub const EARTH_RADIUS_KM: f64 = 6378.1;

/// Bearing increment between consecutive ring vertices, in degrees.
pub const BEARING_STEP_DEG: u32 = 20;

/// Number of vertices in a generated ring, including the closing vertex.
pub const RING_VERTEX_COUNT: usize = (360 / BEARING_STEP_DEG) as usize + 1;

/// Computes the point reached by travelling `distance_km` along a great
/// circle from (`lat`, `lon`) at initial bearing `bearing_deg`.
///
/// Returns `[longitude, latitude]` in degrees.
///
/// # Example
///
/// ```
/// use volcano_aoi_geodesic::destination;
///
/// // ~1 degree of arc due north from the equator
/// let [lon, lat] = destination(0.0, 0.0, 0.0, 111.32);
/// assert!((lat - 1.0).abs() < 0.01);
/// assert!(lon.abs() < 1e-9);
/// ```
#[must_use]
pub fn destination(lat: f64, lon: f64, bearing_deg: f64, distance_km: f64) -> [f64; 2] {
    let bearing = bearing_deg.to_radians();
    let lat1 = lat.to_radians();
    let lon1 = lon.to_radians();
    let angular_distance = distance_km / EARTH_RADIUS_KM;

    let sin_lat1 = lat1.sin();
    let cos_lat1 = lat1.cos();
    let sin_d = angular_distance.sin();
    let cos_d = angular_distance.cos();

    let lat2 = (sin_lat1 * cos_d + cos_lat1 * sin_d * bearing.cos()).asin();
    let lon2 = lon1 + (bearing.sin() * sin_d * cos_lat1).atan2(cos_d - sin_lat1 * lat2.sin());

    [lon2.to_degrees(), lat2.to_degrees()]
}

/// Generates a closed ring of [`RING_VERTEX_COUNT`] `[lon, lat]` pairs
/// approximating a circle of `radius_km` around (`lat`, `lon`).
///
/// Vertices are sampled every [`BEARING_STEP_DEG`] degrees from 0 (due
/// north) through 360 inclusive, clockwise. The first and last vertices are
/// identical.
#[must_use]
pub fn generate_ring(lat: f64, lon: f64, radius_km: f64) -> Vec<[f64; 2]> {
    (0..=360)
        .step_by(BEARING_STEP_DEG as usize)
        // 360 wraps to 0 so the closing vertex is bit-identical to the first
        .map(|bearing| destination(lat, lon, f64::from(bearing % 360), radius_km))
        .collect()
}

#[cfg(test)]
mod tests {
    use geo::{Contains as _, Distance as _, Haversine, LineString, Point, Polygon};

    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn ring_to_polygon(ring: &[[f64; 2]]) -> Polygon<f64> {
        Polygon::new(LineString::from(ring.to_vec()), vec![])
    }

    #[test]
    fn ring_has_fixed_vertex_count() {
        assert_eq!(RING_VERTEX_COUNT, 19);
        for (lat, lon, radius) in [(0.0, 0.0, 10.0), (10.0, 20.0, 10.0), (-45.0, 170.0, 250.0)] {
            assert_eq!(generate_ring(lat, lon, radius).len(), RING_VERTEX_COUNT);
        }
    }

    #[test]
    fn ring_is_closed() {
        for (lat, lon, radius) in [(0.0, 0.0, 10.0), (10.0, 20.0, 10.0), (64.63, -17.52, 50.0)] {
            let ring = generate_ring(lat, lon, radius);
            assert_eq!(ring.first(), ring.last());
        }
    }

    #[test]
    fn first_vertex_is_due_north() {
        let ring = generate_ring(0.0, 0.0, 111.32);
        let [lon, lat] = ring[0];
        assert!((lat - 1.0).abs() < 0.01, "lat was {lat}");
        assert!(lon.abs() < TOLERANCE, "lon was {lon}");
    }

    #[test]
    fn bearing_ninety_moves_east_only() {
        let [lon, lat] = destination(0.0, 0.0, 90.0, 111.32);
        assert!(lat.abs() < TOLERANCE, "lat was {lat}");
        assert!((lon - 1.0).abs() < 0.01, "lon was {lon}");
    }

    #[test]
    fn vertices_proceed_clockwise() {
        let ring = generate_ring(10.0, 20.0, 10.0);
        // 80 degrees: east of center
        assert!(ring[4][0] > 20.0);
        // 180 degrees: due south
        assert!(ring[9][1] < 10.0);
        assert!((ring[9][0] - 20.0).abs() < TOLERANCE);
        // 280 degrees: west of center
        assert!(ring[14][0] < 20.0);
    }

    #[test]
    fn tiny_radius_collapses_to_center() {
        let ring = generate_ring(10.0, 20.0, 1e-9);
        for [lon, lat] in ring {
            assert!((lon - 20.0).abs() < TOLERANCE);
            assert!((lat - 10.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn zero_radius_is_degenerate_ring() {
        let ring = generate_ring(10.0, 20.0, 0.0);
        assert_eq!(ring.len(), RING_VERTEX_COUNT);
        for [lon, lat] in ring {
            assert!((lon - 20.0).abs() < TOLERANCE);
            assert!((lat - 10.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn negative_radius_still_closes() {
        let ring = generate_ring(10.0, 20.0, -5.0);
        assert_eq!(ring.len(), RING_VERTEX_COUNT);
        assert_eq!(ring.first(), ring.last());
        // travelling backwards: bearing 0 lands south of center
        assert!(ring[0][1] < 10.0);
    }

    #[test]
    fn vertices_lie_on_radius() {
        let center = Point::new(20.0, 10.0);
        for [lon, lat] in generate_ring(10.0, 20.0, 10.0) {
            let distance_km = Haversine.distance(center, Point::new(lon, lat)) / 1000.0;
            assert!(
                (distance_km - 10.0).abs() < 0.1,
                "vertex ({lon}, {lat}) is {distance_km} km from center"
            );
        }
    }

    #[test]
    fn ring_polygon_contains_center() {
        let polygon = ring_to_polygon(&generate_ring(-8.34, 115.51, 25.0));
        assert!(polygon.contains(&Point::new(115.51, -8.34)));
        assert!(!polygon.contains(&Point::new(116.51, -8.34)));
    }

    #[test]
    fn non_finite_input_propagates() {
        let ring = generate_ring(f64::NAN, 0.0, 10.0);
        assert_eq!(ring.len(), RING_VERTEX_COUNT);
        assert!(ring.iter().all(|[lon, lat]| lon.is_nan() && lat.is_nan()));
    }
}
