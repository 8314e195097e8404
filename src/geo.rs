/*
 * src/geo.rs
 *
 * File for great-circle geometry on WGS-84 coordinates
 *
 * Purpose:
 *   All distance predicates in the core go through haversine here; the
 *   database is never asked to do geography.
 */

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
	pub latitude: f64,
	pub longitude: f64,
}

impl GeoPoint {
	pub fn new(latitude: f64, longitude: f64) -> Self {
		Self { latitude, longitude }
	}
}

/// Haversine great-circle distance between two points, in kilometers.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
	let lat_a = a.latitude.to_radians();
	let lat_b = b.latitude.to_radians();
	let d_lat = (b.latitude - a.latitude).to_radians();
	let d_lon = (b.longitude - a.longitude).to_radians();

	let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
	2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// True when `point` lies inside the great-circle disk around `center`.
pub fn within_radius(center: GeoPoint, point: GeoPoint, radius_m: f64) -> bool {
	haversine_km(center, point) * 1000.0 <= radius_m
}

/// Latitude/longitude bounds enclosing the disk, for cheap SQL prefilters.
/// The box is an over-approximation; callers refine with [within_radius].
pub fn bounding_box(center: GeoPoint, radius_m: f64) -> (f64, f64, f64, f64) {
	let radius_km = radius_m / 1000.0;
	let d_lat = (radius_km / EARTH_RADIUS_KM).to_degrees();
	// Longitude degrees shrink with latitude; clamp the cosine away from zero
	// so polar centers degrade to a full-longitude band instead of dividing by ~0.
	let cos_lat = center.latitude.to_radians().cos().max(1e-6);
	let d_lon = (radius_km / (EARTH_RADIUS_KM * cos_lat)).to_degrees().min(180.0);

	(
		(center.latitude - d_lat).max(-90.0),
		(center.latitude + d_lat).min(90.0),
		(center.longitude - d_lon).max(-180.0),
		(center.longitude + d_lon).min(180.0),
	)
}
