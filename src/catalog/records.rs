/*
 * src/catalog/records.rs
 *
 * File for catalog row models
 *
 * Purpose:
 *   Read-only typed rows for the four catalog tables. The catalog schema is
 *   owned by the seeding pipeline; the core only ever reads these shapes.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::geo::GeoPoint;

/// Row model for the `destinations` table.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
pub struct DestinationRecord {
	pub id: Uuid,
	pub name: String,
	pub description: Option<String>,
	pub latitude: f64,
	pub longitude: f64,
	/// 0..=5 when present.
	pub rating: Option<f64>,
	/// 0..=100 when present.
	pub popularity_score: Option<f64>,
	pub country: Option<String>,
	pub region: Option<String>,
	pub timezone: Option<String>,
}

/// Row model for the `activities` table.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
pub struct ActivityRecord {
	pub id: Uuid,
	pub name: String,
	pub description: Option<String>,
	pub latitude: f64,
	pub longitude: f64,
	pub price: Option<f64>,
	/// "HH:MM-HH:MM"; free-form junk falls back at projection time.
	pub opening_hours: Option<String>,
	pub rating: Option<f64>,
	pub activity_type: Option<String>,
	pub duration_minutes: Option<i32>,
}

/// Row model for the `accommodations` table.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
pub struct AccommodationRecord {
	pub id: Uuid,
	pub name: String,
	pub latitude: f64,
	pub longitude: f64,
	pub price_per_night: Option<f64>,
	pub rating: Option<f64>,
	/// Comma-separated list, as seeded.
	pub amenities: Option<String>,
	pub star_rating: Option<i32>,
}

/// Row model for the `transportations` table.
/// Carrier data guarantees `departure_time < arrival_time`.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
pub struct TransportationRecord {
	pub id: Uuid,
	pub transport_type: String,
	pub departure_location: Option<String>,
	pub arrival_location: Option<String>,
	pub departure_lat: f64,
	pub departure_long: f64,
	pub arrival_lat: f64,
	pub arrival_long: f64,
	pub departure_time: DateTime<Utc>,
	pub arrival_time: DateTime<Utc>,
	pub price: Option<f64>,
	pub provider: Option<String>,
}

impl DestinationRecord {
	pub fn location(&self) -> GeoPoint {
		GeoPoint::new(self.latitude, self.longitude)
	}
}

impl ActivityRecord {
	pub fn location(&self) -> GeoPoint {
		GeoPoint::new(self.latitude, self.longitude)
	}
}

impl AccommodationRecord {
	pub fn location(&self) -> GeoPoint {
		GeoPoint::new(self.latitude, self.longitude)
	}
}

impl TransportationRecord {
	pub fn departure_point(&self) -> GeoPoint {
		GeoPoint::new(self.departure_lat, self.departure_long)
	}

	pub fn arrival_point(&self) -> GeoPoint {
		GeoPoint::new(self.arrival_lat, self.arrival_long)
	}
}
