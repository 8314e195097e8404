/*
 * src/models/itinerary.rs
 *
 * File for the generated itinerary value
 *
 * Purpose:
 *   The planner's output: one enriched, display-ready schedule. Days are
 *   guaranteed chronological; stops within a day are in visiting order.
 */

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::poi::PoiClass;
use crate::models::request::ParsedRequest;

/// A complete generated itinerary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Itinerary {
	pub id: Uuid,
	/// Defaults to the destination city name.
	pub name: String,
	pub start_date: DateTime<Utc>,
	pub end_date: DateTime<Utc>,
	/// One entry per trip day, chronological. Days may be empty.
	pub days: Vec<ItineraryDay>,
	pub budget: f64,
	/// Snapshot of the parsed intent the schedule was built from.
	pub request: ParsedRequest,
}

/// A single day of stops.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItineraryDay {
	pub date: NaiveDate,
	pub stops: Vec<ScheduledStop>,
}

/// One scheduled item, enriched with display fields for its class.
///
/// The common head mirrors the routing Poi; the optional tail is filled
/// from the full catalog record when it can still be fetched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduledStop {
	pub id: Uuid,
	pub class: PoiClass,
	pub latitude: f64,
	pub longitude: f64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub price: Option<f64>,
	pub opens: DateTime<Utc>,
	pub closes: DateTime<Utc>,
	pub duration_minutes: i64,
	pub name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub rating: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub popularity_score: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub opening_hours: Option<String>,
	/// "$12.00", or "Free" for unpriced/zero-priced activities.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub price_display: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub amenities: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub transport_type: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub departure_location: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub arrival_location: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub departure_time: Option<DateTime<Utc>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub arrival_time: Option<DateTime<Utc>>,
}

impl Itinerary {
	/// Number of days this itinerary spans.
	pub fn trip_days(&self) -> usize {
		self.days.len()
	}

	/// All (class, id) pairs across every day, in schedule order.
	pub fn scheduled_ids(&self) -> Vec<(PoiClass, Uuid)> {
		self.days
			.iter()
			.flat_map(|day| day.stops.iter().map(|s| (s.class, s.id)))
			.collect()
	}
}
