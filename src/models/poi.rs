/*
 * src/models/poi.rs
 *
 * File for the core working types of the scheduling pipeline
 *
 * Purpose:
 *   Once a catalog record has been located and windowed it becomes a Poi,
 *   the only shape the router ever sees. Pace presets live here too since
 *   they bound what a day of Pois may hold.
 *
 * Include:
 *   PoiClass            - discriminant over the four catalog classes
 *   Poi                 - located + windowed item ready for routing
 *   PaceKey / Pace      - named preset of stops/day and working hours
 *   parse_opening_hours - "HH:MM-HH:MM" with a 9-to-5 fallback
 */

use chrono::{DateTime, NaiveTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::geo::GeoPoint;

/// Default visiting window applied to destinations and unparseable activities.
pub static DEFAULT_OPEN: Lazy<NaiveTime> =
	Lazy::new(|| NaiveTime::from_hms_opt(9, 0, 0).unwrap());
pub static DEFAULT_CLOSE: Lazy<NaiveTime> =
	Lazy::new(|| NaiveTime::from_hms_opt(17, 0, 0).unwrap());
/// All-day window applied to accommodations.
pub static ALL_DAY_OPEN: Lazy<NaiveTime> =
	Lazy::new(|| NaiveTime::from_hms_opt(0, 0, 0).unwrap());
pub static ALL_DAY_CLOSE: Lazy<NaiveTime> =
	Lazy::new(|| NaiveTime::from_hms_opt(23, 59, 0).unwrap());

/// Default visit durations per class, in minutes.
pub const DESTINATION_DURATION_MIN: i64 = 120;
pub const ACTIVITY_DURATION_MIN: i64 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoiClass {
	Destination,
	Activity,
	Accommodation,
	Transportation,
}

impl PoiClass {
	pub fn as_str(&self) -> &'static str {
		match self {
			PoiClass::Destination => "destination",
			PoiClass::Activity => "activity",
			PoiClass::Accommodation => "accommodation",
			PoiClass::Transportation => "transportation",
		}
	}
}

/// A located, windowed, priced catalog item.
///
/// `opens`/`closes` are absolute instants projected onto trip day 0; the
/// router reuses the same wall-clock window on later days by shifting its
/// own day bounds, not the Poi.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Poi {
	pub id: Uuid,
	pub class: PoiClass,
	pub latitude: f64,
	pub longitude: f64,
	pub opens: DateTime<Utc>,
	pub closes: DateTime<Utc>,
	pub duration_minutes: i64,
	/// 0.0 for unpriced items; the budget filter treats those as free.
	pub price: f64,
}

impl Poi {
	pub fn location(&self) -> GeoPoint {
		GeoPoint::new(self.latitude, self.longitude)
	}

	pub fn duration(&self) -> chrono::Duration {
		chrono::Duration::minutes(self.duration_minutes)
	}
}

/// Named pace preset selected by the request (or preferences).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaceKey {
	Relaxed,
	Moderate,
	Intense,
}

impl PaceKey {
	pub fn as_str(&self) -> &'static str {
		match self {
			PaceKey::Relaxed => "relaxed",
			PaceKey::Moderate => "moderate",
			PaceKey::Intense => "intense",
		}
	}

	pub fn preset(&self) -> Pace {
		match self {
			PaceKey::Relaxed => Pace { daily_activities: 2, max_hours: 4 },
			PaceKey::Moderate => Pace { daily_activities: 4, max_hours: 8 },
			PaceKey::Intense => Pace { daily_activities: 6, max_hours: 12 },
		}
	}
}

/// How much a single day may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pace {
	pub daily_activities: usize,
	pub max_hours: i64,
}

/// Parse an `"HH:MM-HH:MM"` opening-hours string.
///
/// Malformed input falls back to 09:00-17:00; the catalog carries enough
/// junk strings that this is a warning, not an error.
pub fn parse_opening_hours(oh: &str) -> (NaiveTime, NaiveTime) {
	let fallback = (*DEFAULT_OPEN, *DEFAULT_CLOSE);
	let Some((open_raw, close_raw)) = oh.split_once('-') else {
		warn!("Invalid opening hours format: {oh:?}, using default 9:00-17:00");
		return fallback;
	};
	match (
		NaiveTime::parse_from_str(open_raw.trim(), "%H:%M"),
		NaiveTime::parse_from_str(close_raw.trim(), "%H:%M"),
	) {
		(Ok(open), Ok(close)) => (open, close),
		_ => {
			warn!("Invalid opening hours format: {oh:?}, using default 9:00-17:00");
			fallback
		}
	}
}
