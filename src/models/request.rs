/*
 * src/models/request.rs
 *
 * File for the structured view of a free-text travel request
 *
 * Purpose:
 *   What the parser produces and what callers hand the planner alongside
 *   the raw text: preferences, overrides, and day-regeneration constraints.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::poi::PaceKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
	Luxury,
	Budget,
	Family,
	Adventure,
}

/// Structured intent extracted from the request text.
///
/// Partial extraction is normal: missing dates or budget leave the field
/// empty and add a warning, and the planner fills defaults from the
/// caller's stored preferences.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParsedRequest {
	/// Place names in normalized order: destination first, origin last
	/// (a location cued by "from" is the origin).
	pub locations: Vec<String>,
	/// One instant for a single-day trip, two for a range (both UTC midnight).
	pub dates: Vec<DateTime<Utc>>,
	/// Content words, deduplicated by lemma, mention order preserved.
	pub interests: Vec<String>,
	pub budget: Option<f64>,
	pub group_size: Option<u32>,
	pub travel_style: Option<TravelStyle>,
	/// Only set when the text names a pace outright.
	pub pace: Option<PaceKey>,
	/// Heuristic confidence in [0, 100].
	pub confidence_score: f64,
	pub warnings: Vec<String>,
}

/// Stored preferences applied wherever the text left a field empty.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UserPreferences {
	#[serde(default)]
	pub interests: Vec<String>,
	pub budget: Option<f64>,
	pub pace: Option<PaceKey>,
}

#[derive(Clone, Debug)]
pub struct CallerContext {
	pub user_id: Uuid,
	pub preferences: Option<UserPreferences>,
}

/// Per-call knobs the boundary may pass through.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct GenerateOverrides {
	pub use_reorderer: Option<bool>,
	pub radius_km: Option<u32>,
	pub budget: Option<f64>,
}

/// Constraints accepted when regenerating a single day.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct DayConstraints {
	/// Clamped into [1, 20] before use.
	pub max_stops: Option<usize>,
	/// Applied by capping each activity's effective price at this value.
	pub max_price_per_activity: Option<f64>,
	pub use_reorderer: Option<bool>,
}
