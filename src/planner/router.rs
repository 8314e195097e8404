/*
 * src/planner/router.rs
 *
 * File for the time-aware daily router
 *
 * Purpose:
 *   Greedy nearest-neighbor scheduling of one day under opening windows,
 *   travel time, and the day's working-hours bound. The router never
 *   fails; an impossible day is just an empty day.
 */

use chrono::{DateTime, Duration, Utc};

use crate::geo::{GeoPoint, haversine_km};
use crate::models::poi::{Poi, PoiClass};

/// Travel time between two points at the configured mean ground speed.
///
/// Non-negative, symmetric, zero only for identical coordinates. Rounded
/// up to whole seconds so close-by pairs still cost something.
pub fn travel_time(a: GeoPoint, b: GeoPoint, speed_kmh: f64) -> Duration {
	let km = haversine_km(a, b);
	if km <= 0.0 {
		return Duration::zero();
	}
	let secs = km / speed_kmh * 3600.0;
	Duration::seconds(secs.ceil() as i64)
}

/// Schedule one day: repeatedly take the nearest feasible POI.
///
/// A POI is feasible when, after traveling to it and waiting for it to
/// open, the visit still ends inside both its own window and the day.
/// Transportation is pinned to its carrier window and therefore exempt
/// from the day-end bound. Ties break on earlier opening, then id, so the
/// schedule is a pure function of its inputs.
///
/// Windows on the POIs are projected onto trip day 0; for later days the
/// same wall-clock window is translated onto the day being scheduled
/// (transportation windows stay fixed).
pub fn schedule_day(
	start_point: GeoPoint,
	pois: &[Poi],
	day_start: DateTime<Utc>,
	day_end: DateTime<Utc>,
	speed_kmh: f64,
) -> Vec<Poi> {
	let mut cursor_loc = start_point;
	let mut cursor_time = day_start;
	let mut remaining: Vec<Poi> = pois.to_vec();
	let mut result = Vec::new();

	loop {
		let mut best: Option<(usize, Duration, DateTime<Utc>, DateTime<Utc>)> = None;
		for (i, poi) in remaining.iter().enumerate() {
			let (opens, closes) = effective_window(poi, day_start);
			let tt = travel_time(cursor_loc, poi.location(), speed_kmh);
			let earliest = (cursor_time + tt).max(opens);
			let end = earliest + poi.duration();
			if end > closes {
				continue;
			}
			if end > day_end && poi.class != PoiClass::Transportation {
				continue;
			}
			let replace = match &best {
				None => true,
				Some((best_i, best_tt, best_opens, _)) => {
					(tt, opens, remaining[i].id) < (*best_tt, *best_opens, remaining[*best_i].id)
				}
			};
			if replace {
				best = Some((i, tt, opens, earliest));
			}
		}

		let Some((index, _, _, earliest)) = best else { break };
		let poi = remaining.remove(index);
		cursor_time = earliest + poi.duration();
		cursor_loc = poi.location();
		result.push(poi);
	}

	result
}

/// The POI's window translated onto the calendar date being scheduled.
/// Carrier windows are real instants and never move.
pub fn effective_window(poi: &Poi, day_start: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
	if poi.class == PoiClass::Transportation {
		return (poi.opens, poi.closes);
	}
	let shift = day_start
		.date_naive()
		.signed_duration_since(poi.opens.date_naive());
	(poi.opens + shift, poi.closes + shift)
}
