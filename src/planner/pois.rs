/*
 * src/planner/pois.rs
 *
 * File for the POI assembler
 *
 * Purpose:
 *   Resolve per-class candidate ids into one windowed, filtered, deduped
 *   POI pool. The four class fetches fan out concurrently; everything
 *   after the fetches is pure, so identical gateway responses always
 *   produce an identical pool.
 */

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::CatalogRepository;
use crate::config::Config;
use crate::error::AppResult;
use crate::geo::GeoPoint;
use crate::global::MIN_POOL_ACTIVITIES;
use crate::models::poi::{
	ACTIVITY_DURATION_MIN, ALL_DAY_CLOSE, ALL_DAY_OPEN, DEFAULT_CLOSE, DEFAULT_OPEN,
	DESTINATION_DURATION_MIN, Poi, PoiClass, parse_opening_hours,
};

/// Candidate ids per class, as produced by the scorers (and the carrier
/// route search for transportation).
#[derive(Clone, Debug, Default)]
pub struct ClassIds {
	pub destinations: Vec<Uuid>,
	pub activities: Vec<Uuid>,
	pub accommodations: Vec<Uuid>,
	pub transportation: Vec<Uuid>,
}

/// Build the POI pool for one radius.
///
/// Destinations and activities are kept only inside the disk; activities
/// are deduped by (name, ~100 m cell) and dropped over the per-item budget
/// cap; accommodations come pre-filtered by rating from the gateway;
/// transportation keeps its real carrier window.
pub async fn build_poi_set(
	repo: &dyn CatalogRepository,
	ids: &ClassIds,
	start_date: DateTime<Utc>,
	center: GeoPoint,
	radius_m: f64,
	budget: f64,
	config: &Config,
) -> AppResult<Vec<Poi>> {
	let (destinations, activities, accommodations, transportations) = tokio::try_join!(
		repo.destinations_within_radius(&ids.destinations, center, radius_m),
		repo.activities_within_radius(&ids.activities, center, radius_m),
		repo.accommodations_within_radius(
			center,
			radius_m,
			config.accommodation_min_rating,
			config.accommodation_limit,
		),
		async {
			if ids.transportation.is_empty() {
				Ok(Vec::new())
			} else {
				repo.transportation_by_ids(&ids.transportation).await
			}
		},
	)?;

	let day0 = start_date.date_naive();
	let mut pool: Vec<Poi> = Vec::new();

	for dest in &destinations {
		pool.push(Poi {
			id: dest.id,
			class: PoiClass::Destination,
			latitude: dest.latitude,
			longitude: dest.longitude,
			opens: day0.and_time(*DEFAULT_OPEN).and_utc(),
			closes: day0.and_time(*DEFAULT_CLOSE).and_utc(),
			duration_minutes: DESTINATION_DURATION_MIN,
			price: 0.0,
		});
	}

	// Dedup visually repeated activities carrying different ids: same
	// normalized name inside the same ~100 m cell.
	let budget_cap = budget * config.item_budget_fraction;
	let mut seen_activity_keys: HashSet<(String, i64, i64)> = HashSet::new();
	for act in &activities {
		let name_norm = act.name.trim().to_lowercase();
		if !name_norm.is_empty() {
			let key = (name_norm.clone(), cell(act.latitude), cell(act.longitude));
			if !seen_activity_keys.insert(key) {
				info!("Skipping duplicate activity by name/loc: name={name_norm:?} id={}", act.id);
				continue;
			}
		}
		if let Some(price) = act.price {
			if price > budget_cap {
				info!("Excluding activity {} due to price {price} > {budget_cap}", act.id);
				continue;
			}
		}
		let (open, close) =
			parse_opening_hours(act.opening_hours.as_deref().unwrap_or(""));
		pool.push(Poi {
			id: act.id,
			class: PoiClass::Activity,
			latitude: act.latitude,
			longitude: act.longitude,
			opens: day0.and_time(open).and_utc(),
			closes: day0.and_time(close).and_utc(),
			duration_minutes: act
				.duration_minutes
				.map(i64::from)
				.unwrap_or(ACTIVITY_DURATION_MIN),
			price: act.price.unwrap_or(0.0),
		});
	}

	if accommodations.is_empty() {
		warn!(
			"No accommodations rated >= {} within {radius_m}m",
			config.accommodation_min_rating
		);
	}
	for acc in &accommodations {
		pool.push(Poi {
			id: acc.id,
			class: PoiClass::Accommodation,
			latitude: acc.latitude,
			longitude: acc.longitude,
			opens: day0.and_time(*ALL_DAY_OPEN).and_utc(),
			closes: day0.and_time(*ALL_DAY_CLOSE).and_utc(),
			duration_minutes: 0,
			price: acc.price_per_night.unwrap_or(0.0),
		});
	}

	for trans in &transportations {
		let duration_minutes =
			(trans.arrival_time - trans.departure_time).num_minutes().max(0);
		pool.push(Poi {
			id: trans.id,
			class: PoiClass::Transportation,
			latitude: trans.departure_lat,
			longitude: trans.departure_long,
			opens: trans.departure_time,
			closes: trans.arrival_time,
			duration_minutes,
			price: trans.price.unwrap_or(0.0),
		});
	}

	// Final (class, id) dedup keeps the first occurrence.
	let mut seen: HashSet<(PoiClass, Uuid)> = HashSet::new();
	let before = pool.len();
	pool.retain(|p| seen.insert((p.class, p.id)));
	info!("Built POI pool with {} unique items (from {before} raw)", pool.len());
	Ok(pool)
}

/// Build the pool under the adaptive-radius policy: widen through the
/// tiers until enough activities land, stopping at the last tier
/// regardless of the count.
pub async fn assemble_pool(
	repo: &dyn CatalogRepository,
	ids: &ClassIds,
	start_date: DateTime<Utc>,
	center: GeoPoint,
	user_radius_km: u32,
	budget: f64,
	config: &Config,
) -> AppResult<Vec<Poi>> {
	let tiers = config.radius_tiers_m(user_radius_km);
	let mut pool = Vec::new();
	for (attempt, radius_m) in tiers.iter().enumerate() {
		pool = build_poi_set(repo, ids, start_date, center, *radius_m, budget, config).await?;
		let activity_count =
			pool.iter().filter(|p| p.class == PoiClass::Activity).count();
		info!("POI pool holds {activity_count} activities at radius {radius_m}m");
		if activity_count >= MIN_POOL_ACTIVITIES || attempt == tiers.len() - 1 {
			break;
		}
	}
	Ok(pool)
}

/// ~100 m grid cell index from a coordinate (3-decimal rounding).
fn cell(coord: f64) -> i64 {
	(coord * 1000.0).round() as i64
}
