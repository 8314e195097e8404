/*
 * src/planner/generate.rs
 *
 * File for itinerary generation orchestration
 *
 * Purpose:
 *   One generate call end to end: parse, resolve centroids, score
 *   candidates, assemble the POI pool, optionally reorder, route each day,
 *   enrich, and emit the Itinerary. Also the day-regeneration preview and
 *   the reorder preview.
 */

use std::collections::{HashMap, HashSet};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::TransportSearch;
use crate::error::{AppError, AppResult};
use crate::geo::GeoPoint;
use crate::global::{
	DEFAULT_BUDGET, DEFAULT_TRIP_NAME, REGENERATE_FALLBACK_BUDGET, REGENERATE_MAX_STOPS,
	TRANSPORT_AREA_RADIUS_M,
};
use crate::models::itinerary::{Itinerary, ItineraryDay, ScheduledStop};
use crate::models::poi::{DEFAULT_OPEN, Pace, PaceKey, Poi, PoiClass};
use crate::models::request::{CallerContext, DayConstraints, GenerateOverrides};
use crate::parser;
use crate::planner::PlannerService;
use crate::planner::pois::{ClassIds, assemble_pool, build_poi_set};
use crate::planner::router::schedule_day;
use crate::text::clean;

impl PlannerService {
	/// Generate a personalized itinerary from a free-text request.
	///
	/// The whole call runs under the configured soft deadline; exceeding it
	/// cancels all in-flight catalog work and yields `DEADLINE_EXCEEDED`.
	/// Partial results are never returned.
	pub async fn generate(
		&self,
		text: &str,
		ctx: &CallerContext,
		overrides: &GenerateOverrides,
	) -> AppResult<Itinerary> {
		let deadline = StdDuration::from_secs(self.config.generate_timeout_secs);
		match tokio::time::timeout(deadline, self.generate_inner(text, ctx, overrides)).await {
			Ok(result) => result,
			Err(_) => Err(AppError::DeadlineExceeded),
		}
	}

	async fn generate_inner(
		&self,
		text: &str,
		ctx: &CallerContext,
		overrides: &GenerateOverrides,
	) -> AppResult<Itinerary> {
		let now = Utc::now();
		let parsed = parser::parse_travel_request(text, now)?;
		let prefs = ctx.preferences.clone().unwrap_or_default();

		// Destination first, origin last; the parser normalizes this order.
		let dest_city = parsed
			.locations
			.first()
			.cloned()
			.unwrap_or_else(|| String::from(DEFAULT_TRIP_NAME));
		let origin_city =
			if parsed.locations.len() >= 2 { parsed.locations.last().cloned() } else { None };

		// Preferences fill whatever the text left empty.
		let interests = if parsed.interests.is_empty() {
			prefs.interests.clone()
		} else {
			parsed.interests.clone()
		};
		let budget =
			overrides.budget.or(parsed.budget).or(prefs.budget).unwrap_or(DEFAULT_BUDGET);
		let pace_key = parsed.pace.or(prefs.pace).unwrap_or(PaceKey::Moderate);
		let pace = pace_key.preset();

		let dates = self.expand_dates(&parsed.dates, now);
		let (Some(&start_date), Some(&end_date)) = (dates.first(), dates.last()) else {
			return Err(AppError::InvalidInput(String::from("could not derive trip dates")));
		};
		let trip_days = dates.len();
		info!(
			"Generating itinerary: dest={dest_city:?} origin={origin_city:?} days={trip_days} \
			 budget={budget} pace={}",
			pace_key.as_str()
		);

		// Resolve centroids; an unmatched city ends the request.
		let dest_row = self
			.repo
			.find_destination_by_name_like(&dest_city)
			.await?
			.ok_or_else(|| AppError::DestinationNotFound(dest_city.clone()))?;
		let dest_center = dest_row.location();
		let origin_center = match &origin_city {
			Some(origin) => Some(
				self.repo
					.find_destination_by_name_like(origin)
					.await?
					.ok_or_else(|| AppError::DestinationNotFound(origin.clone()))?
					.location(),
			),
			None => None,
		};

		// Per-class candidates off the shared query text.
		let query = clean(&format!("{} budget {budget}", interests.join(" ")));
		let k = self.config.candidate_k;
		let mut ids = ClassIds {
			destinations: self.scorers.destinations.top_k(&query, k),
			activities: self.scorers.activities.top_k(&query, k),
			accommodations: self.scorers.accommodations.top_k(&query, k),
			transportation: Vec::new(),
		};

		// Carrier routes between the two city areas, scorer fallback.
		if let Some(origin) = origin_center {
			ids.transportation = self
				.repo
				.transportation_between_areas(TransportSearch {
					origin,
					origin_radius_m: TRANSPORT_AREA_RADIUS_M,
					destination: dest_center,
					destination_radius_m: TRANSPORT_AREA_RADIUS_M,
					departs_after: start_date,
					arrives_before: end_of_day(end_date),
					limit: k as i64,
				})
				.await?;
		}
		if ids.transportation.is_empty() {
			ids.transportation = self.scorers.transportation.top_k(&query, k);
		}

		let radius_km = overrides.radius_km.unwrap_or(self.config.default_radius_km);
		let pool = assemble_pool(
			self.repo.as_ref(),
			&ids,
			start_date,
			dest_center,
			radius_km,
			budget,
			&self.config,
		)
		.await?;
		if pool.is_empty() {
			return Err(AppError::EmptyPlan);
		}

		let use_reorderer =
			overrides.use_reorderer.unwrap_or(self.config.reorderer_enabled);
		let pool = self.order_pool(pool, use_reorderer);

		let days = self.schedule_trip(pool, &dates, pace, dest_center).await;

		let itinerary = Itinerary {
			id: Uuid::new_v4(),
			name: dest_city,
			start_date,
			end_date,
			days,
			budget,
			request: parsed,
		};
		info!("Generated itinerary {} for user {}", itinerary.id, ctx.user_id);
		Ok(itinerary)
	}

	/// Thin preview over the sequence reorderer; identity when disabled.
	pub fn reorder_preview(&self, ids: &[Uuid]) -> Vec<Uuid> {
		match &self.reorderer {
			Some(reorderer) => reorderer.reorder(ids),
			None => ids.to_vec(),
		}
	}

	/// Rebuild and reschedule an existing itinerary with updated day
	/// constraints. Pure preview; the caller decides what to persist.
	pub async fn regenerate_day(
		&self,
		itinerary: &Itinerary,
		day_index: usize,
		constraints: &DayConstraints,
	) -> AppResult<Itinerary> {
		if day_index >= itinerary.days.len() {
			return Err(AppError::InvalidInput(format!(
				"day_index {day_index} out of range for a {}-day itinerary",
				itinerary.days.len()
			)));
		}

		let mut ids = ClassIds::default();
		for (class, id) in itinerary.scheduled_ids() {
			let bucket = match class {
				PoiClass::Destination => &mut ids.destinations,
				PoiClass::Activity => &mut ids.activities,
				PoiClass::Accommodation => &mut ids.accommodations,
				PoiClass::Transportation => &mut ids.transportation,
			};
			if !bucket.contains(&id) {
				bucket.push(id);
			}
		}

		let mut pace =
			itinerary.request.pace.unwrap_or(PaceKey::Moderate).preset();
		if let Some(max_stops) = constraints.max_stops {
			pace.daily_activities = max_stops.clamp(1, REGENERATE_MAX_STOPS);
		}

		let center = itinerary
			.days
			.iter()
			.flat_map(|d| &d.stops)
			.find(|s| s.class == PoiClass::Destination)
			.or_else(|| itinerary.days.iter().flat_map(|d| &d.stops).next())
			.map(|s| GeoPoint::new(s.latitude, s.longitude))
			.unwrap_or(GeoPoint::new(0.0, 0.0));

		let radius_m = self.config.default_radius_km as f64 * 1000.0;
		let budget = if itinerary.budget > 0.0 {
			itinerary.budget
		} else {
			REGENERATE_FALLBACK_BUDGET
		};

		let mut pool = build_poi_set(
			self.repo.as_ref(),
			&ids,
			itinerary.start_date,
			center,
			radius_m,
			budget,
			&self.config,
		)
		.await?;

		// Price constraint biases the scheduler toward cheaper options by
		// capping each activity's effective price.
		if let Some(cap) = constraints.max_price_per_activity {
			for poi in pool.iter_mut() {
				if poi.class == PoiClass::Activity && poi.price > cap {
					poi.price = cap;
				}
			}
		}

		let use_reorderer =
			constraints.use_reorderer.unwrap_or(self.config.reorderer_enabled);
		let pool = self.order_pool(pool, use_reorderer);

		let dates: Vec<DateTime<Utc>> = itinerary
			.days
			.iter()
			.map(|d| d.date.and_time(NaiveTime::MIN).and_utc())
			.collect();
		let days = self.schedule_trip(pool, &dates, pace, center).await;

		Ok(Itinerary {
			id: itinerary.id,
			name: itinerary.name.clone(),
			start_date: itinerary.start_date,
			end_date: itinerary.end_date,
			days,
			budget: itinerary.budget,
			request: itinerary.request.clone(),
		})
	}

	/// Trip dates, inclusive of both endpoints, capped at the configured
	/// maximum. No parsed dates means a one-day trip starting tomorrow.
	fn expand_dates(&self, parsed: &[DateTime<Utc>], now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
		match parsed {
			[] => {
				warn!("Request carried no dates; defaulting to a one-day trip");
				vec![
					(now.date_naive() + chrono::Days::new(1))
						.and_time(NaiveTime::MIN)
						.and_utc(),
				]
			}
			[single] => vec![*single],
			[start, end, ..] => {
				let span = (end.date_naive() - start.date_naive()).num_days().max(0) as usize + 1;
				let capped = span.min(self.config.max_itinerary_days);
				if capped < span {
					warn!("Trip of {span} days capped at {capped}");
				}
				(0..capped)
					.map(|d| *start + Duration::days(d as i64))
					.collect()
			}
		}
	}

	/// Activities take the learned order (rank 0..n-1), everything else
	/// follows; stable sort keeps each group's internal order otherwise.
	fn order_pool(&self, mut pool: Vec<Poi>, use_reorderer: bool) -> Vec<Poi> {
		if !use_reorderer {
			return pool;
		}
		let Some(reorderer) = &self.reorderer else {
			info!("Sequence reorderer unavailable; keeping original POI order");
			return pool;
		};
		let activity_ids: Vec<Uuid> = pool
			.iter()
			.filter(|p| p.class == PoiClass::Activity)
			.map(|p| p.id)
			.collect();
		if activity_ids.is_empty() {
			return pool;
		}
		let ordered = reorderer.reorder(&activity_ids);
		let rank: HashMap<Uuid, usize> =
			ordered.iter().enumerate().map(|(i, id)| (*id, i)).collect();
		pool.sort_by_key(|p| match p.class {
			PoiClass::Activity => (0usize, rank.get(&p.id).copied().unwrap_or(rank.len())),
			_ => (1, 0),
		});
		pool
	}

	/// Route every trip day, consuming the pool without repetition and
	/// walking the anchor forward to the previous day's last stop.
	async fn schedule_trip(
		&self,
		mut pool: Vec<Poi>,
		dates: &[DateTime<Utc>],
		pace: Pace,
		anchor0: GeoPoint,
	) -> Vec<ItineraryDay> {
		let mut anchor = anchor0;
		let mut days = Vec::with_capacity(dates.len());

		for date in dates {
			let day_start = date.date_naive().and_time(*DEFAULT_OPEN).and_utc();
			let day_end = day_start + Duration::hours(pace.max_hours);
			let mut chosen =
				schedule_day(anchor, &pool, day_start, day_end, self.config.travel_speed_kmh);
			chosen.truncate(pace.daily_activities);

			// enrichment lookups are independent; fan them out
			let stops =
				futures::future::join_all(chosen.iter().map(|poi| self.enrich(poi))).await;

			let scheduled: HashSet<(PoiClass, Uuid)> =
				chosen.iter().map(|p| (p.class, p.id)).collect();
			pool.retain(|p| !scheduled.contains(&(p.class, p.id)));
			if let Some(last) = chosen.last() {
				anchor = last.location();
			}

			days.push(ItineraryDay { date: date.date_naive(), stops });
		}
		days
	}

	/// Attach display fields from the full catalog record. A record that
	/// can no longer be fetched degrades to the bare POI data with a
	/// placeholder name; enrichment never sinks a finished schedule.
	async fn enrich(&self, poi: &Poi) -> ScheduledStop {
		let mut stop = ScheduledStop {
			id: poi.id,
			class: poi.class,
			latitude: poi.latitude,
			longitude: poi.longitude,
			price: match poi.class {
				PoiClass::Destination => None,
				_ => Some(poi.price),
			},
			opens: poi.opens,
			closes: poi.closes,
			duration_minutes: poi.duration_minutes,
			name: fallback_name(poi),
			description: None,
			rating: None,
			popularity_score: None,
			opening_hours: None,
			price_display: None,
			amenities: None,
			transport_type: None,
			departure_location: None,
			arrival_location: None,
			departure_time: None,
			arrival_time: None,
		};

		match poi.class {
			PoiClass::Destination => match self.repo.destination(poi.id).await {
				Ok(Some(dest)) => {
					stop.name = dest.name;
					stop.description = dest.description;
					stop.rating = dest.rating;
					stop.popularity_score = dest.popularity_score;
				}
				Ok(None) => {}
				Err(e) => warn!("Failed to enrich destination {}: {e}", poi.id),
			},
			PoiClass::Activity => match self.repo.activity(poi.id).await {
				Ok(Some(act)) => {
					stop.name = act.name;
					stop.description = act
						.description
						.or_else(|| Some(String::from("No description available")));
					stop.rating = act.rating;
					stop.opening_hours = act
						.opening_hours
						.or_else(|| Some(String::from("Hours not specified")));
					stop.price_display = Some(if poi.price > 0.0 {
						format!("${:.2}", poi.price)
					} else {
						String::from("Free")
					});
				}
				Ok(None) => {}
				Err(e) => warn!("Failed to enrich activity {}: {e}", poi.id),
			},
			PoiClass::Accommodation => match self.repo.accommodation(poi.id).await {
				Ok(Some(acc)) => {
					stop.name = acc.name;
					stop.rating = acc.rating;
					stop.amenities = acc.amenities;
				}
				Ok(None) => {}
				Err(e) => warn!("Failed to enrich accommodation {}: {e}", poi.id),
			},
			PoiClass::Transportation => match self.repo.transportation(poi.id).await {
				Ok(Some(trans)) => {
					let from = trans
						.departure_location
						.clone()
						.unwrap_or_else(|| String::from("Unknown"));
					let to = trans
						.arrival_location
						.clone()
						.unwrap_or_else(|| String::from("Unknown"));
					stop.name = format!("{} - {from} to {to}", trans.transport_type);
					stop.transport_type = Some(trans.transport_type);
					stop.departure_location = trans.departure_location;
					stop.arrival_location = trans.arrival_location;
					stop.departure_time = Some(trans.departure_time);
					stop.arrival_time = Some(trans.arrival_time);
				}
				Ok(None) => {}
				Err(e) => warn!("Failed to enrich transportation {}: {e}", poi.id),
			},
		}
		stop
	}
}

fn end_of_day(date: DateTime<Utc>) -> DateTime<Utc> {
	date.date_naive().and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)).and_utc()
}

fn fallback_name(poi: &Poi) -> String {
	let id = poi.id.to_string();
	let short = &id[..8.min(id.len())];
	let class = poi.class.as_str();
	let mut titled = String::with_capacity(class.len());
	let mut chars = class.chars();
	if let Some(first) = chars.next() {
		titled.extend(first.to_uppercase());
		titled.extend(chars);
	}
	format!("{titled} {short}")
}
