/*
 * src/catalog/mod.rs
 *
 * File for the catalog repository gateway
 *
 * Purpose:
 *   The one seam between the planner and catalog storage. The planner only
 *   ever talks to this trait; production wires the Postgres implementation,
 *   tests wire an in-memory one.
 */

pub mod postgres;
pub mod records;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppResult;
use crate::geo::GeoPoint;
pub use postgres::PgCatalog;
pub use records::{
	AccommodationRecord, ActivityRecord, DestinationRecord, TransportationRecord,
};

/// Search window for carrier routes between two city areas.
#[derive(Clone, Copy, Debug)]
pub struct TransportSearch {
	pub origin: GeoPoint,
	pub origin_radius_m: f64,
	pub destination: GeoPoint,
	pub destination_radius_m: f64,
	pub departs_after: DateTime<Utc>,
	pub arrives_before: DateTime<Utc>,
	pub limit: i64,
}

/// Read-side operations the planner needs from catalog storage.
///
/// All geospatial predicates are great-circle on WGS-84 with radii in
/// meters. Implementations must be safe to call concurrently; the POI
/// assembler fans out one call per class.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
	/// Best single destination whose name contains `name`, most popular first.
	async fn find_destination_by_name_like(
		&self,
		name: &str,
	) -> AppResult<Option<DestinationRecord>>;

	/// Destinations from `ids` within the disk around `center`.
	async fn destinations_within_radius(
		&self,
		ids: &[Uuid],
		center: GeoPoint,
		radius_m: f64,
	) -> AppResult<Vec<DestinationRecord>>;

	/// Activities from `ids` within the disk around `center`.
	async fn activities_within_radius(
		&self,
		ids: &[Uuid],
		center: GeoPoint,
		radius_m: f64,
	) -> AppResult<Vec<ActivityRecord>>;

	/// Accommodations within the disk rated at least `min_rating`,
	/// best-rated first, at most `limit` rows.
	async fn accommodations_within_radius(
		&self,
		center: GeoPoint,
		radius_m: f64,
		min_rating: f64,
		limit: i64,
	) -> AppResult<Vec<AccommodationRecord>>;

	/// Ids of carrier routes departing inside the origin disk and arriving
	/// inside the destination disk within the search window.
	async fn transportation_between_areas(&self, search: TransportSearch)
	-> AppResult<Vec<Uuid>>;

	/// Full carrier records for the given ids.
	async fn transportation_by_ids(&self, ids: &[Uuid])
	-> AppResult<Vec<TransportationRecord>>;

	/// Typed single-record gets, used by schedule enrichment.
	async fn destination(&self, id: Uuid) -> AppResult<Option<DestinationRecord>>;
	async fn activity(&self, id: Uuid) -> AppResult<Option<ActivityRecord>>;
	async fn accommodation(&self, id: Uuid) -> AppResult<Option<AccommodationRecord>>;
	async fn transportation(&self, id: Uuid) -> AppResult<Option<TransportationRecord>>;
}
