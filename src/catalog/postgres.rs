/*
 * src/catalog/postgres.rs
 *
 * File for the Postgres catalog gateway
 *
 * Purpose:
 *   CatalogRepository over sqlx. Radius queries run a bounding-box
 *   prefilter in SQL and refine with haversine in-process, so the catalog
 *   database needs no geography extension.
 */

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::catalog::{
	AccommodationRecord, ActivityRecord, CatalogRepository, DestinationRecord, TransportSearch,
	TransportationRecord,
};
use crate::error::AppResult;
use crate::geo::{GeoPoint, bounding_box, within_radius};

const DESTINATION_COLS: &str =
	"id, name, description, latitude, longitude, rating, popularity_score, country, region, timezone";
const ACTIVITY_COLS: &str =
	"id, name, description, latitude, longitude, price, opening_hours, rating, type AS activity_type, duration_minutes";
const ACCOMMODATION_COLS: &str =
	"id, name, latitude, longitude, price_per_night, rating, amenities, star_rating";
const TRANSPORTATION_COLS: &str = "id, type AS transport_type, departure_location, arrival_location, \
	departure_lat, departure_long, arrival_lat, arrival_long, departure_time, arrival_time, price, provider";

#[derive(Clone)]
pub struct PgCatalog {
	pool: PgPool,
}

impl PgCatalog {
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}
}

#[async_trait]
impl CatalogRepository for PgCatalog {
	async fn find_destination_by_name_like(
		&self,
		name: &str,
	) -> AppResult<Option<DestinationRecord>> {
		let sql = format!(
			"SELECT {DESTINATION_COLS} FROM destinations \
			 WHERE name ILIKE $1 \
			 ORDER BY popularity_score DESC NULLS LAST \
			 LIMIT 1"
		);
		let row = sqlx::query_as::<_, DestinationRecord>(&sql)
			.bind(format!("%{name}%"))
			.fetch_optional(&self.pool)
			.await?;
		Ok(row)
	}

	async fn destinations_within_radius(
		&self,
		ids: &[Uuid],
		center: GeoPoint,
		radius_m: f64,
	) -> AppResult<Vec<DestinationRecord>> {
		if ids.is_empty() {
			return Ok(Vec::new());
		}
		let sql = format!("SELECT {DESTINATION_COLS} FROM destinations WHERE id = ANY($1)");
		let rows = sqlx::query_as::<_, DestinationRecord>(&sql)
			.bind(ids.to_vec())
			.fetch_all(&self.pool)
			.await?;
		Ok(rows
			.into_iter()
			.filter(|r| within_radius(center, r.location(), radius_m))
			.collect())
	}

	async fn activities_within_radius(
		&self,
		ids: &[Uuid],
		center: GeoPoint,
		radius_m: f64,
	) -> AppResult<Vec<ActivityRecord>> {
		if ids.is_empty() {
			return Ok(Vec::new());
		}
		let sql = format!("SELECT {ACTIVITY_COLS} FROM activities WHERE id = ANY($1)");
		let rows = sqlx::query_as::<_, ActivityRecord>(&sql)
			.bind(ids.to_vec())
			.fetch_all(&self.pool)
			.await?;
		Ok(rows
			.into_iter()
			.filter(|r| within_radius(center, r.location(), radius_m))
			.collect())
	}

	async fn accommodations_within_radius(
		&self,
		center: GeoPoint,
		radius_m: f64,
		min_rating: f64,
		limit: i64,
	) -> AppResult<Vec<AccommodationRecord>> {
		let (lat_min, lat_max, lon_min, lon_max) = bounding_box(center, radius_m);
		let sql = format!(
			"SELECT {ACCOMMODATION_COLS} FROM accommodations \
			 WHERE rating >= $1 \
			   AND latitude BETWEEN $2 AND $3 \
			   AND longitude BETWEEN $4 AND $5 \
			 ORDER BY rating DESC"
		);
		let rows = sqlx::query_as::<_, AccommodationRecord>(&sql)
			.bind(min_rating)
			.bind(lat_min)
			.bind(lat_max)
			.bind(lon_min)
			.bind(lon_max)
			.fetch_all(&self.pool)
			.await?;
		// The box over-approximates the disk; refine before applying the cap
		// so corner hits don't displace genuine in-disk rows.
		Ok(rows
			.into_iter()
			.filter(|r| within_radius(center, r.location(), radius_m))
			.take(limit.max(0) as usize)
			.collect())
	}

	async fn transportation_between_areas(
		&self,
		search: TransportSearch,
	) -> AppResult<Vec<Uuid>> {
		let (dep_lat_min, dep_lat_max, dep_lon_min, dep_lon_max) =
			bounding_box(search.origin, search.origin_radius_m);
		let (arr_lat_min, arr_lat_max, arr_lon_min, arr_lon_max) =
			bounding_box(search.destination, search.destination_radius_m);
		let sql = format!(
			"SELECT {TRANSPORTATION_COLS} FROM transportations \
			 WHERE departure_lat BETWEEN $1 AND $2 \
			   AND departure_long BETWEEN $3 AND $4 \
			   AND arrival_lat BETWEEN $5 AND $6 \
			   AND arrival_long BETWEEN $7 AND $8 \
			   AND departure_time >= $9 \
			   AND arrival_time <= $10 \
			 ORDER BY departure_time"
		);
		let rows = sqlx::query_as::<_, TransportationRecord>(&sql)
			.bind(dep_lat_min)
			.bind(dep_lat_max)
			.bind(dep_lon_min)
			.bind(dep_lon_max)
			.bind(arr_lat_min)
			.bind(arr_lat_max)
			.bind(arr_lon_min)
			.bind(arr_lon_max)
			.bind(search.departs_after)
			.bind(search.arrives_before)
			.fetch_all(&self.pool)
			.await?;

		let ids: Vec<Uuid> = rows
			.into_iter()
			.filter(|r| {
				within_radius(search.origin, r.departure_point(), search.origin_radius_m)
					&& within_radius(
						search.destination,
						r.arrival_point(),
						search.destination_radius_m,
					)
			})
			.take(search.limit.max(0) as usize)
			.map(|r| r.id)
			.collect();
		info!("Found {} carrier routes between areas", ids.len());
		Ok(ids)
	}

	async fn transportation_by_ids(
		&self,
		ids: &[Uuid],
	) -> AppResult<Vec<TransportationRecord>> {
		if ids.is_empty() {
			return Ok(Vec::new());
		}
		let sql = format!("SELECT {TRANSPORTATION_COLS} FROM transportations WHERE id = ANY($1)");
		let rows = sqlx::query_as::<_, TransportationRecord>(&sql)
			.bind(ids.to_vec())
			.fetch_all(&self.pool)
			.await?;
		Ok(rows)
	}

	async fn destination(&self, id: Uuid) -> AppResult<Option<DestinationRecord>> {
		let sql = format!("SELECT {DESTINATION_COLS} FROM destinations WHERE id = $1");
		Ok(sqlx::query_as::<_, DestinationRecord>(&sql)
			.bind(id)
			.fetch_optional(&self.pool)
			.await?)
	}

	async fn activity(&self, id: Uuid) -> AppResult<Option<ActivityRecord>> {
		let sql = format!("SELECT {ACTIVITY_COLS} FROM activities WHERE id = $1");
		Ok(sqlx::query_as::<_, ActivityRecord>(&sql)
			.bind(id)
			.fetch_optional(&self.pool)
			.await?)
	}

	async fn accommodation(&self, id: Uuid) -> AppResult<Option<AccommodationRecord>> {
		let sql = format!("SELECT {ACCOMMODATION_COLS} FROM accommodations WHERE id = $1");
		Ok(sqlx::query_as::<_, AccommodationRecord>(&sql)
			.bind(id)
			.fetch_optional(&self.pool)
			.await?)
	}

	async fn transportation(&self, id: Uuid) -> AppResult<Option<TransportationRecord>> {
		let sql = format!("SELECT {TRANSPORTATION_COLS} FROM transportations WHERE id = $1");
		Ok(sqlx::query_as::<_, TransportationRecord>(&sql)
			.bind(id)
			.fetch_optional(&self.pool)
			.await?)
	}
}
