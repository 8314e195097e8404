use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::error::AppResult;

/// Build the shared Postgres pool for the catalog gateway.
///
/// The pool is the only mutable shared resource in the process; everything
/// else loaded at startup is immutable.
pub async fn create_pool(config: &Config) -> AppResult<PgPool> {
	let pool = PgPoolOptions::new()
		.max_connections(config.db_pool_size)
		.acquire_timeout(Duration::from_secs(30))
		.connect(&config.database_url)
		.await?;

	info!("Database pool created with {} max connections", config.db_pool_size);
	Ok(pool)
}
