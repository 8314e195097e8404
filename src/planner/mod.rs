/*
 * src/planner/mod.rs
 *
 * File for the plan assembler service
 *
 * Purpose:
 *   Owns everything one generate call needs: the catalog gateway, the four
 *   similarity scorers, the optional sequence reorderer, and the config.
 *   Constructed once at startup; shared by reference across requests.
 */

pub mod generate;
pub mod pois;
pub mod router;

use std::sync::Arc;

use sqlx::PgPool;
use tracing::error;

use crate::catalog::{CatalogRepository, PgCatalog};
use crate::config::Config;
use crate::error::AppResult;
use crate::reorder::SequenceReorderer;
use crate::scoring::ScorerSet;

pub struct PlannerService {
	repo: Arc<dyn CatalogRepository>,
	scorers: ScorerSet,
	reorderer: Option<SequenceReorderer>,
	config: Config,
}

impl PlannerService {
	/// Wire the service from already-built parts. Tests use this with an
	/// in-memory catalog.
	pub fn new(
		repo: Arc<dyn CatalogRepository>,
		scorers: ScorerSet,
		reorderer: Option<SequenceReorderer>,
		config: Config,
	) -> Self {
		Self { repo, scorers, reorderer, config }
	}

	/// Production wiring over a Postgres pool.
	///
	/// Scorer artifacts are load-or-die; a missing or corrupt reorderer
	/// only logs and downgrades to "reorderer disabled".
	pub fn with_pool(pool: PgPool, config: Config) -> AppResult<Self> {
		let scorers = ScorerSet::load(&config.artifacts_dir)?;
		let reorderer = if config.reorderer_enabled {
			match SequenceReorderer::load(&config.artifacts_dir) {
				Ok(r) => Some(r),
				Err(e) => {
					error!("Failed to load sequence reorderer, continuing without it: {e}");
					None
				}
			}
		} else {
			None
		};
		Ok(Self::new(Arc::new(PgCatalog::new(pool)), scorers, reorderer, config))
	}

	/// Connect the pool from config and wire everything.
	pub async fn from_config(config: Config) -> AppResult<Self> {
		let pool = crate::db::create_pool(&config).await?;
		Self::with_pool(pool, config)
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	pub fn reorderer_loaded(&self) -> bool {
		self.reorderer.is_some()
	}
}
