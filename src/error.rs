/*
 * src/error.rs
 *
 * File for the application error taxonomy
 *
 * Purpose:
 *   One error type for the whole generation pipeline. The boundary layer
 *   maps `kind()` onto whatever status codes it speaks.
 *
 * Include:
 *   AppError  - every failure the core can surface
 *   AppResult - Result alias used across the crate
 */

use std::fmt;

pub type AppResult<T> = std::result::Result<T, AppError>;

/// Every failure the generation core can surface to its caller.
///
/// `ReordererFailed` never escapes the planner; it exists so the reorder
/// path can be logged uniformly before falling back to the input order.
#[derive(Debug)]
pub enum AppError {
	/// The request text failed a structural check (empty, too long, active content).
	InvalidInput(String),
	/// The destination (or origin) city matched nothing in the catalog.
	DestinationNotFound(String),
	/// Scorer artifacts failed to load, or a runtime transform failed.
	ScoringUnavailable(String),
	/// No POI survived retrieval and filtering.
	EmptyPlan,
	/// The catalog gateway failed after its own retries.
	RepositoryUnavailable(String),
	/// The soft per-call deadline elapsed before a full itinerary existed.
	DeadlineExceeded,
	/// The sequence reorderer failed; swallowed into a log by the planner.
	ReordererFailed(String),
}

impl AppError {
	/// Stable machine-readable kind, used by boundaries and logs.
	pub fn kind(&self) -> &'static str {
		match self {
			AppError::InvalidInput(_) => "INVALID_INPUT",
			AppError::DestinationNotFound(_) => "DESTINATION_NOT_FOUND",
			AppError::ScoringUnavailable(_) => "SCORING_UNAVAILABLE",
			AppError::EmptyPlan => "EMPTY_PLAN",
			AppError::RepositoryUnavailable(_) => "REPOSITORY_UNAVAILABLE",
			AppError::DeadlineExceeded => "DEADLINE_EXCEEDED",
			AppError::ReordererFailed(_) => "REORDERER_FAILED",
		}
	}
}

impl fmt::Display for AppError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AppError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
			AppError::DestinationNotFound(name) => {
				write!(f, "no destination found matching '{name}'")
			}
			AppError::ScoringUnavailable(msg) => write!(f, "scoring unavailable: {msg}"),
			AppError::EmptyPlan => {
				write!(f, "no itinerary items could be scheduled for these preferences")
			}
			AppError::RepositoryUnavailable(msg) => write!(f, "repository unavailable: {msg}"),
			AppError::DeadlineExceeded => write!(f, "itinerary generation deadline exceeded"),
			AppError::ReordererFailed(msg) => write!(f, "reorderer failed: {msg}"),
		}
	}
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
	fn from(e: sqlx::Error) -> Self {
		AppError::RepositoryUnavailable(e.to_string())
	}
}
