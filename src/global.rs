pub const LOG_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/logs");
pub const CRASH_LOG: &str = "crash.log";
pub const LATEST_LOG: &str = "latest.log";

/// Maximum request text length accepted by the parser, in characters.
pub const MAX_REQUEST_LEN: usize = 2000;

/// Name used for a trip when no location could be extracted.
pub const DEFAULT_TRIP_NAME: &str = "My Trip";

/// Budget assumed when neither the request nor the user preferences carry one.
pub const DEFAULT_BUDGET: f64 = 1000.0;

/// Widened catch radii tried after the caller's radius, in meters.
pub const RADIUS_TIER_2_M: f64 = 50_000.0;
pub const RADIUS_TIER_3_M: f64 = 100_000.0;

/// The pool is considered usable once it holds this many activities.
pub const MIN_POOL_ACTIVITIES: usize = 3;

/// Disk radius around each endpoint city when searching carrier routes.
pub const TRANSPORT_AREA_RADIUS_M: f64 = 50_000.0;

/// Upper clamp on the per-day stop override in day regeneration.
pub const REGENERATE_MAX_STOPS: usize = 20;

/// Budget assumed when regenerating a day of an itinerary saved without one.
pub const REGENERATE_FALLBACK_BUDGET: f64 = 10_000.0;
