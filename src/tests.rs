use crate::{
	config::Config,
	error::AppError,
	geo::{GeoPoint, bounding_box, haversine_km},
	models::poi::{PaceKey, Poi, PoiClass, parse_opening_hours},
	models::request::TravelStyle,
	parser::{self, dates, money},
	planner::router::{effective_window, schedule_day, travel_time},
	reorder::{ReordererConfig, SequenceReorderer, Vocab},
	scoring::{CsrMatrix, SimilarityScorer, Vectorizer},
	text::{clean, lemma},
};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serial_test::serial;
use std::collections::HashMap;
use std::env;
use uuid::Uuid;

fn fixed_now() -> DateTime<Utc> {
	Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap()
}

// UNIT TESTS - text utilities

/// Test text cleaning matches the training pipeline's normalization
#[test]
fn test_clean_normalizes_text() {
	assert_eq!(clean("Hello,   World! 42"), "hello world 42");
	assert_eq!(clean("  Café & Croissant  "), "caf croissant");
	assert_eq!(clean(""), "");
}

/// Test the crude lemma folds plural forms
#[test]
fn test_lemma_folds_plurals() {
	assert_eq!(lemma("museums"), "museum");
	assert_eq!(lemma("activities"), "activity");
	assert_eq!(lemma("beaches"), "beach");
	assert_eq!(lemma("glass"), "glass");
	assert_eq!(lemma("sushi"), "sushi");
}

// UNIT TESTS - opening hours

/// Test a well-formed opening hours string parses exactly
#[test]
fn test_opening_hours_parses() {
	let (open, close) = parse_opening_hours("08:30-19:45");
	assert_eq!(open, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
	assert_eq!(close, NaiveTime::from_hms_opt(19, 45, 0).unwrap());
}

/// Test malformed opening hours fall back to 9-to-5
#[test]
fn test_opening_hours_fallback() {
	let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
	let five = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
	assert_eq!(parse_opening_hours(""), (nine, five));
	assert_eq!(parse_opening_hours("all day"), (nine, five));
	assert_eq!(parse_opening_hours("25:99-26:00"), (nine, five));
}

// UNIT TESTS - parser

/// Test the basic trip request shape: one city, one relative date, a budget
#[test]
fn test_parse_paris_next_month() {
	let text =
		"Plan a trip to Paris next month with a budget of $2000. Include sightseeing and local cuisine.";
	let parsed = parser::parse_travel_request(text, fixed_now()).unwrap();

	assert_eq!(parsed.locations, vec!["Paris"]);
	assert_eq!(parsed.dates.len(), 1);
	assert_eq!(parsed.dates[0], Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap());
	assert_eq!(parsed.budget, Some(2000.0));
	assert!(parsed.interests.iter().any(|i| i == "sightseeing"));
	assert!(parsed.interests.iter().any(|i| i == "cuisine"));
	assert_eq!(parsed.pace, None);
	assert!(parsed.confidence_score >= 50.0 && parsed.confidence_score <= 95.0);
}

/// Test destination-first/origin-last normalization and a month-span range
#[test]
fn test_parse_business_trip_with_origin() {
	let text =
		"Business trip to New York from London, March 15-20. Need flights and hotel near downtown. Budget $3000.";
	let parsed = parser::parse_travel_request(text, fixed_now()).unwrap();

	assert_eq!(parsed.locations, vec!["New York", "London"]);
	assert_eq!(parsed.dates.len(), 2);
	let (start, end) = (parsed.dates[0], parsed.dates[1]);
	assert_eq!(start.month(), 3);
	assert_eq!(start.day(), 15);
	assert_eq!(end.day(), 20);
	// 2025-03-15 already passed relative to fixed_now, so it rolls forward
	assert_eq!(start.year(), 2026);
	assert_eq!((end - start).num_days(), 5);
	assert_eq!(parsed.budget, Some(3000.0));
}

/// Test an N-day duration with no anchor starts the day after `now`
#[test]
fn test_parse_duration_trip() {
	let text =
		"Luxury 5-day trip to Maldives. Include private villa, spa treatments, and fine dining. Budget $15000.";
	let parsed = parser::parse_travel_request(text, fixed_now()).unwrap();

	assert_eq!(parsed.locations, vec!["Maldives"]);
	assert_eq!(parsed.budget, Some(15000.0));
	assert_eq!(parsed.travel_style, Some(TravelStyle::Luxury));
	assert_eq!(parsed.dates.len(), 2);
	let (start, end) = (parsed.dates[0], parsed.dates[1]);
	assert_eq!(start, Utc.with_ymd_and_hms(2025, 8, 2, 0, 0, 0).unwrap());
	assert_eq!((end - start).num_days(), 4);
}

/// Test structural validation failures are all INVALID_INPUT
#[test]
fn test_parse_rejects_structural_failures() {
	let too_long = "a".repeat(2001);
	for text in ["", "   ", too_long.as_str()] {
		let err = parser::parse_travel_request(text, fixed_now()).unwrap_err();
		assert_eq!(err.kind(), "INVALID_INPUT");
	}
	for text in [
		"Plan a trip <script>alert(1)</script>",
		"Visit JAVASCRIPT: now",
		"see data:text/html,x",
	] {
		let err = parser::parse_travel_request(text, fixed_now()).unwrap_err();
		assert_eq!(err.kind(), "INVALID_INPUT");
	}
}

/// Test a request with no location gets the default trip name and a warning
#[test]
fn test_parse_defaults_location() {
	let parsed =
		parser::parse_travel_request("somewhere warm with beaches please", fixed_now()).unwrap();
	assert_eq!(parsed.locations, vec!["My Trip"]);
	assert!(parsed.warnings.iter().any(|w| w.contains("no location")));
}

/// Test group size extraction: explicit count beats keyword defaults
#[test]
fn test_parse_group_size() {
	let explicit =
		parser::parse_travel_request("Trip to Rome for 6 people", fixed_now()).unwrap();
	assert_eq!(explicit.group_size, Some(6));

	let family =
		parser::parse_travel_request("Family trip to Rome with kids", fixed_now()).unwrap();
	assert_eq!(family.group_size, Some(4));
	assert_eq!(family.travel_style, Some(TravelStyle::Family));

	let couple = parser::parse_travel_request("Romantic couple trip to Rome", fixed_now()).unwrap();
	assert_eq!(couple.group_size, Some(2));

	let none = parser::parse_travel_request("Trip to Rome", fixed_now()).unwrap();
	assert_eq!(none.group_size, None);
}

/// Test ambiguous style keywords yield no style at all
#[test]
fn test_parse_style_ambiguity() {
	let parsed = parser::parse_travel_request(
		"Luxury adventure trip to Chile with hiking and lavish hotels",
		fixed_now(),
	)
	.unwrap();
	// adventure scores twice (adventure + hiking), luxury twice (luxury + lavish)
	assert_eq!(parsed.travel_style, None);
}

/// Test explicit pace names are picked up and absence stays None
#[test]
fn test_parse_pace() {
	let relaxed =
		parser::parse_travel_request("A relaxed week in Lisbon", fixed_now()).unwrap();
	assert_eq!(relaxed.pace, Some(PaceKey::Relaxed));

	let intense =
		parser::parse_travel_request("An action packed weekend in Berlin", fixed_now()).unwrap();
	assert_eq!(intense.pace, Some(PaceKey::Intense));

	let none = parser::parse_travel_request("A week in Lisbon", fixed_now()).unwrap();
	assert_eq!(none.pace, None);
}

// UNIT TESTS - date grammar

/// Test the explicit from/to range grammar
#[test]
fn test_dates_from_to_range() {
	let (start, end) =
		dates::extract_date_range("from June 10 to June 14, please", fixed_now()).unwrap();
	assert_eq!(start, Utc.with_ymd_and_hms(2026, 6, 10, 0, 0, 0).unwrap());
	assert_eq!((end - start).num_days(), 4);
}

/// Test "N days starting X" and "starting X for N days" agree
#[test]
fn test_dates_duration_grammars() {
	let a = dates::extract_date_range("3 days starting December 1", fixed_now()).unwrap();
	let b = dates::extract_date_range("starting December 1 for 3 days", fixed_now()).unwrap();
	assert_eq!(a, b);
	assert_eq!(a.0, Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap());
	assert_eq!((a.1 - a.0).num_days(), 2);
}

/// Test the en dash is normalized before the month-span rule runs
#[test]
fn test_dates_en_dash_span() {
	let parsed =
		parser::parse_travel_request("Visit Oslo, September 3\u{2013}6.", fixed_now()).unwrap();
	assert_eq!(parsed.dates.len(), 2);
	assert_eq!(parsed.dates[0], Utc.with_ymd_and_hms(2025, 9, 3, 0, 0, 0).unwrap());
	assert_eq!(parsed.dates[1], Utc.with_ymd_and_hms(2025, 9, 6, 0, 0, 0).unwrap());
}

/// Test single date expressions resolve future-preferring in UTC
#[test]
fn test_dates_future_preferring() {
	let past = dates::parse_date_expr("March 15", fixed_now()).unwrap();
	assert_eq!(past, Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap());

	let future = dates::parse_date_expr("December 24", fixed_now()).unwrap();
	assert_eq!(future, Utc.with_ymd_and_hms(2025, 12, 24, 0, 0, 0).unwrap());

	let bare = dates::parse_date_expr("December", fixed_now()).unwrap();
	assert_eq!(bare, Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap());

	let iso = dates::parse_date_expr("2026-01-05", fixed_now()).unwrap();
	assert_eq!(iso, Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap());

	assert_eq!(
		dates::parse_date_expr("tomorrow", fixed_now()).unwrap(),
		Utc.with_ymd_and_hms(2025, 8, 2, 0, 0, 0).unwrap()
	);
	assert_eq!(
		dates::parse_date_expr("next month", fixed_now()).unwrap(),
		Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap()
	);
	assert_eq!(dates::parse_date_expr("London", fixed_now()), None);
}

/// Test money-looking fragments never become dates
#[test]
fn test_dates_skip_money_fragments() {
	assert_eq!(dates::extract_date_range("budget of $2000", fixed_now()), None);
	assert_eq!(dates::extract_date_range("spend 1500 there", fixed_now()), None);
}

// UNIT TESTS - money grammar

/// Test symbol and word currency forms, comma stripping, largest-wins
#[test]
fn test_budget_extraction() {
	let mut warnings = Vec::new();
	assert_eq!(money::extract_budget("budget of $2,500.50", &mut warnings), Some(2500.5));
	assert!(warnings.is_empty());

	assert_eq!(money::extract_budget("about 2000 dollars", &mut warnings), Some(2000.0));
	assert_eq!(money::extract_budget("€900 for the week", &mut warnings), Some(900.0));
	assert_eq!(money::extract_budget("no numbers here", &mut warnings), None);
}

/// Test multiple amounts warn and keep the largest
#[test]
fn test_budget_ambiguity_warns() {
	let mut warnings = Vec::new();
	let budget = money::extract_budget("$500 for flights, $2000 total", &mut warnings);
	assert_eq!(budget, Some(2000.0));
	assert_eq!(warnings.len(), 1);
	assert!(warnings[0].contains("largest"));
}

// UNIT TESTS - geo

/// Test haversine against a well-known city pair
#[test]
fn test_haversine_paris_london() {
	let paris = GeoPoint::new(48.8566, 2.3522);
	let london = GeoPoint::new(51.5074, -0.1278);
	let km = haversine_km(paris, london);
	assert!((330.0..360.0).contains(&km), "got {km} km");
	assert_eq!(km, haversine_km(london, paris));
	assert_eq!(haversine_km(paris, paris), 0.0);
}

/// Test the bounding box encloses the disk it prefilters
#[test]
fn test_bounding_box_encloses_disk() {
	let center = GeoPoint::new(48.8566, 2.3522);
	let (lat_min, lat_max, lon_min, lon_max) = bounding_box(center, 20_000.0);
	assert!(lat_min < center.latitude && center.latitude < lat_max);
	assert!(lon_min < center.longitude && center.longitude < lon_max);
	// a point 20km due north must still be inside the box
	let north = GeoPoint::new(center.latitude + 0.179, center.longitude);
	assert!(north.latitude <= lat_max);
}

// UNIT TESTS - scoring

fn one_hot_scorer(class: PoiClass, ids: [Uuid; 3]) -> SimilarityScorer {
	let vocabulary: HashMap<String, usize> =
		[(String::from("museum"), 0), (String::from("sushi"), 1)].into_iter().collect();
	let vectorizer = Vectorizer::new(vocabulary, vec![1.0, 1.0], (1, 2)).unwrap();
	// rows: [1,0], [0,1], [0.7071,0.7071] - all L2-normalized
	let matrix = CsrMatrix::new(
		3,
		2,
		vec![0, 1, 2, 4],
		vec![0, 1, 0, 1],
		vec![1.0, 1.0, 0.70710677, 0.70710677],
	)
	.unwrap();
	SimilarityScorer::new(class, vectorizer, matrix, ids.to_vec()).unwrap()
}

/// Test ranking order and the zero-score drop for non-destination classes
#[test]
fn test_scorer_ranks_and_drops_zero() {
	let ids = [Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)];
	let scorer = one_hot_scorer(PoiClass::Activity, ids);

	// "museum" matches rows 0 (1.0) and 2 (0.707); row 1 scores zero and drops
	assert_eq!(scorer.top_k("museum", 10), vec![ids[0], ids[2]]);
	// k clips the list
	assert_eq!(scorer.top_k("museum", 1), vec![ids[0]]);
}

/// Test destinations keep their full top-k even at score zero
#[test]
fn test_scorer_destinations_keep_zero_scores() {
	let ids = [Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)];
	let scorer = one_hot_scorer(PoiClass::Destination, ids);

	let top = scorer.top_k("completely unrelated words", 10);
	assert_eq!(top.len(), 3);
	// all-zero scores tie-break by ascending row index
	assert_eq!(top, ids.to_vec());
}

/// Test score ties break by row index after the mixed query
#[test]
fn test_scorer_tie_order() {
	let ids = [Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)];
	let scorer = one_hot_scorer(PoiClass::Activity, ids);

	// query [0.707, 0.707]: row 2 scores ~1.0, rows 0 and 1 tie at ~0.707
	assert_eq!(scorer.top_k("museum sushi", 10), vec![ids[2], ids[0], ids[1]]);
}

/// Test the vectorizer produces a normalized vector and sees bigrams
#[test]
fn test_vectorizer_transform() {
	let vocabulary: HashMap<String, usize> =
		[(String::from("modern art"), 0), (String::from("art"), 1)].into_iter().collect();
	let vectorizer = Vectorizer::new(vocabulary, vec![2.0, 1.0], (1, 2)).unwrap();

	let query = vectorizer.transform("Modern Art!");
	assert_eq!(query.len(), 2);
	let norm: f32 = query.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
	assert!((norm - 1.0).abs() < 1e-5);
	// idf weighting favors the bigram dimension
	let weights: HashMap<usize, f32> = query.into_iter().collect();
	assert!(weights[&0] > weights[&1]);
}

/// Test a scorer rejects mismatched artifact shapes at construction
#[test]
fn test_scorer_rejects_mismatched_artifacts() {
	let vocabulary: HashMap<String, usize> = [(String::from("museum"), 0)].into_iter().collect();
	let vectorizer = Vectorizer::new(vocabulary, vec![1.0], (1, 1)).unwrap();
	let matrix = CsrMatrix::new(2, 1, vec![0, 1, 2], vec![0, 0], vec![1.0, 1.0]).unwrap();
	// id map with the wrong number of rows
	let err =
		SimilarityScorer::new(PoiClass::Activity, vectorizer, matrix, vec![Uuid::from_u128(1)])
			.unwrap_err();
	assert_eq!(err.kind(), "SCORING_UNAVAILABLE");
}

// UNIT TESTS - router

fn day_start() -> DateTime<Utc> {
	Utc.with_ymd_and_hms(2025, 9, 1, 9, 0, 0).unwrap()
}

fn windowed_poi(
	id: u128,
	class: PoiClass,
	lat: f64,
	lon: f64,
	open_hour: u32,
	close_hour: u32,
	duration_minutes: i64,
) -> Poi {
	let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
	Poi {
		id: Uuid::from_u128(id),
		class,
		latitude: lat,
		longitude: lon,
		opens: date.and_hms_opt(open_hour, 0, 0).unwrap().and_utc(),
		closes: date.and_hms_opt(close_hour, 0, 0).unwrap().and_utc(),
		duration_minutes,
		price: 0.0,
	}
}

/// Test the schedule respects windows, travel gaps, and visiting order
#[test]
fn test_router_schedules_feasible_day() {
	let anchor = GeoPoint::new(48.8566, 2.3522);
	let pois = vec![
		windowed_poi(1, PoiClass::Activity, 48.86, 2.35, 9, 18, 60),
		windowed_poi(2, PoiClass::Activity, 48.87, 2.36, 9, 18, 60),
	];
	let start = day_start();
	let end = start + Duration::hours(8);

	let scheduled = schedule_day(anchor, &pois, start, end, 60.0);
	assert_eq!(scheduled.len(), 2);
	// nearest first
	assert_eq!(scheduled[0].id, Uuid::from_u128(1));

	// replay the greedy timeline and check every bound
	let mut cursor_time = start;
	let mut cursor_loc = anchor;
	for poi in &scheduled {
		let (opens, closes) = effective_window(poi, start);
		let earliest = (cursor_time + travel_time(cursor_loc, poi.location(), 60.0)).max(opens);
		let finish = earliest + poi.duration();
		assert!(earliest >= opens);
		assert!(finish <= closes);
		assert!(finish <= end);
		cursor_time = finish;
		cursor_loc = poi.location();
	}
}

/// Test a POI whose visit cannot finish inside its window is skipped
#[test]
fn test_router_respects_closing_window() {
	let anchor = GeoPoint::new(48.8566, 2.3522);
	// opens 16:00, closes 17:00, needs 120 minutes: can never fit
	let pois = vec![windowed_poi(1, PoiClass::Activity, 48.86, 2.35, 16, 17, 120)];
	let scheduled =
		schedule_day(anchor, &pois, day_start(), day_start() + Duration::hours(8), 60.0);
	assert!(scheduled.is_empty());
}

/// Test the day-end bound holds for everything except transportation
#[test]
fn test_router_day_end_exempts_transportation() {
	let anchor = GeoPoint::new(48.8566, 2.3522);
	let start = day_start();
	let end = start + Duration::hours(4);

	// a 5-hour activity cannot fit a 4-hour day
	let activity = vec![windowed_poi(1, PoiClass::Activity, 48.86, 2.35, 9, 23, 300)];
	assert!(schedule_day(anchor, &activity, start, end, 60.0).is_empty());

	// the same span as a fixed carrier window is allowed to overrun the
	// day (departing right at the anchor, so no travel eats the window)
	let transport =
		vec![windowed_poi(2, PoiClass::Transportation, 48.8566, 2.3522, 9, 14, 300)];
	assert_eq!(schedule_day(anchor, &transport, start, end, 60.0).len(), 1);
}

/// Test equidistant, equal-window POIs order by id
#[test]
fn test_router_deterministic_tiebreak() {
	let anchor = GeoPoint::new(48.8566, 2.3522);
	let pois = vec![
		windowed_poi(7, PoiClass::Activity, 48.86, 2.35, 9, 18, 30),
		windowed_poi(3, PoiClass::Activity, 48.86, 2.35, 9, 18, 30),
	];
	let scheduled =
		schedule_day(anchor, &pois, day_start(), day_start() + Duration::hours(8), 60.0);
	assert_eq!(scheduled.len(), 2);
	assert_eq!(scheduled[0].id, Uuid::from_u128(3));

	// identical runs produce identical output
	let again =
		schedule_day(anchor, &pois, day_start(), day_start() + Duration::hours(8), 60.0);
	let ids: Vec<Uuid> = scheduled.iter().map(|p| p.id).collect();
	let again_ids: Vec<Uuid> = again.iter().map(|p| p.id).collect();
	assert_eq!(ids, again_ids);
}

/// Test day-0 windows translate onto later days (but carrier windows don't)
#[test]
fn test_router_window_translation() {
	let poi = windowed_poi(1, PoiClass::Activity, 48.86, 2.35, 9, 18, 60);
	let day3 = day_start() + Duration::days(3);
	let (opens, closes) = effective_window(&poi, day3);
	assert_eq!(opens, poi.opens + Duration::days(3));
	assert_eq!(closes, poi.closes + Duration::days(3));

	let carrier = windowed_poi(2, PoiClass::Transportation, 48.86, 2.35, 9, 14, 300);
	assert_eq!(effective_window(&carrier, day3), (carrier.opens, carrier.closes));
}

/// Test zero distance between distinct POIs costs zero travel time
#[test]
fn test_travel_time_zero_distance() {
	let p = GeoPoint::new(48.86, 2.35);
	assert_eq!(travel_time(p, p, 60.0), Duration::zero());
	let q = GeoPoint::new(48.87, 2.35);
	assert!(travel_time(p, q, 60.0) > Duration::zero());
}

// UNIT TESTS - sequence reorderer

fn tiny_reorderer(ids: &[Uuid; 3]) -> SequenceReorderer {
	let mut itos: Vec<String> =
		["<pad>", "<bos>", "<eos>", "<unk>"].iter().map(|s| s.to_string()).collect();
	itos.extend(ids.iter().map(Uuid::to_string));
	let vocab = Vocab::new(itos).unwrap();
	let config = ReordererConfig {
		vocab_size: 7,
		pad_id: 0,
		bos_id: 1,
		max_src_len: 32,
		max_tgt_len: 34,
	};
	// transition logits: bos -> C -> A -> B -> eos
	let mut weights = vec![-1.0f32; 49];
	weights[1 * 7 + 6] = 5.0; // bos -> C
	weights[6 * 7 + 4] = 5.0; // C -> A
	weights[4 * 7 + 5] = 5.0; // A -> B
	weights[5 * 7 + 2] = 5.0; // B -> eos
	SequenceReorderer::new(vocab, config, weights).unwrap()
}

/// Test the greedy decode emits the learned order as a full permutation
#[test]
fn test_reorderer_decodes_learned_order() {
	let ids = [Uuid::from_u128(10), Uuid::from_u128(20), Uuid::from_u128(30)];
	let reorderer = tiny_reorderer(&ids);

	let out = reorderer.reorder(&ids);
	assert_eq!(out, vec![ids[2], ids[0], ids[1]]);
}

/// Test a stable decode is idempotent under re-reordering
#[test]
fn test_reorderer_idempotent() {
	let ids = [Uuid::from_u128(10), Uuid::from_u128(20), Uuid::from_u128(30)];
	let reorderer = tiny_reorderer(&ids);

	let once = reorderer.reorder(&ids);
	let twice = reorderer.reorder(&once);
	assert_eq!(once, twice);
}

/// Test unknown ids survive as appended inputs, keeping the permutation
#[test]
fn test_reorderer_preserves_unknown_ids() {
	let ids = [Uuid::from_u128(10), Uuid::from_u128(20), Uuid::from_u128(30)];
	let reorderer = tiny_reorderer(&ids);

	let stranger = Uuid::from_u128(99);
	let input = vec![ids[0], stranger, ids[2]];
	let out = reorderer.reorder(&input);
	assert_eq!(out.len(), 3);
	for id in &input {
		assert!(out.contains(id));
	}
}

/// Test the empty input is returned untouched
#[test]
fn test_reorderer_empty_input() {
	let ids = [Uuid::from_u128(10), Uuid::from_u128(20), Uuid::from_u128(30)];
	let reorderer = tiny_reorderer(&ids);
	assert!(reorderer.reorder(&[]).is_empty());
}

// UNIT TESTS - pace presets

/// Test the three pace presets carry the documented bounds
#[test]
fn test_pace_presets() {
	assert_eq!(PaceKey::Relaxed.preset().daily_activities, 2);
	assert_eq!(PaceKey::Relaxed.preset().max_hours, 4);
	assert_eq!(PaceKey::Moderate.preset().daily_activities, 4);
	assert_eq!(PaceKey::Moderate.preset().max_hours, 8);
	assert_eq!(PaceKey::Intense.preset().daily_activities, 6);
	assert_eq!(PaceKey::Intense.preset().max_hours, 12);
}

// UNIT TESTS - error taxonomy

/// Test every error variant maps to its stable kind
#[test]
fn test_error_kinds() {
	assert_eq!(AppError::InvalidInput(String::new()).kind(), "INVALID_INPUT");
	assert_eq!(AppError::DestinationNotFound(String::new()).kind(), "DESTINATION_NOT_FOUND");
	assert_eq!(AppError::ScoringUnavailable(String::new()).kind(), "SCORING_UNAVAILABLE");
	assert_eq!(AppError::EmptyPlan.kind(), "EMPTY_PLAN");
	assert_eq!(AppError::RepositoryUnavailable(String::new()).kind(), "REPOSITORY_UNAVAILABLE");
	assert_eq!(AppError::DeadlineExceeded.kind(), "DEADLINE_EXCEEDED");
	assert_eq!(AppError::ReordererFailed(String::new()).kind(), "REORDERER_FAILED");
}

// UNIT TESTS - configuration

/// Test the environment overrides defaults and bad values fail loudly
#[test]
#[serial]
fn test_config_from_env() {
	unsafe {
		env::set_var("DEFAULT_RADIUS_KM", "35");
		env::set_var("ITEM_BUDGET_FRACTION", "0.25");
	}
	let config = Config::from_env().unwrap();
	assert_eq!(config.default_radius_km, 35);
	assert_eq!(config.item_budget_fraction, 0.25);
	// untouched knobs keep their defaults
	assert_eq!(config.candidate_k, 10);
	assert_eq!(config.accommodation_min_rating, 3.5);

	unsafe {
		env::set_var("DEFAULT_RADIUS_KM", "not a number");
	}
	assert!(Config::from_env().is_err());

	unsafe {
		env::remove_var("DEFAULT_RADIUS_KM");
		env::remove_var("ITEM_BUDGET_FRACTION");
	}
}

/// Test the adaptive tiers start at the caller radius and widen
#[test]
#[serial]
fn test_config_radius_tiers() {
	let config = Config::default();
	assert_eq!(config.radius_tiers_m(20), [20_000.0, 50_000.0, 100_000.0]);
	assert_eq!(config.radius_tiers_m(5)[0], 5_000.0);
}
