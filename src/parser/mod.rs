/*
 * src/parser/mod.rs
 *
 * File for the free-text travel request parser
 *
 * Purpose:
 *   Turn prose like "Plan a 5-day family trip to Tokyo in December with a
 *   $5000 budget" into a ParsedRequest. Structural problems are fatal;
 *   anything merely missing becomes a warning and a None field.
 *
 * Include:
 *   parse_travel_request - the only entry point
 *   dates                - date range grammar (submodule)
 *   money                - budget grammar (submodule)
 */

pub mod dates;
pub mod money;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::global::{DEFAULT_TRIP_NAME, MAX_REQUEST_LEN};
use crate::models::poi::PaceKey;
use crate::models::request::{ParsedRequest, TravelStyle};
use crate::text::{clean, is_stop_word, lemma};

/// Patterns that mark a request as actively hostile rather than malformed.
const ACTIVE_CONTENT: [&str; 3] = ["<script>", "javascript:", "data:text/html"];

/// Capitalized span following a location-cueing preposition. The span eats
/// further capitalized words plus connective "of"/"the" ("Isle of Skye").
static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(
		r"\b(to|in|at|from|near|around|visiting)\s+([A-Z][A-Za-z'-]*(?:\s+(?:[A-Z][A-Za-z'-]*|of|the))*)",
	)
	.unwrap()
});

static GROUP_SIZE_RE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?i)\b(\d{1,2})\s+(?:people|persons|guests|travelers|travellers|adults)\b")
		.unwrap()
});

/// Capitalized words that follow location prepositions but never name places.
static NON_PLACE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
	[
		"january", "february", "march", "april", "may", "june", "july", "august", "september",
		"october", "november", "december", "monday", "tuesday", "wednesday", "thursday",
		"friday", "saturday", "sunday", "budget", "include", "need", "plan", "i", "my", "we",
		"the", "a",
	]
	.into_iter()
	.collect()
});

/// Generic request vocabulary that should never count as an interest.
static REQUEST_NOISE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
	[
		"plan", "trip", "trips", "travel", "vacation", "itinerary", "budget", "include",
		"includes", "including", "need", "needs", "want", "wants", "visit", "visiting", "near",
		"nearby", "dollars", "euros", "pounds", "people", "persons", "guests", "travelers",
		"travellers", "adults",
	]
	.into_iter()
	.collect()
});

/// Parse a free-text travel request into structured intent.
///
/// `now` anchors relative and future-preferring date expressions; passing
/// it in keeps the parser a pure function of its arguments.
///
/// # Errors
/// - `INVALID_INPUT` for empty text, text over 2000 chars, or text carrying
///   active-content patterns. All other extraction failures are non-fatal
///   and end up in `warnings`.
pub fn parse_travel_request(text: &str, now: DateTime<Utc>) -> AppResult<ParsedRequest> {
	validate(text)?;

	// Normalize en dashes so "March 15–20" reads like "March 15-20"
	let text = text.replace('\u{2013}', "-");
	let mut warnings = Vec::new();

	let locations = extract_locations(&text);
	let locations = if locations.is_empty() {
		warnings.push(String::from("no location found in request; defaulting trip name"));
		vec![String::from(DEFAULT_TRIP_NAME)]
	} else {
		locations
	};

	let dates = match dates::extract_date_range(&text, now) {
		Some((start, end)) => {
			if start.date_naive() == end.date_naive() {
				vec![start]
			} else {
				vec![start, end]
			}
		}
		None => {
			warnings.push(String::from("no travel dates found in request"));
			Vec::new()
		}
	};

	let budget = money::extract_budget(&text, &mut warnings);
	if budget.is_none() {
		warnings.push(String::from("no budget found in request"));
	}

	let interests = extract_interests(&text, &locations);
	let confidence_score =
		(1.0 - text.chars().count() as f64 / MAX_REQUEST_LEN as f64).clamp(0.5, 0.95) * 100.0;

	let parsed = ParsedRequest {
		locations,
		dates,
		interests,
		budget,
		group_size: extract_group_size(&text),
		travel_style: classify_style(&text),
		pace: extract_pace(&text),
		confidence_score,
		warnings,
	};
	info!(
		"Parsed travel request: locations={:?} dates={} interests={} budget={:?}",
		parsed.locations,
		parsed.dates.len(),
		parsed.interests.len(),
		parsed.budget
	);
	Ok(parsed)
}

fn validate(text: &str) -> AppResult<()> {
	if text.trim().is_empty() {
		return Err(AppError::InvalidInput(String::from("text cannot be empty")));
	}
	if text.chars().count() > MAX_REQUEST_LEN {
		return Err(AppError::InvalidInput(format!(
			"text exceeds {MAX_REQUEST_LEN} characters"
		)));
	}
	let lowered = text.to_lowercase();
	if ACTIVE_CONTENT.iter().any(|p| lowered.contains(p)) {
		return Err(AppError::InvalidInput(String::from("text contains invalid content")));
	}
	Ok(())
}

/// Extract place-name mentions, destination first and origin last.
///
/// A mention cued by "from" is the trip origin and is ordered after all
/// other mentions, so the planner can read destination = first and
/// origin = last without re-deriving cue words.
fn extract_locations(text: &str) -> Vec<String> {
	let mut destinations: Vec<String> = Vec::new();
	let mut origins: Vec<String> = Vec::new();
	let mut seen: HashSet<String> = HashSet::new();

	for caps in LOCATION_RE.captures_iter(text) {
		let cue = &caps[1];
		let Some(place) = trim_place(&caps[2]) else { continue };
		let key = place.to_lowercase();
		if !seen.insert(key) {
			continue;
		}
		if cue == "from" {
			origins.push(place);
		} else {
			destinations.push(place);
		}
	}

	destinations.extend(origins);
	destinations
}

/// Drop trailing connectives and cut the span at the first non-place word.
fn trim_place(raw: &str) -> Option<String> {
	let mut kept: Vec<&str> = Vec::new();
	for word in raw.split_whitespace() {
		if NON_PLACE_WORDS.contains(word.to_lowercase().as_str()) {
			break;
		}
		kept.push(word);
	}
	while matches!(kept.last(), Some(&"of") | Some(&"the")) {
		kept.pop();
	}
	if kept.is_empty() { None } else { Some(kept.join(" ")) }
}

fn extract_group_size(text: &str) -> Option<u32> {
	if let Some(caps) = GROUP_SIZE_RE.captures(text) {
		if let Ok(n) = caps[1].parse::<u32>() {
			if n > 0 {
				return Some(n);
			}
		}
	}
	let lowered = text.to_lowercase();
	if lowered.contains("family") {
		return Some(4);
	}
	if lowered.contains("couple") {
		return Some(2);
	}
	None
}

/// Keyword classification over the four styles; ambiguity yields None.
fn classify_style(text: &str) -> Option<TravelStyle> {
	let tokens: HashSet<String> = clean(text).split_whitespace().map(str::to_string).collect();
	let count = |words: &[&str]| words.iter().filter(|w| tokens.contains(**w)).count();

	let scores = [
		(TravelStyle::Luxury, count(&["luxury", "luxurious", "upscale", "premium", "lavish"])),
		(TravelStyle::Budget, count(&["cheap", "affordable", "backpacking", "hostel", "frugal"])),
		(TravelStyle::Family, count(&["family", "kids", "children", "child", "toddlers"])),
		(
			TravelStyle::Adventure,
			count(&["adventure", "adventurous", "hiking", "trekking", "rafting", "safari"]),
		),
	];

	let best = scores.iter().map(|(_, n)| *n).max()?;
	if best == 0 {
		return None;
	}
	let mut winners = scores.iter().filter(|(_, n)| *n == best);
	let style = winners.next().map(|(s, _)| *s);
	if winners.next().is_some() {
		// two styles tied; don't guess
		return None;
	}
	style
}

fn extract_pace(text: &str) -> Option<PaceKey> {
	let lowered = clean(text);
	if lowered.contains("relaxed") || lowered.contains("relaxing") || lowered.contains("laid back")
	{
		Some(PaceKey::Relaxed)
	} else if lowered.contains("intense")
		|| lowered.contains("packed")
		|| lowered.contains("fast paced")
	{
		Some(PaceKey::Intense)
	} else if lowered.contains("moderate") {
		Some(PaceKey::Moderate)
	} else {
		None
	}
}

/// Content words minus locations, date vocabulary, stop words, and request
/// noise; deduplicated by lemma in mention order.
fn extract_interests(text: &str, locations: &[String]) -> Vec<String> {
	let location_tokens: HashSet<String> = locations
		.iter()
		.flat_map(|l| l.split_whitespace())
		.map(|w| w.to_lowercase())
		.collect();

	let cleaned = clean(text);
	let mut seen: HashSet<String> = HashSet::new();
	let mut interests = Vec::new();
	for token in cleaned.split_whitespace() {
		if token.len() < 3 || !token.chars().all(|c| c.is_ascii_alphabetic()) {
			continue;
		}
		if is_stop_word(token)
			|| REQUEST_NOISE.contains(token)
			|| dates::is_date_word(token)
			|| location_tokens.contains(token)
		{
			continue;
		}
		let lem = lemma(token);
		if seen.insert(lem.clone()) {
			interests.push(lem);
		}
	}
	interests
}
