/*
 * src/parser/dates.rs
 *
 * File for the travel-date grammar
 *
 * Purpose:
 *   Two-stage extraction: explicit range phrasings first, then a general
 *   scan for single date expressions. Everything is UTC and
 *   future-preferring; a yearless date that already passed rolls forward.
 */

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

const MONTH_NAMES: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|sept|oct|nov|dec";

static FROM_TO_RE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"(?i)\bfrom\s+(.+?)\s+(?:to|until)\s+(.+?)(?:[.,]|$)").unwrap());
static BETWEEN_RE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"(?i)\bbetween\s+(.+?)\s+and\s+(.+?)(?:[.,]|$)").unwrap());
static DAYS_STARTING_RE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?i)\b(\d{1,3})\s+days?\s+starting\s+(?:on\s+)?(.+?)(?:[.,]|$)").unwrap()
});
static STARTING_FOR_RE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?i)\bstarting\s+(?:on\s+)?(.+?)\s+for\s+(\d{1,3})\s+days?\b").unwrap()
});
static MONTH_SPAN_RE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"(?i)\b({MONTH_NAMES})\.?\s+(\d{{1,2}})\s*(?:-|to)\s*(\d{{1,2}})(?:,?\s*(\d{{4}}))?"
	))
	.unwrap()
});
static N_DAY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(\d{1,3})\s*-?\s*day\b").unwrap());

static ISO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap());
static MONTH_DAY_RE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"(?i)\b({MONTH_NAMES})\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?(?:,?\s*(\d{{4}}))?\b"
	))
	.unwrap()
});
static DAY_MONTH_RE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+({MONTH_NAMES})\b(?:,?\s*(\d{{4}}))?"
	))
	.unwrap()
});
static RELATIVE_RE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"(?i)\b(today|tomorrow|next\s+week|next\s+month)\b").unwrap());
static BARE_MONTH_RE: Lazy<Regex> =
	Lazy::new(|| Regex::new(&format!(r"(?i)\b({MONTH_NAMES})\b")).unwrap());

/// Vocabulary that marks a token as date-ish; the interest extractor skips
/// these without needing the exact matched spans.
static DATE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
	[
		"january", "february", "march", "april", "may", "june", "july", "august", "september",
		"october", "november", "december", "jan", "feb", "mar", "apr", "jun", "jul", "aug",
		"sep", "sept", "oct", "nov", "dec", "monday", "tuesday", "wednesday", "thursday",
		"friday", "saturday", "sunday", "today", "tomorrow", "next", "week", "weeks", "month",
		"months", "year", "years", "day", "days", "starting", "until",
	]
	.into_iter()
	.collect()
});

pub fn is_date_word(token: &str) -> bool {
	DATE_WORDS.contains(token)
}

/// Extract a (start, end) range from the text, start <= end, both UTC
/// midnight. A single found date yields start == end.
pub fn extract_date_range(
	text: &str,
	now: DateTime<Utc>,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
	// Stage one: explicit range phrasings, most specific first.
	if let Some(caps) = FROM_TO_RE.captures(text) {
		if let (Some(d1), Some(d2)) =
			(parse_date_expr(&caps[1], now), parse_date_expr(&caps[2], now))
		{
			return Some((d1.min(d2), d1.max(d2)));
		}
	}
	if let Some(caps) = BETWEEN_RE.captures(text) {
		if let (Some(d1), Some(d2)) =
			(parse_date_expr(&caps[1], now), parse_date_expr(&caps[2], now))
		{
			return Some((d1.min(d2), d1.max(d2)));
		}
	}
	if let Some(caps) = DAYS_STARTING_RE.captures(text) {
		if let (Ok(n), Some(start)) = (caps[1].parse::<u64>(), parse_date_expr(&caps[2], now)) {
			if n >= 1 {
				return Some((start, start + Days::new(n - 1)));
			}
		}
	}
	if let Some(caps) = STARTING_FOR_RE.captures(text) {
		if let (Some(start), Ok(n)) = (parse_date_expr(&caps[1], now), caps[2].parse::<u64>()) {
			if n >= 1 {
				return Some((start, start + Days::new(n - 1)));
			}
		}
	}
	if let Some(caps) = MONTH_SPAN_RE.captures(text) {
		let month = month_number(&caps[1])?;
		let (d1, d2) = (caps[2].parse::<u32>().ok()?, caps[3].parse::<u32>().ok()?);
		let year = caps.get(4).and_then(|y| y.as_str().parse::<i32>().ok());
		let start = resolve_ymd(year, month, d1, now)?;
		let end = NaiveDate::from_ymd_opt(start.year(), month, d2)
			.map(|d| midnight(d))
			.unwrap_or(start);
		return Some((start.min(end), start.max(end)));
	}
	if let Some(caps) = N_DAY_RE.captures(text) {
		if let Ok(n) = caps[1].parse::<u64>() {
			if n >= 1 {
				// "5-day trip": anchor on a single date elsewhere in the
				// text, else on the day after `now`.
				let start = scan_single_dates(text, now)
					.into_iter()
					.min()
					.unwrap_or_else(|| midnight(now.date_naive() + Days::new(1)));
				return Some((start, start + Days::new(n - 1)));
			}
		}
	}

	// Stage two: general scan for single dates.
	let found = scan_single_dates(text, now);
	let start = *found.iter().min()?;
	let end = *found.iter().max()?;
	Some((start, end))
}

/// All single-date expressions in the text, skipping overlaps (a "March 15"
/// hit suppresses the bare "March" inside it) and money-like fragments.
fn scan_single_dates(text: &str, now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
	let mut occupied: Vec<(usize, usize)> = Vec::new();
	let mut found = Vec::new();

	let mut consider = |start: usize, end: usize, parsed: Option<DateTime<Utc>>| {
		if occupied.iter().any(|&(s, e)| start < e && end > s) {
			return;
		}
		let frag = &text[start..end];
		if frag.contains('$') || frag.chars().all(|c| c.is_ascii_digit()) {
			return;
		}
		if let Some(dt) = parsed {
			occupied.push((start, end));
			found.push(dt);
		}
	};

	for m in ISO_RE.find_iter(text) {
		consider(m.start(), m.end(), parse_date_expr(m.as_str(), now));
	}
	for m in MONTH_DAY_RE.find_iter(text) {
		consider(m.start(), m.end(), parse_date_expr(m.as_str(), now));
	}
	for m in DAY_MONTH_RE.find_iter(text) {
		consider(m.start(), m.end(), parse_date_expr(m.as_str(), now));
	}
	for m in RELATIVE_RE.find_iter(text) {
		consider(m.start(), m.end(), parse_date_expr(m.as_str(), now));
	}
	for m in BARE_MONTH_RE.find_iter(text) {
		consider(m.start(), m.end(), parse_date_expr(m.as_str(), now));
	}
	found
}

/// Parse one date expression to UTC midnight. Returns None when the text
/// is not a date at all, letting range rules fall through gracefully.
pub fn parse_date_expr(raw: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
	let trimmed = raw.trim().trim_end_matches(['.', ',', '!', '?']);
	if trimmed.is_empty() {
		return None;
	}
	let lowered = trimmed.to_lowercase();

	match lowered.as_str() {
		"today" => return Some(midnight(now.date_naive())),
		"tomorrow" => return Some(midnight(now.date_naive() + Days::new(1))),
		"next week" => return Some(midnight(now.date_naive() + Days::new(7))),
		"next month" => {
			let d = now.date_naive().checked_add_months(Months::new(1))?;
			return Some(midnight(d));
		}
		_ => {}
	}

	if let Some(caps) = ISO_RE.captures(trimmed) {
		let date = NaiveDate::from_ymd_opt(
			caps[1].parse().ok()?,
			caps[2].parse().ok()?,
			caps[3].parse().ok()?,
		)?;
		return Some(midnight(date));
	}
	if let Some(caps) = MONTH_DAY_RE.captures(trimmed) {
		let month = month_number(&caps[1])?;
		let day = caps[2].parse::<u32>().ok()?;
		let year = caps.get(3).and_then(|y| y.as_str().parse::<i32>().ok());
		return resolve_ymd(year, month, day, now);
	}
	if let Some(caps) = DAY_MONTH_RE.captures(trimmed) {
		let day = caps[1].parse::<u32>().ok()?;
		let month = month_number(&caps[2])?;
		let year = caps.get(3).and_then(|y| y.as_str().parse::<i32>().ok());
		return resolve_ymd(year, month, day, now);
	}
	if let Some(month) = month_number(&lowered) {
		// bare month name: first of its nearest future occurrence
		return resolve_ymd(None, month, 1, now);
	}
	None
}

/// Resolve (maybe-yearless) calendar parts, preferring the nearest future
/// instance when no year was written.
fn resolve_ymd(year: Option<i32>, month: u32, day: u32, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
	match year {
		Some(y) => Some(midnight(NaiveDate::from_ymd_opt(y, month, day)?)),
		None => {
			let this_year = NaiveDate::from_ymd_opt(now.year(), month, day)?;
			if this_year < now.date_naive() {
				Some(midnight(NaiveDate::from_ymd_opt(now.year() + 1, month, day)?))
			} else {
				Some(midnight(this_year))
			}
		}
	}
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
	date.and_time(chrono::NaiveTime::MIN).and_utc()
}

fn month_number(name: &str) -> Option<u32> {
	Some(match name.to_lowercase().trim_end_matches('.') {
		"january" | "jan" => 1,
		"february" | "feb" => 2,
		"march" | "mar" => 3,
		"april" | "apr" => 4,
		"may" => 5,
		"june" | "jun" => 6,
		"july" | "jul" => 7,
		"august" | "aug" => 8,
		"september" | "sep" | "sept" => 9,
		"october" | "oct" => 10,
		"november" | "nov" => 11,
		"december" | "dec" => 12,
		_ => return None,
	})
}
