/*
 * src/parser/money.rs
 *
 * File for the budget grammar
 *
 * Purpose:
 *   Find money amounts written with a currency symbol or a currency word.
 *   The budget is a single scalar; currency itself is not modeled.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static SYMBOL_RE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"[$€£]\s*([0-9][0-9,]*(?:\.[0-9]{1,2})?)").unwrap());
static WORD_RE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?i)\b([0-9][0-9,]*(?:\.[0-9]{1,2})?)\s*(?:dollars|euros|pounds|usd|eur|gbp|bucks)\b")
		.unwrap()
});

/// Amounts above this are treated as typos, not budgets.
const MAX_REASONABLE_BUDGET: f64 = 10_000_000.0;

/// Extract the trip budget. With several credible amounts in the text the
/// largest wins and a warning records the ambiguity.
pub fn extract_budget(text: &str, warnings: &mut Vec<String>) -> Option<f64> {
	let mut amounts: Vec<f64> = Vec::new();

	for caps in SYMBOL_RE.captures_iter(text) {
		if let Some(v) = parse_amount(&caps[1]) {
			amounts.push(v);
		}
	}
	for caps in WORD_RE.captures_iter(text) {
		if let Some(v) = parse_amount(&caps[1]) {
			amounts.push(v);
		}
	}

	let mut distinct = amounts.clone();
	distinct.sort_by(f64::total_cmp);
	distinct.dedup();
	if distinct.len() > 1 {
		warnings.push(format!(
			"multiple budget amounts found ({}); using the largest",
			distinct.len()
		));
	}

	distinct.last().copied()
}

fn parse_amount(raw: &str) -> Option<f64> {
	let value: f64 = raw.replace(',', "").parse().ok()?;
	(value > 0.0 && value <= MAX_REASONABLE_BUDGET).then_some(value)
}
