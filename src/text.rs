/*
 * src/text.rs
 *
 * File for shared text normalization
 *
 * Purpose:
 *   The parser and the similarity scorers must see queries the same way the
 *   offline training pipeline saw documents: lowercased, alphanumeric,
 *   single-spaced, stop words removed, crude lemmas.
 */

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// English stop words matching the list the scorer artifacts were trained with.
pub static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
	[
		"a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
		"any", "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
		"both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
		"each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
		"here", "hers", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just",
		"me", "more", "most", "my", "no", "nor", "not", "now", "of", "off", "on", "once", "only",
		"or", "other", "our", "ours", "out", "over", "own", "same", "she", "should", "so", "some",
		"such", "than", "that", "the", "their", "theirs", "them", "then", "there", "these",
		"they", "this", "those", "through", "to", "too", "under", "until", "up", "very", "was",
		"we", "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will",
		"with", "would", "you", "your", "yours",
	]
	.into_iter()
	.collect()
});

/// Lowercase, strip non-alphanumerics, collapse whitespace.
pub fn clean(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	let mut last_space = true;
	for ch in text.chars() {
		let ch = ch.to_ascii_lowercase();
		if ch.is_ascii_alphanumeric() {
			out.push(ch);
			last_space = false;
		} else if !last_space {
			out.push(' ');
			last_space = true;
		}
	}
	while out.ends_with(' ') {
		out.pop();
	}
	out
}

pub fn is_stop_word(word: &str) -> bool {
	STOP_WORDS.contains(word)
}

/// Crude suffix-stripping lemma, enough to fold plural forms together.
pub fn lemma(word: &str) -> String {
	let w = word.to_ascii_lowercase();
	if w.len() > 4 && w.ends_with("ies") {
		return format!("{}y", &w[..w.len() - 3]);
	}
	if w.len() > 4
		&& (w.ends_with("ses")
			|| w.ends_with("xes")
			|| w.ends_with("zes")
			|| w.ends_with("ches")
			|| w.ends_with("shes"))
	{
		return w[..w.len() - 2].to_string();
	}
	if w.len() > 3 && w.ends_with('s') && !w.ends_with("ss") {
		return w[..w.len() - 1].to_string();
	}
	w
}
