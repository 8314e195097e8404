/*
 * src/scoring/vectorizer.rs
 *
 * File for the query-side TF-IDF vectorizer
 *
 * Purpose:
 *   Mirror of the offline training vectorizer: same vocabulary, same IDF
 *   weights, same stop words, same 1-2-gram tokenization. A query must be
 *   embedded exactly the way the item matrix rows were.
 */

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::text::{clean, is_stop_word};

/// On-disk shape of a trained vectorizer.
#[derive(Deserialize)]
struct VectorizerArtifact {
	vocabulary: HashMap<String, usize>,
	idf: Vec<f32>,
	max_features: usize,
	ngram_range: (usize, usize),
}

/// Term-to-index mapping with IDF weights.
#[derive(Debug)]
pub struct Vectorizer {
	vocabulary: HashMap<String, usize>,
	idf: Vec<f32>,
	ngram_lo: usize,
	ngram_hi: usize,
}

impl Vectorizer {
	pub fn new(
		vocabulary: HashMap<String, usize>,
		idf: Vec<f32>,
		ngram_range: (usize, usize),
	) -> AppResult<Self> {
		let max_index = vocabulary.values().copied().max();
		if let Some(max_index) = max_index {
			if max_index >= idf.len() {
				return Err(AppError::ScoringUnavailable(format!(
					"vectorizer vocabulary index {max_index} exceeds idf table of {}",
					idf.len()
				)));
			}
		}
		let (lo, hi) = ngram_range;
		if lo == 0 || hi < lo {
			return Err(AppError::ScoringUnavailable(format!(
				"vectorizer has invalid ngram range ({lo}, {hi})"
			)));
		}
		Ok(Self { vocabulary, idf, ngram_lo: lo, ngram_hi: hi })
	}

	pub fn load(path: &Path) -> AppResult<Self> {
		let raw = fs::read_to_string(path).map_err(|e| {
			AppError::ScoringUnavailable(format!("read {}: {e}", path.display()))
		})?;
		let artifact: VectorizerArtifact = serde_json::from_str(&raw).map_err(|e| {
			AppError::ScoringUnavailable(format!("parse {}: {e}", path.display()))
		})?;
		if artifact.vocabulary.len() > artifact.max_features {
			return Err(AppError::ScoringUnavailable(format!(
				"vectorizer vocabulary of {} exceeds max_features {}",
				artifact.vocabulary.len(),
				artifact.max_features
			)));
		}
		Self::new(artifact.vocabulary, artifact.idf, artifact.ngram_range)
	}

	/// Number of term dimensions.
	pub fn dimensions(&self) -> usize {
		self.idf.len()
	}

	/// Embed query text as an L2-normalized sparse vector, sorted by index.
	pub fn transform(&self, text: &str) -> Vec<(usize, f32)> {
		let cleaned = clean(text);
		let tokens: Vec<&str> =
			cleaned.split_whitespace().filter(|t| !is_stop_word(t)).collect();

		let mut tf: HashMap<usize, f32> = HashMap::new();
		for n in self.ngram_lo..=self.ngram_hi {
			if tokens.len() < n {
				break;
			}
			for window in tokens.windows(n) {
				let term = window.join(" ");
				if let Some(&index) = self.vocabulary.get(term.as_str()) {
					*tf.entry(index).or_insert(0.0) += 1.0;
				}
			}
		}

		let mut entries: Vec<(usize, f32)> =
			tf.into_iter().map(|(i, count)| (i, count * self.idf[i])).collect();
		let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
		if norm > 0.0 {
			for (_, w) in entries.iter_mut() {
				*w /= norm;
			}
		}
		entries.sort_by_key(|&(i, _)| i);
		entries
	}
}
