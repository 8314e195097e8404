/*
 * src/reorder/model.rs
 *
 * File for the greedy sequence decoder
 *
 * Purpose:
 *   Deterministic seq2seq decode over learned transition logits. The
 *   artifacts are a vocab, one JSON config, and a weight blob; output is
 *   always a full permutation of the input ids.
 *
 * Weight layout (little-endian):
 *   magic "WFTR" | vocab_size u32 | logits vocab_size^2 x f32 (row-major,
 *   row = previous token, column = next token)
 */

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::reorder::vocab::Vocab;

const MAGIC: &[u8; 4] = b"WFTR";

/// On-disk decoder configuration.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ReordererConfig {
	pub vocab_size: usize,
	pub pad_id: usize,
	pub bos_id: usize,
	pub max_src_len: usize,
	pub max_tgt_len: usize,
}

pub struct SequenceReorderer {
	vocab: Vocab,
	config: ReordererConfig,
	/// Transition logits, vocab_size x vocab_size row-major.
	weights: Vec<f32>,
}

impl SequenceReorderer {
	pub fn new(vocab: Vocab, config: ReordererConfig, weights: Vec<f32>) -> AppResult<Self> {
		if vocab.len() != config.vocab_size {
			return Err(AppError::ReordererFailed(format!(
				"vocab has {} tokens but config says {}",
				vocab.len(),
				config.vocab_size
			)));
		}
		if weights.len() != config.vocab_size * config.vocab_size {
			return Err(AppError::ReordererFailed(format!(
				"weight blob holds {} logits, expected {}",
				weights.len(),
				config.vocab_size * config.vocab_size
			)));
		}
		if config.bos_id >= config.vocab_size || config.pad_id >= config.vocab_size {
			return Err(AppError::ReordererFailed(String::from(
				"control token ids exceed the vocabulary",
			)));
		}
		Ok(Self { vocab, config, weights })
	}

	/// Load `vocab.json`, `config.json`, `model.bin` from the artifact dir.
	pub fn load(dir: &Path) -> AppResult<Self> {
		let vocab = Vocab::load(&dir.join("vocab.json"))?;

		let config_path = dir.join("config.json");
		let raw = fs::read_to_string(&config_path).map_err(|e| {
			AppError::ReordererFailed(format!("read {}: {e}", config_path.display()))
		})?;
		let config: ReordererConfig = serde_json::from_str(&raw).map_err(|e| {
			AppError::ReordererFailed(format!("parse {}: {e}", config_path.display()))
		})?;

		let weights_path = dir.join("model.bin");
		let bytes = fs::read(&weights_path).map_err(|e| {
			AppError::ReordererFailed(format!("read {}: {e}", weights_path.display()))
		})?;
		let weights = parse_weights(&bytes, config.vocab_size).map_err(|msg| {
			AppError::ReordererFailed(format!("{}: {msg}", weights_path.display()))
		})?;

		let reorderer = Self::new(vocab, config, weights)?;
		info!("Loaded sequence reorderer with {} tokens", reorderer.config.vocab_size);
		Ok(reorderer)
	}

	/// Permute `ids` by greedy decode.
	///
	/// Unknown ids map to `<unk>`; decoding halts at `<eos>` or after
	/// `len + 2` tokens. The decoded order is filtered to ids present in
	/// the input (first occurrence wins) and any inputs the decode missed
	/// are appended in original order, so the result is always a
	/// permutation of the input.
	pub fn reorder(&self, ids: &[Uuid]) -> Vec<Uuid> {
		if ids.is_empty() || ids.len() > self.config.max_src_len {
			return ids.to_vec();
		}

		let tokens: Vec<String> = ids.iter().map(Uuid::to_string).collect();
		let candidates: Vec<usize> = tokens.iter().map(|t| self.vocab.encode(t)).collect();
		let eos = self.vocab.eos_id();
		let budget = (ids.len() + 2).min(self.config.max_tgt_len);

		let mut state = self.config.bos_id;
		let mut decoded: Vec<usize> = Vec::with_capacity(budget);
		for _ in 0..budget {
			let next = self.argmax_next(state, &candidates, eos);
			if next == eos {
				break;
			}
			decoded.push(next);
			state = next;
		}

		// Restrict to input ids, first occurrence wins, then complete the
		// permutation with anything the decode missed.
		let mut ordered: Vec<Uuid> = Vec::with_capacity(ids.len());
		for token_id in decoded {
			if self.vocab.is_control(token_id) {
				continue;
			}
			let Some(token) = self.vocab.decode(token_id) else { continue };
			for (slot, id) in tokens.iter().zip(ids) {
				if slot == token && !ordered.contains(id) {
					ordered.push(*id);
					break;
				}
			}
		}
		for id in ids {
			if !ordered.contains(id) {
				ordered.push(*id);
			}
		}
		ordered
	}

	/// Best next token from the candidate set (plus `<eos>`), ties to the
	/// lowest token id so equal-weight artifacts still decode stably.
	fn argmax_next(&self, state: usize, candidates: &[usize], eos: usize) -> usize {
		let row = &self.weights[state * self.config.vocab_size..][..self.config.vocab_size];
		let mut best = eos;
		let mut best_score = row[eos];
		for &c in candidates {
			let score = row[c];
			if score > best_score || (score == best_score && c < best) {
				best = c;
				best_score = score;
			}
		}
		best
	}
}

fn parse_weights(bytes: &[u8], vocab_size: usize) -> Result<Vec<f32>, String> {
	if bytes.len() < 8 || &bytes[..4] != MAGIC {
		return Err(String::from("not a reorderer weight artifact"));
	}
	let stored = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;
	if stored != vocab_size {
		return Err(format!("weights trained for {stored} tokens, config says {vocab_size}"));
	}
	let body = &bytes[8..];
	let expected = vocab_size * vocab_size * 4;
	if body.len() != expected {
		return Err(format!("weight body holds {} bytes, expected {expected}", body.len()));
	}
	Ok(body
		.chunks_exact(4)
		.map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
		.collect())
}
