/*
 * src/reorder/vocab.rs
 *
 * File for the reorderer token vocabulary
 *
 * Purpose:
 *   Bidirectional token <-> id mapping with the four reserved control
 *   tokens at the front, saved by the training pipeline as {"itos": [...]}.
 */

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

pub const PAD: &str = "<pad>";
pub const BOS: &str = "<bos>";
pub const EOS: &str = "<eos>";
pub const UNK: &str = "<unk>";

#[derive(Deserialize)]
struct VocabArtifact {
	itos: Vec<String>,
}

pub struct Vocab {
	itos: Vec<String>,
	stoi: HashMap<String, usize>,
}

impl Vocab {
	pub fn new(itos: Vec<String>) -> AppResult<Self> {
		for control in [PAD, BOS, EOS, UNK] {
			if !itos.iter().any(|t| t == control) {
				return Err(AppError::ReordererFailed(format!(
					"vocabulary is missing control token {control}"
				)));
			}
		}
		let stoi = itos.iter().enumerate().map(|(i, t)| (t.clone(), i)).collect();
		Ok(Self { itos, stoi })
	}

	pub fn load(path: &Path) -> AppResult<Self> {
		let raw = fs::read_to_string(path).map_err(|e| {
			AppError::ReordererFailed(format!("read {}: {e}", path.display()))
		})?;
		let artifact: VocabArtifact = serde_json::from_str(&raw).map_err(|e| {
			AppError::ReordererFailed(format!("parse {}: {e}", path.display()))
		})?;
		Self::new(artifact.itos)
	}

	pub fn len(&self) -> usize {
		self.itos.len()
	}

	pub fn is_empty(&self) -> bool {
		self.itos.is_empty()
	}

	/// Token id, or the `<unk>` id for unknown tokens.
	pub fn encode(&self, token: &str) -> usize {
		self.stoi.get(token).copied().unwrap_or_else(|| self.stoi[UNK])
	}

	pub fn decode(&self, id: usize) -> Option<&str> {
		self.itos.get(id).map(String::as_str)
	}

	pub fn eos_id(&self) -> usize {
		self.stoi[EOS]
	}

	pub fn is_control(&self, id: usize) -> bool {
		matches!(self.decode(id), Some(PAD) | Some(BOS) | Some(EOS) | Some(UNK))
	}
}
