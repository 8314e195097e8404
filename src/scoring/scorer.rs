/*
 * src/scoring/scorer.rs
 *
 * File for the per-class similarity scorers
 *
 * Purpose:
 *   One scorer per catalog class. Query text goes through the class's own
 *   vectorizer, cosine scores come off the class matrix, and row indices
 *   map back to catalog ids. Artifact problems at load time abort startup.
 */

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::poi::PoiClass;
use crate::scoring::matrix::CsrMatrix;
use crate::scoring::vectorizer::Vectorizer;

/// Artifact file-name tags, matching the training pipeline's short names.
fn class_tag(class: PoiClass) -> &'static str {
	match class {
		PoiClass::Destination => "dest",
		PoiClass::Activity => "act",
		PoiClass::Accommodation => "acc",
		PoiClass::Transportation => "trans",
	}
}

#[derive(Deserialize)]
struct IdMapArtifact(Vec<Uuid>);

#[derive(Debug)]
pub struct SimilarityScorer {
	class: PoiClass,
	vectorizer: Vectorizer,
	matrix: CsrMatrix,
	id_map: Vec<Uuid>,
}

impl SimilarityScorer {
	pub fn new(
		class: PoiClass,
		vectorizer: Vectorizer,
		matrix: CsrMatrix,
		id_map: Vec<Uuid>,
	) -> AppResult<Self> {
		if id_map.len() != matrix.rows() {
			return Err(AppError::ScoringUnavailable(format!(
				"{} id map has {} entries for a {}-row matrix",
				class.as_str(),
				id_map.len(),
				matrix.rows()
			)));
		}
		if vectorizer.dimensions() != matrix.cols() {
			return Err(AppError::ScoringUnavailable(format!(
				"{} vectorizer has {} terms for a {}-column matrix",
				class.as_str(),
				vectorizer.dimensions(),
				matrix.cols()
			)));
		}
		Ok(Self { class, vectorizer, matrix, id_map })
	}

	/// Load the `(vectorizer, matrix, id_map)` triple for one class.
	pub fn load(dir: &Path, class: PoiClass) -> AppResult<Self> {
		let tag = class_tag(class);
		let vectorizer = Vectorizer::load(&dir.join(format!("vectorizer.{tag}.json")))?;
		let matrix = CsrMatrix::load(&dir.join(format!("matrix.{tag}.bin")))?;

		let id_map_path = dir.join(format!("id_map.{tag}.json"));
		let raw = fs::read_to_string(&id_map_path).map_err(|e| {
			AppError::ScoringUnavailable(format!("read {}: {e}", id_map_path.display()))
		})?;
		let IdMapArtifact(id_map) = serde_json::from_str(&raw).map_err(|e| {
			AppError::ScoringUnavailable(format!("parse {}: {e}", id_map_path.display()))
		})?;

		let scorer = Self::new(class, vectorizer, matrix, id_map)?;
		info!(
			"Loaded {} scorer: {} items x {} terms",
			class.as_str(),
			scorer.matrix.rows(),
			scorer.matrix.cols()
		);
		Ok(scorer)
	}

	/// Rank the catalog against `text` and return the best `k` ids.
	///
	/// Ties break by descending score then ascending row index. Zero-score
	/// rows are dropped for every class except destinations, which always
	/// return a full top-k.
	pub fn top_k(&self, text: &str, k: usize) -> Vec<Uuid> {
		let query = self.vectorizer.transform(text);
		let scores = self.matrix.scores(&query);

		let mut order: Vec<usize> = (0..scores.len()).collect();
		order.sort_by(|&a, &b| {
			scores[b].total_cmp(&scores[a]).then_with(|| a.cmp(&b))
		});

		order
			.into_iter()
			.take(k)
			.filter(|&row| self.class == PoiClass::Destination || scores[row] > 0.0)
			.map(|row| self.id_map[row])
			.collect()
	}
}

/// The four immutable scorers shared across every request.
#[derive(Debug)]
pub struct ScorerSet {
	pub destinations: SimilarityScorer,
	pub activities: SimilarityScorer,
	pub accommodations: SimilarityScorer,
	pub transportation: SimilarityScorer,
}

impl ScorerSet {
	/// Load all four class triples; any failure is fatal to startup.
	pub fn load(dir: &Path) -> AppResult<Self> {
		Ok(Self {
			destinations: SimilarityScorer::load(dir, PoiClass::Destination)?,
			activities: SimilarityScorer::load(dir, PoiClass::Activity)?,
			accommodations: SimilarityScorer::load(dir, PoiClass::Accommodation)?,
			transportation: SimilarityScorer::load(dir, PoiClass::Transportation)?,
		})
	}
}
