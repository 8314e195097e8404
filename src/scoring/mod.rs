/*
 * src/scoring/mod.rs
 *
 * File for the sparse term-vector similarity scorers
 *
 * Purpose:
 *   Four pre-trained TF-IDF rankers (destinations, activities,
 *   accommodations, transportation), each an immutable triple of
 *   (vectorizer, row-normalized sparse matrix, row -> catalog id map)
 *   loaded once at startup and shared by reference across requests.
 */

pub mod matrix;
pub mod scorer;
pub mod vectorizer;

pub use matrix::CsrMatrix;
pub use scorer::{ScorerSet, SimilarityScorer};
pub use vectorizer::Vectorizer;
