/*
 * src/scoring/matrix.rs
 *
 * File for the item-side sparse matrix
 *
 * Purpose:
 *   Row-wise L2-normalized CSR matrix built offline. Rows are catalog
 *   items, columns are vectorizer terms, so cosine similarity against a
 *   normalized query is a plain dot product.
 *
 * Binary layout (little-endian):
 *   magic "WFSM" | rows u32 | cols u32 | nnz u64
 *   | indptr (rows+1) x u64 | indices nnz x u32 | data nnz x f32
 */

use std::fs;
use std::path::Path;

use crate::error::{AppError, AppResult};

const MAGIC: &[u8; 4] = b"WFSM";

#[derive(Debug)]
pub struct CsrMatrix {
	rows: usize,
	cols: usize,
	indptr: Vec<u64>,
	indices: Vec<u32>,
	data: Vec<f32>,
}

impl CsrMatrix {
	pub fn new(
		rows: usize,
		cols: usize,
		indptr: Vec<u64>,
		indices: Vec<u32>,
		data: Vec<f32>,
	) -> AppResult<Self> {
		if indptr.len() != rows + 1
			|| indices.len() != data.len()
			|| indptr.last().copied().unwrap_or(0) != indices.len() as u64
		{
			return Err(AppError::ScoringUnavailable(String::from(
				"sparse matrix structure is inconsistent",
			)));
		}
		if indices.iter().any(|&i| i as usize >= cols) {
			return Err(AppError::ScoringUnavailable(String::from(
				"sparse matrix column index out of bounds",
			)));
		}
		Ok(Self { rows, cols, indptr, indices, data })
	}

	pub fn load(path: &Path) -> AppResult<Self> {
		let bytes = fs::read(path).map_err(|e| {
			AppError::ScoringUnavailable(format!("read {}: {e}", path.display()))
		})?;
		let mut reader = Reader::new(&bytes, path);

		let magic = reader.take(4)?;
		if magic != MAGIC {
			return Err(AppError::ScoringUnavailable(format!(
				"{} is not a sparse matrix artifact",
				path.display()
			)));
		}
		let rows = reader.read_u32()? as usize;
		let cols = reader.read_u32()? as usize;
		let nnz = reader.read_u64()? as usize;

		let mut indptr = Vec::with_capacity(rows + 1);
		for _ in 0..=rows {
			indptr.push(reader.read_u64()?);
		}
		let mut indices = Vec::with_capacity(nnz);
		for _ in 0..nnz {
			indices.push(reader.read_u32()?);
		}
		let mut data = Vec::with_capacity(nnz);
		for _ in 0..nnz {
			data.push(reader.read_f32()?);
		}

		Self::new(rows, cols, indptr, indices, data)
	}

	pub fn rows(&self) -> usize {
		self.rows
	}

	pub fn cols(&self) -> usize {
		self.cols
	}

	/// Dot every row with the sparse query; returns one score per row.
	pub fn scores(&self, query: &[(usize, f32)]) -> Vec<f32> {
		let mut dense = vec![0.0f32; self.cols];
		for &(index, weight) in query {
			if index < self.cols {
				dense[index] = weight;
			}
		}

		let mut out = Vec::with_capacity(self.rows);
		for row in 0..self.rows {
			let lo = self.indptr[row] as usize;
			let hi = self.indptr[row + 1] as usize;
			let mut dot = 0.0f32;
			for k in lo..hi {
				dot += self.data[k] * dense[self.indices[k] as usize];
			}
			out.push(dot);
		}
		out
	}
}

/// Little-endian cursor over the artifact bytes.
struct Reader<'a> {
	bytes: &'a [u8],
	offset: usize,
	path: String,
}

impl<'a> Reader<'a> {
	fn new(bytes: &'a [u8], path: &Path) -> Self {
		Self { bytes, offset: 0, path: path.display().to_string() }
	}

	fn take(&mut self, n: usize) -> AppResult<&'a [u8]> {
		let end = self.offset.checked_add(n).filter(|&e| e <= self.bytes.len()).ok_or_else(
			|| AppError::ScoringUnavailable(format!("{} is truncated", self.path)),
		)?;
		let slice = &self.bytes[self.offset..end];
		self.offset = end;
		Ok(slice)
	}

	fn read_u32(&mut self) -> AppResult<u32> {
		let b = self.take(4)?;
		Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
	}

	fn read_u64(&mut self) -> AppResult<u64> {
		let b = self.take(8)?;
		Ok(u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
	}

	fn read_f32(&mut self) -> AppResult<f32> {
		let b = self.take(4)?;
		Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
	}
}
