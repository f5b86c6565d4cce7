//! Longest common subsequence over token sequences
//!
//! Classic O(m·n) dynamic programming. The table lives in flat, row-major
//! buffers so its memory cost is a single reservation that can be checked up
//! front instead of aborting the process.
//!
//! Next to each prefix length the table keeps the character weight of the
//! heaviest common subsequence of that length. Among equally long answers the
//! walk back follows the heavier one, so the characters a comparison keeps do
//! not depend on which text is passed first.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Row-major `(m + 1) x (n + 1)` table of prefix LCS lengths and weights
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcsTable {
    rows: usize,
    width: usize,
    cells: Vec<u32>,
    weights: Vec<u32>,
}

impl LcsTable {
    fn zeroed(rows: usize, width: usize) -> Result<Self> {
        let len = rows
            .checked_mul(width)
            .ok_or_else(|| EngineError::internal("LCS table dimensions overflow"))?;
        Ok(Self {
            rows,
            width,
            cells: zeroed_buffer(len)?,
            weights: zeroed_buffer(len)?,
        })
    }

    /// Length of the LCS of the first `i` tokens of `a` and first `j` of `b`
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.width + j]
    }

    /// Characters in the heaviest of the longest common subsequences at `(i, j)`
    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> u32 {
        self.weights[i * self.width + j]
    }

    /// Length first, weight second; the order the walk back compares cells in
    #[inline]
    fn score(&self, i: usize, j: usize) -> (u32, u32) {
        let idx = i * self.width + j;
        (self.cells[idx], self.weights[idx])
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, (length, weight): (u32, u32)) {
        let idx = i * self.width + j;
        self.cells[idx] = length;
        self.weights[idx] = weight;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Copy out as nested rows, mostly useful in tests
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.cells.chunks(self.width).map(<[u32]>::to_vec).collect()
    }
}

fn zeroed_buffer(len: usize) -> Result<Vec<u32>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| EngineError::internal(format!("cannot allocate LCS table of {len} cells")))?;
    buffer.resize(len, 0);
    Ok(buffer)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcsResult {
    pub length: usize,
    pub sequence: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<LcsTable>,
}

/// Compute one longest common subsequence of `a` and `b`.
///
/// Walking back from the bottom-right cell, a mismatch moves toward the larger
/// neighbor. Neighbors of equal length are compared by the characters their
/// subsequences keep, and full ties move up (dropping a token of `a`). That
/// tie-break decides which of several equally long subsequences is reported.
pub fn compute_lcs(a: &[String], b: &[String]) -> Result<LcsResult> {
    let (length, sequence, _) = solve(a, b)?;
    Ok(LcsResult {
        length,
        sequence,
        matrix: None,
    })
}

/// Same as [`compute_lcs`] but keeps the filled table in the result
pub fn compute_lcs_with_table(a: &[String], b: &[String]) -> Result<LcsResult> {
    let (length, sequence, table) = solve(a, b)?;
    Ok(LcsResult {
        length,
        sequence,
        matrix: Some(table),
    })
}

fn solve(a: &[String], b: &[String]) -> Result<(usize, Vec<String>, LcsTable)> {
    let m = a.len();
    let n = b.len();
    if u32::try_from(m.min(n)).is_err() {
        return Err(EngineError::internal("token sequence too long for LCS table"));
    }

    let token_weights: Vec<u32> = a
        .iter()
        .map(|token| u32::try_from(token.chars().count()).unwrap_or(u32::MAX))
        .collect();

    let mut table = LcsTable::zeroed(m + 1, n + 1)?;
    for i in 1..=m {
        for j in 1..=n {
            let score = if a[i - 1] == b[j - 1] {
                let (length, weight) = table.score(i - 1, j - 1);
                (length + 1, weight.saturating_add(token_weights[i - 1]))
            } else {
                table.score(i - 1, j).max(table.score(i, j - 1))
            };
            table.set(i, j, score);
        }
    }

    let length = table.get(m, n) as usize;
    let mut sequence = Vec::with_capacity(length);
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            sequence.push(a[i - 1].clone());
            i -= 1;
            j -= 1;
        } else if table.score(i - 1, j) >= table.score(i, j - 1) {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    sequence.reverse();

    Ok((length, sequence, table))
}
