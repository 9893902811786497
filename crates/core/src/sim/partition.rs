//! Row partitioning across workers
//!
//! Rows are dealt out as contiguous blocks in worker order. When `rows`
//! does not divide evenly, the first `rows % workers` workers carry one
//! extra row, so block sizes never differ by more than one.

use std::ops::Range;

use crate::error::SimError;

/// Contiguous inclusive range of rows owned by one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    /// First row of the block
    pub start_row: usize,
    /// Last row of the block, inclusive
    pub end_row: usize,
}

impl RowRange {
    /// Number of rows in the block
    #[must_use]
    pub fn rows(&self) -> usize {
        self.end_row - self.start_row + 1
    }

    /// Flat cell index range of the block on a grid with `cols` columns
    #[must_use]
    pub fn cell_span(&self, cols: usize) -> Range<usize> {
        self.start_row * cols..(self.end_row + 1) * cols
    }
}

/// Split `rows` into one contiguous block per worker
///
/// # Arguments
///
/// * `rows` - Total rows to distribute
/// * `workers` - Number of workers, `1..=rows`
///
/// # Returns
///
/// One `RowRange` per worker, ascending by worker id; the first
/// `rows % workers` blocks hold one extra row.
///
/// # Errors
///
/// `BadThreadCount` when `workers` is zero or exceeds `rows`;
/// `InvalidPartition` when the produced blocks fail the disjoint-cover
/// check.
pub fn partition(rows: usize, workers: usize) -> Result<Vec<RowRange>, SimError> {
    if workers == 0 || workers > rows {
        return Err(SimError::BadThreadCount { workers, rows });
    }
    let base = rows / workers;
    let extra = rows % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut next_row = 0;
    for tid in 0..workers {
        let size = base + usize::from(tid < extra);
        ranges.push(RowRange {
            start_row: next_row,
            end_row: next_row + size - 1,
        });
        next_row += size;
    }

    verify_cover(rows, &ranges)?;
    Ok(ranges)
}

/// Check that `ranges` tile `0..rows` exactly, in order, with no gaps
fn verify_cover(rows: usize, ranges: &[RowRange]) -> Result<(), SimError> {
    let mut expected_start = 0;
    for range in ranges {
        if range.end_row < range.start_row {
            return Err(SimError::InvalidPartition(format!(
                "empty range {}..={}",
                range.start_row, range.end_row
            )));
        }
        if range.start_row != expected_start {
            return Err(SimError::InvalidPartition(format!(
                "range starting at row {} does not continue at row {expected_start}",
                range.start_row
            )));
        }
        expected_start = range.end_row + 1;
    }
    if expected_start != rows {
        return Err(SimError::InvalidPartition(format!(
            "ranges cover {expected_start} of {rows} rows"
        )));
    }
    Ok(())
}
