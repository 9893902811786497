//! Per-generation write mask
//!
//! One decision slot per grid cell, carved into disjoint per-worker lanes
//! before the pool spawns. A lane covers exactly its owner's rows, so the
//! owner is the only thread that ever touches those slots: the decide
//! phase resets and fills them, the apply phase consumes them. The buffer
//! is allocated once and reused for every generation.

use crate::error::SimError;
use crate::sim::partition::RowRange;

/// Next-state decision for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Leave the cell as it is
    Keep,
    /// Set the cell dead
    Kill,
    /// Set the cell alive
    Revive,
}

/// Decision buffer parallel to the grid, row-major
#[derive(Debug)]
pub struct WriteMask {
    decisions: Vec<Decision>,
}

impl WriteMask {
    /// Mask with one `Keep` slot per cell
    ///
    /// # Errors
    ///
    /// `AllocationFailed` when the buffer cannot be reserved.
    pub fn new(cells: usize) -> Result<Self, SimError> {
        let mut decisions = Vec::new();
        decisions
            .try_reserve_exact(cells)
            .map_err(|_| SimError::AllocationFailed { cells })?;
        decisions.resize(cells, Decision::Keep);
        Ok(Self { decisions })
    }

    /// Number of decision slots
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.decisions.len()
    }

    /// Read-only view of the whole buffer
    #[must_use]
    pub fn as_slice(&self) -> &[Decision] {
        &self.decisions
    }

    /// Carve the buffer into one mutable lane per row range
    ///
    /// `ranges` must be an ascending disjoint cover of the rows this mask
    /// was sized for, as produced by the partitioner.
    ///
    /// # Panics
    ///
    /// Panics when the ranges do not tile the buffer exactly.
    pub fn split(&mut self, ranges: &[RowRange], cols: usize) -> Vec<&mut [Decision]> {
        let mut lanes = Vec::with_capacity(ranges.len());
        let mut rest = self.decisions.as_mut_slice();
        for range in ranges {
            let span = range.cell_span(cols);
            let (lane, tail) = rest.split_at_mut(span.end - span.start);
            lanes.push(lane);
            rest = tail;
        }
        assert!(rest.is_empty(), "row ranges must tile the mask exactly");
        lanes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::partition::partition;

    #[test]
    fn test_new_mask_is_all_keep() {
        let mask = WriteMask::new(12).unwrap();
        assert_eq!(mask.cell_count(), 12);
        assert!(mask.as_slice().iter().all(|&d| d == Decision::Keep));
    }

    #[test]
    fn test_allocation_failure_reports_requested_cells() {
        // One-byte decisions, so this request exceeds the allocator's
        // `isize::MAX` byte cap and the reservation fails deterministically.
        let cells = isize::MAX as usize + 1;
        match WriteMask::new(cells) {
            Err(SimError::AllocationFailed { cells: reported }) => assert_eq!(reported, cells),
            other => panic!("expected AllocationFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_split_matches_partition_sizes() {
        let cols = 4;
        let ranges = partition(10, 3).unwrap();
        let mut mask = WriteMask::new(10 * cols).unwrap();
        let lanes = mask.split(&ranges, cols);
        assert_eq!(lanes.len(), 3);
        assert_eq!(lanes[0].len(), 16);
        assert_eq!(lanes[1].len(), 12);
        assert_eq!(lanes[2].len(), 12);
    }

    #[test]
    fn test_lanes_are_disjoint_views_of_the_buffer() {
        let cols = 3;
        let ranges = partition(4, 2).unwrap();
        let mut mask = WriteMask::new(4 * cols).unwrap();
        {
            let mut lanes = mask.split(&ranges, cols);
            lanes[0][0] = Decision::Kill;
            lanes[1][5] = Decision::Revive;
        }
        assert_eq!(mask.as_slice()[0], Decision::Kill);
        assert_eq!(mask.as_slice()[11], Decision::Revive);
        assert_eq!(
            mask.as_slice()
                .iter()
                .filter(|&&d| d == Decision::Keep)
                .count(),
            10
        );
    }

    #[test]
    #[should_panic(expected = "tile the mask exactly")]
    fn test_split_rejects_short_cover() {
        let ranges = partition(3, 3).unwrap();
        let mut mask = WriteMask::new(4 * 5).unwrap();
        let _ = mask.split(&ranges, 5);
    }
}
