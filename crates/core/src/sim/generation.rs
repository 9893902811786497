//! Decide and apply phases
//!
//! One generation is two passes over a worker's rows. The decide pass
//! reads the frozen pre-generation grid and records decisions into the
//! worker's own mask lane; the apply pass writes those decisions back into
//! the same rows of the grid. Neither pass touches another worker's rows
//! or lane, so with the pool's barriers between passes a generation is
//! race-free without locks.

use crate::grid::{CellState, Grid};
use crate::sim::mask::Decision;
use crate::sim::partition::RowRange;

/// Record next-state decisions for `range` into the worker's lane
///
/// `lane` must cover exactly the cells of `range` (local index zero is the
/// first cell of `range.start_row`). The lane is reset to `Keep` before
/// marks are recorded, so stale decisions from the previous generation
/// never leak through. Every neighbor count reads the pre-generation grid;
/// this pass writes no cell.
pub(crate) fn decide(grid: &Grid, range: &RowRange, lane: &mut [Decision]) {
    let cols = grid.cols();
    debug_assert_eq!(lane.len(), range.rows() * cols);

    lane.fill(Decision::Keep);
    for row in range.start_row..=range.end_row {
        for col in 0..cols {
            let neighbors = grid.live_neighbors(row, col);
            let local = (row - range.start_row) * cols + col;
            if grid.get(row, col).is_alive() {
                // under-population at <= 1, over-population at >= 4
                if neighbors <= 1 || neighbors >= 4 {
                    lane[local] = Decision::Kill;
                }
            } else if neighbors == 3 {
                lane[local] = Decision::Revive;
            }
        }
    }
}

/// Apply the worker's lane to its rows of the grid
///
/// Reads nothing of the grid; `Keep` slots leave the cell untouched. The
/// caller must own `range` under the pool's partition so the written span
/// is exclusive to this worker.
pub(crate) fn apply(grid: &Grid, range: &RowRange, lane: &[Decision]) {
    debug_assert_eq!(lane.len(), range.rows() * grid.cols());

    let end = range.end_row + 1;
    // SAFETY: `range` comes from the disjoint row partition, so no other
    // thread writes this span, and the surrounding barriers keep every
    // reader on the far side of this phase.
    let span = unsafe { grid.row_span_mut(range.start_row..end) };
    for (cell, decision) in span.iter_mut().zip(lane) {
        match decision {
            Decision::Kill => *cell = CellState::Dead,
            Decision::Revive => *cell = CellState::Alive,
            Decision::Keep => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::mask::WriteMask;
    use crate::sim::partition::partition;

    fn full_range(grid: &Grid) -> RowRange {
        RowRange {
            start_row: 0,
            end_row: grid.rows() - 1,
        }
    }

    fn step_whole_grid(grid: &mut Grid) {
        let range = full_range(grid);
        let mut mask = WriteMask::new(grid.cell_count()).unwrap();
        let ranges = [range];
        let mut lanes = mask.split(&ranges, grid.cols());
        let lane = lanes.remove(0);
        decide(grid, &range, lane);
        apply(grid, &range, lane);
    }

    #[test]
    fn test_blinker_decisions() {
        let mut grid = Grid::new(5, 5).unwrap();
        for col in 1..=3 {
            grid.set(2, col, CellState::Alive);
        }
        let range = full_range(&grid);
        let mut lane = vec![Decision::Keep; grid.cell_count()];
        decide(&grid, &range, &mut lane);

        assert_eq!(lane[2 * 5 + 1], Decision::Kill); // end of the bar
        assert_eq!(lane[2 * 5 + 2], Decision::Keep); // center survives with 2
        assert_eq!(lane[2 * 5 + 3], Decision::Kill);
        assert_eq!(lane[5 + 2], Decision::Revive); // above center
        assert_eq!(lane[3 * 5 + 2], Decision::Revive); // below center
        assert_eq!(lane[0], Decision::Keep);
    }

    #[test]
    fn test_blinker_full_step_turns_vertical() {
        let mut grid = Grid::new(5, 5).unwrap();
        for col in 1..=3 {
            grid.set(2, col, CellState::Alive);
        }
        step_whole_grid(&mut grid);
        let live = grid.live_cells();
        assert_eq!(live.len(), 3);
        for expected in [(2, 1), (2, 2), (2, 3)] {
            assert!(live.contains(&expected), "missing {expected:?}");
        }
    }

    #[test]
    fn test_poisoned_lane_is_reset_before_reuse() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set(1, 1, CellState::Alive);
        grid.set(1, 2, CellState::Alive);
        grid.set(2, 1, CellState::Alive);
        let range = full_range(&grid);

        let mut fresh = vec![Decision::Keep; grid.cell_count()];
        decide(&grid, &range, &mut fresh);

        let mut poisoned = vec![Decision::Revive; grid.cell_count()];
        decide(&grid, &range, &mut poisoned);

        assert_eq!(fresh, poisoned);
    }

    #[test]
    fn test_all_alive_three_by_three_marks_every_cell_kill() {
        let mut grid = Grid::new(3, 3).unwrap();
        for row in 0..3 {
            for col in 0..3 {
                grid.set(row, col, CellState::Alive);
            }
        }
        let range = full_range(&grid);
        let mut lane = vec![Decision::Keep; grid.cell_count()];
        decide(&grid, &range, &mut lane);
        assert!(lane.iter().all(|&d| d == Decision::Kill));
    }

    #[test]
    fn test_empty_grid_decides_all_keep() {
        let grid = Grid::new(3, 4).unwrap();
        let range = full_range(&grid);
        let mut lane = vec![Decision::Kill; grid.cell_count()];
        decide(&grid, &range, &mut lane);
        assert!(lane.iter().all(|&d| d == Decision::Keep));
    }

    #[test]
    fn test_apply_respects_each_decision() {
        let mut grid = Grid::new(1, 3).unwrap();
        grid.set(0, 0, CellState::Alive);
        grid.set(0, 1, CellState::Alive);
        let range = full_range(&grid);
        let lane = [Decision::Kill, Decision::Keep, Decision::Revive];
        apply(&grid, &range, &lane);
        assert!(!grid.get(0, 0).is_alive());
        assert!(grid.get(0, 1).is_alive());
        assert!(grid.get(0, 2).is_alive());
    }

    #[test]
    fn test_partitioned_decide_fills_the_whole_mask() {
        let mut grid = Grid::new(6, 2).unwrap();
        grid.set(0, 0, CellState::Alive);
        let ranges = partition(6, 3).unwrap();
        let mut mask = WriteMask::new(grid.cell_count()).unwrap();
        for (range, lane) in ranges.iter().zip(mask.split(&ranges, grid.cols())) {
            decide(&grid, range, lane);
        }
        let decisions = mask.as_slice();
        assert_eq!(decisions[0], Decision::Kill); // lone cell starves
        assert!(decisions[1..].iter().all(|&d| d == Decision::Keep));
    }
}
