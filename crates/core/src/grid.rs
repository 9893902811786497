//! Toroidal cell grid
//!
//! Stores the board as a flat row-major buffer of cells. Both axes wrap:
//! row `-1` is the last row, column `cols` is column `0`, and so on for any
//! signed offset. The grid is shared by every worker during a run; workers
//! mutate it only through disjoint row spans handed out between barrier
//! rendezvous, so no cell is ever written and read concurrently.

use std::cell::UnsafeCell;
use std::ops::Range;

use rustc_hash::FxHashSet;

use crate::config::SimulationConfig;
use crate::error::SimError;

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Cell is dead this generation
    Dead,
    /// Cell is alive this generation
    Alive,
}

impl CellState {
    /// True when the cell is alive
    #[must_use]
    pub fn is_alive(self) -> bool {
        matches!(self, CellState::Alive)
    }
}

/// Toroidal 2D board of cells in a flat row-major buffer
///
/// Cell `(r, c)` lives at index `r * cols + c`. The buffer length equals
/// `rows * cols` for the whole lifetime of the grid.
///
/// Mutation from safe code requires `&mut Grid`. During a simulation the
/// worker pool additionally writes through `Grid::row_span_mut`, which is
/// `unsafe` with the phase protocol as its contract: spans are disjoint
/// across workers, and a barrier separates every span write from every
/// whole-grid read.
#[derive(Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Box<[UnsafeCell<CellState>]>,
}

// SAFETY: concurrent access is governed by the worker pool's barrier
// protocol. Writes go through `set` (requires `&mut Grid`, hence exclusive)
// or `row_span_mut` (disjoint spans, separated from all reads by a
// rendezvous). With no write racing any other access, sharing `&Grid`
// across threads is sound.
unsafe impl Sync for Grid {}

impl Grid {
    /// Create an all-dead grid
    ///
    /// # Arguments
    ///
    /// * `rows` - Number of rows, must be positive
    /// * `cols` - Number of columns, must be positive
    ///
    /// # Errors
    ///
    /// `ConfigInvalid` when a dimension is zero or `rows * cols` overflows;
    /// `AllocationFailed` when the buffer cannot be reserved.
    pub fn new(rows: usize, cols: usize) -> Result<Self, SimError> {
        if rows == 0 || cols == 0 {
            return Err(SimError::ConfigInvalid(format!(
                "grid dimensions must be positive, got {rows}x{cols}"
            )));
        }
        let len = rows.checked_mul(cols).ok_or_else(|| {
            SimError::ConfigInvalid(format!("grid {rows}x{cols} exceeds addressable size"))
        })?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| SimError::AllocationFailed { cells: len })?;
        cells.resize_with(len, || UnsafeCell::new(CellState::Dead));

        Ok(Self {
            rows,
            cols,
            cells: cells.into_boxed_slice(),
        })
    }

    /// Create a grid seeded with the configuration's initial live cells
    ///
    /// # Errors
    ///
    /// Same conditions as [`Grid::new`]. The configuration's coordinates are
    /// already validated against its own dimensions.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimError> {
        let mut grid = Self::new(config.rows, config.cols)?;
        for &(col, row) in &config.live_cells {
            grid.set(row, col, CellState::Alive);
        }
        Ok(grid)
    }

    /// Number of rows
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells (`rows * cols`)
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Toroidal wrap of signed coordinates to a linear index
    ///
    /// Any pair of signed offsets maps into `[0, rows * cols)`: `-1` wraps
    /// to the last row or column, `rows` wraps to row `0`.
    #[must_use]
    pub fn wrap(&self, row: i64, col: i64) -> usize {
        let r = row.rem_euclid(self.rows as i64) as usize;
        let c = col.rem_euclid(self.cols as i64) as usize;
        r * self.cols + c
    }

    /// Cell state at `(row, col)`, wrapping out-of-range coordinates
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> CellState {
        self.read((row % self.rows) * self.cols + (col % self.cols))
    }

    /// Set the cell at `(row, col)`, wrapping out-of-range coordinates
    pub fn set(&mut self, row: usize, col: usize, state: CellState) {
        let idx = (row % self.rows) * self.cols + (col % self.cols);
        *self.cells[idx].get_mut() = state;
    }

    /// Count live cells among the eight toroidal neighbors of `(row, col)`
    ///
    /// Each of the eight offsets is wrapped and counted independently. On
    /// degenerate grids distinct offsets can land on the same cell, and each
    /// landing contributes: a live cell on a 1x1 grid counts 8 live
    /// neighbors (itself through every offset).
    #[must_use]
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let r = (row % self.rows) as i64;
        let c = (col % self.cols) as i64;
        let mut count = 0u8;
        for dr in [-1i64, 0, 1] {
            for dc in [-1i64, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if self.read(self.wrap(r + dr, c + dc)).is_alive() {
                    count += 1;
                }
            }
        }
        count
    }

    /// Total number of live cells
    #[must_use]
    pub fn live_count(&self) -> usize {
        (0..self.cells.len())
            .filter(|&idx| self.read(idx).is_alive())
            .count()
    }

    /// Set of live `(col, row)` coordinates
    ///
    /// Pair order matches the configuration file format.
    #[must_use]
    pub fn live_cells(&self) -> FxHashSet<(usize, usize)> {
        let mut live = FxHashSet::default();
        for idx in 0..self.cells.len() {
            if self.read(idx).is_alive() {
                live.insert((idx % self.cols, idx / self.cols));
            }
        }
        live
    }

    /// Copy of the full cell buffer in row-major order
    #[must_use]
    pub fn snapshot(&self) -> Vec<CellState> {
        (0..self.cells.len()).map(|idx| self.read(idx)).collect()
    }

    fn read(&self, idx: usize) -> CellState {
        // SAFETY: no writer can be concurrent with this read. Writers hold
        // either `&mut Grid` (exclusive) or a span from `row_span_mut`,
        // whose contract keeps all reads on the far side of a barrier.
        unsafe { *self.cells[idx].get() }
    }

    /// Mutable view of the cells in rows `rows.start..rows.end`
    ///
    /// # Safety
    ///
    /// For the lifetime of the returned slice no other thread may access
    /// any cell inside the span, and every access outside it must be
    /// separated from this borrow by a happens-before edge. The worker
    /// pool guarantees both: spans come from a disjoint row partition, and
    /// the apply phase is fenced by barriers on both sides.
    #[allow(clippy::mut_from_ref)] // exclusivity is the caller's contract, see Safety
    pub(crate) unsafe fn row_span_mut(&self, rows: Range<usize>) -> &mut [CellState] {
        let span = &self.cells[rows.start * self.cols..rows.end * self.cols];
        // UnsafeCell<CellState> has the same layout as CellState, so a span
        // of cells reinterprets as a mutable slice of their interiors.
        std::slice::from_raw_parts_mut(span.as_ptr().cast::<CellState>().cast_mut(), span.len())
    }
}
