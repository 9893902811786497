//! Generation observation
//!
//! One worker of the pool is designated the reporter. Between the apply
//! rendezvous and the generation-end rendezvous every other worker is
//! parked at the barrier, so the observer sees a quiescent, fully updated
//! grid with no torn state.

use crate::grid::Grid;

/// Observer invoked by the reporter worker after each completed generation
///
/// `generation` is the zero-based index of the update that just finished.
/// The callback runs once per generation, always from the same worker
/// thread, and must leave the grid untouched; the shared reference
/// enforces that for safe code.
pub trait Reporter: Sync {
    /// Observe the grid after one completed generation
    fn on_generation(&self, grid: &Grid, generation: usize);
}

impl<F> Reporter for F
where
    F: Fn(&Grid, usize) + Sync,
{
    fn on_generation(&self, grid: &Grid, generation: usize) {
        self(grid, generation);
    }
}
