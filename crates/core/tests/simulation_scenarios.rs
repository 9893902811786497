//! End-to-end simulation scenarios
//!
//! Drives the full pipeline (configuration, grid, worker pool, reporter)
//! through small boards with known outcomes: oscillators, extinction,
//! torus wrap effects, and the boundary cases around worker counts and
//! zero-generation runs.

use std::sync::atomic::{AtomicUsize, Ordering};

use life_sim_core::{CellState, Grid, SimError, SimulationConfig, WorkerPool};
use rustc_hash::FxHashSet;

/// Build a grid with the given live cells, `(col, row)` order as in the
/// configuration format
fn grid_from(rows: usize, cols: usize, live: &[(usize, usize)]) -> Grid {
    let mut grid = Grid::new(rows, cols).unwrap();
    for &(col, row) in live {
        grid.set(row, col, CellState::Alive);
    }
    grid
}

fn live_set(pairs: &[(usize, usize)]) -> FxHashSet<(usize, usize)> {
    pairs.iter().copied().collect()
}

#[test]
fn test_blinker_oscillates_with_period_two() {
    let mut grid = grid_from(5, 5, &[(1, 2), (2, 2), (3, 2)]);
    let pool = WorkerPool::new(2);

    pool.run(&mut grid, 1, None).unwrap();
    assert_eq!(grid.live_cells(), live_set(&[(2, 1), (2, 2), (2, 3)]));

    pool.run(&mut grid, 1, None).unwrap();
    assert_eq!(grid.live_cells(), live_set(&[(1, 2), (2, 2), (3, 2)]));
}

#[test]
fn test_empty_grid_stays_empty() {
    let mut grid = grid_from(3, 3, &[]);
    WorkerPool::new(3).run(&mut grid, 10, None).unwrap();
    assert_eq!(grid.live_count(), 0);
}

#[test]
fn test_fully_alive_three_by_three_dies_at_once() {
    let all: Vec<(usize, usize)> = (0..3).flat_map(|c| (0..3).map(move |r| (c, r))).collect();
    let mut grid = grid_from(3, 3, &all);
    WorkerPool::new(3).run(&mut grid, 1, None).unwrap();
    // every cell of a 3x3 torus borders all eight others, so n = 8 everywhere
    assert_eq!(grid.live_count(), 0);
}

#[test]
fn test_torus_adjacency_revives_the_whole_three_by_three() {
    let mut grid = grid_from(3, 3, &[(0, 0), (2, 0), (0, 2)]);
    // the corner reaches both other live cells only through the wrap
    assert_eq!(grid.live_neighbors(0, 0), 2);
    // on a 3x3 torus every dead cell borders all three live ones
    assert_eq!(grid.live_neighbors(1, 1), 3);

    WorkerPool::new(3).run(&mut grid, 1, None).unwrap();
    assert_eq!(grid.live_count(), 9, "every dead cell sees n == 3");
}

#[test]
fn test_zero_generations_touch_nothing_and_report_nothing() {
    let mut grid = grid_from(4, 4, &[(1, 1), (2, 2)]);
    let before = grid.snapshot();
    let calls = AtomicUsize::new(0);
    let reporter = |_: &Grid, _: usize| {
        calls.fetch_add(1, Ordering::SeqCst);
    };

    WorkerPool::new(2)
        .run(&mut grid, 0, Some(&reporter))
        .unwrap();

    assert_eq!(grid.snapshot(), before);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_single_worker_and_full_width_pool_agree() {
    let seed = [(1, 2), (2, 2), (3, 2), (3, 3), (2, 4)];
    let mut narrow = grid_from(5, 5, &seed);
    let mut wide = grid_from(5, 5, &seed);

    WorkerPool::new(1).run(&mut narrow, 6, None).unwrap();
    WorkerPool::new(5).run(&mut wide, 6, None).unwrap();

    assert_eq!(narrow.snapshot(), wide.snapshot());
}

#[test]
fn test_worker_count_bounds_fail_startup() {
    let mut grid = grid_from(4, 4, &[]);
    assert!(matches!(
        WorkerPool::new(0).run(&mut grid, 1, None),
        Err(SimError::BadThreadCount { workers: 0, rows: 4 })
    ));
    assert!(matches!(
        WorkerPool::new(5).run(&mut grid, 1, None),
        Err(SimError::BadThreadCount { workers: 5, rows: 4 })
    ));
}

#[test]
fn test_single_cell_torus_starves_itself() {
    let mut grid = grid_from(1, 1, &[(0, 0)]);
    // the lone cell is its own eight neighbors, n = 8, over-population
    WorkerPool::new(1).run(&mut grid, 1, None).unwrap();
    assert_eq!(grid.live_count(), 0);
}

#[test]
fn test_config_text_drives_a_full_run() {
    let text = "5\n5\n2\n3\n1 2\n2 2\n3 2\n";
    let config = SimulationConfig::parse(text).unwrap();
    let mut grid = Grid::from_config(&config).unwrap();

    WorkerPool::new(2)
        .run(&mut grid, config.generations, None)
        .unwrap();

    // two generations bring the blinker back to its seed
    assert_eq!(grid.live_cells(), config.live_cells);
}
