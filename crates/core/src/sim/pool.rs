//! Barrier-driven worker pool
//!
//! Spawns one OS thread per row range and drives the generation loop with
//! four rendezvous per generation: generation start, decisions complete,
//! grid updated, observation window closed. One further rendezvous after
//! the last generation precedes the optional partition diagnostics, then
//! the pool joins every worker.

use std::sync::{Condvar, Mutex, PoisonError};
use std::thread;

use tracing::{debug, info};

use crate::error::SimError;
use crate::grid::Grid;
use crate::report::Reporter;
use crate::sim::barrier::BarrierGroup;
use crate::sim::generation;
use crate::sim::mask::{Decision, WriteMask};
use crate::sim::partition::{partition, RowRange};

/// Release-or-abort gate in front of the first rendezvous
///
/// Spawned workers park here until the pool has either spawned the whole
/// crew (open) or failed partway (abort). Aborted workers return without
/// ever touching the barrier, so the pool can join them instead of
/// deadlocking on a rendezvous that can never complete.
struct StartGate {
    state: Mutex<Option<bool>>,
    ready: Condvar,
}

impl StartGate {
    fn new() -> Self {
        Self {
            state: Mutex::new(None),
            ready: Condvar::new(),
        }
    }

    fn open(&self) {
        self.resolve(true);
    }

    fn abort(&self) {
        self.resolve(false);
    }

    fn resolve(&self, go: bool) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = Some(go);
        self.ready.notify_all();
    }

    /// True when the pool opened the gate, false on abort
    fn wait(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if let Some(go) = *state {
                return go;
            }
            state = self
                .ready
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

/// Per-worker parameters that are fixed for the whole run
#[derive(Clone, Copy)]
struct WorkerSpec {
    tid: usize,
    range: RowRange,
    generations: usize,
    emit_partition: bool,
}

/// Fixed pool of workers advancing a grid generation by generation
///
/// The pool owns no state between runs; `run` partitions the grid, builds
/// the barrier and the write mask, executes the protocol, and joins all
/// workers before returning.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    workers: usize,
    partition_log: bool,
}

impl WorkerPool {
    /// Pool of `workers` threads
    #[must_use]
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            partition_log: false,
        }
    }

    /// Print each worker's row assignment to stdout when the run completes
    #[must_use]
    pub fn with_partition_log(mut self, enabled: bool) -> Self {
        self.partition_log = enabled;
        self
    }

    /// Configured worker count
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Advance `grid` by `generations` updates
    ///
    /// When a reporter is attached, worker 0 invokes it once per
    /// generation inside the exclusive observation window. With
    /// `generations == 0` the workers only perform the final rendezvous:
    /// the grid is untouched and the reporter is never called.
    ///
    /// # Errors
    ///
    /// `BadThreadCount` when the worker count is outside `1..=rows`;
    /// `InvalidPartition` and `InvalidBarrier` when setup invariants fail;
    /// `AllocationFailed` when the mask cannot be allocated; `SpawnFailed`
    /// when a worker thread cannot be started.
    pub fn run(
        &self,
        grid: &mut Grid,
        generations: usize,
        reporter: Option<&dyn Reporter>,
    ) -> Result<(), SimError> {
        let ranges = partition(grid.rows(), self.workers)?;
        let barrier = BarrierGroup::new(self.workers)?;
        let mut mask = WriteMask::new(grid.cell_count())?;
        let lanes = mask.split(&ranges, grid.cols());
        let gate = StartGate::new();

        debug!(
            "running {} generations on a {}x{} grid with {} workers",
            generations,
            grid.rows(),
            grid.cols(),
            self.workers
        );

        let grid: &Grid = grid;
        thread::scope(|scope| {
            for (tid, (range, lane)) in ranges.iter().copied().zip(lanes).enumerate() {
                let barrier = &barrier;
                let gate = &gate;
                let observer = if tid == 0 { reporter } else { None };
                let spec = WorkerSpec {
                    tid,
                    range,
                    generations,
                    emit_partition: self.partition_log,
                };
                let spawned = thread::Builder::new()
                    .name(format!("life-worker-{tid}"))
                    .spawn_scoped(scope, move || {
                        if gate.wait() {
                            worker_loop(spec, grid, lane, barrier, observer);
                        }
                    });
                if let Err(e) = spawned {
                    gate.abort();
                    return Err(SimError::SpawnFailed(e.to_string()));
                }
            }
            gate.open();
            Ok(())
        })?;

        info!(
            "completed {} generations, {} cells alive",
            generations,
            grid.live_count()
        );
        Ok(())
    }
}

/// The per-worker protocol: four rendezvous per generation, one final
/// rendezvous before teardown
fn worker_loop(
    spec: WorkerSpec,
    grid: &Grid,
    lane: &mut [Decision],
    barrier: &BarrierGroup,
    observer: Option<&dyn Reporter>,
) {
    debug!(
        "worker {} owns rows {}..={}",
        spec.tid, spec.range.start_row, spec.range.end_row
    );
    for generation in 0..spec.generations {
        barrier.wait(); // generation start: all workers see the same grid
        generation::decide(grid, &spec.range, lane);
        barrier.wait(); // every decision recorded before any apply
        generation::apply(grid, &spec.range, lane);
        barrier.wait(); // grid fully updated before the observation window
        if let Some(observer) = observer {
            observer.on_generation(grid, generation);
        }
        barrier.wait(); // window closed, next generation may begin
    }
    barrier.wait(); // final rendezvous before teardown
    if spec.emit_partition {
        println!(
            "worker {}: rows {}..={} ({})",
            spec.tid,
            spec.range.start_row,
            spec.range.end_row,
            spec.range.rows()
        );
    }
}
