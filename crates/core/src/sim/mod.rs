//! Parallel simulation engine
//!
//! Everything that advances the grid: the row partition, the shared write
//! mask, the rendezvous barrier, the per-phase kernels, and the worker
//! pool that drives the protocol.

pub mod barrier;
pub(crate) mod generation;
pub mod mask;
pub mod partition;
pub mod pool;

pub use barrier::BarrierGroup;
pub use mask::{Decision, WriteMask};
pub use partition::{partition, RowRange};
pub use pool::WorkerPool;
