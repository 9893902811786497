//! Parallel Game of Life Core Library
//!
//! Conway's Game of Life on a finite toroidal grid, advanced by a fixed
//! pool of worker threads. Each generation is a two-phase update: every
//! worker decides next states for its own rows against the frozen
//! pre-generation grid, then applies those decisions in place, with
//! barrier rendezvous separating the phases. Race freedom comes from
//! disjoint row ownership plus the barriers, never from locks.
//!
//! Around the engine the crate carries the plumbing a simulation run
//! needs: the text configuration format, a client for the remote
//! configuration catalog, and the reporter seam through which one worker
//! presents each finished generation to an observer.

// Board state and configuration
pub mod config;
pub mod error;
pub mod grid;

// Parallel engine
pub mod sim;

// External collaborators
pub mod catalog;
pub mod report;

// Re-export board types
pub use config::SimulationConfig;
pub use error::SimError;
pub use grid::{CellState, Grid};

// Re-export engine types
pub use sim::{partition, BarrierGroup, Decision, RowRange, WorkerPool, WriteMask};

// Re-export collaborator seams
pub use catalog::CatalogClient;
pub use report::Reporter;
