//! Error types for the simulation core
//!
//! Every failure the core can surface is fatal to the run: the simulation
//! either completes all generations or returns one of these without partial
//! results. Nothing is retried.

/// Errors that can occur while configuring or running a simulation
#[derive(Debug)]
pub enum SimError {
    /// Malformed configuration: missing fields, zero dimensions,
    /// out-of-range coordinates, or a grid too large to address
    ConfigInvalid(String),
    /// Grid or mask buffer could not be allocated
    AllocationFailed {
        /// Number of cells the failed buffer was sized for
        cells: usize,
    },
    /// Worker count outside `1..=rows`
    BadThreadCount {
        /// Requested worker count
        workers: usize,
        /// Grid rows available to partition
        rows: usize,
    },
    /// Row partition postconditions could not be satisfied
    InvalidPartition(String),
    /// Barrier group requested with zero parties
    InvalidBarrier,
    /// A worker thread could not be started
    SpawnFailed(String),
    /// Catalog server connection or protocol failure
    Catalog(String),
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {msg}"),
            SimError::AllocationFailed { cells } => {
                write!(f, "Failed to allocate buffer for {cells} cells")
            }
            SimError::BadThreadCount { workers, rows } => {
                write!(f, "Thread count {workers} outside 1..={rows}")
            }
            SimError::InvalidPartition(msg) => write!(f, "Invalid row partition: {msg}"),
            SimError::InvalidBarrier => write!(f, "Barrier requires at least one party"),
            SimError::SpawnFailed(msg) => write!(f, "Failed to spawn worker: {msg}"),
            SimError::Catalog(msg) => write!(f, "Catalog request failed: {msg}"),
        }
    }
}

impl std::error::Error for SimError {}
