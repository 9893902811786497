//! Worker rendezvous
//!
//! A thin wrapper over `std::sync::Barrier` that pins the party count at
//! construction and rejects a zero-party group. The barrier is cyclic: one
//! group serves every rendezvous of the generation loop.

use std::sync::Barrier;

use crate::error::SimError;

/// Reusable rendezvous for a fixed number of parties
///
/// `wait` blocks until all parties have arrived, then releases them
/// together; the group is immediately ready for the next rendezvous.
#[derive(Debug)]
pub struct BarrierGroup {
    barrier: Barrier,
    parties: usize,
}

impl BarrierGroup {
    /// Rendezvous group for `parties` threads
    ///
    /// # Errors
    ///
    /// `InvalidBarrier` when `parties` is zero.
    pub fn new(parties: usize) -> Result<Self, SimError> {
        if parties == 0 {
            return Err(SimError::InvalidBarrier);
        }
        Ok(Self {
            barrier: Barrier::new(parties),
            parties,
        })
    }

    /// Number of threads that must arrive to release a rendezvous
    #[must_use]
    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Block until all parties have arrived
    pub fn wait(&self) {
        self.barrier.wait();
    }
}
