//! Chunk rotation for the two ring phases.
//!
//! Every rank runs `world - 1` steps per phase. The indices below are what
//! keep the ring in lockstep: the chunk a rank sends at step `s` is exactly
//! the chunk its right neighbor expects to receive at step `s`.

use crate::types::{Phase, Rank};

/// Chunks touched by one rank in one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPlan {
    pub send_idx: usize,
    pub recv_idx: usize,
}

impl StepPlan {
    pub fn new(phase: Phase, rank: Rank, world: usize, step: usize) -> Self {
        match phase {
            // Send the chunk accumulated last step; receive its predecessor.
            Phase::ReduceScatter => Self {
                send_idx: (rank + world - step % world) % world,
                recv_idx: (rank + world - step % world - 1) % world,
            },
            // Start from the designated chunk, then forward whatever arrived
            // the step before.
            Phase::Allgather => Self {
                send_idx: (designated_chunk(rank, world) + world - step % world) % world,
                recv_idx: (rank + world - step % world) % world,
            },
        }
    }
}

/// Number of steps in each phase.
pub fn steps_per_phase(world: usize) -> usize {
    world.saturating_sub(1)
}

/// The chunk a rank holds fully reduced once reduce-scatter finishes.
pub fn designated_chunk(rank: Rank, world: usize) -> usize {
    (rank + 1) % world
}
