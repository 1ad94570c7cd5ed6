//! Named access to the collective algorithms this crate provides.
//!
//! Callers hold an [`Algorithms`] value and dispatch by stable name. Only
//! constructors and `execute` entry points are used here; ring internals
//! stay behind [`RingAllReduce`].

use crate::collective::RingAllReduce;
use crate::config::RingConfig;
use crate::error::{Result, RingError};
use crate::types::RankOutput;

/// Stable name of the ring all-reduce.
pub const RING_ALL_REDUCE: &str = "ring_all_reduce";

const NAMES: &[&str] = &[RING_ALL_REDUCE];

#[derive(Debug, Clone, Default)]
pub struct Algorithms {
    ring_all_reduce: RingAllReduce,
}

impl Algorithms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RingConfig) -> Self {
        Self {
            ring_all_reduce: RingAllReduce::with_config(config),
        }
    }

    pub fn ring_all_reduce(&self) -> &RingAllReduce {
        &self.ring_all_reduce
    }

    /// Names accepted by [`execute`](Self::execute).
    pub fn names(&self) -> &'static [&'static str] {
        NAMES
    }

    /// Run the reference scenario of the algorithm registered as `name`.
    pub async fn execute(
        &self,
        name: &str,
        world: usize,
        chunk_size: usize,
    ) -> Result<Vec<RankOutput<f64>>> {
        match name {
            RING_ALL_REDUCE => self.ring_all_reduce.execute(world, chunk_size).await,
            _ => Err(RingError::UnknownAlgorithm {
                name: name.to_string(),
            }),
        }
    }
}
