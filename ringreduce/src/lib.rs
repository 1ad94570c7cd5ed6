//! Ring all-reduce over in-process participants.
//!
//! `P` participants each hold a vector of `P * chunk_size` floats split into
//! `P` chunks. They form a directed ring and, using only nearest-neighbor
//! messages over bounded channels, run two phases of `P - 1` steps:
//!
//! 1. **Reduce-scatter**: partial sums rotate until each rank holds one
//!    fully reduced chunk.
//! 2. **Allgather**: completed chunks rotate until every rank holds all of
//!    them.
//!
//! Afterwards every participant's vector is the element-wise sum of all
//! inputs.
//!
//! ```no_run
//! # async fn demo() -> ringreduce::Result<()> {
//! let out = ringreduce::RingAllReduce::new().execute(4, 1).await?;
//! assert!(out.iter().all(|o| o.data == vec![10.0; 4]));
//! # Ok(())
//! # }
//! ```

pub mod algorithms;
mod blocking;
pub mod cluster;
pub mod collective;
pub mod config;
pub mod error;
pub mod protocol;
pub mod transport;
pub mod types;

pub use algorithms::Algorithms;
pub use blocking::BlockingRingAllReduce;
pub use cluster::{RingLinks, RingTopology};
pub use collective::{CancelToken, Participant, RingAllReduce};
pub use config::RingConfig;
pub use error::{Result, RingError};
pub use protocol::ChunkMessage;
pub use types::{Element, Phase, Rank, RankOutput};
