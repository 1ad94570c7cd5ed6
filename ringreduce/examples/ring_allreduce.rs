//! Ring all-reduce across 4 ranks.
//!
//! Rank `i` starts with every element set to `i + 1`. After the run every
//! rank holds the element-wise sum, `1 + 2 + 3 + 4 = 10`.
//!
//! ```bash
//! RINGREDUCE_QUEUE_DEPTH=2 cargo run --example ring_allreduce
//! ```

use ringreduce::{Algorithms, RingConfig, algorithms::RING_ALL_REDUCE};

#[tokio::main]
async fn main() -> ringreduce::Result<()> {
    let world = 4usize;
    let chunk_size = 2usize;

    let algorithms = Algorithms::with_config(RingConfig::from_env());
    let results = algorithms
        .execute(RING_ALL_REDUCE, world, chunk_size)
        .await?;

    for out in results {
        let (rank, data) = out.into_parts();
        println!("rank {rank}: {data:?}");
    }
    // Output (all ranks identical):
    // rank 0: [10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0]
    // rank 1: [10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0]
    // ...

    Ok(())
}
