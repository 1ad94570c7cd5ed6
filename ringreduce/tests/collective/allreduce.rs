use ringreduce::{RingAllReduce, RingConfig};

use super::helpers::{assert_converged, distinct_expected, distinct_seed};

#[tokio::test]
async fn test_allreduce_4_ranks_chunk_1() {
    let out = RingAllReduce::new().execute(4, 1).await.unwrap();
    assert_converged(&out, 4, 1);
    assert_eq!(out[0].data, vec![10.0; 4]);
}

#[tokio::test]
async fn test_allreduce_uniform_law() {
    let algo = RingAllReduce::new();
    for world in 1..=8 {
        for chunk_size in [1, 2, 3, 7] {
            let out = algo.execute(world, chunk_size).await.unwrap();
            assert_converged(&out, world, chunk_size);

            let expected = (world * (world + 1) / 2) as f64;
            for o in &out {
                assert!(
                    o.data.iter().all(|&v| v == expected),
                    "world={world} chunk={chunk_size} rank {}: {:?}",
                    o.rank,
                    o.data
                );
            }
        }
    }
}

#[tokio::test]
async fn test_allreduce_distinct_chunks() {
    let algo = RingAllReduce::new();
    for (world, chunk_size) in [(3, 1), (4, 4), (5, 2), (2, 3), (7, 5)] {
        let out = algo
            .execute_with_seed(world, chunk_size, distinct_seed(chunk_size))
            .await
            .unwrap();
        assert_converged(&out, world, chunk_size);

        for o in &out {
            for (j, &v) in o.data.iter().enumerate() {
                assert_eq!(
                    v,
                    distinct_expected(world, chunk_size, j),
                    "world={world} chunk={chunk_size} rank {} elem {j}",
                    o.rank
                );
            }
        }
    }
}

#[tokio::test]
async fn test_allreduce_distinct_chunks_p3_first_element() {
    let out = RingAllReduce::new()
        .execute_with_seed(3, 1, distinct_seed(1))
        .await
        .unwrap();
    // base 0 for chunk 0 offset 0: 3 * 0 + (0 + 1 + 2).
    assert!(out.iter().all(|o| o.data[0] == 3.0));
}

#[tokio::test]
async fn test_allreduce_matches_sequential_sum() {
    // Integer-valued inputs keep the float sums exact in any order.
    let (world, chunk_size) = (6, 3);
    let len = world * chunk_size;
    let mut state = 0x2545_f491_u64;
    let inputs: Vec<Vec<f64>> = (0..world)
        .map(|_| {
            (0..len)
                .map(|_| {
                    state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                    ((state >> 40) % 2001) as f64 - 1000.0
                })
                .collect()
        })
        .collect();

    let expected: Vec<f64> = (0..len)
        .map(|j| inputs.iter().map(|v| v[j]).sum())
        .collect();

    let out = RingAllReduce::new()
        .execute_with_data(world, chunk_size, inputs)
        .await
        .unwrap();
    assert_converged(&out, world, chunk_size);
    assert_eq!(out[0].data, expected);
}

#[tokio::test]
async fn test_allreduce_f32() {
    let out = RingAllReduce::new()
        .execute_with_seed(4, 2, |rank, j| (rank * 10 + j) as f32)
        .await
        .unwrap();
    assert_converged(&out, 4, 2);
    let expected: Vec<f32> = (0..8).map(|j| (60 + 4 * j) as f32).collect();
    assert_eq!(out[0].data, expected);
}

#[tokio::test]
async fn test_allreduce_queue_depths() {
    for depth in [1, 2, 16] {
        let algo = RingAllReduce::with_config(RingConfig::default().with_queue_depth(depth));
        let out = algo.execute(5, 3).await.unwrap();
        assert_converged(&out, 5, 3);
        assert_eq!(out[0].data, vec![15.0; 15], "depth {depth}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_allreduce_multi_thread_runtime() {
    let algo = RingAllReduce::new();
    for world in [2, 5, 16] {
        let out = algo
            .execute_with_seed(world, 4, distinct_seed(4))
            .await
            .unwrap();
        assert_converged(&out, world, 4);
        assert_eq!(out[0].data[0], distinct_expected(world, 4, 0));
    }
}
