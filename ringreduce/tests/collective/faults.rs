//! Fault-injection: a corrupted or withheld message must fail the whole run
//! instead of yielding a plausible-looking wrong vector.

use ringreduce::{ChunkMessage, Phase, RingError};

use super::helpers::{Tap, run_spliced};

fn corrupt_at(target: usize, world: usize) -> Tap {
    Box::new(move |seq: usize, mut msg: ChunkMessage<f64>| {
        if seq == target {
            msg.chunk_index = (msg.chunk_index + 1) % world;
        }
        Some(msg)
    })
}

#[tokio::test]
async fn test_untouched_tap_still_converges() {
    let out = run_spliced(4, 2, 1, Box::new(|_: usize, msg: ChunkMessage<f64>| Some(msg)))
        .await
        .unwrap();
    assert!(out.iter().all(|o| o.data == vec![10.0; 8]));
}

#[tokio::test]
async fn test_corrupt_reduce_scatter_tag() {
    let err = run_spliced(4, 1, 2, corrupt_at(0, 4)).await.unwrap_err();
    assert!(err.is_consistency_violation(), "got {err}");
    assert!(matches!(
        err,
        RingError::ChunkMismatch {
            rank: 2,
            phase: Phase::ReduceScatter,
            step: 0,
            ..
        }
    ));
}

#[tokio::test]
async fn test_corrupt_allgather_tag() {
    // With 4 ranks the link carries 3 reduce-scatter messages first.
    let err = run_spliced(4, 1, 0, corrupt_at(3, 4)).await.unwrap_err();
    assert!(matches!(
        err,
        RingError::ChunkMismatch {
            rank: 0,
            phase: Phase::Allgather,
            step: 0,
            ..
        }
    ));
}

#[tokio::test]
async fn test_any_corrupted_message_fails_run() {
    for world in [2, 3, 5] {
        let per_link = 2 * (world - 1);
        for victim in 0..world {
            for target in 0..per_link {
                let res = run_spliced(world, 2, victim, corrupt_at(target, world)).await;
                match res {
                    Err(e) => assert!(
                        e.is_consistency_violation(),
                        "world={world} victim={victim} msg={target}: {e}"
                    ),
                    Ok(_) => panic!("world={world} victim={victim} msg={target}: corrupted run converged"),
                }
            }
        }
    }
}

#[tokio::test]
async fn test_truncated_payload_fails_run() {
    let tap: Tap = Box::new(|seq: usize, mut msg: ChunkMessage<f64>| {
        if seq == 1 {
            msg.payload.pop();
        }
        Some(msg)
    });
    let err = run_spliced(3, 3, 1, tap).await.unwrap_err();
    assert!(matches!(
        err,
        RingError::PayloadSizeMismatch {
            rank: 1,
            expected: 3,
            actual: 2,
            ..
        }
    ));
}

#[tokio::test]
async fn test_dropped_link_reports_disconnect() {
    // The tap swallows the first message and then closes the link.
    let tap: Tap = Box::new(|seq: usize, msg: ChunkMessage<f64>| (seq > 0).then_some(msg));
    let (participants, tap_task) = super::helpers::spliced_ring(3, 1, 0, tap);
    // Closing the tap drops the sender that feeds rank 0.
    tap_task.abort();
    let err = ringreduce::collective::run_participants(participants, &Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RingError::PeerDisconnected { .. }), "got {err}");
}
