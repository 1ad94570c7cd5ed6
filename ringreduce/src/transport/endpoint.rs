use crate::protocol::ChunkMessage;
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;

/// The far side of a link went away: its participant finished or aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkClosed;

/// Sending half of a ring link. Owned by the participant feeding the
/// endpoint; dropping it closes the link for the receiver.
#[derive(Debug)]
pub struct Outbound<T> {
    tx: mpsc::Sender<ChunkMessage<T>>,
}

/// Receive endpoint of a ring link. Exactly one per rank.
#[derive(Debug)]
pub struct Inbound<T> {
    rx: mpsc::Receiver<ChunkMessage<T>>,
}

/// Create a bounded link holding at most `depth` undelivered messages.
///
/// `depth` must be at least 1; `RingConfig::validate` enforces this before
/// any link is built.
pub fn link<T>(depth: usize) -> (Outbound<T>, Inbound<T>) {
    let (tx, rx) = mpsc::channel(depth);
    (Outbound { tx }, Inbound { rx })
}

impl<T> Outbound<T> {
    /// Enqueue a message, suspending while the endpoint is full.
    pub async fn send(&self, msg: ChunkMessage<T>) -> Result<(), LinkClosed> {
        self.tx.send(msg).await.map_err(|_| LinkClosed)
    }
}

impl<T> Inbound<T> {
    /// Wait for the next message. Messages already queued are delivered
    /// even after the sender has gone.
    pub async fn recv(&mut self) -> Result<ChunkMessage<T>, LinkClosed> {
        self.rx.recv().await.ok_or(LinkClosed)
    }
}

/// Run `fut` under an optional deadline. `None` means it timed out.
pub(crate) async fn with_deadline<F: Future>(
    timeout: Option<Duration>,
    fut: F,
) -> Option<F::Output> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, fut).await.ok(),
        None => Some(fut.await),
    }
}
