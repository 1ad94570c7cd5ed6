use crate::cluster::RingLinks;
use crate::collective::schedule::{StepPlan, steps_per_phase};
use crate::error::{Result, RingError};
use crate::protocol::ChunkMessage;
use crate::transport::{Inbound, Outbound, with_deadline};
use crate::types::{Element, Phase, Rank, RankOutput};
use std::time::Duration;

/// One rank of the ring all-reduce.
///
/// Owns its vector outright and talks to exactly two neighbors: it sends to
/// `rank + 1` through `outbound` and receives from `rank - 1` on `inbound`.
#[derive(Debug)]
pub struct Participant<T> {
    rank: Rank,
    world: usize,
    chunk_size: usize,
    data: Vec<T>,
    inbound: Inbound<T>,
    outbound: Outbound<T>,
    step_timeout: Option<Duration>,
}

impl<T: Element> Participant<T> {
    /// Create a participant over `data`, which must hold exactly
    /// `world * chunk_size` elements.
    pub fn new(
        rank: Rank,
        world: usize,
        chunk_size: usize,
        data: Vec<T>,
        links: RingLinks<T>,
    ) -> Result<Self> {
        if world == 0 {
            return Err(RingError::InvalidWorldSize { world });
        }
        if chunk_size == 0 {
            return Err(RingError::InvalidChunkSize { chunk_size });
        }
        if rank >= world {
            return Err(RingError::InvalidRank { rank, world });
        }
        let expected = world
            .checked_mul(chunk_size)
            .ok_or(RingError::SizeOverflow { world, chunk_size })?;
        if data.len() != expected {
            return Err(RingError::BufferSizeMismatch {
                rank,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            rank,
            world,
            chunk_size,
            data,
            inbound: links.inbound,
            outbound: links.outbound,
            step_timeout: None,
        })
    }

    /// Bound every send and receive by `timeout`.
    pub fn with_step_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.step_timeout = timeout;
        self
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn world(&self) -> usize {
        self.world
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Run reduce-scatter then allgather, each `world - 1` steps.
    ///
    /// On success every element of the returned vector is the sum of that
    /// element across all ranks' original vectors.
    pub async fn run(mut self) -> Result<RankOutput<T>> {
        let steps = steps_per_phase(self.world);

        for phase in [Phase::ReduceScatter, Phase::Allgather] {
            tracing::debug!(rank = self.rank, %phase, steps, "phase starting");
            for step in 0..steps {
                self.step(phase, step).await?;
            }
        }

        tracing::debug!(rank = self.rank, "all-reduce complete");
        Ok(RankOutput {
            rank: self.rank,
            data: self.data,
        })
    }

    async fn step(&mut self, phase: Phase, step: usize) -> Result<()> {
        let plan = StepPlan::new(phase, self.rank, self.world, step);
        tracing::trace!(
            rank = self.rank,
            %phase,
            step,
            send = plan.send_idx,
            recv = plan.recv_idx,
            "ring step"
        );

        // Send strictly before receive: with every rank doing the same, each
        // link holds at most one undelivered message per step.
        let msg = ChunkMessage::from_chunk(&self.data, plan.send_idx, self.chunk_size);
        self.send(phase, msg).await?;
        let received = self.recv(phase).await?;
        self.check(phase, step, plan.recv_idx, &received)?;

        let off = plan.recv_idx * self.chunk_size;
        let dst = &mut self.data[off..off + self.chunk_size];
        match phase {
            Phase::ReduceScatter => {
                for (d, &s) in dst.iter_mut().zip(&received.payload) {
                    d.accumulate(s);
                }
            }
            Phase::Allgather => dst.copy_from_slice(&received.payload),
        }
        Ok(())
    }

    async fn send(&self, phase: Phase, msg: ChunkMessage<T>) -> Result<()> {
        match with_deadline(self.step_timeout, self.outbound.send(msg)).await {
            Some(Ok(())) => Ok(()),
            Some(Err(_)) => Err(RingError::PeerDisconnected {
                rank: self.rank,
                peer: (self.rank + 1) % self.world,
                phase,
            }),
            None => Err(self.timed_out(phase, "send")),
        }
    }

    async fn recv(&mut self, phase: Phase) -> Result<ChunkMessage<T>> {
        let timeout = self.step_timeout;
        match with_deadline(timeout, self.inbound.recv()).await {
            Some(Ok(msg)) => Ok(msg),
            Some(Err(_)) => Err(RingError::PeerDisconnected {
                rank: self.rank,
                peer: (self.rank + self.world - 1) % self.world,
                phase,
            }),
            None => Err(self.timed_out(phase, "recv")),
        }
    }

    fn check(
        &self,
        phase: Phase,
        step: usize,
        expected: usize,
        received: &ChunkMessage<T>,
    ) -> Result<()> {
        if received.chunk_index != expected {
            tracing::warn!(
                rank = self.rank,
                %phase,
                step,
                expected,
                actual = received.chunk_index,
                "chunk index mismatch, aborting run"
            );
            return Err(RingError::ChunkMismatch {
                rank: self.rank,
                phase,
                step,
                expected,
                actual: received.chunk_index,
            });
        }
        if received.payload.len() != self.chunk_size {
            tracing::warn!(
                rank = self.rank,
                %phase,
                step,
                chunk = expected,
                len = received.payload.len(),
                "payload size mismatch, aborting run"
            );
            return Err(RingError::PayloadSizeMismatch {
                rank: self.rank,
                phase,
                step,
                chunk: expected,
                expected: self.chunk_size,
                actual: received.payload.len(),
            });
        }
        Ok(())
    }

    fn timed_out(&self, phase: Phase, operation: &'static str) -> RingError {
        RingError::Timeout {
            rank: self.rank,
            phase,
            operation,
            timeout_ms: self
                .step_timeout
                .map_or(0, |t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
        }
    }
}
