use crate::types::{Phase, Rank};

pub type Result<T> = std::result::Result<T, RingError>;

#[derive(Debug, thiserror::Error)]
pub enum RingError {
    #[error("invalid world size {world}: at least one participant is required")]
    InvalidWorldSize { world: usize },

    #[error("invalid chunk size {chunk_size}: chunks must hold at least one element")]
    InvalidChunkSize { chunk_size: usize },

    #[error("invalid queue depth {depth}: endpoints must buffer at least one message")]
    InvalidQueueDepth { depth: usize },

    #[error("invalid rank {rank}: world size is {world}")]
    InvalidRank { rank: Rank, world: usize },

    #[error("expected {expected} input vectors (one per rank), got {actual}")]
    InputCountMismatch { expected: usize, actual: usize },

    #[error("rank {rank} vector has {actual} elements, expected {expected}")]
    BufferSizeMismatch {
        rank: Rank,
        expected: usize,
        actual: usize,
    },

    #[error("vector length overflows: world {world} x chunk size {chunk_size}")]
    SizeOverflow { world: usize, chunk_size: usize },

    #[error("rank {rank} ({phase}, step {step}): expected chunk {expected}, received chunk {actual}")]
    ChunkMismatch {
        rank: Rank,
        phase: Phase,
        step: usize,
        expected: usize,
        actual: usize,
    },

    #[error(
        "rank {rank} ({phase}, step {step}): chunk {chunk} payload has {actual} elements, expected {expected}"
    )]
    PayloadSizeMismatch {
        rank: Rank,
        phase: Phase,
        step: usize,
        chunk: usize,
        expected: usize,
        actual: usize,
    },

    #[error("rank {rank}: neighbor {peer} disconnected during {phase}")]
    PeerDisconnected { rank: Rank, peer: Rank, phase: Phase },

    #[error("rank {rank}: {operation} timed out after {timeout_ms}ms during {phase}")]
    Timeout {
        rank: Rank,
        phase: Phase,
        operation: &'static str,
        timeout_ms: u64,
    },

    #[error("operation cancelled")]
    Cancelled,

    #[error("participant task failed: {reason}")]
    TaskFailed { reason: String },

    #[error("no algorithm registered under name {name:?}")]
    UnknownAlgorithm { name: String },

    #[error("runtime setup failed: {0}")]
    Runtime(#[from] std::io::Error),
}

impl RingError {
    /// Errors detected before any participant starts.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidWorldSize { .. }
                | Self::InvalidChunkSize { .. }
                | Self::InvalidQueueDepth { .. }
                | Self::InvalidRank { .. }
                | Self::InputCountMismatch { .. }
                | Self::BufferSizeMismatch { .. }
                | Self::SizeOverflow { .. }
        )
    }

    /// A received message did not match the step's expected chunk.
    pub fn is_consistency_violation(&self) -> bool {
        matches!(
            self,
            Self::ChunkMismatch { .. } | Self::PayloadSizeMismatch { .. }
        )
    }

    /// Secondary failures caused by another participant leaving the ring.
    pub(crate) fn is_cascade(&self) -> bool {
        matches!(self, Self::PeerDisconnected { .. })
    }
}
