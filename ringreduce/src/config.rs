//! Runtime-configurable parameters for ring runs.
//!
//! All values have sensible defaults. Override via environment variables
//! (prefixed `RINGREDUCE_`) or by constructing a custom `RingConfig`.

use crate::error::{Result, RingError};
use std::time::Duration;

/// Messages each endpoint buffers before a sender suspends.
pub const DEFAULT_QUEUE_DEPTH: usize = 2;

/// Tuning parameters for the ring and its endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingConfig {
    /// Bounded capacity of every receive endpoint. Must be at least 1.
    pub queue_depth: usize,

    /// Upper bound on any single send or receive. `None` waits forever,
    /// relying on the lockstep protocol for liveness.
    pub step_timeout: Option<Duration>,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            queue_depth: DEFAULT_QUEUE_DEPTH,
            step_timeout: None,
        }
    }
}

impl RingConfig {
    /// Load config from environment variables, falling back to defaults.
    ///
    /// Recognized variables:
    /// - `RINGREDUCE_QUEUE_DEPTH`
    /// - `RINGREDUCE_STEP_TIMEOUT_MS` (`0` disables the timeout)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(n) = lookup("RINGREDUCE_QUEUE_DEPTH").and_then(|v| v.parse::<usize>().ok()) {
            cfg.queue_depth = n;
        }
        if let Some(ms) = lookup("RINGREDUCE_STEP_TIMEOUT_MS").and_then(|v| v.parse::<u64>().ok())
        {
            cfg.step_timeout = (ms > 0).then_some(Duration::from_millis(ms));
        }

        cfg
    }

    /// Builder-style override of the endpoint depth.
    pub fn with_queue_depth(mut self, depth: usize) -> Self {
        self.queue_depth = depth;
        self
    }

    /// Builder-style override of the per-operation timeout.
    pub fn with_step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = Some(timeout);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.queue_depth == 0 {
            return Err(RingError::InvalidQueueDepth {
                depth: self.queue_depth,
            });
        }
        Ok(())
    }
}
