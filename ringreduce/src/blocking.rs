use crate::collective::{CancelToken, RingAllReduce};
use crate::config::RingConfig;
use crate::error::Result;
use crate::types::{Element, RankOutput};

/// Blocking wrapper around [`RingAllReduce`].
///
/// Owns a multi-threaded `tokio::runtime::Runtime` and calls `block_on()`
/// for each run. Must not be used from inside another tokio runtime.
pub struct BlockingRingAllReduce {
    inner: RingAllReduce,
    rt: tokio::runtime::Runtime,
}

impl BlockingRingAllReduce {
    pub fn new() -> Result<Self> {
        Self::from_async(RingAllReduce::new())
    }

    pub fn with_config(config: RingConfig) -> Result<Self> {
        Self::from_async(RingAllReduce::with_config(config))
    }

    /// Wrap an existing async instance with a new tokio runtime.
    pub fn from_async(inner: RingAllReduce) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_time()
            .thread_name("ringreduce")
            .build()?;
        Ok(Self { inner, rt })
    }

    pub fn config(&self) -> &RingConfig {
        self.inner.config()
    }

    /// See [`RingAllReduce::execute`].
    pub fn execute(&self, world: usize, chunk_size: usize) -> Result<Vec<RankOutput<f64>>> {
        self.rt.block_on(self.inner.execute(world, chunk_size))
    }

    /// See [`RingAllReduce::execute_with_data`].
    pub fn execute_with_data<T: Element>(
        &self,
        world: usize,
        chunk_size: usize,
        inputs: Vec<Vec<T>>,
    ) -> Result<Vec<RankOutput<T>>> {
        self.rt
            .block_on(self.inner.execute_with_data(world, chunk_size, inputs))
    }

    /// See [`RingAllReduce::execute_with_cancel`].
    pub fn execute_with_cancel<T: Element>(
        &self,
        world: usize,
        chunk_size: usize,
        inputs: Vec<Vec<T>>,
        cancel: &CancelToken,
    ) -> Result<Vec<RankOutput<T>>> {
        self.rt.block_on(
            self.inner
                .execute_with_cancel(world, chunk_size, inputs, cancel),
        )
    }
}
