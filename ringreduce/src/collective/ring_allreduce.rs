use crate::cluster::RingTopology;
use crate::collective::cancel::CancelToken;
use crate::collective::participant::Participant;
use crate::config::RingConfig;
use crate::error::{Result, RingError};
use crate::types::{Element, Rank, RankOutput};
use tokio::task::JoinSet;

/// Ring all-reduce over in-process participants.
///
/// Builds a directed ring of bounded endpoints, runs one tokio task per
/// rank and returns every rank's final vector once all of them finish.
/// Every element of every returned vector is the sum of that element across
/// all ranks' inputs.
#[derive(Debug, Clone, Default)]
pub struct RingAllReduce {
    config: RingConfig,
}

impl RingAllReduce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    /// Run the reference scenario: rank `i` contributes the constant `i + 1`
    /// in every element, so every result element is `world * (world + 1) / 2`.
    pub async fn execute(&self, world: usize, chunk_size: usize) -> Result<Vec<RankOutput<f64>>> {
        self.execute_with_seed(world, chunk_size, |rank, _| (rank + 1) as f64)
            .await
    }

    /// Run with element `j` of rank `r` initialised to `seed(r, j)`.
    pub async fn execute_with_seed<T, F>(
        &self,
        world: usize,
        chunk_size: usize,
        seed: F,
    ) -> Result<Vec<RankOutput<T>>>
    where
        T: Element,
        F: Fn(Rank, usize) -> T,
    {
        let len = vector_len(world, chunk_size)?;
        let inputs = (0..world)
            .map(|rank| (0..len).map(|j| seed(rank, j)).collect())
            .collect();
        self.execute_with_data(world, chunk_size, inputs).await
    }

    /// Run with caller-supplied vectors, one per rank in rank order.
    pub async fn execute_with_data<T: Element>(
        &self,
        world: usize,
        chunk_size: usize,
        inputs: Vec<Vec<T>>,
    ) -> Result<Vec<RankOutput<T>>> {
        self.execute_with_cancel(world, chunk_size, inputs, &CancelToken::new())
            .await
    }

    /// Like [`execute_with_data`](Self::execute_with_data), aborting every
    /// participant and returning [`RingError::Cancelled`] once `cancel` fires.
    ///
    /// All validation happens before any participant starts. Dropping the
    /// returned future also aborts the participants.
    pub async fn execute_with_cancel<T: Element>(
        &self,
        world: usize,
        chunk_size: usize,
        inputs: Vec<Vec<T>>,
        cancel: &CancelToken,
    ) -> Result<Vec<RankOutput<T>>> {
        self.config.validate()?;
        let len = vector_len(world, chunk_size)?;
        if inputs.len() != world {
            return Err(RingError::InputCountMismatch {
                expected: world,
                actual: inputs.len(),
            });
        }
        if let Some((rank, v)) = inputs.iter().enumerate().find(|(_, v)| v.len() != len) {
            return Err(RingError::BufferSizeMismatch {
                rank,
                expected: len,
                actual: v.len(),
            });
        }

        let ring = RingTopology::new(world)?;
        let participants = ring
            .wire(self.config.queue_depth)
            .into_iter()
            .zip(inputs)
            .enumerate()
            .map(|(rank, (links, data))| {
                Participant::new(rank, world, chunk_size, data, links)
                    .map(|p| p.with_step_timeout(self.config.step_timeout))
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            world,
            chunk_size,
            queue_depth = self.config.queue_depth,
            dtype = T::NAME,
            "ring all-reduce starting"
        );
        let outputs = run_participants(participants, cancel).await?;
        tracing::debug!(world, chunk_size, "ring all-reduce finished");
        Ok(outputs)
    }
}

/// Elements per vector for a ring of `world` ranks.
pub fn vector_len(world: usize, chunk_size: usize) -> Result<usize> {
    if world == 0 {
        return Err(RingError::InvalidWorldSize { world });
    }
    if chunk_size == 0 {
        return Err(RingError::InvalidChunkSize { chunk_size });
    }
    world
        .checked_mul(chunk_size)
        .ok_or(RingError::SizeOverflow { world, chunk_size })
}

/// Spawn every participant and wait for all of them.
///
/// `participants` must carry ranks `0..participants.len()` exactly once and
/// agree on the chunk size.
/// The first failure aborts the remaining tasks. When several ranks fail,
/// the root cause is reported rather than the disconnects it triggered.
pub async fn run_participants<T: Element>(
    participants: Vec<Participant<T>>,
    cancel: &CancelToken,
) -> Result<Vec<RankOutput<T>>> {
    let world = participants.len();
    if world == 0 {
        return Err(RingError::InvalidWorldSize { world });
    }
    let chunk_size = participants[0].chunk_size();
    let mut seen = vec![false; world];
    for p in &participants {
        let rank = p.rank();
        if rank >= world || p.world() != world || seen[rank] {
            return Err(RingError::InvalidRank { rank, world });
        }
        if p.chunk_size() != chunk_size {
            return Err(RingError::BufferSizeMismatch {
                rank,
                expected: vector_len(world, chunk_size)?,
                actual: p.data().len(),
            });
        }
        seen[rank] = true;
    }
    if cancel.is_cancelled() {
        return Err(RingError::Cancelled);
    }

    let mut set = JoinSet::new();
    for p in participants {
        set.spawn(p.run());
    }

    let mut slots: Vec<Option<Vec<T>>> = (0..world).map(|_| None).collect();
    let mut failure: Option<RingError> = None;

    while failure.is_none() {
        tokio::select! {
            biased;
            () = cancel.cancelled() => failure = Some(RingError::Cancelled),
            joined = set.join_next() => match joined {
                None => break,
                Some(Ok(Ok(out))) => slots[out.rank] = Some(out.data),
                Some(Ok(Err(e))) => failure = Some(e),
                Some(Err(e)) => {
                    failure = Some(RingError::TaskFailed {
                        reason: e.to_string(),
                    })
                }
            },
        }
    }

    if let Some(mut root) = failure {
        set.abort_all();
        while let Some(joined) = set.join_next().await {
            if let Ok(Err(e)) = joined
                && root.is_cascade()
                && !e.is_cascade()
            {
                root = e;
            }
        }
        tracing::warn!(world, error = %root, "ring all-reduce aborted");
        return Err(root);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(rank, data)| {
            data.map(|data| RankOutput { rank, data })
                .ok_or_else(|| RingError::TaskFailed {
                    reason: format!("rank {rank} finished without a result"),
                })
        })
        .collect()
}
