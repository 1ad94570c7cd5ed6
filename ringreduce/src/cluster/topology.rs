use crate::error::{Result, RingError};
use crate::transport::{Inbound, Outbound, link};
use crate::types::Rank;

/// Directed ring `0 -> 1 -> ... -> (world-1) -> 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingTopology {
    world: usize,
}

/// The two edges one rank owns on the ring.
#[derive(Debug)]
pub struct RingLinks<T> {
    /// Fed by `prev(rank)`.
    pub inbound: Inbound<T>,
    /// Feeds `next(rank)`.
    pub outbound: Outbound<T>,
}

impl RingTopology {
    pub fn new(world: usize) -> Result<Self> {
        if world == 0 {
            return Err(RingError::InvalidWorldSize { world });
        }
        Ok(Self { world })
    }

    pub fn world(&self) -> usize {
        self.world
    }

    /// Right neighbor: the rank this rank sends to.
    pub fn next(&self, rank: Rank) -> Rank {
        (rank + 1) % self.world
    }

    /// Left neighbor: the rank this rank receives from.
    pub fn prev(&self, rank: Rank) -> Rank {
        (rank + self.world - 1) % self.world
    }

    /// `successors()[i]` is the rank `i` sends to.
    pub fn successors(&self) -> Vec<Rank> {
        (0..self.world).map(|r| self.next(r)).collect()
    }

    /// Build one bounded endpoint per rank and hand every rank its inbound
    /// endpoint plus the sending half of its right neighbor's endpoint.
    ///
    /// Each sender is moved to exactly one rank, so a departing participant
    /// closes both of its edges.
    pub fn wire<T>(&self, depth: usize) -> Vec<RingLinks<T>> {
        debug_assert!(is_single_cycle(&self.successors()));
        let mut senders: Vec<Option<Outbound<T>>> = Vec::with_capacity(self.world);
        let mut receivers: Vec<Inbound<T>> = Vec::with_capacity(self.world);
        for _ in 0..self.world {
            let (tx, rx) = link(depth);
            senders.push(Some(tx));
            receivers.push(rx);
        }

        receivers
            .into_iter()
            .enumerate()
            .map(|(rank, inbound)| {
                let outbound = senders[self.next(rank)]
                    .take()
                    .expect("next() is a permutation of ranks");
                RingLinks { inbound, outbound }
            })
            .collect()
    }
}

/// True if `successors` describes one directed cycle through every rank.
pub fn is_single_cycle(successors: &[Rank]) -> bool {
    let n = successors.len();
    if n == 0 {
        return false;
    }
    let mut seen = vec![false; n];
    let mut cur = 0;
    for _ in 0..n {
        if cur >= n || seen[cur] {
            return false;
        }
        seen[cur] = true;
        cur = successors[cur];
    }
    cur == 0
}
