/// Rank of a participant on the ring (0-indexed).
pub type Rank = usize;

/// Element types the collective can reduce.
///
/// Restricted to fixed-width floating point. The reduction is always
/// element-wise addition.
pub trait Element: Copy + Send + Sync + PartialEq + std::fmt::Debug + 'static {
    /// Human-readable name.
    const NAME: &'static str;

    /// Accumulate `other` into `self`.
    fn accumulate(&mut self, other: Self);
}

macro_rules! impl_element {
    ($($ty:ty => $name:literal),*) => {
        $(
            impl Element for $ty {
                const NAME: &'static str = $name;

                #[inline]
                fn accumulate(&mut self, other: Self) {
                    *self += other;
                }
            }
        )*
    };
}

impl_element!(f32 => "f32", f64 => "f64");

/// The two phases every participant runs, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Partial sums rotate around the ring; each rank completes one chunk.
    ReduceScatter,
    /// Completed chunks rotate around the ring and overwrite stale ones.
    Allgather,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::ReduceScatter => f.write_str("reduce-scatter"),
            Phase::Allgather => f.write_str("allgather"),
        }
    }
}

/// Final state of one participant after a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RankOutput<T> {
    pub rank: Rank,
    pub data: Vec<T>,
}

impl<T> RankOutput<T> {
    pub fn into_parts(self) -> (Rank, Vec<T>) {
        (self.rank, self.data)
    }
}
