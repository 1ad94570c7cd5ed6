mod cancel;
mod participant;
mod ring_allreduce;
pub mod schedule;

pub use cancel::CancelToken;
pub use participant::Participant;
pub use ring_allreduce::{RingAllReduce, run_participants, vector_len};
