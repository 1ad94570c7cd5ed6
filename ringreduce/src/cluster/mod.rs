mod topology;

pub use topology::{RingLinks, RingTopology, is_single_cycle};
