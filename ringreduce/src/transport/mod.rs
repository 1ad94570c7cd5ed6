mod endpoint;

pub(crate) use endpoint::with_deadline;
pub use endpoint::{Inbound, LinkClosed, Outbound, link};
