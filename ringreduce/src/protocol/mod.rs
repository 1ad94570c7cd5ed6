mod message;

pub use message::ChunkMessage;
