/// One chunk in flight between ring neighbors.
///
/// The payload is an owned copy of the sender's chunk taken at send time;
/// later writes to the sender's buffer never reach the receiver.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkMessage<T> {
    /// Which chunk (0..world) the payload represents.
    pub chunk_index: usize,
    /// Exactly `chunk_size` elements.
    pub payload: Vec<T>,
}

impl<T: Copy> ChunkMessage<T> {
    /// Snapshot chunk `chunk_index` of `data`.
    ///
    /// Panics if the chunk lies outside `data`; callers only pass indices
    /// below the world size over buffers of `world * chunk_size` elements.
    pub fn from_chunk(data: &[T], chunk_index: usize, chunk_size: usize) -> Self {
        let off = chunk_index * chunk_size;
        Self {
            chunk_index,
            payload: data[off..off + chunk_size].to_vec(),
        }
    }
}
