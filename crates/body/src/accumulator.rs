//! Accumulation of body chunks into one contiguous buffer.
//!
//! No decoder looks at the body before the last chunk has been observed, so this is the only
//! state a request keeps while its body is streaming in.

use bytes::{Bytes, BytesMut};
use tracing::trace;

use crate::chunk::Chunk;
use crate::error::DecodeError;
use crate::ensure;

/// Collects the ordered chunks of one request body.
///
/// The buffer is append-only and owned by a single in-flight decode; it is handed out exactly once,
/// when the last chunk arrives.
#[derive(Debug, Default)]
pub struct ChunkAccumulator {
    buffer: BytesMut,
    max_size: Option<usize>,
    completed: bool,
}

impl ChunkAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an accumulator which fails once the body grows past `max_size` bytes
    pub fn with_max_size(max_size: usize) -> Self {
        Self { max_size: Some(max_size), ..Self::default() }
    }

    /// Appends `chunk` to the buffer.
    ///
    /// # Returns
    /// * `Ok(Some(bytes))` with the whole body when `chunk` is the last one
    /// * `Ok(None)` when more chunks are expected
    /// * `Err(DecodeError)` if the size limit is exceeded or the body was already handed out
    pub fn accumulate(&mut self, chunk: Chunk) -> Result<Option<Bytes>, DecodeError> {
        ensure!(!self.completed, DecodeError::AlreadyFinished);

        let current_size = self.buffer.len() + chunk.len();
        if let Some(max_size) = self.max_size {
            ensure!(current_size <= max_size, DecodeError::too_large_body(current_size, max_size));
        }

        let is_last = chunk.is_last();
        trace!(len = chunk.len(), total = current_size, is_last, "accumulate body chunk");

        // the first chunk is taken over without copying when it is the whole body
        if is_last && self.buffer.is_empty() {
            self.completed = true;
            return Ok(Some(chunk.into_bytes()));
        }

        self.buffer.extend_from_slice(chunk.as_bytes());

        if is_last {
            self.completed = true;
            Ok(Some(self.buffer.split().freeze()))
        } else {
            Ok(None)
        }
    }

    /// Drops everything accumulated so far
    pub fn discard(&mut self) {
        self.buffer = BytesMut::new();
    }

    /// Number of bytes accumulated so far
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}
