use bytes::Bytes;

/// One unit of request body bytes delivered by the host transport.
///
/// Chunks of a request arrive strictly in send order and exactly one of them is marked as the last;
/// nothing is delivered after it. The last chunk may carry data or be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    bytes: Bytes,
    is_last: bool,
}

impl Chunk {
    pub fn new(bytes: impl Into<Bytes>, is_last: bool) -> Self {
        Self { bytes: bytes.into(), is_last }
    }

    /// Creates a chunk that is followed by more data
    #[inline]
    pub fn data(bytes: impl Into<Bytes>) -> Self {
        Self::new(bytes, false)
    }

    /// Creates the terminal chunk of a body
    #[inline]
    pub fn last(bytes: impl Into<Bytes>) -> Self {
        Self::new(bytes, true)
    }

    /// Creates an empty terminal chunk, used when the end of the body is signalled without data
    #[inline]
    pub fn eof() -> Self {
        Self::new(Bytes::new(), true)
    }

    #[inline]
    pub fn is_last(&self) -> bool {
        self.is_last
    }

    #[inline]
    pub fn as_bytes(&self) -> &Bytes {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

impl From<Bytes> for Chunk {
    fn from(bytes: Bytes) -> Self {
        Self::data(bytes)
    }
}
