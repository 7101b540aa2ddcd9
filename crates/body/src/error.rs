use std::str::Utf8Error;
use thiserror::Error;

/// Failure produced while decoding a completed request body.
///
/// Every variant is fatal for the request it belongs to: no partial result is delivered and the host
/// is expected to close the connection.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid percent-encoded sequence at offset {offset}: {reason}")]
    InvalidSequence { offset: usize, reason: &'static str },

    #[error("form body is not valid utf-8: {source}")]
    InvalidUtf8 {
        #[from]
        source: Utf8Error,
    },

    #[error("malformed json body: {source}")]
    MalformedJson {
        #[from]
        source: serde_json::Error,
    },

    #[error("body size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeBody { current_size: usize, max_size: usize },

    #[error("body parsing has already finished")]
    AlreadyFinished,
}

impl DecodeError {
    pub fn invalid_sequence(offset: usize, reason: &'static str) -> Self {
        Self::InvalidSequence { offset, reason }
    }

    pub fn too_large_body(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeBody { current_size, max_size }
    }

    /// Returns true when the body content itself could not be decoded, as opposed to a size limit or
    /// a misbehaving host.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::InvalidSequence { .. } | Self::InvalidUtf8 { .. } | Self::MalformedJson { .. })
    }
}

/// Terminal failure of an async body parse driven by [`crate::parse_stream`] and friends.
#[derive(Error, Debug)]
pub enum ParseBodyError {
    #[error("request body aborted before completion")]
    Aborted,

    #[error("decode error: {source}")]
    Decode {
        #[from]
        source: DecodeError,
    },
}

impl ParseBodyError {
    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

/// Error raised when a parsed body can not be converted into a typed value.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("raw body can not be deserialized, content type is not supported")]
    UnsupportedBody,

    #[error("invalid json value: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("invalid form value: {source}")]
    Form {
        #[from]
        source: serde_urlencoded::de::Error,
    },

    #[error("form can not be encoded for extraction: {source}")]
    FormEncode {
        #[from]
        source: serde_urlencoded::ser::Error,
    },
}
