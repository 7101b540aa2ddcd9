use bytes::Bytes;

use super::ParsedBody;

/// Passes the accumulated body through untouched.
#[inline]
pub(super) fn decode(body: Bytes) -> ParsedBody {
    ParsedBody::Raw(body)
}
