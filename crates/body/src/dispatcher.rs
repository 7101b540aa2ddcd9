//! Content type based selection of the body decoder.
//!
//! The mapping is a process-wide table built on first use and never mutated afterwards. Lookup is
//! an exact, case-sensitive match on the whole content-type string: parameters such as
//! `; charset=utf-8` are not stripped, so such a body falls back to the raw decoder.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::decoder::DecoderKind;

static DECODERS: Lazy<HashMap<String, DecoderKind>> = Lazy::new(|| {
    HashMap::from([
        (mime::APPLICATION_WWW_FORM_URLENCODED.essence_str().to_owned(), DecoderKind::FormUrlEncoded),
        (mime::APPLICATION_JSON.essence_str().to_owned(), DecoderKind::Json),
    ])
});

/// Selects the decoder for `content_type`, unknown or absent content types get [`DecoderKind::Raw`].
///
/// # Example
/// ```
/// # use micro_body::{dispatch, DecoderKind};
/// assert_eq!(dispatch(Some("application/json")), DecoderKind::Json);
/// assert_eq!(dispatch(Some("text/plain")), DecoderKind::Raw);
/// assert_eq!(dispatch(None), DecoderKind::Raw);
/// ```
pub fn dispatch(content_type: Option<&str>) -> DecoderKind {
    let kind = content_type.and_then(|content_type| DECODERS.get(content_type).copied()).unwrap_or(DecoderKind::Raw);
    debug!(content_type, decoder = ?kind, "dispatch request body decoder");
    kind
}
