//! `application/x-www-form-urlencoded` body decoding.
//!
//! The body is decoded as UTF-8 once, after accumulation, so multi-byte characters split across
//! chunk boundaries are reassembled. It is then split on `&` (empty segments are skipped), each
//! segment is split on its first `=`, `+` becomes a space and key and value are percent-decoded
//! independently. A single bad segment fails the whole body.

use serde_json::{Map, Value};
use tracing::trace;

use super::ParsedBody;
use crate::error::DecodeError;
use crate::options::ParserOptions;
use crate::percent::percent_decode;

/// Decodes a form body into ordered pairs, or into a folded object ([`ParsedBody::Form`]) when
/// [`ParserOptions::as_json`] is set.
///
/// # Errors
/// Fails if the body is not valid UTF-8 or contains an invalid percent-encoded sequence.
pub fn decode_form(body: &[u8], options: &ParserOptions) -> Result<ParsedBody, DecodeError> {
    let text = std::str::from_utf8(body)?;
    let pairs = parse_pairs(text)?;
    trace!(pairs = pairs.len(), as_json = options.as_json(), "decoded form body");

    if options.as_json() { Ok(ParsedBody::Form(fold_pairs(pairs))) } else { Ok(ParsedBody::Pairs(pairs)) }
}

/// Folds ordered pairs into a JSON object of strings.
///
/// A later occurrence of a key overwrites the earlier one, multiple values are not preserved. Keys
/// keep the position of their first occurrence.
pub fn fold_pairs(pairs: Vec<(String, String)>) -> Value {
    let mut map = Map::with_capacity(pairs.len());
    for (key, value) in pairs {
        map.insert(key, Value::String(value));
    }
    Value::Object(map)
}

fn parse_pairs(text: &str) -> Result<Vec<(String, String)>, DecodeError> {
    text.split('&').filter(|sequence| !sequence.is_empty()).map(parse_pair).collect()
}

fn parse_pair(sequence: &str) -> Result<(String, String), DecodeError> {
    let (key, value) = sequence.split_once('=').unwrap_or((sequence, ""));
    Ok((decode_component(key)?, decode_component(value)?))
}

#[inline]
fn decode_component(component: &str) -> Result<String, DecodeError> {
    if component.contains('+') { percent_decode(&component.replace('+', " ")) } else { percent_decode(component) }
}
