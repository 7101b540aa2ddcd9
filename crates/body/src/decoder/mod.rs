//! Body decoders selected by content type.
//!
//! Every decoder runs once, on the fully accumulated body:
//!
//! - [`DecoderKind::Raw`]: the bytes are delivered untouched
//! - [`DecoderKind::Json`]: the body is parsed as a JSON document
//! - [`DecoderKind::FormUrlEncoded`]: the body is split into percent-decoded key/value pairs
//!
//! The set is closed; the mapping from content types lives in [`crate::dispatcher`].

mod form;
mod json;
mod raw;

pub use form::decode_form;
pub use form::fold_pairs;

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DecodeError, ExtractError};
use crate::options::ParserOptions;

/// The decoding strategy applied to a completed body.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DecoderKind {
    /// Deliver the body verbatim
    Raw,
    /// Parse the body as a JSON document
    Json,
    /// Parse the body as `application/x-www-form-urlencoded` pairs
    FormUrlEncoded,
}

impl DecoderKind {
    /// Decodes a completed body.
    ///
    /// # Errors
    /// Structured decoders fail with a [`DecodeError`] on malformed input; the raw decoder never
    /// fails.
    pub fn decode(self, body: Bytes, options: &ParserOptions) -> Result<ParsedBody, DecodeError> {
        match self {
            DecoderKind::Raw => Ok(raw::decode(body)),
            DecoderKind::Json => json::decode(&body),
            DecoderKind::FormUrlEncoded => decode_form(&body, options),
        }
    }

    /// Returns true if this decoder attempts structural decoding
    #[inline]
    pub fn is_structured(self) -> bool {
        !matches!(self, DecoderKind::Raw)
    }
}

/// The value handed to the caller once a body has been decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBody {
    /// A JSON document
    Json(Value),
    /// A form body folded into an object of strings, keys in first-occurrence order
    Form(Value),
    /// A form body kept as ordered `(key, value)` pairs
    Pairs(Vec<(String, String)>),
    /// The untouched body of an unsupported content type
    Raw(Bytes),
}

impl ParsedBody {
    /// Returns true if the body went through structural decoding
    #[inline]
    pub fn was_parsed(&self) -> bool {
        !matches!(self, ParsedBody::Raw(_))
    }

    /// Returns the JSON document or the folded form object
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ParsedBody::Json(value) | ParsedBody::Form(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_pairs(&self) -> Option<&[(String, String)]> {
        match self {
            ParsedBody::Pairs(pairs) => Some(pairs),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&Bytes> {
        match self {
            ParsedBody::Raw(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn into_raw(self) -> Option<Bytes> {
        match self {
            ParsedBody::Raw(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Converts the decoded body into a typed value.
    ///
    /// JSON documents go through `serde_json`. Form bodies, folded or not, go through
    /// `serde_urlencoded`, so scalar fields such as numbers and booleans are parsed out of their
    /// string values. A duplicate key in ordered pairs is reported by the target type, if it cares.
    ///
    /// # Errors
    /// Raw bodies can not be deserialized; structured bodies fail if they do not match `T`.
    ///
    /// # Example
    /// ```
    /// # use micro_body::{DecoderKind, ParserOptions};
    /// # use serde::Deserialize;
    /// #[derive(Deserialize)]
    /// struct Params {
    ///     name: String,
    ///     age: u32,
    /// }
    ///
    /// let body = DecoderKind::FormUrlEncoded.decode("name=micro+body&age=3".into(), &ParserOptions::default()).unwrap();
    /// let params: Params = body.deserialize().unwrap();
    /// assert_eq!(params.name, "micro body");
    /// assert_eq!(params.age, 3);
    /// ```
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, ExtractError> {
        match self {
            ParsedBody::Json(value) => Ok(serde_json::from_value(value)?),
            ParsedBody::Form(value) => deserialize_form(&value),
            ParsedBody::Pairs(pairs) => deserialize_form(&pairs),
            ParsedBody::Raw(_) => Err(ExtractError::UnsupportedBody),
        }
    }
}

/// Re-encodes already decoded form entries so `serde_urlencoded` can type their values
fn deserialize_form<T, F>(form: &F) -> Result<T, ExtractError>
where
    T: DeserializeOwned,
    F: Serialize + ?Sized,
{
    let encoded = serde_urlencoded::to_string(form)?;
    Ok(serde_urlencoded::from_str(&encoded)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Params {
        name: String,
        zip: String,
    }

    #[test]
    fn test_raw_decoder() {
        let body = DecoderKind::Raw.decode(Bytes::from_static(b"a=1"), &ParserOptions::default()).unwrap();
        assert_eq!(body, ParsedBody::Raw(Bytes::from_static(b"a=1")));
        assert!(!body.was_parsed());
    }

    #[test]
    fn test_json_decoder() {
        let body = DecoderKind::Json.decode(Bytes::from_static(br#"{"a":[1,2]}"#), &ParserOptions::default()).unwrap();
        assert_eq!(body.as_json(), Some(&json!({"a": [1, 2]})));
        assert!(body.was_parsed());
    }

    #[test]
    fn test_is_structured() {
        assert!(!DecoderKind::Raw.is_structured());
        assert!(DecoderKind::Json.is_structured());
        assert!(DecoderKind::FormUrlEncoded.is_structured());
    }

    #[test]
    fn test_deserialize_json() {
        let body = ParsedBody::Json(json!({"name": "micro", "zip": "10001"}));
        let params: Params = body.deserialize().unwrap();
        assert_eq!(params, Params { name: "micro".into(), zip: "10001".into() });
    }

    #[test]
    fn test_deserialize_pairs() {
        let body = ParsedBody::Pairs(vec![("zip".into(), "10001".into()), ("name".into(), "micro".into())]);
        let params: Params = body.deserialize().unwrap();
        assert_eq!(params, Params { name: "micro".into(), zip: "10001".into() });
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Account {
        name: String,
        age: u32,
        admin: bool,
    }

    #[test]
    fn test_deserialize_typed_form() {
        let expected = Account { name: "a".into(), age: 5, admin: true };

        for as_json in [true, false] {
            let options = ParserOptions::new().with_as_json(as_json);
            let body = DecoderKind::FormUrlEncoded.decode(Bytes::from_static(b"name=a&age=5&admin=true"), &options).unwrap();
            assert_eq!(body.deserialize::<Account>().unwrap(), expected, "as_json = {as_json}");
        }
    }

    #[test]
    fn test_deserialize_typed_form_invalid_value() {
        let body = DecoderKind::FormUrlEncoded.decode(Bytes::from_static(b"name=a&age=old&admin=true"), &ParserOptions::default()).unwrap();
        assert!(matches!(body.deserialize::<Account>(), Err(ExtractError::Form { .. })));
    }

    #[test]
    fn test_deserialize_form_keeps_reserved_characters() {
        let body = ParsedBody::Pairs(vec![("name".into(), "a&b=c+d%".into()), ("zip".into(), "1 2".into())]);
        let params: Params = body.deserialize().unwrap();
        assert_eq!(params, Params { name: "a&b=c+d%".into(), zip: "1 2".into() });
    }

    #[test]
    fn test_deserialize_non_object_form() {
        let body = ParsedBody::Form(json!("name"));
        assert!(matches!(body.deserialize::<Params>(), Err(ExtractError::FormEncode { .. })));
    }

    #[test]
    fn test_deserialize_missing_field() {
        let body = ParsedBody::Pairs(vec![("name".into(), "micro".into())]);
        assert!(matches!(body.deserialize::<Params>(), Err(ExtractError::Form { .. })));
    }

    #[test]
    fn test_deserialize_raw() {
        let body = ParsedBody::Raw(Bytes::from_static(b"name=micro&zip=1"));
        assert!(matches!(body.deserialize::<Params>(), Err(ExtractError::UnsupportedBody)));
    }
}
