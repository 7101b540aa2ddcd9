//! JSON body decoding.
//!
//! The whole body must have arrived before parsing starts, so memory use is bounded by the body
//! size and no partial document is ever observed.

use serde_json::Value;

use super::ParsedBody;
use crate::error::DecodeError;

pub(super) fn decode(body: &[u8]) -> Result<ParsedBody, DecodeError> {
    let value = serde_json::from_slice::<Value>(body)?;
    Ok(ParsedBody::Json(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use serde_json::json;

    #[test]
    fn test_document() {
        let body = indoc! {r#"
            {
                "name": "micro",
                "tags": ["http", "body"],
                "nested": { "ok": true, "count": 2 }
            }
        "#};

        let parsed = decode(body.as_bytes()).unwrap();
        assert_eq!(
            parsed,
            ParsedBody::Json(json!({
                "name": "micro",
                "tags": ["http", "body"],
                "nested": { "ok": true, "count": 2 }
            }))
        );
    }

    #[test]
    fn test_scalar_document() {
        assert_eq!(decode(b"42").unwrap(), ParsedBody::Json(json!(42)));
        assert_eq!(decode(b"\"text\"").unwrap(), ParsedBody::Json(json!("text")));
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(decode(b"{invalid"), Err(DecodeError::MalformedJson { .. })));
    }

    #[test]
    fn test_empty_body() {
        assert!(matches!(decode(b""), Err(DecodeError::MalformedJson { .. })));
    }

    #[test]
    fn test_trailing_garbage() {
        assert!(matches!(decode(b"{} {}"), Err(DecodeError::MalformedJson { .. })));
    }
}
