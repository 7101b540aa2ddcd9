//! Percent-decoding of `%XX` escape sequences as described in
//! [RFC 3986 Section 2.1](https://tools.ietf.org/html/rfc3986#section-2.1).
//!
//! Decoded bytes are fed through a UTF-8 decoder that lives for a single [`percent_decode`] call, so
//! a multi-byte character escaped as several adjacent sequences (`%E2%82%AC`) comes out as one
//! character. Byte sequences that are not valid UTF-8 are replaced with `U+FFFD`, the way the
//! WHATWG URL standard decodes form values.
//!
//! The scan rules for a `%` are:
//! - two hex digits follow: the escape is decoded and both digits are consumed
//! - neither of the two following characters is a hex digit: the `%` is kept literally
//! - exactly one of them is a hex digit, or fewer than two characters follow: the input is invalid

use crate::error::DecodeError;

/// Decodes every `%XX` escape of `input`.
///
/// `+` is *not* translated here; form bodies replace it with a space before calling this function.
///
/// # Errors
/// Returns [`DecodeError::InvalidSequence`] if a `%` has fewer than two characters after it, or if
/// only one of the two characters after it is a hex digit.
///
/// # Example
/// ```
/// # use micro_body::percent::percent_decode;
/// assert_eq!(percent_decode("100%25").unwrap(), "100%");
/// assert_eq!(percent_decode("caf%C3%A9").unwrap(), "café");
/// assert!(percent_decode("50%").is_err());
/// ```
pub fn percent_decode(input: &str) -> Result<String, DecodeError> {
    // fast path, nothing to decode
    if !input.contains('%') {
        return Ok(input.to_owned());
    }

    let mut decoder = Utf8Decoder::with_capacity(input.len());
    let mut chars = input.char_indices();

    while let Some((offset, c)) = chars.next() {
        if c != '%' {
            decoder.push_char(c);
            continue;
        }

        let mut lookahead = chars.clone();
        let (Some((_, high)), Some((_, low))) = (lookahead.next(), lookahead.next()) else {
            return Err(DecodeError::invalid_sequence(offset, "incomplete escape at end of input"));
        };

        match (hex_value(high), hex_value(low)) {
            (Some(high), Some(low)) => {
                decoder.push_byte((high << 4) | low);
                chars = lookahead;
            }
            (None, None) => decoder.push_char('%'),
            _ => return Err(DecodeError::invalid_sequence(offset, "escape mixes hex and non-hex digits")),
        }
    }

    Ok(decoder.finish())
}

#[inline]
fn hex_value(c: char) -> Option<u8> {
    c.to_digit(16).and_then(|digit| u8::try_from(digit).ok())
}

/// Incremental UTF-8 decoder for percent-decoded bytes.
///
/// Bytes are buffered until they form a complete character. A pending incomplete sequence is
/// flushed as `U+FFFD` when a literal character interrupts it or when decoding finishes.
#[derive(Debug)]
struct Utf8Decoder {
    output: String,
    pending: Vec<u8>,
}

impl Utf8Decoder {
    fn with_capacity(capacity: usize) -> Self {
        Self { output: String::with_capacity(capacity), pending: Vec::with_capacity(4) }
    }

    fn push_byte(&mut self, byte: u8) {
        self.pending.push(byte);
        self.drain_complete();
    }

    fn push_char(&mut self, c: char) {
        self.flush();
        self.output.push(c);
    }

    fn finish(mut self) -> String {
        self.flush();
        self.output
    }

    /// Moves every complete character from `pending` to `output`, keeping a trailing incomplete
    /// sequence in place.
    fn drain_complete(&mut self) {
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(s) => {
                    self.output.push_str(s);
                    self.pending.clear();
                    return;
                }
                Err(e) => {
                    let valid_up_to = e.valid_up_to();
                    // the prefix is valid, so the lossy conversion only borrows it
                    self.output.push_str(&String::from_utf8_lossy(&self.pending[..valid_up_to]));
                    match e.error_len() {
                        // incomplete sequence, wait for more bytes
                        None => {
                            self.pending.drain(..valid_up_to);
                            return;
                        }
                        Some(invalid_len) => {
                            self.output.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid_up_to + invalid_len);
                        }
                    }
                }
            }
        }
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.output.push_str(&String::from_utf8_lossy(&self.pending));
            self.pending.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(percent_decode("hello world").unwrap(), "hello world");
        assert_eq!(percent_decode("").unwrap(), "");
    }

    #[test]
    fn test_basic_escape() {
        assert_eq!(percent_decode("%41").unwrap(), "A");
        assert_eq!(percent_decode("100%25").unwrap(), "100%");
        assert_eq!(percent_decode("a%20b%2Bc").unwrap(), "a b+c");
    }

    #[test]
    fn test_hex_case_insensitive() {
        assert_eq!(percent_decode("%2f%2F").unwrap(), "//");
    }

    #[test]
    fn test_plus_is_not_translated() {
        assert_eq!(percent_decode("a+b").unwrap(), "a+b");
    }

    #[test]
    fn test_multi_byte_sequence() {
        assert_eq!(percent_decode("caf%C3%A9").unwrap(), "café");
        assert_eq!(percent_decode("%E2%82%AC10").unwrap(), "€10");
        assert_eq!(percent_decode("%F0%9F%98%80").unwrap(), "😀");
    }

    #[test]
    fn test_literal_text_between_escapes() {
        assert_eq!(percent_decode("%C3%A9t%C3%A9").unwrap(), "été");
        assert_eq!(percent_decode("日本%E8%AA%9E").unwrap(), "日本語");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        assert_eq!(percent_decode("%FF").unwrap(), "\u{FFFD}");
        assert_eq!(percent_decode("%C3x").unwrap(), "\u{FFFD}x");
        assert_eq!(percent_decode("%C3%41").unwrap(), "\u{FFFD}A");
        assert_eq!(percent_decode("a%E2%82").unwrap(), "a\u{FFFD}");
    }

    #[test]
    fn test_literal_percent_when_both_non_hex() {
        assert_eq!(percent_decode("%zz").unwrap(), "%zz");
        assert_eq!(percent_decode("50%-off").unwrap(), "50%-off");
        assert_eq!(percent_decode("%zz%41").unwrap(), "%zzA");
    }

    #[test]
    fn test_mixed_hex_digits_is_invalid() {
        assert!(matches!(percent_decode("%4g"), Err(DecodeError::InvalidSequence { offset: 0, .. })));
        assert!(matches!(percent_decode("ab%g4"), Err(DecodeError::InvalidSequence { offset: 2, .. })));
        assert!(matches!(percent_decode("%%41"), Err(DecodeError::InvalidSequence { offset: 0, .. })));
    }

    #[test]
    fn test_percent_near_end_is_invalid() {
        assert!(matches!(percent_decode("%"), Err(DecodeError::InvalidSequence { offset: 0, .. })));
        assert!(matches!(percent_decode("50%"), Err(DecodeError::InvalidSequence { offset: 2, .. })));
        assert!(matches!(percent_decode("a%4"), Err(DecodeError::InvalidSequence { offset: 1, .. })));
        // counted in characters, not bytes
        assert!(matches!(percent_decode("%é"), Err(DecodeError::InvalidSequence { .. })));
    }

    #[test]
    fn test_literal_percent_then_invalid_tail() {
        // the first `%` is literal, the second has only one character after it
        assert!(percent_decode("%%%").is_err());
    }

    #[test]
    fn test_round_trip_with_form_encoder() {
        for s in ["plain", "with space", "100% sure", "a&b=c", "été 😀", "+plus+", "~!*'()"] {
            let encoded = serde_urlencoded::to_string(&[("k", s)]).unwrap();
            let value = encoded.strip_prefix("k=").unwrap().replace('+', " ");
            assert_eq!(percent_decode(&value).unwrap(), s);
        }
    }
}
