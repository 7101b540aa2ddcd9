use serde::Deserialize;

/// Configuration supplied once per parse invocation.
///
/// `as_json` only affects `application/x-www-form-urlencoded` bodies: when set, decoded pairs are
/// folded into a JSON object (last value wins on duplicate keys), otherwise they are returned as an
/// ordered list of `(key, value)` pairs.
///
/// The options can be loaded from the host's own configuration file:
///
/// ```
/// # use micro_body::ParserOptions;
/// let options: ParserOptions = serde_json::from_str(r#"{ "as_json": false }"#).unwrap();
/// assert!(!options.as_json());
/// assert_eq!(options.max_body_size(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    as_json: bool,
    max_body_size: Option<usize>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self { as_json: true, max_body_size: None }
    }
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_as_json(mut self, as_json: bool) -> Self {
        self.as_json = as_json;
        self
    }

    /// Limits the accumulated body size in bytes, exceeding it fails the decode
    #[must_use]
    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = Some(max_body_size);
        self
    }

    #[inline]
    pub fn as_json(&self) -> bool {
        self.as_json
    }

    #[inline]
    pub fn max_body_size(&self) -> Option<usize> {
        self.max_body_size
    }
}
