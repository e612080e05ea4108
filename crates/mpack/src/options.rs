//! Decoder configuration.

use serde::{Deserialize, Serialize};

/// Nesting limit applied when no other is configured.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// What to do with `str` payloads that are not valid UTF-8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Utf8Policy {
    /// Fail with [`DecodeError::InvalidUtf8`](crate::DecodeError::InvalidUtf8).
    #[default]
    Strict,
    /// Keep the raw bytes in the decoded [`Text`](crate::Text).
    Permissive,
}

/// What to do with bytes left over after the top-level value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrailingPolicy {
    #[default]
    Allow,
    /// Fail with [`DecodeError::TrailingBytes`](crate::DecodeError::TrailingBytes).
    Reject,
}

/// Options for [`Decoder`](crate::Decoder).
///
/// Deserializable so hosts can keep decoder limits in their own config files:
///
/// ```
/// use mpack::{DecoderOptions, TrailingPolicy, Utf8Policy};
///
/// let options: DecoderOptions =
///     serde_json::from_str(r#"{"max_depth": 16, "utf8": "permissive"}"#).unwrap();
/// assert_eq!(options.max_depth, 16);
/// assert_eq!(options.utf8, Utf8Policy::Permissive);
/// assert_eq!(options.trailing, TrailingPolicy::Allow);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderOptions {
    /// Maximum number of nested arrays/maps. A top-level array is at depth 1.
    pub max_depth: usize,
    pub utf8: Utf8Policy,
    pub trailing: TrailingPolicy,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            utf8: Utf8Policy::default(),
            trailing: TrailingPolicy::default(),
        }
    }
}

impl DecoderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn utf8(mut self, utf8: Utf8Policy) -> Self {
        self.utf8 = utf8;
        self
    }

    pub fn trailing(mut self, trailing: TrailingPolicy) -> Self {
        self.trailing = trailing;
        self
    }
}
