//! Navigation keys and their URL fragment encoding.
//!
//! A document is addressed by its `(topic, category)` pair, written as
//! `topic/category`. Inside each component `%` and `/` are escaped so names
//! containing a slash survive the split. The whole key is then
//! percent-encoded like `encodeURIComponent` for use as the URL fragment:
//!
//! | Topic      | Category  | Key string        | Fragment              |
//! |------------|-----------|-------------------|-----------------------|
//! | `Setup`    | `Install` | `Setup/Install`   | `Setup%2FInstall`     |
//! | `CI/CD`    | `Runner`  | `CI%2FCD/Runner`  | `CI%252FCD%2FRunner`  |

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters escaped in a fragment: everything `encodeURIComponent` escapes.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Identifies a selectable document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavigationKey {
    topic: String,
    category: String,
}

impl NavigationKey {
    /// Create a key for a topic/category pair.
    #[must_use]
    pub fn new(topic: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            category: category.into(),
        }
    }

    /// Topic name.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Category name.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Serialize as `topic/category` with component escaping.
    #[must_use]
    pub fn encode(&self) -> String {
        format!(
            "{}/{}",
            escape_component(&self.topic),
            escape_component(&self.category)
        )
    }

    /// Parse a `topic/category` key string.
    ///
    /// Returns `None` for an empty string. A string without a separator is a
    /// topic with an empty category, which never resolves against an index.
    #[must_use]
    pub fn decode(encoded: &str) -> Option<Self> {
        if encoded.is_empty() {
            return None;
        }
        let (topic, category) = encoded.split_once('/').unwrap_or((encoded, ""));
        Some(Self::new(
            unescape_component(topic),
            unescape_component(category),
        ))
    }

    /// Percent-encode the key for use as a URL fragment (without `#`).
    #[must_use]
    pub fn to_fragment(&self) -> String {
        utf8_percent_encode(&self.encode(), URI_COMPONENT).to_string()
    }

    /// Decode a URL fragment (with or without the leading `#`).
    ///
    /// Returns `None` when the fragment is empty.
    #[must_use]
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        let decoded = percent_decode_str(fragment).decode_utf8_lossy();
        Self::decode(&decoded)
    }
}

impl fmt::Display for NavigationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.topic, self.category)
    }
}

fn escape_component(component: &str) -> String {
    component.replace('%', "%25").replace('/', "%2F")
}

fn unescape_component(component: &str) -> String {
    percent_decode_str(component)
        .decode_utf8_lossy()
        .into_owned()
}
