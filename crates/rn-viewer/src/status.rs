//! Status messages shown in the viewer's status region.
//!
//! Every failure the viewer recovers from ends up here. None of them stops
//! the viewer; each one replaces the previous message set on the next event.

use crate::index::IndexLoadError;
use crate::key::NavigationKey;
use crate::loader::FailureKind;

/// Stable identifier of a status kind, usable as a CSS class suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    IndexLoad,
    DocumentNotFound,
    DocumentNetwork,
    EmptyPath,
    MissingTranslation,
    UnknownKey,
    LanguageUnavailable,
    UnsupportedLanguage,
}

impl StatusKind {
    /// Kebab-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IndexLoad => "index-load",
            Self::DocumentNotFound => "document-not-found",
            Self::DocumentNetwork => "document-network",
            Self::EmptyPath => "empty-path",
            Self::MissingTranslation => "missing-translation",
            Self::UnknownKey => "unknown-key",
            Self::LanguageUnavailable => "language-unavailable",
            Self::UnsupportedLanguage => "unsupported-language",
        }
    }
}

/// A recovered failure with its human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Status {
    /// The index could not be fetched or parsed; the viewer runs empty.
    #[error("Could not load the manual index from {location}: {reason}")]
    IndexLoad {
        /// Index location.
        location: String,
        /// Failure reason.
        reason: String,
    },
    /// The document source answered with a non-success status.
    #[error("{message}")]
    DocumentNotFound {
        /// Message naming the path.
        message: String,
    },
    /// The document request failed without an answer.
    #[error("{message}")]
    DocumentNetwork {
        /// Message naming the path and cause.
        message: String,
    },
    /// The index lists an empty path for the key.
    #[error("No document path is set for \"{key}\"")]
    EmptyPath {
        /// Key with the empty path.
        key: NavigationKey,
    },
    /// The key exists but is not translated into the language.
    #[error("\"{key}\" is not available in language \"{language}\"")]
    MissingTranslation {
        /// Requested key.
        key: NavigationKey,
        /// Current language.
        language: String,
    },
    /// The key does not exist in the index.
    #[error("Unknown document \"{key}\"")]
    UnknownKey {
        /// Requested key.
        key: NavigationKey,
    },
    /// The URL asked for a language without any categories.
    #[error("No categories are available for language \"{requested}\"; showing \"{fallback}\" instead")]
    LanguageUnavailable {
        /// Language from the URL.
        requested: String,
        /// Language used instead.
        fallback: String,
    },
    /// An explicit language change named a language the index does not offer.
    #[error("Language \"{language}\" is not offered by this manual")]
    UnsupportedLanguage {
        /// Rejected language.
        language: String,
    },
}

impl Status {
    /// Status kind.
    #[must_use]
    pub fn kind(&self) -> StatusKind {
        match self {
            Self::IndexLoad { .. } => StatusKind::IndexLoad,
            Self::DocumentNotFound { .. } => StatusKind::DocumentNotFound,
            Self::DocumentNetwork { .. } => StatusKind::DocumentNetwork,
            Self::EmptyPath { .. } => StatusKind::EmptyPath,
            Self::MissingTranslation { .. } => StatusKind::MissingTranslation,
            Self::UnknownKey { .. } => StatusKind::UnknownKey,
            Self::LanguageUnavailable { .. } => StatusKind::LanguageUnavailable,
            Self::UnsupportedLanguage { .. } => StatusKind::UnsupportedLanguage,
        }
    }

    /// Status for a failed document load of `key`.
    #[must_use]
    pub fn from_failure(key: &NavigationKey, kind: FailureKind, message: String) -> Self {
        match kind {
            FailureKind::NotFound => Self::DocumentNotFound { message },
            FailureKind::NetworkError => Self::DocumentNetwork { message },
            FailureKind::Empty => Self::EmptyPath { key: key.clone() },
        }
    }
}

impl From<&IndexLoadError> for Status {
    fn from(err: &IndexLoadError) -> Self {
        Self::IndexLoad {
            location: err.location().to_owned(),
            reason: err.reason(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_translation_message() {
        let status = Status::MissingTranslation {
            key: NavigationKey::new("Setup", "Update"),
            language: "en".to_owned(),
        };

        assert_eq!(
            status.to_string(),
            r#""Setup/Update" is not available in language "en""#
        );
        assert_eq!(status.kind().as_str(), "missing-translation");
    }

    #[test]
    fn test_language_unavailable_message() {
        let status = Status::LanguageUnavailable {
            requested: "fr".to_owned(),
            fallback: "de".to_owned(),
        };

        assert!(status.to_string().contains(r#""fr""#));
        assert!(status.to_string().contains(r#""de""#));
    }

    #[test]
    fn test_from_failure_kinds() {
        let key = NavigationKey::new("Setup", "Install");

        assert_eq!(
            Status::from_failure(&key, FailureKind::NotFound, "gone".to_owned()).kind(),
            StatusKind::DocumentNotFound
        );
        assert_eq!(
            Status::from_failure(&key, FailureKind::NetworkError, "down".to_owned()).kind(),
            StatusKind::DocumentNetwork
        );
        assert_eq!(
            Status::from_failure(&key, FailureKind::Empty, String::new()),
            Status::EmptyPath { key }
        );
    }

    #[test]
    fn test_document_messages_pass_through() {
        let status = Status::DocumentNotFound {
            message: "Document not found: install.en.md (HTTP 404)".to_owned(),
        };

        assert_eq!(status.to_string(), "Document not found: install.en.md (HTTP 404)");
    }
}
