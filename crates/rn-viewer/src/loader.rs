//! Document loading.
//!
//! [`DocumentLoader`] fetches Markdown text and converts it to HTML. It does
//! not touch viewer state; applying the result and managing the loading
//! indicator is the caller's job.

use std::sync::Arc;

use rn_markdown::MarkdownRenderer;
use rn_source::Fetcher;
use tracing::{debug, warn};

/// Why a document could not be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The source answered with a non-success status.
    NotFound,
    /// The request failed without an answer.
    NetworkError,
    /// No path was given.
    Empty,
}

/// Result of loading a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentContent {
    /// Rendered HTML.
    Success {
        /// HTML fragment.
        html: String,
    },
    /// Loading failed.
    Failure {
        /// Failure category.
        kind: FailureKind,
        /// Human-readable message naming the path.
        message: String,
    },
}

/// Fetches documents and renders them through the Markdown capability.
#[derive(Clone)]
pub struct DocumentLoader {
    fetcher: Arc<dyn Fetcher>,
    renderer: Arc<dyn MarkdownRenderer>,
}

impl DocumentLoader {
    /// Create a loader from its capabilities.
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>, renderer: Arc<dyn MarkdownRenderer>) -> Self {
        Self { fetcher, renderer }
    }

    /// Load and render the document at `path`.
    pub fn load(&self, path: Option<&str>) -> DocumentContent {
        let Some(path) = path.filter(|p| !p.trim().is_empty()) else {
            return DocumentContent::Failure {
                kind: FailureKind::Empty,
                message: "No document path given".to_owned(),
            };
        };

        match self.fetcher.fetch(path) {
            Ok(markdown) => {
                debug!(path, bytes = markdown.len(), "Rendering document");
                DocumentContent::Success {
                    html: self.renderer.render(&markdown),
                }
            }
            Err(err) if err.is_response() => {
                warn!(path, error = %err, "Document not found");
                let message = match err.status {
                    Some(status) => format!("Document not found: {path} (HTTP {status})"),
                    None => format!("Document not found: {path}"),
                };
                DocumentContent::Failure {
                    kind: FailureKind::NotFound,
                    message,
                }
            }
            Err(err) => {
                warn!(path, error = %err, "Document fetch failed");
                DocumentContent::Failure {
                    kind: FailureKind::NetworkError,
                    message: format!("Could not load {path}: {err}"),
                }
            }
        }
    }
}
