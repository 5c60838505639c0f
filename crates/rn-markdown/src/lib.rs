//! Markdown to HTML conversion for the rn manual viewer.
//!
//! The viewer treats Markdown rendering as a pluggable capability: it only
//! needs something implementing [`MarkdownRenderer`]. [`HtmlRenderer`] is the
//! default implementation on top of `pulldown-cmark`.
//!
//! # Example
//!
//! ```
//! use rn_markdown::{HtmlRenderer, MarkdownRenderer};
//!
//! let html = HtmlRenderer::new().render("# Hello\n\n**Bold** text");
//! assert!(html.contains("<h1>Hello</h1>"));
//! ```

mod html;

pub use html::{HtmlRenderer, escape_html};

/// Converts Markdown text to an HTML fragment.
pub trait MarkdownRenderer: Send + Sync {
    /// Render `markdown` to HTML.
    fn render(&self, markdown: &str) -> String;
}
