//! HTML rendering backed by `pulldown-cmark`.

use pulldown_cmark::{Event, Options, Parser, html};

use crate::MarkdownRenderer;

/// Markdown renderer producing HTML5 fragments.
///
/// Raw HTML embedded in the Markdown source is escaped unless
/// [`with_raw_html`](Self::with_raw_html) is set, so untrusted documents
/// cannot inject markup or script.
#[derive(Debug, Clone, Copy)]
pub struct HtmlRenderer {
    gfm: bool,
    raw_html: bool,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    /// Create a renderer with GitHub Flavored Markdown enabled and raw HTML escaped.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gfm: true,
            raw_html: false,
        }
    }

    /// Toggle GitHub Flavored Markdown extensions.
    #[must_use]
    pub fn with_gfm(mut self, gfm: bool) -> Self {
        self.gfm = gfm;
        self
    }

    /// Pass raw HTML through unchanged.
    #[must_use]
    pub fn with_raw_html(mut self, raw_html: bool) -> Self {
        self.raw_html = raw_html;
        self
    }

    /// Parser options for the current settings.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }
}

impl MarkdownRenderer for HtmlRenderer {
    fn render(&self, markdown: &str) -> String {
        let raw_html = self.raw_html;
        let parser = Parser::new_ext(markdown, self.parser_options()).map(|event| match event {
            Event::Html(text) | Event::InlineHtml(text) if !raw_html => Event::Text(text),
            other => other,
        });

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

/// Escape text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_heading_and_emphasis() {
        let html = HtmlRenderer::new().render("# Install\n\n**Bold** text");

        assert_eq!(html, "<h1>Install</h1>\n<p><strong>Bold</strong> text</p>\n");
    }

    #[test]
    fn test_tables_with_gfm() {
        let html = HtmlRenderer::new().render("| a | b |\n|---|---|\n| 1 | 2 |");

        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_tables_without_gfm() {
        let html = HtmlRenderer::new()
            .with_gfm(false)
            .render("| a | b |\n|---|---|\n| 1 | 2 |");

        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_raw_html_escaped_by_default() {
        let html = HtmlRenderer::new().render("<script>alert(1)</script>\n\nText <b>inline</b>");

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;inline&lt;/b&gt;"));
    }

    #[test]
    fn test_raw_html_passthrough() {
        let html = HtmlRenderer::new()
            .with_raw_html(true)
            .render("Text <b>inline</b>");

        assert!(html.contains("<b>inline</b>"));
    }

    #[test]
    fn test_code_block_escaped() {
        let html = HtmlRenderer::new().render("```rust\nlet a = 1 < 2;\n```");

        assert!(html.contains(r#"<code class="language-rust">"#));
        assert!(html.contains("1 &lt; 2"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_html_unicode_untouched() {
        assert_eq!(escape_html("Übersicht – 概要"), "Übersicht – 概要");
    }
}
