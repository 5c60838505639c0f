//! HTML page template.

use std::fmt;

use rn_markdown::escape_html;
use url::Url;

use crate::controller::{ContentArea, View};
use crate::router::canonical_url;

/// Full HTML page for a [`View`].
///
/// TOC links point at canonical URLs built on `page`.
pub struct PageTemplate<'a> {
    view: &'a View,
    page: &'a Url,
    title: &'a str,
}

impl<'a> PageTemplate<'a> {
    /// Template for `view` hosted at `page`.
    #[must_use]
    pub fn new(view: &'a View, page: &'a Url) -> Self {
        Self {
            view,
            page,
            title: "Manual",
        }
    }

    /// Set the document title.
    #[must_use]
    pub fn with_title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    fn write_selector(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, r#"<select id="langSelect" name="lang">"#)?;
        for language in &self.view.languages {
            let selected = if *language == self.view.selected_language {
                " selected"
            } else {
                ""
            };
            let language = escape_html(language);
            writeln!(f, r#"<option value="{language}"{selected}>{language}</option>"#)?;
        }
        writeln!(f, "</select>")
    }

    fn write_toc(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active = match &self.view.content {
            ContentArea::Loading { key } | ContentArea::Document { key, .. } => Some(key),
            ContentArea::Placeholder | ContentArea::Unavailable => None,
        };

        writeln!(f, r#"<nav id="toc">"#)?;
        for section in &self.view.toc {
            writeln!(f, "<h3>{}</h3>", escape_html(&section.topic))?;
            writeln!(f, "<ul>")?;
            for item in &section.items {
                let class = if active == Some(&item.key) {
                    "toc-entry active"
                } else {
                    "toc-entry"
                };
                let href = canonical_url(self.page, &self.view.selected_language, Some(&item.key));
                writeln!(
                    f,
                    r#"<li><a class="{class}" href="{}">{}</a></li>"#,
                    escape_html(href.as_str()),
                    escape_html(&item.category)
                )?;
            }
            writeln!(f, "</ul>")?;
        }
        writeln!(f, "</nav>")
    }

    fn write_status(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, r#"<div id="status" role="status">"#)?;
        for notice in &self.view.notices {
            writeln!(
                f,
                r#"<p class="status status-{}">{}</p>"#,
                notice.kind().as_str(),
                escape_html(&notice.to_string())
            )?;
        }
        writeln!(f, "</div>")
    }

    fn write_content(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, r#"<main id="content">"#)?;
        match &self.view.content {
            ContentArea::Placeholder => writeln!(
                f,
                r#"<p class="placeholder">Select a document from the table of contents.</p>"#
            )?,
            ContentArea::Loading { .. } => writeln!(f, r#"<p class="loading">Loading…</p>"#)?,
            ContentArea::Document { language, html, .. } => {
                writeln!(f, r#"<article lang="{}">"#, escape_html(language))?;
                f.write_str(html)?;
                writeln!(f, "</article>")?;
            }
            ContentArea::Unavailable => {}
        }
        writeln!(f, "</main>")
    }
}

impl fmt::Display for PageTemplate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(
            f,
            r#"<html lang="{}">"#,
            escape_html(&self.view.selected_language)
        )?;
        writeln!(f, "<head>")?;
        writeln!(f, r#"<meta charset="utf-8">"#)?;
        writeln!(f, "<title>{}</title>", escape_html(self.title))?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        writeln!(f, "<header>")?;
        self.write_selector(f)?;
        writeln!(f, "</header>")?;
        self.write_toc(f)?;
        self.write_status(f)?;
        self.write_content(f)?;
        writeln!(f, "</body>")?;
        writeln!(f, "</html>")
    }
}
