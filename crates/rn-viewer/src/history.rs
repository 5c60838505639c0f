//! Browser-style session history.

use url::Url;

/// Session history of the hosting page.
///
/// Mirrors the browser API the viewer depends on: the current entry can be
/// replaced or a new one pushed, and back/forward traversal returns the URL
/// landed on, which the caller then handles as a popstate.
pub trait History {
    /// URL of the current entry.
    fn current(&self) -> &Url;

    /// Add `url` after the current entry, discarding forward entries.
    fn push(&mut self, url: Url);

    /// Overwrite the current entry with `url`.
    fn replace(&mut self, url: Url);

    /// Move one entry back.
    fn back(&mut self) -> Option<Url>;

    /// Move one entry forward.
    fn forward(&mut self) -> Option<Url>;

    /// Number of entries.
    fn length(&self) -> usize;
}

/// In-memory history.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: Vec<Url>,
    index: usize,
}

impl SessionHistory {
    /// Start a history with a single entry at `url`.
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            entries: vec![url],
            index: 0,
        }
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[Url] {
        &self.entries
    }
}

impl History for SessionHistory {
    fn current(&self) -> &Url {
        &self.entries[self.index]
    }

    fn push(&mut self, url: Url) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url);
        self.index += 1;
    }

    fn replace(&mut self, url: Url) {
        self.entries[self.index] = url;
    }

    fn back(&mut self) -> Option<Url> {
        self.index = self.index.checked_sub(1)?;
        Some(self.entries[self.index].clone())
    }

    fn forward(&mut self) -> Option<Url> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.entries[self.index].clone())
    }

    fn length(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn url(fragment: &str) -> Url {
        Url::parse(&format!("https://localhost/?lang=de#{fragment}")).unwrap()
    }

    #[test]
    fn test_push_and_traverse() {
        let mut history = SessionHistory::new(url("a"));
        history.push(url("b"));
        history.push(url("c"));

        assert_eq!(history.back(), Some(url("b")));
        assert_eq!(history.back(), Some(url("a")));
        assert_eq!(history.back(), None);
        assert_eq!(history.current(), &url("a"));
        assert_eq!(history.forward(), Some(url("b")));
    }

    #[test]
    fn test_push_discards_forward_entries() {
        let mut history = SessionHistory::new(url("a"));
        history.push(url("b"));
        history.back();
        history.push(url("c"));

        assert_eq!(history.entries(), &[url("a"), url("c")]);
        assert_eq!(history.forward(), None);
    }

    #[test]
    fn test_replace_keeps_length() {
        let mut history = SessionHistory::new(url("a"));
        history.replace(url("b"));

        assert_eq!(history.length(), 1);
        assert_eq!(history.current(), &url("b"));
    }
}
