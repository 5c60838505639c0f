//! Table of contents for a language.
//!
//! Membership depends entirely on the selected language, so the TOC is
//! rebuilt from scratch on every language change rather than patched.

use crate::index::{Index, IndexStore, Lookup};
use crate::key::NavigationKey;

/// A navigable (topic, category, path) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleEntry<'a> {
    /// Topic name.
    pub topic: &'a str,
    /// Category name.
    pub category: &'a str,
    /// Document path for the language the entry was produced for.
    pub path: &'a str,
}

impl VisibleEntry<'_> {
    /// Key addressing this entry.
    #[must_use]
    pub fn key(&self) -> NavigationKey {
        NavigationKey::new(self.topic, self.category)
    }
}

/// Entries translated into `language`, topics and categories in declaration order.
///
/// Categories without a (non-empty) path for `language` are skipped, which
/// also drops topics that end up with no entries.
pub fn visible_entries<'a>(
    index: &'a Index,
    language: &'a str,
) -> impl Iterator<Item = VisibleEntry<'a>> + 'a {
    index.topics().iter().flat_map(move |topic| {
        topic.categories.iter().filter_map(move |category| {
            category
                .translations
                .get(language)
                .filter(|path| !path.is_empty())
                .map(|path| VisibleEntry {
                    topic: &topic.name,
                    category: &category.name,
                    path,
                })
        })
    })
}

/// TOC entry for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocItem {
    /// Category name shown as the link text.
    pub category: String,
    /// Key the entry navigates to.
    pub key: NavigationKey,
    /// Document path for the TOC's language.
    pub path: String,
}

/// Topic heading with its visible categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocSection {
    /// Topic name.
    pub topic: String,
    /// Visible categories, never empty.
    pub items: Vec<TocItem>,
}

/// Group the visible entries for `language` into sections by topic.
#[must_use]
pub fn build_toc(index: &Index, language: &str) -> Vec<TocSection> {
    let mut sections: Vec<TocSection> = Vec::new();
    for entry in visible_entries(index, language) {
        let item = TocItem {
            category: entry.category.to_owned(),
            key: entry.key(),
            path: entry.path.to_owned(),
        };
        match sections.last_mut() {
            Some(section) if section.topic == entry.topic => section.items.push(item),
            _ => sections.push(TocSection {
                topic: entry.topic.to_owned(),
                items: vec![item],
            }),
        }
    }
    sections
}

/// Path displayed for `key` in `language`, if the key is valid for it.
#[must_use]
pub fn selected_path<'a>(
    store: &'a IndexStore,
    key: &NavigationKey,
    language: &str,
) -> Option<&'a str> {
    match store.lookup(key, language) {
        Lookup::Found(path) => Some(path),
        Lookup::MissingTranslation | Lookup::UnknownKey => None,
    }
}
