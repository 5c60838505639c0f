//! The manual index and its store.
//!
//! The index is a JSON document of the shape
//!
//! ```json
//! { "Setup": { "Install": { "de": "install.de.md", "en": "install.en.md" } } }
//! ```
//!
//! mapping topic → category → language → document path. Declaration order of
//! topics, categories and languages is preserved; it drives TOC order and the
//! order of the language selector.

use std::fmt;
use std::marker::PhantomData;

use rn_source::{FetchError, Fetcher};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::key::NavigationKey;

/// Per-language document paths of one category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    paths: Vec<(String, String)>,
}

impl Translations {
    /// Path for `language`, if the category is translated into it.
    #[must_use]
    pub fn get(&self, language: &str) -> Option<&str> {
        self.paths
            .iter()
            .find(|(lang, _)| lang == language)
            .map(|(_, path)| path.as_str())
    }

    /// Languages in declaration order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(|(lang, _)| lang.as_str())
    }
}

/// A document grouping within a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Category name.
    pub name: String,
    /// Paths per language.
    pub translations: Translations,
}

/// Top-level grouping in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    /// Topic name.
    pub name: String,
    /// Categories in declaration order.
    pub categories: Vec<Category>,
}

/// Topic → category → language → path structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    topics: Vec<Topic>,
}

impl Index {
    /// Topics in declaration order.
    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Find a category by topic and category name.
    #[must_use]
    pub fn category(&self, topic: &str, category: &str) -> Option<&Category> {
        self.topics
            .iter()
            .find(|t| t.name == topic)?
            .categories
            .iter()
            .find(|c| c.name == category)
    }
}

impl<'de> Deserialize<'de> for Index {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Ordered::<Ordered<Ordered<String>>>::deserialize(deserializer)?;
        let topics = raw
            .0
            .into_iter()
            .map(|(name, categories)| Topic {
                name,
                categories: categories
                    .0
                    .into_iter()
                    .map(|(name, paths)| Category {
                        name,
                        translations: Translations { paths: paths.0 },
                    })
                    .collect(),
            })
            .collect();
        Ok(Self { topics })
    }
}

/// JSON object deserialized into a list of entries in document order.
///
/// Duplicate keys keep the position of their first occurrence and the value
/// of their last.
struct Ordered<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Ordered<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
            type Value = Ordered<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, V)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    if let Some(slot) = entries.iter_mut().find(|(k, _)| *k == key) {
                        slot.1 = value;
                    } else {
                        entries.push((key, value));
                    }
                }
                Ok(Ordered(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}

/// Error loading the index.
#[derive(Debug, thiserror::Error)]
pub enum IndexLoadError {
    /// The index document could not be fetched.
    #[error("failed to fetch index {location}: {error}")]
    Fetch {
        /// Index location.
        location: String,
        /// Underlying fetch error.
        #[source]
        error: FetchError,
    },
    /// The index document is not valid index JSON.
    #[error("failed to parse index {location}: {error}")]
    Parse {
        /// Index location.
        location: String,
        /// Underlying parse error.
        #[source]
        error: serde_json::Error,
    },
}

impl IndexLoadError {
    /// Location the index was loaded from.
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            Self::Fetch { location, .. } | Self::Parse { location, .. } => location,
        }
    }

    /// Human-readable failure reason without the location.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Fetch { error, .. } => error.to_string(),
            Self::Parse { error, .. } => error.to_string(),
        }
    }
}

/// Outcome of looking up a key for a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// The key exists and is translated; carries the document path.
    Found(&'a str),
    /// The key exists but has no path for the language.
    MissingTranslation,
    /// The topic or category does not exist.
    UnknownKey,
}

/// Owns the loaded index and its derived language set.
#[derive(Debug, Default)]
pub struct IndexStore {
    index: Index,
    languages: Vec<String>,
}

impl IndexStore {
    /// Store with no topics and no languages.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap an already parsed index.
    #[must_use]
    pub fn from_index(index: Index) -> Self {
        let mut languages: Vec<String> = Vec::new();
        for category in index.topics.iter().flat_map(|t| &t.categories) {
            for lang in category.translations.languages() {
                if !languages.iter().any(|l| l == lang) {
                    languages.push(lang.to_owned());
                }
            }
        }
        Self { index, languages }
    }

    /// Parse index JSON.
    ///
    /// # Errors
    ///
    /// Returns [`IndexLoadError::Parse`] if `json` is not an index document.
    pub fn parse(json: &str, location: &str) -> Result<Self, IndexLoadError> {
        let index = serde_json::from_str(json).map_err(|error| IndexLoadError::Parse {
            location: location.to_owned(),
            error,
        })?;
        Ok(Self::from_index(index))
    }

    /// Fetch and parse the index at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexLoadError`] if fetching or parsing fails.
    pub fn load(fetcher: &dyn Fetcher, location: &str) -> Result<Self, IndexLoadError> {
        let json = fetcher
            .fetch(location)
            .map_err(|error| IndexLoadError::Fetch {
                location: location.to_owned(),
                error,
            })?;
        let store = Self::parse(&json, location)?;
        info!(
            location,
            topics = store.index.topics.len(),
            languages = store.languages.len(),
            "Loaded index"
        );
        Ok(store)
    }

    /// The loaded index.
    #[must_use]
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// All language codes, in order of first appearance.
    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Languages with at least one non-empty path, in language-set order.
    ///
    /// A language whose categories all have empty paths has nothing to
    /// navigate to and is left out.
    #[must_use]
    pub fn navigable_languages(&self) -> Vec<String> {
        self.languages
            .iter()
            .filter(|l| self.has_entries(l))
            .cloned()
            .collect()
    }

    /// Check whether at least one category has a non-empty path for `language`.
    #[must_use]
    pub fn has_entries(&self, language: &str) -> bool {
        self.index
            .topics
            .iter()
            .flat_map(|t| &t.categories)
            .any(|c| c.translations.get(language).is_some_and(|p| !p.is_empty()))
    }

    /// Per-language paths for a topic/category pair.
    #[must_use]
    pub fn resolve(&self, topic: &str, category: &str) -> Option<&Translations> {
        self.index
            .category(topic, category)
            .map(|c| &c.translations)
    }

    /// Decide whether `key` is displayable in `language`.
    #[must_use]
    pub fn lookup(&self, key: &NavigationKey, language: &str) -> Lookup<'_> {
        match self.resolve(key.topic(), key.category()) {
            None => Lookup::UnknownKey,
            Some(translations) => translations
                .get(language)
                .map_or(Lookup::MissingTranslation, Lookup::Found),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rn_source::{FetchErrorKind, MockFetcher};

    use super::*;

    const SAMPLE: &str = r#"{
        "Setup": {
            "Install": { "de": "install.de.md", "en": "install.en.md" },
            "Update": { "de": "update.de.md" }
        },
        "Betrieb": {
            "Backup": { "fr": "backup.fr.md", "de": "backup.de.md" }
        }
    }"#;

    fn store() -> IndexStore {
        IndexStore::parse(SAMPLE, "structure.json").unwrap()
    }

    #[test]
    fn test_preserves_declaration_order() {
        let store = store();
        let topics: Vec<&str> = store.index().topics().iter().map(|t| t.name.as_str()).collect();
        let setup: Vec<&str> = store.index().topics()[0]
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect();

        assert_eq!(topics, vec!["Setup", "Betrieb"]);
        assert_eq!(setup, vec!["Install", "Update"]);
    }

    #[test]
    fn test_languages_in_first_appearance_order() {
        assert_eq!(store().languages(), ["de", "en", "fr"]);
    }

    #[test]
    fn test_resolve() {
        let store = store();
        let install = store.resolve("Setup", "Install").unwrap();

        assert_eq!(install.get("en"), Some("install.en.md"));
        assert_eq!(install.get("fr"), None);
        assert!(store.resolve("Setup", "Missing").is_none());
        assert!(store.resolve("Missing", "Install").is_none());
    }

    #[test]
    fn test_lookup_outcomes() {
        let store = store();

        assert_eq!(
            store.lookup(&NavigationKey::new("Setup", "Install"), "en"),
            Lookup::Found("install.en.md")
        );
        assert_eq!(
            store.lookup(&NavigationKey::new("Setup", "Update"), "en"),
            Lookup::MissingTranslation
        );
        assert_eq!(
            store.lookup(&NavigationKey::new("Setup", "Nope"), "en"),
            Lookup::UnknownKey
        );
    }

    #[test]
    fn test_has_entries() {
        let store = store();

        assert!(store.has_entries("fr"));
        assert!(!store.has_entries("it"));
    }

    #[test]
    fn test_empty_path_does_not_count_as_entry() {
        let store = IndexStore::parse(r#"{"A":{"B":{"it":""}}}"#, "s.json").unwrap();

        assert_eq!(store.languages(), ["it"]);
        assert!(!store.has_entries("it"));
        assert!(store.navigable_languages().is_empty());
    }

    #[test]
    fn test_navigable_languages_skip_empty_paths() {
        let store = IndexStore::parse(
            r#"{"Setup":{"Install":{"de":"install.de.md","fr":"","en":"install.en.md"}}}"#,
            "structure.json",
        )
        .unwrap();

        assert_eq!(store.languages(), ["de", "fr", "en"]);
        assert_eq!(store.navigable_languages(), vec!["de", "en"]);
    }

    #[test]
    fn test_duplicate_keys_keep_first_position() {
        let store =
            IndexStore::parse(r#"{"A":{"x":{"de":"1"}},"B":{},"A":{"y":{"de":"2"}}}"#, "s.json")
                .unwrap();
        let topics: Vec<&str> = store.index().topics().iter().map(|t| t.name.as_str()).collect();

        assert_eq!(topics, vec!["A", "B"]);
        assert_eq!(store.resolve("A", "y").unwrap().get("de"), Some("2"));
    }

    #[test]
    fn test_parse_error() {
        let err = IndexStore::parse(r#"{"Setup": ["not", "an", "object"]}"#, "s.json").unwrap_err();

        assert!(matches!(err, IndexLoadError::Parse { .. }));
        assert_eq!(err.location(), "s.json");
    }

    #[test]
    fn test_non_string_path_is_parse_error() {
        let err = IndexStore::parse(r#"{"A":{"B":{"de":1}}}"#, "s.json").unwrap_err();

        assert!(matches!(err, IndexLoadError::Parse { .. }));
    }

    #[test]
    fn test_load_via_fetcher() {
        let fetcher = MockFetcher::new().with_body("structure.json", SAMPLE);

        let store = IndexStore::load(&fetcher, "structure.json").unwrap();

        assert_eq!(store.languages().len(), 3);
    }

    #[test]
    fn test_load_fetch_failure() {
        let fetcher = MockFetcher::new().with_unreachable("structure.json");

        let err = IndexStore::load(&fetcher, "structure.json").unwrap_err();

        match &err {
            IndexLoadError::Fetch { error, .. } => {
                assert_eq!(error.kind, FetchErrorKind::Unavailable);
            }
            IndexLoadError::Parse { .. } => panic!("expected fetch error"),
        }
        assert_eq!(err.location(), "structure.json");
        assert!(err.to_string().contains("structure.json"));
    }

    #[test]
    fn test_empty_store() {
        let store = IndexStore::empty();

        assert!(store.languages().is_empty());
        assert!(store.index().topics().is_empty());
        assert_eq!(
            store.lookup(&NavigationKey::new("Setup", "Install"), "de"),
            Lookup::UnknownKey
        );
    }
}
