//! URL ↔ view state mapping.
//!
//! The [`Router`] owns the authoritative [`UiState`] (selected language and
//! selected document key) and is the only place URLs are built. Transitions
//! report which history operation the caller must perform:
//!
//! | Event              | History   |
//! |--------------------|-----------|
//! | initial load       | replace   |
//! | language selected  | push      |
//! | TOC entry selected | push      |
//! | hash changed       | none      |
//! | popstate           | none      |

use rn_config::{FallbackPolicy, LanguageConfig};
use tracing::debug;
use url::Url;

use crate::key::NavigationKey;
use crate::status::Status;

/// Query parameter carrying the language.
pub const LANG_PARAM: &str = "lang";

/// Selected language and document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    /// Selected language; a member of the language set once resolved.
    pub language: String,
    /// Selected document, `None` when nothing is shown.
    pub key: Option<NavigationKey>,
}

/// Raw navigation state read from a URL, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlState {
    /// Non-empty `lang` query parameter.
    pub language: Option<String>,
    /// Key decoded from the fragment.
    pub key: Option<NavigationKey>,
}

impl UrlState {
    /// Read language and key from `url`.
    #[must_use]
    pub fn parse(url: &Url) -> Self {
        let language = url
            .query_pairs()
            .find(|(name, _)| name == LANG_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty());
        let key = url.fragment().and_then(NavigationKey::from_fragment);
        Self { language, key }
    }
}

/// Build the URL for `(language, key)` on top of the hosting page URL.
///
/// Other query parameters of `page` are preserved; `lang` is always set and
/// the fragment is removed when `key` is `None`.
#[must_use]
pub fn canonical_url(page: &Url, language: &str, key: Option<&NavigationKey>) -> Url {
    let mut url = page.clone();
    let others: Vec<(String, String)> = page
        .query_pairs()
        .filter(|(name, _)| name != LANG_PARAM)
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(others)
        .append_pair(LANG_PARAM, language);
    url.set_fragment(key.map(NavigationKey::to_fragment).as_deref());
    url
}

/// History operation requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryAction {
    /// Add a new entry.
    Push(Url),
    /// Overwrite the current entry.
    Replace(Url),
    /// Leave history alone.
    None,
}

/// Outcome of a router transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// History operation to perform.
    pub history: HistoryAction,
    /// The language differs from the state before the transition.
    pub language_changed: bool,
    /// The key differs from the state before the transition.
    pub key_changed: bool,
    /// Notice raised while resolving the state.
    pub notice: Option<Status>,
}

/// Error rejecting a transition.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// The language is not part of the language set.
    #[error("language \"{0}\" is not available")]
    UnknownLanguage(String),
}

/// Navigation state machine.
#[derive(Debug)]
pub struct Router {
    page: Url,
    languages: Vec<String>,
    policy: LanguageConfig,
    state: UiState,
}

impl Router {
    /// Create a router for the hosting page `page` and the given language set.
    ///
    /// The state starts at the fallback language with no key selected.
    #[must_use]
    pub fn new(page: Url, languages: Vec<String>, policy: LanguageConfig) -> Self {
        let mut router = Self {
            page,
            languages,
            policy,
            state: UiState {
                language: String::new(),
                key: None,
            },
        };
        router.state.language = router.fallback_language();
        router
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Language set the router validates against.
    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Canonical URL of the current state.
    #[must_use]
    pub fn canonical_url(&self) -> Url {
        canonical_url(&self.page, &self.state.language, self.state.key.as_ref())
    }

    /// Language used when nothing better is known.
    #[must_use]
    pub fn fallback_language(&self) -> String {
        let first = self.languages.first();
        let preferred = match self.policy.fallback {
            FallbackPolicy::Default if self.contains(&self.policy.default) => {
                Some(&self.policy.default)
            }
            FallbackPolicy::Default | FallbackPolicy::First => first,
        };
        preferred.unwrap_or(&self.policy.default).clone()
    }

    /// Pick the language from the URL, then the stored preference, then the fallback.
    ///
    /// A URL language outside the language set yields a
    /// [`Status::LanguageUnavailable`] notice. An unusable stored preference
    /// is dropped silently.
    #[must_use]
    pub fn resolve_language(
        &self,
        requested: Option<&str>,
        stored: Option<&str>,
    ) -> (String, Option<Status>) {
        if let Some(requested) = requested {
            if self.contains(requested) {
                return (requested.to_owned(), None);
            }
            let fallback = self.fallback_language();
            let notice = Status::LanguageUnavailable {
                requested: requested.to_owned(),
                fallback: fallback.clone(),
            };
            return (fallback, Some(notice));
        }

        match stored {
            Some(stored) if self.contains(stored) => (stored.to_owned(), None),
            Some(stored) => {
                debug!(stored, "Ignoring stored language outside the language set");
                (self.fallback_language(), None)
            }
            None => (self.fallback_language(), None),
        }
    }

    /// Initial page load at `url`.
    ///
    /// The resulting URL replaces the current history entry.
    pub fn initial(&mut self, url: &Url, stored: Option<&str>) -> Transition {
        let mut transition = self.restore(url, stored);
        transition.history = HistoryAction::Replace(self.canonical_url());
        transition
    }

    /// Browser back/forward landed on `url`.
    ///
    /// The browser already moved, so history is left alone.
    pub fn pop_state(&mut self, url: &Url, stored: Option<&str>) -> Transition {
        self.restore(url, stored)
    }

    /// User picked `language` in the selector.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::UnknownLanguage`] if `language` is not in the language set.
    pub fn select_language(&mut self, language: &str) -> Result<Transition, RouterError> {
        if !self.contains(language) {
            return Err(RouterError::UnknownLanguage(language.to_owned()));
        }

        let language_changed = self.state.language != language;
        if language_changed {
            language.clone_into(&mut self.state.language);
        }
        debug!(language, language_changed, "Language selected");

        Ok(Transition {
            history: if language_changed {
                HistoryAction::Push(self.canonical_url())
            } else {
                HistoryAction::None
            },
            language_changed,
            key_changed: false,
            notice: None,
        })
    }

    /// User clicked the TOC entry for `key`.
    ///
    /// Pushes the URL carrying the new fragment; the caller then runs the
    /// hash-change handling for that URL.
    pub fn select_entry(&mut self, key: NavigationKey) -> Transition {
        let key_changed = self.state.key.as_ref() != Some(&key);
        self.state.key = Some(key);

        Transition {
            history: if key_changed {
                HistoryAction::Push(self.canonical_url())
            } else {
                HistoryAction::None
            },
            language_changed: false,
            key_changed,
            notice: None,
        }
    }

    /// The fragment of the current location changed to that of `url`.
    pub fn hash_changed(&mut self, url: &Url) -> Transition {
        let key = url.fragment().and_then(NavigationKey::from_fragment);
        let key_changed = self.state.key != key;
        debug!(key = ?key, key_changed, "Hash changed");
        self.state.key = key;

        Transition {
            history: HistoryAction::None,
            language_changed: false,
            key_changed,
            notice: None,
        }
    }

    /// Re-derive the whole state from `url`.
    fn restore(&mut self, url: &Url, stored: Option<&str>) -> Transition {
        let parsed = UrlState::parse(url);
        let (language, notice) = self.resolve_language(parsed.language.as_deref(), stored);

        let language_changed = self.state.language != language;
        let key_changed = self.state.key != parsed.key;
        self.state = UiState {
            language,
            key: parsed.key,
        };
        debug!(state = ?self.state, "State restored from URL");

        Transition {
            history: HistoryAction::None,
            language_changed,
            key_changed,
            notice,
        }
    }

    fn contains(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn page() -> Url {
        Url::parse("https://docs.example.com/manual/index.html").unwrap()
    }

    fn router(languages: &[&str]) -> Router {
        Router::new(
            page(),
            languages.iter().map(|l| (*l).to_owned()).collect(),
            LanguageConfig::default(),
        )
    }

    fn at(url: &str) -> Url {
        page().join(url).unwrap()
    }

    #[test]
    fn test_parse_url_state() {
        let state = UrlState::parse(&at("?lang=en#Setup%2FInstall"));

        assert_eq!(state.language.as_deref(), Some("en"));
        assert_eq!(state.key, Some(NavigationKey::new("Setup", "Install")));
    }

    #[test]
    fn test_parse_url_state_empty() {
        let state = UrlState::parse(&at("?lang=#"));

        assert_eq!(state.language, None);
        assert_eq!(state.key, None);
    }

    #[test]
    fn test_canonical_url() {
        let key = NavigationKey::new("Setup", "Install");
        let url = canonical_url(&page(), "en", Some(&key));

        assert_eq!(
            url.as_str(),
            "https://docs.example.com/manual/index.html?lang=en#Setup%2FInstall"
        );
    }

    #[test]
    fn test_canonical_url_without_key_drops_fragment() {
        let url = canonical_url(&at("?lang=de#Setup%2FInstall"), "en", None);

        assert_eq!(url.as_str(), "https://docs.example.com/manual/index.html?lang=en");
    }

    #[test]
    fn test_canonical_url_keeps_other_params() {
        let url = canonical_url(&at("?theme=dark&lang=de"), "en", None);

        assert_eq!(
            url.as_str(),
            "https://docs.example.com/manual/index.html?theme=dark&lang=en"
        );
    }

    #[test]
    fn test_canonical_url_round_trip() {
        let keys = [
            None,
            Some(NavigationKey::new("Setup", "Install")),
            Some(NavigationKey::new("CI/CD", "Linux runner")),
            Some(NavigationKey::new("Einführung", "Überblick & Ziele")),
        ];
        for key in keys {
            for language in ["de", "en-US", "zh Hant"] {
                let url = canonical_url(&page(), language, key.as_ref());
                let parsed = UrlState::parse(&url);

                assert_eq!(parsed.language.as_deref(), Some(language));
                assert_eq!(parsed.key, key);
            }
        }
    }

    #[test]
    fn test_restoring_canonical_url_reproduces_state() {
        let mut source = router(&["de", "en"]);
        source.initial(&at("?lang=en#Setup%2FInstall"), None);
        let url = source.canonical_url();

        let mut target = router(&["de", "en"]);
        target.initial(&url, Some("de"));

        assert_eq!(target.state(), source.state());
    }

    #[test]
    fn test_fallback_prefers_default_when_available() {
        assert_eq!(router(&["en", "de"]).fallback_language(), "de");
    }

    #[test]
    fn test_fallback_uses_first_when_default_missing() {
        assert_eq!(router(&["en", "fr"]).fallback_language(), "en");
    }

    #[test]
    fn test_fallback_first_policy() {
        let router = Router::new(
            page(),
            vec!["en".to_owned(), "de".to_owned()],
            LanguageConfig {
                default: "de".to_owned(),
                fallback: FallbackPolicy::First,
            },
        );

        assert_eq!(router.fallback_language(), "en");
    }

    #[test]
    fn test_fallback_with_empty_language_set() {
        assert_eq!(router(&[]).fallback_language(), "de");
    }

    #[test]
    fn test_resolve_language_order() {
        let router = router(&["de", "en", "fr"]);

        assert_eq!(router.resolve_language(Some("fr"), Some("en")).0, "fr");
        assert_eq!(router.resolve_language(None, Some("en")).0, "en");
        assert_eq!(router.resolve_language(None, Some("it")).0, "de");
        assert_eq!(router.resolve_language(None, None).0, "de");
    }

    #[test]
    fn test_resolve_unknown_url_language_raises_notice() {
        let router = router(&["de", "en"]);

        let (language, notice) = router.resolve_language(Some("fr"), Some("en"));

        assert_eq!(language, "de");
        assert_eq!(
            notice,
            Some(Status::LanguageUnavailable {
                requested: "fr".to_owned(),
                fallback: "de".to_owned(),
            })
        );
    }

    #[test]
    fn test_initial_replaces_with_canonical_url() {
        let mut router = router(&["de", "en"]);

        let transition = router.initial(&at("?lang=fr#Setup%2FInstall"), None);

        assert_eq!(
            transition.history,
            HistoryAction::Replace(at("?lang=de#Setup%2FInstall"))
        );
        assert!(transition.notice.is_some());
        assert_eq!(
            router.state(),
            &UiState {
                language: "de".to_owned(),
                key: Some(NavigationKey::new("Setup", "Install")),
            }
        );
    }

    #[test]
    fn test_select_language_pushes_and_keeps_hash() {
        let mut router = router(&["de", "en"]);
        router.initial(&at("#Setup%2FInstall"), None);

        let transition = router.select_language("en").unwrap();

        assert_eq!(
            transition.history,
            HistoryAction::Push(at("?lang=en#Setup%2FInstall"))
        );
        assert!(transition.language_changed);
        assert_eq!(router.state().key, Some(NavigationKey::new("Setup", "Install")));
    }

    #[test]
    fn test_select_same_language_is_noop() {
        let mut router = router(&["de", "en"]);

        let transition = router.select_language("de").unwrap();

        assert_eq!(transition.history, HistoryAction::None);
        assert!(!transition.language_changed);
    }

    #[test]
    fn test_select_unknown_language_rejected() {
        let mut router = router(&["de", "en"]);

        let err = router.select_language("fr").unwrap_err();

        assert!(matches!(err, RouterError::UnknownLanguage(ref l) if l == "fr"));
        assert_eq!(router.state().language, "de");
    }

    #[test]
    fn test_select_entry_pushes_fragment() {
        let mut router = router(&["de", "en"]);
        router.select_language("en").unwrap();

        let transition = router.select_entry(NavigationKey::new("Setup", "Install"));

        assert_eq!(
            transition.history,
            HistoryAction::Push(at("?lang=en#Setup%2FInstall"))
        );
        assert!(transition.key_changed);
    }

    #[test]
    fn test_hash_changed_clears_key() {
        let mut router = router(&["de"]);
        router.initial(&at("#Setup%2FInstall"), None);

        let transition = router.hash_changed(&at("?lang=de"));

        assert!(transition.key_changed);
        assert_eq!(transition.history, HistoryAction::None);
        assert_eq!(router.state().key, None);
    }

    #[test]
    fn test_pop_state_leaves_history() {
        let mut router = router(&["de", "en"]);
        router.initial(&at("?lang=de"), None);

        let transition = router.pop_state(&at("?lang=en#FAQ%2FGeneral"), None);

        assert_eq!(transition.history, HistoryAction::None);
        assert!(transition.language_changed);
        assert!(transition.key_changed);
        assert_eq!(router.state().language, "en");
    }
}
