//! Event handling for the viewer.
//!
//! [`Controller`] wires user actions and browser navigation to [`Router`]
//! transitions, performs the history operations they request and keeps the
//! [`View`] in sync. Document loads are split into [`Controller::dispatch`],
//! which issues a [`LoadRequest`], and [`Controller::settle`], which applies
//! the result. Only the latest request is ever applied; anything that arrives
//! for an older generation is dropped.

use std::sync::Arc;

use rn_config::LanguageConfig;
use rn_source::{Fetcher, Preferences};
use tracing::{debug, warn};
use url::Url;

use crate::history::History;
use crate::index::{IndexStore, Lookup};
use crate::key::NavigationKey;
use crate::loader::{DocumentContent, DocumentLoader};
use crate::router::{HistoryAction, Router, Transition, UiState};
use crate::status::Status;
use crate::toc::{TocSection, build_toc};

/// Load the index, falling back to an empty store.
///
/// The returned status is shown for as long as the viewer runs.
pub fn load_index(fetcher: &dyn Fetcher, location: &str) -> (IndexStore, Option<Status>) {
    match IndexStore::load(fetcher, location) {
        Ok(store) => (store, None),
        Err(err) => {
            warn!(location, error = %err, "Index unavailable, starting empty");
            (IndexStore::empty(), Some(Status::from(&err)))
        }
    }
}

/// Input to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The page finished loading at the current history entry.
    Ready,
    /// The user picked a language in the selector.
    LanguageSelected(String),
    /// The user clicked a TOC entry.
    EntrySelected(NavigationKey),
    /// The location fragment changed; the URL is the new location.
    HashChanged(Url),
    /// History traversal landed on the current history entry.
    PopState,
}

/// Content area of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentArea {
    /// No document selected.
    Placeholder,
    /// A document is being fetched.
    Loading {
        /// Key being loaded.
        key: NavigationKey,
    },
    /// A rendered document.
    Document {
        /// Key of the document.
        key: NavigationKey,
        /// Language the document was loaded in.
        language: String,
        /// Rendered HTML.
        html: String,
    },
    /// The selected document cannot be shown; see the notices.
    Unavailable,
}

/// Everything the page displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Selector options.
    pub languages: Vec<String>,
    /// Selected option.
    pub selected_language: String,
    /// Table of contents for the selected language.
    pub toc: Vec<TocSection>,
    /// Content area.
    pub content: ContentArea,
    /// Status region.
    pub notices: Vec<Status>,
}

/// A document load issued by [`Controller::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Monotonic request number.
    pub generation: u64,
    /// Key the load was issued for.
    pub key: NavigationKey,
    /// Language the load was issued for.
    pub language: String,
    /// Document path from the index.
    pub path: String,
}

/// The viewer's event loop state.
pub struct Controller {
    store: IndexStore,
    index_notice: Option<Status>,
    router: Router,
    history: Box<dyn History>,
    preferences: Arc<dyn Preferences>,
    loader: DocumentLoader,
    generation: u64,
    pending: Option<LoadRequest>,
    view: View,
}

impl Controller {
    /// Create a controller for the page at the current history entry.
    ///
    /// Nothing is displayed until [`Event::Ready`] is handled.
    #[must_use]
    pub fn new(
        store: IndexStore,
        loader: DocumentLoader,
        history: Box<dyn History>,
        preferences: Arc<dyn Preferences>,
        language: LanguageConfig,
    ) -> Self {
        let languages = store.navigable_languages();
        let router = Router::new(history.current().clone(), languages.clone(), language);
        let view = View {
            languages,
            selected_language: router.state().language.clone(),
            toc: build_toc(store.index(), &router.state().language),
            content: ContentArea::Placeholder,
            notices: Vec::new(),
        };
        Self {
            store,
            index_notice: None,
            router,
            history,
            preferences,
            loader,
            generation: 0,
            pending: None,
            view,
        }
    }

    /// Keep `notice` in the status region for the lifetime of the viewer.
    #[must_use]
    pub fn with_index_notice(mut self, notice: Option<Status>) -> Self {
        self.view.notices.extend(notice.iter().cloned());
        self.index_notice = notice;
        self
    }

    /// What the page currently shows.
    #[must_use]
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Current navigation state.
    #[must_use]
    pub fn state(&self) -> &UiState {
        self.router.state()
    }

    /// The loaded index.
    #[must_use]
    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    /// URL of the current history entry.
    #[must_use]
    pub fn current_url(&self) -> &Url {
        self.history.current()
    }

    /// Number of history entries.
    #[must_use]
    pub fn history_length(&self) -> usize {
        self.history.length()
    }

    /// Load pending, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&LoadRequest> {
        self.pending.as_ref()
    }

    /// Handle `event` and complete its document load synchronously.
    pub fn handle(&mut self, event: Event) {
        if let Some(request) = self.dispatch(event) {
            let content = self.load(&request);
            self.settle(&request, content);
        }
    }

    /// Fetch and render the document for `request`.
    #[must_use]
    pub fn load(&self, request: &LoadRequest) -> DocumentContent {
        self.loader.load(Some(&request.path))
    }

    /// Go back one history entry and handle the resulting popstate.
    ///
    /// Returns `false` at the start of history.
    pub fn back(&mut self) -> bool {
        if self.history.back().is_none() {
            return false;
        }
        self.handle(Event::PopState);
        true
    }

    /// Go forward one history entry and handle the resulting popstate.
    ///
    /// Returns `false` at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.history.forward().is_none() {
            return false;
        }
        self.handle(Event::PopState);
        true
    }

    /// Apply `event` to the state and view.
    ///
    /// Returns the document load the caller must perform and pass to
    /// [`Controller::settle`], if any.
    pub fn dispatch(&mut self, event: Event) -> Option<LoadRequest> {
        debug!(event = ?event, "Dispatching");
        self.view.notices = self.index_notice.iter().cloned().collect();

        match event {
            Event::Ready => {
                let stored = self.preferences.language();
                let url = self.history.current().clone();
                let transition = self.router.initial(&url, stored.as_deref());
                self.apply(transition);
                self.refresh_toc();
                self.sync_document()
            }
            Event::PopState => {
                let stored = self.preferences.language();
                let url = self.history.current().clone();
                let transition = self.router.pop_state(&url, stored.as_deref());
                self.apply(transition);
                self.refresh_toc();
                self.sync_document()
            }
            Event::LanguageSelected(language) => self.select_language(&language),
            Event::EntrySelected(key) => self.select_entry(key),
            Event::HashChanged(url) => self.hash_changed(&url),
        }
    }

    /// Apply the result of `request`.
    ///
    /// Returns `false` if the result is stale and was dropped.
    pub fn settle(&mut self, request: &LoadRequest, content: DocumentContent) -> bool {
        let latest = self.pending.as_ref().map(|p| p.generation);
        let state = self.router.state();
        if latest != Some(request.generation)
            || state.key.as_ref() != Some(&request.key)
            || state.language != request.language
        {
            debug!(
                generation = request.generation,
                latest = ?latest,
                key = %request.key,
                "Dropping stale document load"
            );
            return false;
        }

        self.pending = None;
        self.view.content = match content {
            DocumentContent::Success { html } => ContentArea::Document {
                key: request.key.clone(),
                language: request.language.clone(),
                html,
            },
            DocumentContent::Failure { kind, message } => {
                self.view
                    .notices
                    .push(Status::from_failure(&request.key, kind, message));
                ContentArea::Unavailable
            }
        };
        true
    }

    fn select_language(&mut self, language: &str) -> Option<LoadRequest> {
        let transition = match self.router.select_language(language) {
            Ok(transition) => transition,
            Err(err) => {
                warn!(error = %err, "Language change rejected");
                self.view.notices.push(Status::UnsupportedLanguage {
                    language: language.to_owned(),
                });
                return None;
            }
        };

        if let Err(err) = self.preferences.set_language(language) {
            warn!(language, error = %err, "Could not persist language preference");
        }
        if !transition.language_changed {
            return None;
        }

        self.apply(transition);
        self.refresh_toc();
        self.sync_document()
    }

    fn select_entry(&mut self, key: NavigationKey) -> Option<LoadRequest> {
        let language = &self.router.state().language;
        if let Some(status) = self.lookup_failure(&key, language) {
            warn!(key = %key, "Selected entry is not visible");
            self.view.notices.push(status);
            return None;
        }

        let transition = self.router.select_entry(key);
        self.apply(transition);
        let url = self.history.current().clone();
        self.hash_changed(&url)
    }

    fn hash_changed(&mut self, url: &Url) -> Option<LoadRequest> {
        let transition = self.router.hash_changed(url);
        self.apply(transition);

        let canonical = self.router.canonical_url();
        if &canonical != self.history.current() {
            self.history.push(canonical);
        }
        self.sync_document()
    }

    /// Perform the history operation and surface the notice of `transition`.
    fn apply(&mut self, transition: Transition) {
        match transition.history {
            HistoryAction::Push(url) => self.history.push(url),
            HistoryAction::Replace(url) => self.history.replace(url),
            HistoryAction::None => {}
        }
        if let Some(notice) = transition.notice {
            warn!(notice = %notice, "Navigation notice");
            self.view.notices.push(notice);
        }
    }

    fn refresh_toc(&mut self) {
        let language = &self.router.state().language;
        self.view.selected_language.clone_from(language);
        self.view.toc = build_toc(self.store.index(), language);
    }

    /// Bring the content area in line with the router's key.
    ///
    /// Every call supersedes any pending load.
    fn sync_document(&mut self) -> Option<LoadRequest> {
        self.generation += 1;
        self.pending = None;

        let state = self.router.state();
        let Some(key) = state.key.clone() else {
            self.view.content = ContentArea::Placeholder;
            return None;
        };

        match self.store.lookup(&key, &state.language) {
            Lookup::Found(path) => {
                let request = LoadRequest {
                    generation: self.generation,
                    key: key.clone(),
                    language: state.language.clone(),
                    path: path.to_owned(),
                };
                debug!(generation = request.generation, path, "Issuing document load");
                self.view.content = ContentArea::Loading { key };
                self.pending = Some(request.clone());
                Some(request)
            }
            Lookup::MissingTranslation | Lookup::UnknownKey => {
                if let Some(status) = self.lookup_failure(&key, &state.language) {
                    self.view.notices.push(status);
                }
                self.view.content = ContentArea::Unavailable;
                None
            }
        }
    }

    fn lookup_failure(&self, key: &NavigationKey, language: &str) -> Option<Status> {
        match self.store.lookup(key, language) {
            Lookup::Found(_) => None,
            Lookup::MissingTranslation => Some(Status::MissingTranslation {
                key: key.clone(),
                language: language.to_owned(),
            }),
            Lookup::UnknownKey => Some(Status::UnknownKey { key: key.clone() }),
        }
    }
}
