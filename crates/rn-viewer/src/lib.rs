//! Multilingual Markdown manual viewer.
//!
//! The viewer shows a language selector, a table of contents and one Markdown
//! document at a time. Navigation state lives in the URL: the `lang` query
//! parameter selects the language and the fragment holds the
//! percent-encoded `topic/category` key, so every view is bookmarkable and
//! works with back/forward.
//!
//! # Architecture
//!
//! - [`IndexStore`] holds the topic → category → language → path index.
//! - [`build_toc`] derives the visible entries for a language.
//! - [`DocumentLoader`] fetches and renders documents.
//! - [`Router`] maps URLs to [`UiState`] and decides history operations.
//! - [`Controller`] runs events through the router and keeps the [`View`].
//! - [`PageTemplate`] renders a [`View`] to a full HTML page.
//!
//! Fetching, preference storage and Markdown conversion are injected, see
//! [`rn_source::Fetcher`], [`rn_source::Preferences`] and
//! [`rn_markdown::MarkdownRenderer`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let (store, notice) = load_index(fetcher.as_ref(), "structure.json");
//! let loader = DocumentLoader::new(fetcher, Arc::new(HtmlRenderer::new()));
//! let mut controller = Controller::new(store, loader, history, preferences, language)
//!     .with_index_notice(notice);
//! controller.handle(Event::Ready);
//! ```

mod controller;
mod history;
mod index;
mod key;
mod loader;
mod page;
mod router;
mod status;
mod toc;

pub use controller::{ContentArea, Controller, Event, LoadRequest, View, load_index};
pub use history::{History, SessionHistory};
pub use index::{Category, Index, IndexLoadError, IndexStore, Lookup, Topic, Translations};
pub use key::NavigationKey;
pub use loader::{DocumentContent, DocumentLoader, FailureKind};
pub use page::PageTemplate;
pub use router::{
    HistoryAction, LANG_PARAM, Router, RouterError, Transition, UiState, UrlState, canonical_url,
};
pub use status::{Status, StatusKind};
pub use toc::{TocItem, TocSection, VisibleEntry, build_toc, selected_path, visible_entries};
