//! Fetch and preference capabilities for the rn manual viewer.
//!
//! The viewer never touches the network, the filesystem or durable storage
//! directly. Instead it is handed implementations of the traits in this
//! crate, which keeps navigation logic testable with in-memory fakes.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Fetcher`] trait with a single `fetch()` method returning text
//! - [`HttpFetcher`] for `http(s)://` sites, built on `ureq`
//! - [`FsFetcher`] for sites served from a local directory
//! - [`SiteFetcher`] sending absolute URLs to HTTP and the rest to the base
//! - [`MockFetcher`] for testing (behind `mock` feature flag)
//! - [`Preferences`] trait for the remembered language, with
//!   [`FilePreferences`] and [`MemoryPreferences`]
//!
//! # Example
//!
//! ```ignore
//! use rn_source::{Fetcher, FsFetcher};
//!
//! let fetcher = FsFetcher::new("site");
//! let index = fetcher.fetch("structure.json")?;
//! ```

mod fetch;
mod fs;
mod http;
#[cfg(feature = "mock")]
mod mock;
mod preferences;
mod site;

pub use fetch::{FetchError, FetchErrorKind, Fetcher};
pub use fs::FsFetcher;
pub use http::HttpFetcher;
#[cfg(feature = "mock")]
pub use mock::MockFetcher;
pub use preferences::{FilePreferences, MemoryPreferences, PreferenceError, Preferences};
pub use site::{SiteFetcher, is_remote};
