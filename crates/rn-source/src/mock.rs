//! Mock fetcher implementation for testing.
//!
//! Provides [`MockFetcher`] for unit testing without network or filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::fetch::{FetchError, FetchErrorKind, Fetcher};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

#[derive(Debug, Clone)]
enum Response {
    Body(String),
    Status(u16),
    Unreachable,
}

/// Mock fetcher for testing.
///
/// Serves canned responses from memory and records every requested location.
/// Locations without a canned response answer with HTTP 404.
///
/// # Example
///
/// ```ignore
/// use rn_source::{Fetcher, MockFetcher};
///
/// let fetcher = MockFetcher::new()
///     .with_body("install.de.md", "# Installation")
///     .with_status("install.en.md", 500);
///
/// assert!(fetcher.fetch("install.de.md").is_ok());
/// assert_eq!(fetcher.requests(), vec!["install.de.md"]);
/// ```
#[derive(Debug, Default)]
pub struct MockFetcher {
    responses: RwLock<HashMap<String, Response>>,
    requests: RwLock<Vec<String>>,
}

impl MockFetcher {
    /// Create a new mock fetcher with no canned responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `location`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_body(self, location: impl Into<String>, body: impl Into<String>) -> Self {
        self.set(location, Response::Body(body.into()));
        self
    }

    /// Answer `location` with a non-success HTTP status.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_status(self, location: impl Into<String>, status: u16) -> Self {
        self.set(location, Response::Status(status));
        self
    }

    /// Fail `location` as if the host could not be reached.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_unreachable(self, location: impl Into<String>) -> Self {
        self.set(location, Response::Unreachable);
        self
    }

    /// Replace the response for `location` after construction.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_body(&self, location: impl Into<String>, body: impl Into<String>) {
        self.set(location, Response::Body(body.into()));
    }

    /// Locations requested so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.read().unwrap().clone()
    }

    fn set(&self, location: impl Into<String>, response: Response) {
        self.responses
            .write()
            .unwrap()
            .insert(location.into(), response);
    }
}

impl Fetcher for MockFetcher {
    fn fetch(&self, location: &str) -> Result<String, FetchError> {
        self.requests.write().unwrap().push(location.to_owned());

        let response = self.responses.read().unwrap().get(location).cloned();
        match response {
            Some(Response::Body(body)) => Ok(body),
            Some(Response::Status(status)) => Err(FetchError::from_status(status)
                .with_backend(BACKEND)
                .with_location(location)),
            Some(Response::Unreachable) => Err(FetchError::new(FetchErrorKind::Unavailable)
                .with_backend(BACKEND)
                .with_location(location)),
            None => Err(FetchError::from_status(404)
                .with_backend(BACKEND)
                .with_location(location)),
        }
    }
}
