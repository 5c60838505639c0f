//! HTTP fetcher implementation.
//!
//! Provides [`HttpFetcher`] for sites whose index and documents are served
//! over `http(s)://`, such as a raw file host or a static web server.

use std::time::Duration;

use tracing::debug;
use ureq::Agent;
use url::Url;

use crate::fetch::{FetchError, FetchErrorKind, Fetcher};

/// Backend identifier for error messages.
const BACKEND: &str = "Http";

/// Fetcher backed by a pooled `ureq` agent.
///
/// Relative locations are joined onto the base URL the way a browser
/// resolves links against the hosting page.
pub struct HttpFetcher {
    agent: Agent,
    base: Url,
}

impl HttpFetcher {
    /// Create a fetcher resolving relative locations against `base`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchErrorKind::InvalidLocation`] if `base` is not an absolute URL.
    pub fn new(base: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base = Url::parse(base).map_err(|e| {
            FetchError::new(FetchErrorKind::InvalidLocation)
                .with_backend(BACKEND)
                .with_location(base)
                .with_source(e)
        })?;

        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Ok(Self { agent, base })
    }

    /// Resolve a location against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`FetchErrorKind::InvalidLocation`] if the location cannot be joined.
    pub fn resolve(&self, location: &str) -> Result<Url, FetchError> {
        self.base.join(location).map_err(|e| {
            FetchError::new(FetchErrorKind::InvalidLocation)
                .with_backend(BACKEND)
                .with_location(location)
                .with_source(e)
        })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, location: &str) -> Result<String, FetchError> {
        let url = self.resolve(location)?;
        debug!(%url, "GET");

        let response = self.agent.get(url.as_str()).call().map_err(|e| {
            FetchError::new(classify(&e))
                .with_backend(BACKEND)
                .with_location(location)
                .with_source(e)
        })?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(FetchError::from_status(status)
                .with_backend(BACKEND)
                .with_location(location));
        }

        response.into_body().read_to_string().map_err(|e| {
            FetchError::new(classify(&e))
                .with_backend(BACKEND)
                .with_location(location)
                .with_source(e)
        })
    }
}

/// Map transport failures onto semantic kinds.
fn classify(err: &ureq::Error) -> FetchErrorKind {
    match err {
        ureq::Error::Timeout(_) => FetchErrorKind::Timeout,
        ureq::Error::HostNotFound | ureq::Error::ConnectionFailed | ureq::Error::Io(_) => {
            FetchErrorKind::Unavailable
        }
        ureq::Error::BadUri(_) => FetchErrorKind::InvalidLocation,
        _ => FetchErrorKind::Other,
    }
}
