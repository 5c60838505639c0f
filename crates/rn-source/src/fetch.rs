//! Fetcher trait and error types.
//!
//! Provides the core [`Fetcher`] trait for retrieving index and document text,
//! along with [`FetchError`] for unified error handling across backends.
//!
//! # Location Convention
//!
//! Locations are taken verbatim from the index or configuration:
//! - `"structure.json"` - relative to the fetcher's base
//! - `"guides/install.de.md"` - nested relative path
//! - `"https://example.com/install.md"` - absolute URL (HTTP backend only)

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum FetchErrorKind {
    /// The backend answered that the resource does not exist (HTTP 404, missing file).
    NotFound,
    /// The backend answered with another non-success status.
    Status,
    /// Access was refused (HTTP 401/403, file permissions).
    PermissionDenied,
    /// The location cannot be turned into a request.
    InvalidLocation,
    /// The request timed out.
    Timeout,
    /// The backend could not be reached at all.
    Unavailable,
    /// Other/unknown error category.
    Other,
}

/// Fetch error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct FetchError {
    /// Semantic error category.
    pub kind: FetchErrorKind,
    /// HTTP status code when the backend produced a response.
    pub status: Option<u16>,
    /// Location the request was issued for.
    pub location: Option<String>,
    /// Backend identifier (e.g., "Http", "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl FetchError {
    /// Create a new fetch error.
    #[must_use]
    pub fn new(kind: FetchErrorKind) -> Self {
        Self {
            kind,
            status: None,
            location: None,
            backend: None,
            source: None,
        }
    }

    /// Create an error for a non-success HTTP status.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        let kind = match status {
            404 | 410 => FetchErrorKind::NotFound,
            401 | 403 => FetchErrorKind::PermissionDenied,
            _ => FetchErrorKind::Status,
        };
        let mut error = Self::new(kind);
        error.status = Some(status);
        error
    }

    /// Create a not found error for a location.
    #[must_use]
    pub fn not_found(location: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::NotFound).with_location(location)
    }

    /// Create a fetch error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => FetchErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => FetchErrorKind::PermissionDenied,
            std::io::ErrorKind::TimedOut => FetchErrorKind::Timeout,
            _ => FetchErrorKind::Other,
        };
        Self::new(kind).with_source(err)
    }

    /// Attach location context.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// True when the backend was reached and refused the request.
    ///
    /// False means the request never produced an answer (unreachable host,
    /// timeout, malformed location).
    #[must_use]
    pub fn is_response(&self) -> bool {
        matches!(
            self.kind,
            FetchErrorKind::NotFound | FetchErrorKind::Status | FetchErrorKind::PermissionDenied
        )
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind (HTTP 404): message (location: foo.md)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            FetchErrorKind::NotFound => "Not found",
            FetchErrorKind::Status => "Unexpected status",
            FetchErrorKind::PermissionDenied => "Permission denied",
            FetchErrorKind::InvalidLocation => "Invalid location",
            FetchErrorKind::Timeout => "Timeout",
            FetchErrorKind::Unavailable => "Unavailable",
            FetchErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(status) = self.status {
            write!(f, " (HTTP {status})")?;
        }

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(location) = &self.location {
            write!(f, " (location: {location})")?;
        }

        Ok(())
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Text retrieval for index and document locations.
///
/// Implementations resolve relative locations against their own base
/// (a directory or a URL) and return the body as UTF-8 text.
pub trait Fetcher: Send + Sync {
    /// Fetch the text behind a location.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the location cannot be resolved, the backend
    /// answers with a non-success status, or the request fails outright.
    fn fetch(&self, location: &str) -> Result<String, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_not_found() {
        let err = FetchError::from_status(404);

        assert_eq!(err.kind, FetchErrorKind::NotFound);
        assert_eq!(err.status, Some(404));
        assert!(err.is_response());
    }

    #[test]
    fn test_from_status_forbidden() {
        let err = FetchError::from_status(403);

        assert_eq!(err.kind, FetchErrorKind::PermissionDenied);
        assert!(err.is_response());
    }

    #[test]
    fn test_from_status_server_error() {
        let err = FetchError::from_status(502);

        assert_eq!(err.kind, FetchErrorKind::Status);
        assert!(err.is_response());
    }

    #[test]
    fn test_unavailable_is_not_response() {
        let err = FetchError::new(FetchErrorKind::Unavailable);

        assert!(!err.is_response());
    }

    #[test]
    fn test_io_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = FetchError::io(io_err);

        assert_eq!(err.kind, FetchErrorKind::NotFound);
        assert!(err.downcast_source::<std::io::Error>().is_some());
    }

    #[test]
    fn test_io_timeout() {
        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let err = FetchError::io(io_err);

        assert_eq!(err.kind, FetchErrorKind::Timeout);
        assert!(!err.is_response());
    }

    #[test]
    fn test_display_simple() {
        let err = FetchError::new(FetchErrorKind::Unavailable);

        assert_eq!(err.to_string(), "Unavailable");
    }

    #[test]
    fn test_display_full() {
        let err = FetchError::from_status(404)
            .with_backend("Http")
            .with_location("install.en.md");

        assert_eq!(
            err.to_string(),
            "[Http] Not found (HTTP 404) (location: install.en.md)"
        );
    }

    #[test]
    fn test_fetch_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FetchError>();
    }
}
