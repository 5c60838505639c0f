//! Fetcher for a site mixing local and remote locations.

use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::fetch::{FetchError, Fetcher};

/// Routes absolute `http(s)://` locations to a remote fetcher and every
/// other location to the site's base fetcher.
///
/// Index paths are used verbatim, so a site served from a directory may
/// still point individual documents at a web host.
pub struct SiteFetcher {
    base: Arc<dyn Fetcher>,
    remote: Arc<dyn Fetcher>,
}

impl SiteFetcher {
    /// Combine the base fetcher with the fetcher used for absolute URLs.
    #[must_use]
    pub fn new(base: Arc<dyn Fetcher>, remote: Arc<dyn Fetcher>) -> Self {
        Self { base, remote }
    }
}

/// Check whether `location` is an absolute `http://` or `https://` URL.
#[must_use]
pub fn is_remote(location: &str) -> bool {
    Url::parse(location).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

impl Fetcher for SiteFetcher {
    fn fetch(&self, location: &str) -> Result<String, FetchError> {
        if is_remote(location) {
            debug!(location, "Fetching remote location");
            self.remote.fetch(location)
        } else {
            self.base.fetch(location)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::RwLock;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fs::FsFetcher;

    #[derive(Default)]
    struct RecordingFetcher {
        requests: RwLock<Vec<String>>,
    }

    impl Fetcher for RecordingFetcher {
        fn fetch(&self, location: &str) -> Result<String, FetchError> {
            self.requests.write().unwrap().push(location.to_owned());
            Ok(format!("remote {location}"))
        }
    }

    #[test]
    fn test_routes_by_location_kind() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("install.de.md"), "# Installation").unwrap();
        let remote = Arc::new(RecordingFetcher::default());
        let fetcher = SiteFetcher::new(
            Arc::new(FsFetcher::new(dir.path())),
            Arc::clone(&remote) as Arc<dyn Fetcher>,
        );

        assert_eq!(fetcher.fetch("install.de.md").unwrap(), "# Installation");
        assert_eq!(
            fetcher
                .fetch("https://raw.example.com/docs/install.en.md")
                .unwrap(),
            "remote https://raw.example.com/docs/install.en.md"
        );
        assert_eq!(
            *remote.requests.read().unwrap(),
            vec!["https://raw.example.com/docs/install.en.md".to_owned()]
        );
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://raw.example.com/a.md"));
        assert!(is_remote("http://localhost:8080/a.md"));
        assert!(!is_remote("guides/install.md"));
        assert!(!is_remote("file:///tmp/a.md"));
        assert!(!is_remote("C:/docs/a.md"));
    }
}
