//! Filesystem fetcher implementation.
//!
//! Provides [`FsFetcher`] for sites checked out into a local directory.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::fetch::{FetchError, FetchErrorKind, Fetcher};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Fetcher reading from a root directory.
///
/// Locations are relative to the root. Absolute paths and `..` segments that
/// would climb out of the root are rejected.
///
/// # Example
///
/// ```ignore
/// use rn_source::{Fetcher, FsFetcher};
///
/// let fetcher = FsFetcher::new("site");
/// let markdown = fetcher.fetch("install.de.md")?;
/// ```
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    /// Create a fetcher rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory locations resolve against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a location to a path below the root.
    fn resolve(&self, location: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(location.split(['?', '#']).next().unwrap_or_default());
        let mut resolved = self.root.clone();
        let mut depth = 0_usize;

        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    resolved.push(part);
                    depth += 1;
                }
                Component::CurDir => {}
                Component::ParentDir if depth > 0 => {
                    resolved.pop();
                    depth -= 1;
                }
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(FetchError::new(FetchErrorKind::InvalidLocation)
                        .with_backend(BACKEND)
                        .with_location(location));
                }
            }
        }

        if depth == 0 {
            return Err(FetchError::new(FetchErrorKind::InvalidLocation)
                .with_backend(BACKEND)
                .with_location(location));
        }

        Ok(resolved)
    }
}

impl Fetcher for FsFetcher {
    fn fetch(&self, location: &str) -> Result<String, FetchError> {
        let path = self.resolve(location)?;
        debug!(path = %path.display(), "Reading");

        fs::read_to_string(&path).map_err(|e| {
            FetchError::io(e)
                .with_backend(BACKEND)
                .with_location(location)
        })
    }
}
