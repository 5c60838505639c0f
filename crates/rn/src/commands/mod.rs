//! CLI command implementations.

pub(crate) mod browse;
pub(crate) mod render;
pub(crate) mod toc;

pub(crate) use browse::BrowseArgs;
pub(crate) use render::RenderArgs;
pub(crate) use toc::TocArgs;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use rn_config::{CliSettings, Config, is_http_url};
use rn_markdown::HtmlRenderer;
use rn_source::{FetchError, Fetcher, FilePreferences, FsFetcher, HttpFetcher, SiteFetcher};
use rn_viewer::{Controller, DocumentLoader, SessionHistory, load_index};
use url::Url;

use crate::error::CliError;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct ViewerArgs {
    /// Path to configuration file (default: auto-discover rn.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Index location, URL or path relative to the base (overrides config).
    #[arg(long)]
    index: Option<String>,

    /// Base URL or directory for document paths (overrides config).
    #[arg(long)]
    base: Option<String>,

    /// URL of the hosting page (overrides config).
    #[arg(long)]
    page_url: Option<String>,

    /// Default language (overrides config).
    #[arg(long)]
    default_language: Option<String>,

    /// Language preference file (overrides config).
    #[arg(long)]
    preferences: Option<PathBuf>,

    /// Enable verbose output (show load and navigation logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ViewerArgs {
    /// Load configuration with command line overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            index: self.index.clone(),
            base: self.base.clone(),
            page_url: self.page_url.clone(),
            default_language: self.default_language.clone(),
            preferences_path: self.preferences.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Parse `url`, resolving it against `base` when relative.
pub(crate) fn parse_url(url: &str, base: Option<&Url>) -> Result<Url, CliError> {
    Url::options()
        .base_url(base)
        .parse(url)
        .map_err(|source| CliError::Url {
            url: url.to_owned(),
            source,
        })
}

/// Fetcher for the index and documents.
///
/// An `http(s)://` base handles absolute URLs itself. A directory base is
/// paired with an HTTP fetcher for index paths that are absolute URLs.
fn site_fetcher(config: &Config, page: &Url) -> Result<Arc<dyn Fetcher>, FetchError> {
    let base = &config.site_resolved.base;
    let timeout = Duration::from_secs(config.http.timeout_secs);
    if is_http_url(base) {
        return Ok(Arc::new(HttpFetcher::new(base, timeout)?));
    }
    Ok(Arc::new(SiteFetcher::new(
        Arc::new(FsFetcher::new(base)),
        Arc::new(HttpFetcher::new(page.as_str(), timeout)?),
    )))
}

/// Build a controller for the page at `url` (default: the configured page URL).
///
/// The index is loaded right away; a failed load leaves the viewer empty
/// with a status instead of failing.
pub(crate) fn open_viewer(config: &Config, url: Option<&str>) -> Result<Controller, CliError> {
    let site = &config.site_resolved;
    let page = parse_url(&site.page_url, None)?;
    let fetcher = site_fetcher(config, &page)?;
    let start = match url {
        Some(url) => parse_url(url, Some(&page))?,
        None => page,
    };

    let (store, notice) = load_index(fetcher.as_ref(), &site.index);

    let renderer = HtmlRenderer::new().with_raw_html(site.allow_html);
    let loader = DocumentLoader::new(fetcher, Arc::new(renderer));
    let preferences = FilePreferences::new(&config.preferences_resolved.path);

    Ok(Controller::new(
        store,
        loader,
        Box::new(SessionHistory::new(start)),
        Arc::new(preferences),
        config.language.clone(),
    )
    .with_index_notice(notice))
}
