//! Configuration management for rn.
//!
//! Parses `rn.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.index`
//! - `site.base`
//! - `site.page_url`
//! - `language.default`
//! - `preferences.path`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override index location.
    pub index: Option<String>,
    /// Override base location for relative document paths.
    pub base: Option<String>,
    /// Override the URL of the hosting page.
    pub page_url: Option<String>,
    /// Override the default language.
    pub default_language: Option<String>,
    /// Override the preference file location.
    pub preferences_path: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "rn.toml";

/// Default index location, relative to the site base.
const DEFAULT_INDEX: &str = "structure.json";

/// Default URL of the hosting page.
const DEFAULT_PAGE_URL: &str = "https://localhost/";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration (locations are unresolved strings from TOML).
    site: SiteConfigRaw,
    /// Language selection configuration.
    pub language: LanguageConfig,
    /// HTTP client configuration.
    pub http: HttpConfig,
    /// Preference storage configuration (paths are relative strings from TOML).
    preferences: PreferencesConfigRaw,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Resolved preference storage configuration (set after loading).
    #[serde(skip)]
    pub preferences_resolved: PreferencesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    index: Option<String>,
    base: Option<String>,
    page_url: Option<String>,
    allow_html: Option<bool>,
}

/// Resolved site configuration.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Index location: absolute URL, or a path relative to `base`.
    pub index: String,
    /// Location that relative index and document paths resolve against.
    /// Either an `http(s)://` URL or an absolute directory.
    pub base: String,
    /// URL of the page hosting the viewer; relative navigation URLs join onto it.
    pub page_url: String,
    /// Pass raw HTML in Markdown sources through instead of escaping it.
    pub allow_html: bool,
}

/// Which language to fall back to when the requested one is unusable.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Use `language.default` when the index has it, else the first available language.
    #[default]
    Default,
    /// Always use the first available language.
    First,
}

/// Language selection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Preferred fallback language code.
    pub default: String,
    /// Fallback policy.
    pub fallback: FallbackPolicy,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default: "de".to_owned(),
            fallback: FallbackPolicy::Default,
        }
    }
}

/// HTTP client configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Global request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Raw preference configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PreferencesConfigRaw {
    path: Option<String>,
}

/// Resolved preference storage configuration.
#[derive(Debug, Default)]
pub struct PreferencesConfig {
    /// File holding the last selected language.
    pub path: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.index`").
        field: String,
        /// Error message (e.g., "${`MANUAL_HOST`} not set").
        message: String,
    },
}

/// Check whether a location is an `http://` or `https://` URL.
#[must_use]
pub fn is_http_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !is_http_url(url) {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `rn.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(index) = &settings.index {
            self.site_resolved.index.clone_from(index);
        }
        if let Some(base) = &settings.base {
            self.site_resolved.base = resolve_base(base, &cwd());
        }
        if let Some(page_url) = &settings.page_url {
            self.site_resolved.page_url.clone_from(page_url);
        }
        if let Some(language) = &settings.default_language {
            self.language.default.clone_from(language);
        }
        if let Some(path) = &settings.preferences_path {
            self.preferences_resolved.path.clone_from(path);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        Self::default_with_base(&cwd())
    }

    /// Create default config with locations relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            language: LanguageConfig::default(),
            http: HttpConfig::default(),
            preferences: PreferencesConfigRaw::default(),
            site_resolved: SiteConfig {
                index: DEFAULT_INDEX.to_owned(),
                base: base.display().to_string(),
                page_url: DEFAULT_PAGE_URL.to_owned(),
                allow_html: false,
            },
            preferences_resolved: PreferencesConfig {
                path: base.join(".rn").join("preferences.json"),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site_resolved.index, "site.index")?;
        require_non_empty(&self.site_resolved.base, "site.base")?;
        require_http_url(&self.site_resolved.page_url, "site.page_url")?;
        require_non_empty(&self.language.default, "language.default")?;

        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let site = &mut self.site;
        for (value, field) in [
            (&mut site.index, "site.index"),
            (&mut site.base, "site.base"),
            (&mut site.page_url, "site.page_url"),
            (&mut self.preferences.path, "preferences.path"),
        ] {
            if let Some(raw) = value.as_deref() {
                *value = Some(expand::expand_env(raw, field)?);
            }
        }

        self.language.default = expand::expand_env(&self.language.default, "language.default")?;

        Ok(())
    }

    /// Resolve locations relative to the config directory.
    fn resolve(&mut self, config_dir: &Path) {
        self.site_resolved = SiteConfig {
            index: self
                .site
                .index
                .clone()
                .unwrap_or_else(|| DEFAULT_INDEX.to_owned()),
            base: resolve_base(self.site.base.as_deref().unwrap_or("."), config_dir),
            page_url: self
                .site
                .page_url
                .clone()
                .unwrap_or_else(|| DEFAULT_PAGE_URL.to_owned()),
            allow_html: self.site.allow_html.unwrap_or(false),
        };

        self.preferences_resolved = PreferencesConfig {
            path: config_dir.join(
                self.preferences
                    .path
                    .as_deref()
                    .unwrap_or(".rn/preferences.json"),
            ),
        };
    }
}

fn cwd() -> PathBuf {
    std::env::current_dir().unwrap_or_default()
}

/// Resolve a base location: URLs gain a trailing slash, directories become absolute.
fn resolve_base(base: &str, config_dir: &Path) -> String {
    if is_http_url(base) {
        if base.ends_with('/') {
            base.to_owned()
        } else {
            format!("{base}/")
        }
    } else if base == "." {
        config_dir.display().to_string()
    } else {
        config_dir.join(base).display().to_string()
    }
}
