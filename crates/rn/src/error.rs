//! CLI error types.

use rn_config::ConfigError;
use rn_source::FetchError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("invalid URL \"{url}\": {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
