//! `rn toc` command implementation.

use clap::Args;
use rn_config::Config;
use rn_viewer::{Controller, Event, canonical_url};

use super::{ViewerArgs, open_viewer, parse_url};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the toc command.
#[derive(Args)]
pub(crate) struct TocArgs {
    /// Language to list (default: resolved as on page load).
    #[arg(short, long)]
    lang: Option<String>,

    #[command(flatten)]
    pub viewer: ViewerArgs,
}

impl TocArgs {
    /// Execute the toc command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or stdout cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.viewer.load_config()?;

        let url = start_url(&config, self.lang.as_deref())?;
        let mut controller = open_viewer(&config, url.as_deref())?;
        controller.handle(Event::Ready);

        for notice in &controller.view().notices {
            output.status(notice);
        }
        output.highlight(&format!("Language: {}", controller.view().selected_language));
        for line in toc_lines(&controller) {
            output.data(&line)?;
        }
        Ok(())
    }
}

/// Page URL requesting `lang`, keeping the page's other query parameters.
fn start_url(config: &Config, lang: Option<&str>) -> Result<Option<String>, CliError> {
    let Some(lang) = lang else {
        return Ok(None);
    };
    let page = parse_url(&config.site_resolved.page_url, None)?;
    Ok(Some(canonical_url(&page, lang, None).to_string()))
}

/// One line per topic heading and per entry, entries indented.
pub(crate) fn toc_lines(controller: &Controller) -> Vec<String> {
    let view = controller.view();
    let mut lines = Vec::new();
    for section in &view.toc {
        lines.push(section.topic.clone());
        for item in &section.items {
            let url = canonical_url(
                controller.current_url(),
                &view.selected_language,
                Some(&item.key),
            );
            lines.push(format!("  {}\t{}\t{url}", item.category, item.path));
        }
    }
    lines
}
