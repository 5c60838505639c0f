//! `rn render` command implementation.

use std::path::PathBuf;

use clap::Args;
use rn_viewer::{Controller, Event, PageTemplate};

use super::{ViewerArgs, open_viewer};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// URL to render, absolute or relative to the page URL (e.g. "?lang=en#Setup%2FInstall").
    #[arg(short, long)]
    url: Option<String>,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Page title.
    #[arg(long, default_value = "Manual")]
    title: String,

    #[command(flatten)]
    pub viewer: ViewerArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the page cannot be written.
    /// Viewer statuses are reported but do not fail the command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.viewer.load_config()?;

        let mut controller = open_viewer(&config, self.url.as_deref())?;
        controller.handle(Event::Ready);

        for notice in &controller.view().notices {
            output.status(notice);
        }
        output.info(&format!("URL: {}", controller.current_url()));

        let html = render_page(&controller, &self.title);
        match &self.output {
            Some(path) => {
                std::fs::write(path, html)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => output.data(&html)?,
        }
        Ok(())
    }
}

/// Full HTML page for the controller's current view.
fn render_page(controller: &Controller, title: &str) -> String {
    PageTemplate::new(controller.view(), controller.current_url())
        .with_title(title)
        .to_string()
}
