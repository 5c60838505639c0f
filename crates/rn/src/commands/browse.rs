//! `rn browse` command implementation.
//!
//! Reads one command per line from stdin and feeds it to the viewer as if a
//! user clicked around the page:
//!
//! ```text
//! lang en                 pick a language
//! open Setup/Install      click a TOC entry
//! hash Setup%2FUpdate     edit the location fragment (empty to clear)
//! back / forward          history traversal
//! url                     print the current URL
//! toc                     print the table of contents
//! page                    print the full page
//! quit                    leave
//! ```

use std::io::BufRead;

use clap::Args;
use rn_viewer::{ContentArea, Controller, Event, NavigationKey, PageTemplate};

use super::toc::toc_lines;
use super::{ViewerArgs, open_viewer};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the browse command.
#[derive(Args)]
pub(crate) struct BrowseArgs {
    /// Start URL, absolute or relative to the page URL.
    #[arg(short, long)]
    url: Option<String>,

    #[command(flatten)]
    pub viewer: ViewerArgs,
}

/// A parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Lang(String),
    Open(NavigationKey),
    Hash(String),
    Back,
    Forward,
    Url,
    Toc,
    Page,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (name, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim();

        match name {
            "lang" if !arg.is_empty() => Ok(Self::Lang(arg.to_owned())),
            "lang" => Err("usage: lang <code>".to_owned()),
            "open" => NavigationKey::decode(arg)
                .filter(|_| arg.contains('/'))
                .map(Self::Open)
                .ok_or_else(|| "usage: open <topic>/<category>".to_owned()),
            "hash" => Ok(Self::Hash(arg.trim_start_matches('#').to_owned())),
            "back" => Ok(Self::Back),
            "forward" => Ok(Self::Forward),
            "url" => Ok(Self::Url),
            "toc" => Ok(Self::Toc),
            "page" => Ok(Self::Page),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command \"{other}\", try \"help\"")),
        }
    }
}

impl BrowseArgs {
    /// Execute the browse command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or stdin/stdout fail.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.viewer.load_config()?;

        let mut controller = open_viewer(&config, self.url.as_deref())?;
        controller.handle(Event::Ready);
        report(&output, &controller);

        for line in std::io::stdin().lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(msg) => {
                    output.warning(&msg);
                    continue;
                }
            };
            if !run(&output, &mut controller, command)? {
                break;
            }
        }
        Ok(())
    }
}

/// Run `command`; returns `false` when the session should end.
fn run(output: &Output, controller: &mut Controller, command: Command) -> Result<bool, CliError> {
    match command {
        Command::Lang(language) => controller.handle(Event::LanguageSelected(language)),
        Command::Open(key) => controller.handle(Event::EntrySelected(key)),
        Command::Hash(fragment) => {
            let mut url = controller.current_url().clone();
            url.set_fragment((!fragment.is_empty()).then_some(fragment.as_str()));
            controller.handle(Event::HashChanged(url));
        }
        Command::Back => {
            if !controller.back() {
                output.warning("Already at the oldest history entry");
                return Ok(true);
            }
        }
        Command::Forward => {
            if !controller.forward() {
                output.warning("Already at the newest history entry");
                return Ok(true);
            }
        }
        Command::Url => {
            output.data(controller.current_url().as_str())?;
            return Ok(true);
        }
        Command::Toc => {
            for line in toc_lines(controller) {
                output.data(&line)?;
            }
            return Ok(true);
        }
        Command::Page => {
            let page = PageTemplate::new(controller.view(), controller.current_url());
            output.data(&page.to_string())?;
            return Ok(true);
        }
        Command::Help => {
            output.info("Commands: lang <code>, open <topic>/<category>, hash <fragment>,");
            output.info("          back, forward, url, toc, page, quit");
            return Ok(true);
        }
        Command::Quit => return Ok(false),
    }
    report(output, controller);
    Ok(true)
}

/// Print statuses, what the content area shows and the current URL.
fn report(output: &Output, controller: &Controller) {
    let view = controller.view();
    for notice in &view.notices {
        output.status(notice);
    }
    match &view.content {
        ContentArea::Document { key, language, .. } => {
            output.success(&format!("Showing {key} [{language}]"));
        }
        ContentArea::Placeholder => output.info("No document selected"),
        ContentArea::Loading { key } => output.info(&format!("Loading {key}")),
        ContentArea::Unavailable => {}
    }
    output.highlight(controller.current_url().as_str());
}
