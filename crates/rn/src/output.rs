//! Colored terminal output utilities.

use console::{Style, Term};
use rn_viewer::{Status, StatusKind};

/// Terminal output formatter.
///
/// Messages go to stderr; page and TOC data go to stdout.
pub(crate) struct Output {
    term: Term,
    out: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            out: Term::stdout(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a highlighted message (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        let _ = self
            .term
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print a viewer status, colored by severity.
    pub(crate) fn status(&self, status: &Status) {
        let msg = status.to_string();
        match status.kind() {
            StatusKind::LanguageUnavailable => self.warning(&msg),
            _ => self.error(&msg),
        }
    }

    /// Write a line of data to stdout.
    pub(crate) fn data(&self, line: &str) -> std::io::Result<()> {
        self.out.write_line(line)
    }
}
