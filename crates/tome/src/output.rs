//! Styled messages for command progress, written to stderr.
//!
//! Logging goes through `tracing`; this is only for what the user asked for:
//! where a server listens, what a build or snapshot produced.

use console::{Style, Term};

/// Styled stderr writer shared by the commands.
pub(crate) struct Output {
    term: Term,
    green: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Plain progress line (paths, sections).
    pub(crate) fn info(&self, msg: &str) {
        self.line(msg, None);
    }

    /// Final result of a command, in green.
    pub(crate) fn success(&self, msg: &str) {
        self.line(msg, Some(&self.green));
    }

    /// Failure reported before exiting, in red.
    pub(crate) fn error(&self, msg: &str) {
        self.line(msg, Some(&self.red));
    }

    /// Listen address and other lines to spot at a glance.
    pub(crate) fn highlight(&self, msg: &str) {
        self.line(msg, Some(&self.cyan_bold));
    }

    fn line(&self, msg: &str, style: Option<&Style>) {
        // A closed stderr is not worth failing a command over.
        let _ = match style {
            Some(style) => self.term.write_line(&style.apply_to(msg).to_string()),
            None => self.term.write_line(msg),
        };
    }
}
