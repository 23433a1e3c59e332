//! Colored terminal output utilities.

use console::{Style, Term};

/// Width of the label column in [`Output::stat`] lines.
const LABEL_WIDTH: usize = 20;

/// Terminal output formatter.
///
/// Writes to stderr so stdout stays free for machine-readable output.
pub(crate) struct Output {
    term: Term,
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

    /// Print an aligned `label: value` line with the value highlighted.
    pub(crate) fn stat(&self, label: &str, value: impl std::fmt::Display) {
        let label = format!("{label}:");
        let _ = self.term.write_line(&format!(
            "  {label:<LABEL_WIDTH$}{}",
            self.cyan_bold.apply_to(value)
        ));
    }
}
