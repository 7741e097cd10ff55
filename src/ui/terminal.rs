//! Styled terminal output.

use console::Term;
use std::io::Write;

use super::{
    should_use_colors, NonInteractiveUI, OutputMode, PreflightTheme, ProgressSpinner,
    SpinnerHandle, UserInterface,
};

/// UI for a terminal: results on stdout, diagnostics on stderr, a spinner
/// per probe.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: PreflightTheme,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            PreflightTheme::new()
        } else {
            PreflightTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }

    fn line(term: &mut Term, text: impl std::fmt::Display) {
        writeln!(term, "{}", text).ok();
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        Self::line(&mut self.out, msg);
    }

    fn success(&mut self, msg: &str) {
        let text = self.theme.format_success(msg);
        Self::line(&mut self.out, text);
    }

    fn warning(&mut self, msg: &str) {
        let text = self.theme.format_warning(msg);
        Self::line(&mut self.err, text);
    }

    fn error(&mut self, msg: &str) {
        let text = self.theme.format_error(msg);
        Self::line(&mut self.err, text);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_progress() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            let text = format!("\n{}\n", self.theme.format_header(title));
            Self::line(&mut self.out, text);
        }
    }

    fn show_component(&mut self, name: &str, command: &str) {
        let text = format!("  {}", self.theme.format_component(name, command));
        Self::line(&mut self.out, text);
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_progress() {
            let text = format!("  {}", self.theme.hint.apply_to(hint));
            Self::line(&mut self.err, text);
        }
    }
}

/// Pick the terminal UI when `interactive` and stdout is a TTY, otherwise
/// plain lines.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
