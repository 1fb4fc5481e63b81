//! Terminal status output.
//!
//! Status lines and the progress spinner go to stderr so that stdout carries
//! only the requested output and stays safe to pipe.

use console::{Style, Term};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io;
use std::time::Duration;

/// Get the console::Style for a theme name
pub fn theme_style(theme: &str) -> Style {
    match theme {
        "cyan" => Style::new().cyan(),
        "magenta" => Style::new().magenta(),
        "yellow" => Style::new().yellow(),
        "green" => Style::new().green(),
        "red" => Style::new().red(),
        "blue" => Style::new().blue(),
        "white" => Style::new().white(),
        _ => Style::new().white(),
    }
}

/// Get different shades for status codes based on theme
/// Returns (info_style, warning_style, error_style, success_style)
pub fn status_styles(theme: &str) -> (Style, Style, Style, Style) {
    match theme {
        "cyan" => (
            Style::new().cyan(),        // info - base
            Style::new().color256(51),  // warning - bright cyan
            Style::new().color256(87),  // error - darker cyan
            Style::new().color256(123), // success - lighter cyan
        ),
        "magenta" => (
            Style::new().magenta(),
            Style::new().color256(201),
            Style::new().color256(126),
            Style::new().color256(213),
        ),
        "yellow" => (
            Style::new().yellow(),
            Style::new().color256(226),
            Style::new().color256(178),
            Style::new().color256(227),
        ),
        "green" => (
            Style::new().green(),
            Style::new().color256(46),
            Style::new().color256(28),
            Style::new().color256(120),
        ),
        "red" => (
            Style::new().red(),
            Style::new().color256(196),
            Style::new().color256(124),
            Style::new().color256(210),
        ),
        "blue" => (
            Style::new().blue(),
            Style::new().color256(39),
            Style::new().color256(25),
            Style::new().color256(117),
        ),
        _ => (
            Style::new().white(),
            Style::new().yellow(),
            Style::new().red(),
            Style::new().green(),
        ),
    }
}

/// Spinner color string for progress templates
fn spinner_color(theme: &str) -> &'static str {
    match theme {
        "cyan" => ".cyan",
        "magenta" => ".magenta",
        "yellow" => ".yellow",
        "green" => ".green",
        "red" => ".red",
        "blue" => ".blue",
        _ => ".white",
    }
}

pub struct UI {
    pub term: Term,
    pub color_theme: String,
    quiet: bool,
}

impl UI {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            color_theme: "default".to_string(),
            quiet: false,
        }
    }

    pub fn with_color_theme(mut self, theme: String) -> Self {
        self.color_theme = theme;
        self
    }

    /// Suppress info and success lines. Warnings and errors still print.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Create a spinner that ticks on its own until cleared.
    ///
    /// Hidden when stderr is not a terminal.
    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        if self.quiet || !self.term.is_term() {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }

        let style = ProgressStyle::default_spinner()
            .template(&format!("{{spinner:{}}} {{msg}}", spinner_color(&self.color_theme)))
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    fn status(&self, prefix: &str, style: &Style, message: &str) -> io::Result<()> {
        let white_bold = Style::new().white().bold();
        self.term.write_line(&format!(
            "{} {}",
            style.apply_to(prefix).bold(),
            white_bold.apply_to(message)
        ))
    }

    /// Print an info message
    pub fn print_info(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let (info_style, _, _, _) = status_styles(&self.color_theme);
        self.status("[*]", &info_style, message)
    }

    /// Print a success message
    pub fn print_success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let (_, _, _, success_style) = status_styles(&self.color_theme);
        self.status("[✓]", &success_style, message)
    }

    /// Print a warning message
    pub fn print_warning(&self, message: &str) -> io::Result<()> {
        let (_, warning_style, _, _) = status_styles(&self.color_theme);
        self.status("[!] WARNING:", &warning_style, message)
    }

    /// Restore the cursor in case a spinner hid it.
    pub fn cleanup(&self) -> io::Result<()> {
        if self.term.is_term() {
            self.term.show_cursor()?;
        }
        Ok(())
    }
}

impl Default for UI {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for UI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_theme_falls_back() {
        let fallback = theme_style("nonsense");

        assert_eq!(fallback, Style::new().white());
    }

    #[test]
    fn test_spinner_color() {
        assert_eq!(spinner_color("cyan"), ".cyan");
        assert_eq!(spinner_color("default"), ".white");
    }

    #[test]
    fn test_spinner_can_be_cleared() {
        let ui = UI::new().with_quiet(true);
        let spinner = ui.create_spinner("working");

        spinner.finish_and_clear();
        assert!(spinner.is_finished());
    }
}
