use std::fmt;

use colored::Colorize;

use crate::cli::output::{current_preferences, OutputPreferences};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Header,
    Detail,
    Emphasis,
}

/// Screen-level layout helpers shared by the booking views.
pub struct Formatter {
    prefs: OutputPreferences,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {
            prefs: current_preferences(),
        }
    }

    pub fn with_preferences(prefs: OutputPreferences) -> Self {
        Self { prefs }
    }

    pub fn is_plain(&self) -> bool {
        self.prefs.plain_mode
    }

    pub fn print_header(&self, title: impl fmt::Display) {
        println!("\n{}", self.header_text(title));
    }

    pub fn header_text(&self, title: impl fmt::Display) -> String {
        self.apply_style(Style::Header, format!("=== {} ===", title))
    }

    pub fn print_detail(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Detail, message));
    }

    pub fn emphasis(&self, message: impl fmt::Display) -> String {
        self.apply_style(Style::Emphasis, message)
    }

    fn apply_style(&self, style: Style, message: impl fmt::Display) -> String {
        let text = message.to_string();
        if self.prefs.plain_mode {
            return text;
        }
        match style {
            Style::Header => text.bold().to_string(),
            Style::Detail => text.dimmed().to_string(),
            Style::Emphasis => text.bright_white().bold().to_string(),
        }
    }

    /// Label/value rows with the labels padded to a shared width.
    pub fn two_column_lines(&self, entries: &[(&str, String)]) -> Vec<String> {
        let width = entries
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        entries
            .iter()
            .map(|(label, value)| format!("  {:<width$}  {}", label, value, width = width))
            .collect()
    }

    pub fn print_two_column(&self, entries: &[(&str, String)]) {
        for line in self.two_column_lines(entries) {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_column_pads_labels() {
        let formatter = Formatter::with_preferences(OutputPreferences { plain_mode: true });
        let lines = formatter.two_column_lines(&[
            ("Vehicle", "BMW 7 Series".to_string()),
            ("Price", "AED 112.50".to_string()),
        ]);
        assert_eq!(lines, vec!["  Vehicle  BMW 7 Series", "  Price    AED 112.50"]);
    }
}
