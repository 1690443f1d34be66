use colored::Colorize;

use crate::booking::{StepIndicator, StepWizard};
use crate::cli::output::OutputPreferences;

/// One-line progress bar, e.g. `[x] Route > [>] Details > [ ] Payment`.
pub fn render_steps(wizard: &StepWizard, prefs: &OutputPreferences) -> String {
    wizard
        .indicators()
        .iter()
        .map(|indicator| render_indicator(indicator, prefs))
        .collect::<Vec<_>>()
        .join(" > ")
}

fn render_indicator(indicator: &StepIndicator, prefs: &OutputPreferences) -> String {
    let label = indicator.step.label();
    if prefs.plain_mode {
        let marker = match (indicator.completed, indicator.active) {
            (true, _) => "[x]",
            (false, true) => "[>]",
            (false, false) => "[ ]",
        };
        return format!("{marker} {label}");
    }

    match (indicator.completed, indicator.active) {
        (true, _) => format!("✔ {label}").green().to_string(),
        (false, true) => format!("● {label}").bright_yellow().bold().to_string(),
        (false, false) => format!("○ {label}").dimmed().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_completed_current_and_pending_steps() {
        let mut wizard = StepWizard::new();
        wizard.advance();
        let line = render_steps(&wizard, &OutputPreferences { plain_mode: true });
        assert_eq!(
            line,
            "[x] Route > [>] Details > [ ] Payment > [ ] Confirmation"
        );
    }
}
