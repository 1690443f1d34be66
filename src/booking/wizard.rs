use serde::{Deserialize, Serialize};

/// Screens of the booking wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    Route,
    Details,
    Payment,
    Confirmation,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Route,
        WizardStep::Details,
        WizardStep::Payment,
        WizardStep::Confirmation,
    ];

    pub fn index(&self) -> usize {
        match self {
            WizardStep::Route => 0,
            WizardStep::Details => 1,
            WizardStep::Payment => 2,
            WizardStep::Confirmation => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::Route => "Route",
            WizardStep::Details => "Details",
            WizardStep::Payment => "Payment",
            WizardStep::Confirmation => "Confirmation",
        }
    }
}

/// Rendering data for one step of the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepIndicator {
    pub step: WizardStep,
    pub active: bool,
    pub completed: bool,
}

/// Linear progress tracker. There is no general way back; only forward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepWizard {
    current: usize,
}

impl StepWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> WizardStep {
        WizardStep::from_index(self.current).unwrap_or(WizardStep::Confirmation)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Moves one step forward; does nothing once confirmation is reached.
    pub fn advance(&mut self) -> WizardStep {
        if self.current < WizardStep::ALL.len() - 1 {
            self.current += 1;
            tracing::debug!(step = self.current().label(), "wizard advanced");
        }
        self.current()
    }

    pub fn is_active(&self, index: usize) -> bool {
        index <= self.current
    }

    pub fn is_completed(&self, index: usize) -> bool {
        index < self.current
    }

    pub fn indicators(&self) -> Vec<StepIndicator> {
        WizardStep::ALL
            .iter()
            .map(|step| StepIndicator {
                step: *step,
                active: self.is_active(step.index()),
                completed: self.is_completed(step.index()),
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_route() {
        let wizard = StepWizard::new();
        assert_eq!(wizard.current(), WizardStep::Route);
        assert_eq!(wizard.current_index(), 0);
    }

    #[test]
    fn three_advances_reach_confirmation_and_stop() {
        let mut wizard = StepWizard::new();
        wizard.advance();
        wizard.advance();
        assert_eq!(wizard.advance(), WizardStep::Confirmation);
        assert_eq!(wizard.current_index(), 3);

        assert_eq!(wizard.advance(), WizardStep::Confirmation);
        assert_eq!(wizard.current_index(), 3);
    }

    #[test]
    fn active_and_completed_follow_current_step() {
        let mut wizard = StepWizard::new();
        wizard.advance();
        wizard.advance();

        let indicators = wizard.indicators();
        let active: Vec<bool> = indicators.iter().map(|i| i.active).collect();
        let completed: Vec<bool> = indicators.iter().map(|i| i.completed).collect();
        assert_eq!(active, vec![true, true, true, false]);
        assert_eq!(completed, vec![true, true, false, false]);
    }

    #[test]
    fn reset_returns_to_first_step() {
        let mut wizard = StepWizard::new();
        wizard.advance();
        wizard.reset();
        assert_eq!(wizard.current(), WizardStep::Route);
    }
}
