use crate::core::wizard::WizardStep;

/// Fraction-complete view of the wizard, re-derived from the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressBar {
    index: usize,
    total: usize,
}

impl ProgressBar {
    pub fn new(index: usize, total: usize) -> Self {
        Self {
            index: index.min(total.saturating_sub(1)),
            total,
        }
    }

    pub fn for_step(step: WizardStep) -> Self {
        Self::new(step.index(), WizardStep::ALL.len())
    }

    /// `index / (total - 1)`; a single-step (or empty) sequence is complete.
    pub fn fraction(&self) -> f64 {
        if self.total <= 1 {
            return 1.0;
        }
        self.index as f64 / (self.total - 1) as f64
    }

    pub fn percent(&self) -> u32 {
        (self.fraction() * 100.0).round() as u32
    }

    /// Step counter as shown above each form, e.g. `Étape 3/5`.
    pub fn counter(&self) -> String {
        format!("Étape {}/{}", self.index + 1, self.total.max(1))
    }

    pub fn render(&self, width: usize) -> String {
        let filled = ((self.fraction() * width as f64).round() as usize).min(width);
        format!(
            "[{}{}] {}%",
            "#".repeat(filled),
            ".".repeat(width - filled),
            self.percent()
        )
    }
}
