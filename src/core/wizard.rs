//! Step sequencer for the reservation wizard.
//!
//! The controller only tracks which step is active. Forms write into the
//! [`ReservationDraft`] and then ask the controller to move on; the controller
//! refuses to leave a step whose required fields are still missing.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::draft::ReservationDraft;
use crate::core::progress::ProgressBar;
use crate::domain::i18n::Translate;
use crate::domain::service::ServiceCatalog;
use crate::errors::{ReservationError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    #[default]
    Address,
    Service,
    SubThemes,
    Schedule,
    Contact,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Address,
        WizardStep::Service,
        WizardStep::SubThemes,
        WizardStep::Schedule,
        WizardStep::Contact,
    ];

    pub fn index(self) -> usize {
        match self {
            WizardStep::Address => 0,
            WizardStep::Service => 1,
            WizardStep::SubThemes => 2,
            WizardStep::Schedule => 3,
            WizardStep::Contact => 4,
        }
    }

    pub fn next(self) -> Option<WizardStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(self) -> Option<WizardStep> {
        self.index()
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub fn key(self) -> &'static str {
        match self {
            WizardStep::Address => "address",
            WizardStep::Service => "service",
            WizardStep::SubThemes => "subthemes",
            WizardStep::Schedule => "schedule",
            WizardStep::Contact => "contact",
        }
    }

    pub fn label(self, translator: &dyn Translate) -> String {
        translator.translate(&format!("steps.{}", self.key()))
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Outcome of a successful [`WizardController::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved(WizardStep),
    /// The last step validated; the draft can be submitted.
    ReadyToSubmit,
}

#[derive(Debug, Clone, Default)]
pub struct WizardController {
    current: WizardStep,
}

impl WizardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> WizardStep {
        self.current
    }

    pub fn current_index(&self) -> usize {
        self.current.index()
    }

    pub fn progress(&self) -> ProgressBar {
        ProgressBar::for_step(self.current)
    }

    /// Moves to the next step once the current one is complete in `draft`.
    ///
    /// On failure the controller stays where it is.
    pub fn advance(
        &mut self,
        draft: &ReservationDraft,
        catalog: &ServiceCatalog,
    ) -> Result<Advance> {
        let step = self.current;
        if let Some(field) = draft.missing_for_step(step, catalog)? {
            debug!(%step, %field, "wizard advance rejected");
            return Err(ReservationError::Validation { step, field });
        }
        match step.next() {
            Some(next) => {
                self.current = next;
                debug!(from = %step, to = %next, "wizard advanced");
                Ok(Advance::Moved(next))
            }
            None => {
                debug!("wizard ready to submit");
                Ok(Advance::ReadyToSubmit)
            }
        }
    }

    /// Goes back one step without validation.
    pub fn retreat(&mut self) -> Result<WizardStep> {
        let previous = self.current.previous().ok_or(ReservationError::Boundary)?;
        debug!(from = %self.current, to = %previous, "wizard retreated");
        self.current = previous;
        Ok(previous)
    }

    /// Jumps back to an earlier step, e.g. to edit it from a summary.
    pub fn revisit(&mut self, step: WizardStep) -> Result<WizardStep> {
        if step >= self.current {
            return Err(ReservationError::InvalidTransition {
                from: self.current,
                to: step,
            });
        }
        self.current = step;
        Ok(step)
    }

    pub fn reset(&mut self) {
        self.current = WizardStep::Address;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::i18n::Translations;
    use crate::errors::DraftField;

    fn catalog() -> ServiceCatalog {
        ServiceCatalog::new(&Translations::french())
    }

    #[test]
    fn steps_are_totally_ordered() {
        for pair in WizardStep::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert_eq!(pair[1].previous(), Some(pair[0]));
        }
        assert_eq!(WizardStep::Contact.next(), None);
        assert_eq!(WizardStep::Address.previous(), None);
    }

    #[test]
    fn advance_without_address_fails_and_stays() {
        let mut controller = WizardController::new();
        let err = controller
            .advance(&ReservationDraft::new(), &catalog())
            .unwrap_err();
        assert!(matches!(
            err,
            ReservationError::Validation {
                step: WizardStep::Address,
                field: DraftField::Address
            }
        ));
        assert_eq!(controller.current_index(), 0);
    }

    #[test]
    fn retreat_at_first_step_is_boundary() {
        let mut controller = WizardController::new();
        assert!(matches!(controller.retreat(), Err(ReservationError::Boundary)));
        assert_eq!(controller.current(), WizardStep::Address);
    }

    #[test]
    fn revisit_only_goes_backwards() {
        let mut controller = WizardController {
            current: WizardStep::Schedule,
        };
        assert!(controller.revisit(WizardStep::Contact).is_err());
        assert!(controller.revisit(WizardStep::Schedule).is_err());
        assert_eq!(controller.revisit(WizardStep::Service).ok(), Some(WizardStep::Service));
        controller.reset();
        assert_eq!(controller.current(), WizardStep::Address);
    }

    #[test]
    fn step_labels_are_translated() {
        let labels: Vec<_> = WizardStep::ALL
            .iter()
            .map(|step| step.label(&Translations::french()))
            .collect();
        assert_eq!(labels, ["Adresse", "Service", "Détails", "Créneau", "Coordonnées"]);
    }
}
