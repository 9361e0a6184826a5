//! Terminal driver for the reservation wizard.

use chrono::NaiveDate;
use tracing::info;

use crate::cli::interaction::{ConfirmationResponse, PromptResponse, ReservationInteraction};
use crate::cli::output;
use crate::core::draft::ReservationDraft;
use crate::core::format::format_service_name;
use crate::core::wizard::{Advance, WizardController, WizardStep};
use crate::domain::address::Geocoder;
use crate::domain::contact::Contact;
use crate::domain::i18n::Translate;
use crate::domain::reservation::ReservationSubmission;
use crate::domain::service::{QuestionKind, ServiceCatalog};
use crate::domain::slot::available_slots;
use crate::errors::{CliError, ReservationError};

/// High-level lifecycle states emitted by the wizard runner.
#[derive(Debug, Clone, PartialEq)]
pub enum FormResult<T> {
    Completed(T),
    Cancelled,
}

/// What a step prompt did to the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepOutcome {
    Filled,
    Repeat,
    Back,
    Cancel,
}

impl<T> From<PromptResponse<T>> for StepOutcome {
    fn from(response: PromptResponse<T>) -> Self {
        match response {
            PromptResponse::Value(_) => StepOutcome::Filled,
            PromptResponse::Back => StepOutcome::Back,
            PromptResponse::Cancel => StepOutcome::Cancel,
        }
    }
}

const DEFAULT_DAYS_AHEAD: u32 = 14;

pub struct ReservationWizard<'a> {
    catalog: &'a ServiceCatalog,
    geocoder: &'a dyn Geocoder,
    translator: &'a dyn Translate,
    today: NaiveDate,
    days_ahead: u32,
}

impl<'a> ReservationWizard<'a> {
    pub fn new(
        catalog: &'a ServiceCatalog,
        geocoder: &'a dyn Geocoder,
        translator: &'a dyn Translate,
        today: NaiveDate,
    ) -> Self {
        Self {
            catalog,
            geocoder,
            translator,
            today,
            days_ahead: DEFAULT_DAYS_AHEAD,
        }
    }

    pub fn with_days_ahead(mut self, days_ahead: u32) -> Self {
        self.days_ahead = days_ahead.max(1);
        self
    }

    /// Runs the wizard until the user confirms or cancels.
    pub fn run<I: ReservationInteraction>(
        &self,
        interaction: &mut I,
    ) -> Result<FormResult<ReservationSubmission>, CliError> {
        let mut draft = ReservationDraft::new();
        let mut controller = WizardController::new();
        // Set once the user edits from the summary: complete steps are then skipped.
        let mut editing = false;

        loop {
            let step = controller.current();
            let progress = controller.progress();
            output::section(format!(
                "{} - {}",
                progress.counter(),
                step.label(self.translator)
            ));
            output::detail(progress.render(20));

            let outcome = match step {
                WizardStep::Address => self.prompt_address(interaction, &mut draft)?,
                WizardStep::Service => self.prompt_service(interaction, &mut draft)?,
                WizardStep::SubThemes => self.prompt_sub_themes(interaction, &mut draft)?,
                WizardStep::Schedule => self.prompt_schedule(interaction, &mut draft)?,
                WizardStep::Contact => self.prompt_contact(interaction, &mut draft)?,
            };

            match outcome {
                StepOutcome::Cancel => {
                    output::info("Réservation annulée.");
                    return Ok(FormResult::Cancelled);
                }
                StepOutcome::Repeat => continue,
                StepOutcome::Back => {
                    if let Err(err) = controller.retreat() {
                        output::warning(err);
                    }
                }
                StepOutcome::Filled => match self.advance(&mut controller, &draft, editing)? {
                    Ok(Advance::Moved(_)) => {}
                    Ok(Advance::ReadyToSubmit) => {
                        let submission = draft.to_submission(self.catalog)?;
                        match interaction.confirm(&summary_lines(&submission))? {
                            ConfirmationResponse::Confirm => {
                                info!(service = %submission.service_type, "reservation confirmed");
                                return Ok(FormResult::Completed(submission));
                            }
                            ConfirmationResponse::Back => {
                                match self.choose_step_to_edit(interaction)? {
                                    PromptResponse::Value(step) => {
                                        editing = true;
                                        if step != controller.current() {
                                            controller.revisit(step)?;
                                        }
                                    }
                                    PromptResponse::Back => {}
                                    PromptResponse::Cancel => {
                                        output::info("Réservation annulée.");
                                        return Ok(FormResult::Cancelled);
                                    }
                                }
                            }
                            ConfirmationResponse::Cancel => {
                                output::info("Réservation annulée.");
                                return Ok(FormResult::Cancelled);
                            }
                        }
                    }
                    Err(err @ ReservationError::Validation { .. }) => output::warning(err),
                    Err(err) => return Err(err.into()),
                },
            }
        }
    }

    /// Advances one step, or while editing, through every step that is already
    /// complete. The inner result carries validation failures for the caller.
    fn advance(
        &self,
        controller: &mut WizardController,
        draft: &ReservationDraft,
        editing: bool,
    ) -> Result<Result<Advance, ReservationError>, CliError> {
        let mut result = controller.advance(draft, self.catalog);
        if editing {
            while let Ok(Advance::Moved(step)) = result {
                if draft.missing_for_step(step, self.catalog)?.is_some() {
                    break;
                }
                result = controller.advance(draft, self.catalog);
            }
        }
        Ok(result)
    }

    fn choose_step_to_edit<I: ReservationInteraction>(
        &self,
        interaction: &mut I,
    ) -> Result<PromptResponse<WizardStep>, CliError> {
        let labels: Vec<String> = WizardStep::ALL
            .iter()
            .map(|step| step.label(self.translator))
            .collect();
        Ok(match interaction.prompt_choice("Quelle étape modifier ?", &labels)? {
            PromptResponse::Value(index) => WizardStep::ALL
                .get(index)
                .copied()
                .map_or(PromptResponse::Back, PromptResponse::Value),
            PromptResponse::Back => PromptResponse::Back,
            PromptResponse::Cancel => PromptResponse::Cancel,
        })
    }

    fn prompt_address<I: ReservationInteraction>(
        &self,
        interaction: &mut I,
        draft: &mut ReservationDraft,
    ) -> Result<StepOutcome, CliError> {
        let query = match interaction.prompt_text("Adresse (rue, code postal ville)")? {
            PromptResponse::Value(query) => query,
            other => return Ok(other.into()),
        };
        let mut candidates = self.geocoder.search(&query);
        let chosen = match candidates.len() {
            0 => {
                output::warning("Aucune adresse trouvée.");
                return Ok(StepOutcome::Repeat);
            }
            1 => candidates.remove(0),
            _ => {
                let labels: Vec<String> =
                    candidates.iter().map(|c| c.place_name.clone()).collect();
                match interaction.prompt_choice("Choisissez votre adresse", &labels)? {
                    PromptResponse::Value(index) => candidates.swap_remove(index),
                    other => return Ok(other.into()),
                }
            }
        };
        draft.set_address(chosen);
        Ok(StepOutcome::Filled)
    }

    fn prompt_service<I: ReservationInteraction>(
        &self,
        interaction: &mut I,
        draft: &mut ReservationDraft,
    ) -> Result<StepOutcome, CliError> {
        let services = self.catalog.all();
        let labels: Vec<String> = services.iter().map(|s| s.name.clone()).collect();
        match interaction.prompt_choice("Quel service ?", &labels)? {
            PromptResponse::Value(index) => {
                if let Some(service) = services.get(index) {
                    draft.set_service(service.id.clone());
                }
                Ok(StepOutcome::Filled)
            }
            other => Ok(other.into()),
        }
    }

    fn prompt_sub_themes<I: ReservationInteraction>(
        &self,
        interaction: &mut I,
        draft: &mut ReservationDraft,
    ) -> Result<StepOutcome, CliError> {
        let service = self.catalog.require(draft.service_id())?;
        for question in &service.questions {
            let label = if question.required {
                question.label.clone()
            } else {
                format!("{} (optionnel)", question.label)
            };
            let answer = match &question.kind {
                QuestionKind::Flag => {
                    let options = vec!["Oui".to_string(), "Non".to_string()];
                    match interaction.prompt_choice(&label, &options)? {
                        PromptResponse::Value(index) => (index == 0).to_string(),
                        other => return Ok(other.into()),
                    }
                }
                QuestionKind::Choice(options) => {
                    match interaction.prompt_choice(&label, options)? {
                        PromptResponse::Value(index) => match options.get(index) {
                            Some(option) => option.clone(),
                            None => return Ok(StepOutcome::Repeat),
                        },
                        other => return Ok(other.into()),
                    }
                }
                QuestionKind::Number => match interaction.prompt_text(&label)? {
                    PromptResponse::Value(raw) => {
                        let raw = raw.trim().to_string();
                        if raw.is_empty() && !question.required {
                            draft.remove_sub_theme(&question.id);
                            continue;
                        }
                        if raw.parse::<u32>().map_or(true, |value| value == 0) {
                            output::warning(format!(
                                "{} : entrez un nombre entier positif",
                                question.label
                            ));
                            return Ok(StepOutcome::Repeat);
                        }
                        raw
                    }
                    other => return Ok(other.into()),
                },
            };
            draft.set_sub_theme(question.id.clone(), answer);
        }
        Ok(StepOutcome::Filled)
    }

    fn prompt_schedule<I: ReservationInteraction>(
        &self,
        interaction: &mut I,
        draft: &mut ReservationDraft,
    ) -> Result<StepOutcome, CliError> {
        let mut slots = available_slots(self.today, self.days_ahead, self.translator);
        let labels: Vec<String> = slots.iter().map(|slot| slot.label.clone()).collect();
        match interaction.prompt_choice("Choisissez un créneau", &labels)? {
            PromptResponse::Value(index) if index < slots.len() => {
                draft.set_slot(slots.swap_remove(index));
                Ok(StepOutcome::Filled)
            }
            PromptResponse::Value(_) => Ok(StepOutcome::Repeat),
            other => Ok(other.into()),
        }
    }

    fn prompt_contact<I: ReservationInteraction>(
        &self,
        interaction: &mut I,
        draft: &mut ReservationDraft,
    ) -> Result<StepOutcome, CliError> {
        let mut values = Vec::with_capacity(3);
        for label in ["Nom", "Email", "Téléphone"] {
            match interaction.prompt_text(label)? {
                PromptResponse::Value(value) => values.push(value.trim().to_string()),
                other => return Ok(other.into()),
            }
        }
        let mut values = values.into_iter();
        draft.set_contact(Contact::new(
            values.next().unwrap_or_default(),
            values.next().unwrap_or_default(),
            values.next().unwrap_or_default(),
        ));
        Ok(StepOutcome::Filled)
    }
}

/// Recap shown before the user confirms.
pub fn summary_lines(submission: &ReservationSubmission) -> Vec<String> {
    vec![
        format!(
            "Service : {}",
            format_service_name(&submission.service_name, &submission.service_details)
        ),
        format!("Adresse : {}", submission.address),
        format!("Créneau : {}", submission.time_label),
        format!(
            "Contact : {}, {}, {}",
            submission.client_name, submission.client_email, submission.client_phone
        ),
    ]
}
