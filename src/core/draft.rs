//! Accumulates the user's choices across the wizard steps.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::wizard::WizardStep;
use crate::domain::address::MapboxAddress;
use crate::domain::common::non_blank;
use crate::domain::contact::Contact;
use crate::domain::details::ServiceDetails;
use crate::domain::reservation::{PaymentStatus, ReservationStatus, ReservationSubmission};
use crate::domain::service::ServiceCatalog;
use crate::domain::slot::TimeSlot;
use crate::errors::{DraftField, ReservationError, Result};

/// Single-item reservation being filled in by the wizard.
///
/// Setters never fail; completeness is only checked by
/// [`missing_for_step`](Self::missing_for_step) and
/// [`to_submission`](Self::to_submission).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationDraft {
    address: Option<MapboxAddress>,
    service_id: String,
    sub_themes: HashMap<String, String>,
    slot: Option<TimeSlot>,
    contact: Contact,
    notes: Option<String>,
}

impl ReservationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_address(&mut self, address: MapboxAddress) {
        self.address = Some(address);
    }

    /// Selecting a different service discards answers given for the previous one.
    pub fn set_service(&mut self, service_id: impl Into<String>) {
        let service_id = service_id.into();
        if service_id != self.service_id && !self.sub_themes.is_empty() {
            debug!(
                from = %self.service_id,
                to = %service_id,
                "service changed, clearing sub-themes"
            );
            self.sub_themes.clear();
        }
        self.service_id = service_id;
    }

    pub fn set_sub_theme(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.sub_themes.insert(key.into(), value.into());
    }

    /// Drops an answer, e.g. when an optional question is left blank.
    pub fn remove_sub_theme(&mut self, key: &str) -> Option<String> {
        self.sub_themes.remove(key)
    }

    pub fn set_slot(&mut self, slot: TimeSlot) {
        self.slot = Some(slot);
    }

    pub fn set_contact(&mut self, contact: Contact) {
        self.contact = contact;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = non_blank(&notes.into()).map(str::to_string);
    }

    pub fn address(&self) -> Option<&MapboxAddress> {
        self.address.as_ref()
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    pub fn sub_theme(&self, key: &str) -> Option<&str> {
        self.sub_themes.get(key).map(String::as_str)
    }

    pub fn sub_themes(&self) -> &HashMap<String, String> {
        &self.sub_themes
    }

    pub fn slot(&self) -> Option<&TimeSlot> {
        self.slot.as_ref()
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    /// First field required by `step` that is still missing.
    ///
    /// Fails only when the selected service id is not in `catalog`.
    pub fn missing_for_step(
        &self,
        step: WizardStep,
        catalog: &ServiceCatalog,
    ) -> Result<Option<DraftField>> {
        let missing = match step {
            WizardStep::Address => self.address.is_none().then_some(DraftField::Address),
            WizardStep::Service => match non_blank(&self.service_id) {
                None => Some(DraftField::Service),
                Some(id) => {
                    catalog.require(id)?;
                    None
                }
            },
            WizardStep::SubThemes => match non_blank(&self.service_id) {
                None => Some(DraftField::Service),
                Some(id) => catalog
                    .require(id)?
                    .required_questions()
                    .find(|question| {
                        self.sub_theme(&question.id)
                            .and_then(non_blank)
                            .is_none()
                    })
                    .map(|question| DraftField::SubTheme(question.id.clone())),
            },
            WizardStep::Schedule => self.slot.is_none().then_some(DraftField::Slot),
            WizardStep::Contact => self.contact.missing_field(),
        };
        Ok(missing)
    }

    /// Builds the outbound payload.
    ///
    /// Fields are checked in wizard order so the reported field does not
    /// depend on which setter ran last.
    pub fn to_submission(&self, catalog: &ServiceCatalog) -> Result<ReservationSubmission> {
        for step in WizardStep::ALL {
            if let Some(field) = self.missing_for_step(step, catalog)? {
                return Err(ReservationError::IncompleteDraft(field));
            }
        }
        let address = self
            .address
            .as_ref()
            .ok_or(ReservationError::IncompleteDraft(DraftField::Address))?;
        let slot = self
            .slot
            .as_ref()
            .ok_or(ReservationError::IncompleteDraft(DraftField::Slot))?;
        let service = catalog.require(self.service_id.trim())?;

        let answers: HashMap<String, String> = self
            .sub_themes
            .iter()
            .filter(|(key, _)| service.question(key).is_some())
            .filter_map(|(key, value)| {
                non_blank(value).map(|value| (key.clone(), value.to_string()))
            })
            .collect();
        let service_details =
            ServiceDetails::from_answers(answers.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        Ok(ReservationSubmission {
            client_name: self.contact.name.trim().to_string(),
            client_email: self.contact.email.trim().to_string(),
            client_phone: self.contact.phone.trim().to_string(),
            address: address.place_name.clone(),
            city: address.city.clone(),
            postal_code: address.postcode.clone(),
            latitude: address.latitude(),
            longitude: address.longitude(),
            service_type: service.id.clone(),
            service_name: service.name.clone(),
            service_details,
            sub_theme_answers: answers,
            sub_services: Vec::new(),
            date: slot.date,
            period: slot.period,
            time_label: slot.label.clone(),
            estimated_price: None,
            status: ReservationStatus::Pending,
            payment_status: PaymentStatus::Pending,
            notes: self.notes.clone(),
        })
    }
}
