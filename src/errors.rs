use std::fmt;
use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

use crate::core::wizard::WizardStep;

/// Names a draft field that must be filled before the wizard can move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    Address,
    Service,
    SubTheme(String),
    Slot,
    ContactName,
    ContactEmail,
    ContactPhone,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftField::Address => f.write_str("address"),
            DraftField::Service => f.write_str("service"),
            DraftField::SubTheme(key) => write!(f, "sub-theme `{key}`"),
            DraftField::Slot => f.write_str("time slot"),
            DraftField::ContactName => f.write_str("contact name"),
            DraftField::ContactEmail => f.write_str("contact email"),
            DraftField::ContactPhone => f.write_str("contact phone"),
        }
    }
}

/// Error type shared by the wizard, cart, store and configuration layers.
///
/// Every variant is recoverable; callers surface them as inline messages.
#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("Cannot leave step `{step}`: {field} is required")]
    Validation { step: WizardStep, field: DraftField },
    #[error("Reservation is incomplete: {0} is missing")]
    IncompleteDraft(DraftField),
    #[error("Already at the first step")]
    Boundary,
    #[error("Cannot jump from `{from}` to `{to}`")]
    InvalidTransition { from: WizardStep, to: WizardStep },
    #[error("Unknown service: {0}")]
    UnknownService(String),
    #[error("Cart item not found: {0}")]
    ItemNotFound(Uuid),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Checkout requires {0}")]
    MissingCheckoutField(&'static str),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReservationError {
    /// Returns the offending field for validation-style failures.
    pub fn field(&self) -> Option<&DraftField> {
        match self {
            ReservationError::Validation { field, .. }
            | ReservationError::IncompleteDraft(field) => Some(field),
            _ => None,
        }
    }
}

pub type Result<T> = StdResult<T, ReservationError>;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ReservationError),
    #[error("Prompt failed: {0}")]
    Prompt(String),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Scripted input exhausted")]
    ScriptExhausted,
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        CliError::Prompt(err.to_string())
    }
}

impl From<std::io::Error> for ReservationError {
    fn from(err: std::io::Error) -> Self {
        ReservationError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ReservationError {
    fn from(err: serde_json::Error) -> Self {
        ReservationError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_step_and_field() {
        let err = ReservationError::Validation {
            step: WizardStep::Address,
            field: DraftField::Address,
        };
        assert_eq!(err.to_string(), "Cannot leave step `address`: address is required");
        assert_eq!(err.field(), Some(&DraftField::Address));
    }

    #[test]
    fn io_errors_map_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ReservationError::from(io);
        assert!(matches!(err, ReservationError::Storage(message) if message.contains("gone")));
    }
}
