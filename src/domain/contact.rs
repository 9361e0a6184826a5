use serde::{Deserialize, Serialize};

use crate::domain::common::non_blank;
use crate::errors::DraftField;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Contact {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// First blank field, checked as name, email, phone.
    pub fn missing_field(&self) -> Option<DraftField> {
        if non_blank(&self.name).is_none() {
            Some(DraftField::ContactName)
        } else if non_blank(&self.email).is_none() {
            Some(DraftField::ContactEmail)
        } else if non_blank(&self.phone).is_none() {
            Some(DraftField::ContactPhone)
        } else {
            None
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing_field().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_checks_in_order() {
        assert_eq!(Contact::default().missing_field(), Some(DraftField::ContactName));
        let contact = Contact::new("Léa", "  ", "");
        assert_eq!(contact.missing_field(), Some(DraftField::ContactEmail));
        let contact = Contact::new("Léa", "lea@example.fr", "0600000000");
        assert!(contact.is_complete());
    }
}
