//! Multi-item checkout accumulator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::format::format_service_name;
use crate::core::time::{Clock, SystemClock};
use crate::domain::address::MapboxAddress;
use crate::domain::common::{Displayable, Identifiable, Priced};
use crate::domain::contact::Contact;
use crate::domain::details::ServiceDetails;
use crate::domain::reservation::{
    PaymentStatus, ReservationStatus, ReservationSubmission, SubService,
};
use crate::domain::service::Service;
use crate::domain::slot::TimeSlot;
use crate::errors::{ReservationError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: Uuid,
    pub service: Service,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_data: Option<ServiceDetails>,
    pub estimated_price: f64,
    pub timestamp: DateTime<Utc>,
}

impl Identifiable for CartItem {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Priced for CartItem {
    fn price(&self) -> f64 {
        self.estimated_price
    }
}

impl Displayable for CartItem {
    fn display_label(&self) -> String {
        match &self.form_data {
            Some(details) => format_service_name(&self.service.name, details),
            None => self.service.name.clone(),
        }
    }
}

/// Items keep insertion order; `total_price` always equals the sum of item prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    id: Uuid,
    session_id: String,
    items: Vec<CartItem>,
    total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<MapboxAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    contact_info: Option<Contact>,
}

impl Cart {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id: session_id.into(),
            items: Vec::new(),
            total_price: 0.0,
            address: None,
            contact_info: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    pub fn address(&self) -> Option<&MapboxAddress> {
        self.address.as_ref()
    }

    pub fn contact_info(&self) -> Option<&Contact> {
        self.contact_info.as_ref()
    }

    /// Appends an item stamped with the system clock and returns its id.
    pub fn add_item(
        &mut self,
        service: Service,
        form_data: Option<ServiceDetails>,
        estimated_price: f64,
    ) -> Uuid {
        self.add_item_with_clock(service, form_data, estimated_price, &SystemClock)
    }

    pub fn add_item_with_clock(
        &mut self,
        service: Service,
        form_data: Option<ServiceDetails>,
        estimated_price: f64,
        clock: &dyn Clock,
    ) -> Uuid {
        let item = CartItem {
            id: Uuid::new_v4(),
            service,
            form_data,
            estimated_price,
            timestamp: clock.now(),
        };
        let id = item.id;
        debug!(
            cart = %self.id,
            item = %id,
            service = %item.service.id,
            estimated_price,
            "cart item added"
        );
        self.items.push(item);
        self.recompute_total();
        id
    }

    pub fn remove_item(&mut self, id: Uuid) -> Result<CartItem> {
        let position = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(ReservationError::ItemNotFound(id))?;
        let removed = self.items.remove(position);
        self.recompute_total();
        debug!(cart = %self.id, item = %id, "cart item removed");
        Ok(removed)
    }

    pub fn set_address(&mut self, address: MapboxAddress) {
        self.address = Some(address);
    }

    pub fn set_contact_info(&mut self, contact: Contact) {
        self.contact_info = Some(contact);
    }

    /// Consumes the cart once it has items, an address and complete contact info.
    pub fn checkout(self) -> Result<CartCheckout> {
        if self.items.is_empty() {
            return Err(ReservationError::EmptyCart);
        }
        let address = self
            .address
            .ok_or(ReservationError::MissingCheckoutField("an address"))?;
        let contact = self
            .contact_info
            .filter(Contact::is_complete)
            .ok_or(ReservationError::MissingCheckoutField("contact information"))?;
        info!(
            cart = %self.id,
            items = self.items.len(),
            total = self.total_price,
            "cart checked out"
        );
        Ok(CartCheckout {
            cart_id: self.id,
            session_id: self.session_id,
            items: self.items,
            total_price: self.total_price,
            address,
            contact,
        })
    }

    fn recompute_total(&mut self) {
        self.total_price = self.items.iter().map(Priced::price).sum();
    }
}

/// A validated cart, ready to become one reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartCheckout {
    pub cart_id: Uuid,
    pub session_id: String,
    pub items: Vec<CartItem>,
    pub total_price: f64,
    pub address: MapboxAddress,
    pub contact: Contact,
}

impl CartCheckout {
    /// One reservation covering every item; the first item is the main service.
    pub fn to_submission(&self, slot: &TimeSlot) -> Result<ReservationSubmission> {
        let main = self.items.first().ok_or(ReservationError::EmptyCart)?;
        Ok(ReservationSubmission {
            client_name: self.contact.name.trim().to_string(),
            client_email: self.contact.email.trim().to_string(),
            client_phone: self.contact.phone.trim().to_string(),
            address: self.address.place_name.clone(),
            city: self.address.city.clone(),
            postal_code: self.address.postcode.clone(),
            latitude: self.address.latitude(),
            longitude: self.address.longitude(),
            service_type: main.service.id.clone(),
            service_name: main.service.name.clone(),
            service_details: main.form_data.clone().unwrap_or_default(),
            sub_theme_answers: Default::default(),
            sub_services: self
                .items
                .iter()
                .map(|item| SubService {
                    name: item.service.name.clone(),
                    form_data: item.form_data.clone().unwrap_or_default(),
                })
                .collect(),
            date: slot.date,
            period: slot.period,
            time_label: slot.label.clone(),
            estimated_price: Some(self.total_price),
            status: ReservationStatus::Pending,
            payment_status: PaymentStatus::Pending,
            notes: None,
        })
    }
}
