//! Reservation rows as stored by the backend, and the payload the wizard sends.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};
use crate::domain::details::ServiceDetails;
use crate::domain::slot::Period;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::InProgress => "in_progress",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
}

/// Secondary service booked alongside the main one (cart checkouts).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubService {
    pub name: String,
    #[serde(default)]
    pub form_data: ServiceDetails,
}

/// Outbound payload produced by a completed draft or a cart checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationSubmission {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub service_type: String,
    pub service_name: String,
    pub service_details: ServiceDetails,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub sub_theme_answers: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_services: Vec<SubService>,
    pub date: NaiveDate,
    pub period: Period,
    pub time_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_price: Option<f64>,
    pub status: ReservationStatus,
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A reservation row as delivered by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub service_type: String,
    pub service_name: String,
    #[serde(default)]
    pub service_details: ServiceDetails,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub sub_theme_answers: HashMap<String, String>,
    #[serde(default)]
    pub sub_services: Vec<SubService>,
    pub date: NaiveDate,
    /// Absent on rows written before the period was recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    pub time_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f32>,
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_price: Option<f64>,
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Materialises a stored row from a submission.
    pub fn from_submission(
        submission: ReservationSubmission,
        id: Uuid,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            client_name: submission.client_name,
            client_email: submission.client_email,
            client_phone: submission.client_phone,
            address: submission.address,
            city: submission.city,
            postal_code: submission.postal_code,
            latitude: submission.latitude,
            longitude: submission.longitude,
            service_type: submission.service_type,
            service_name: submission.service_name,
            service_details: submission.service_details,
            sub_theme_answers: submission.sub_theme_answers,
            sub_services: submission.sub_services,
            date: submission.date,
            period: Some(submission.period),
            time_label: submission.time_label,
            duration_hours: None,
            status: submission.status,
            estimated_price: submission.estimated_price,
            final_price: None,
            payment_status: submission.payment_status,
            notes: submission.notes,
            created_at,
        }
    }
}

impl Identifiable for Reservation {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Reservation {
    fn display_label(&self) -> String {
        format!("{} - {} ({})", self.client_name, self.service_name, self.time_label)
    }
}
