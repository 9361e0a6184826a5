pub mod json_snapshot;
pub mod memory;

use std::sync::mpsc::Receiver;

use uuid::Uuid;

use crate::domain::reservation::{Reservation, ReservationStatus, ReservationSubmission};
use crate::errors::Result;

/// Live feed of inserted reservations. Hand the id back to
/// [`ReservationStore::unsubscribe`] when the consumer goes away.
#[derive(Debug)]
pub struct Subscription {
    pub id: Uuid,
    pub receiver: Receiver<Reservation>,
}

/// Filter for [`ReservationStore::query`]. Results are newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationQuery {
    pub status: Option<ReservationStatus>,
    pub limit: Option<usize>,
}

impl ReservationQuery {
    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, reservation: &Reservation) -> bool {
        self.status
            .map_or(true, |status| reservation.status == status)
    }
}

/// Backend holding the reservations collection.
pub trait ReservationStore: Send + Sync {
    fn insert(&self, submission: ReservationSubmission) -> Result<Reservation>;
    fn query(&self, query: &ReservationQuery) -> Result<Vec<Reservation>>;
    /// Registers a channel that receives every subsequently inserted row.
    fn subscribe(&self) -> Result<Subscription>;
    /// Releases a subscription. Unknown ids are ignored.
    fn unsubscribe(&self, id: Uuid) -> Result<()>;
}

pub use json_snapshot::{load_reservations, save_reservations};
pub use memory::MemoryStore;
