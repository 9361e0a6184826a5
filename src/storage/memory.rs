//! In-process reservation store with insert notifications.

use std::collections::HashMap;
use std::sync::mpsc::{self, Sender};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::time::{Clock, SystemClock};
use crate::domain::reservation::{Reservation, ReservationSubmission};
use crate::errors::{ReservationError, Result};

use super::{ReservationQuery, ReservationStore, Subscription};

pub struct MemoryStore {
    rows: Mutex<Vec<Reservation>>,
    subscribers: Mutex<HashMap<Uuid, Sender<Reservation>>>,
    clock: Box<dyn Clock>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// Seeds the store, e.g. from a JSON snapshot. Rows are kept oldest first.
    pub fn with_rows(rows: Vec<Reservation>) -> Self {
        Self {
            rows: Mutex::new(rows),
            subscribers: Mutex::new(HashMap::new()),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Copy of every row, oldest first.
    pub fn snapshot(&self) -> Result<Vec<Reservation>> {
        Ok(lock(&self.rows)?.clone())
    }

    pub fn subscriber_count(&self) -> Result<usize> {
        Ok(lock(&self.subscribers)?.len())
    }

    fn broadcast(&self, row: &Reservation) -> Result<()> {
        let mut subscribers = lock(&self.subscribers)?;
        let dead: Vec<Uuid> = subscribers
            .iter()
            .filter(|(_, sender)| sender.send(row.clone()).is_err())
            .map(|(id, _)| *id)
            .collect();
        for id in dead {
            warn!(subscription = %id, "dropping disconnected subscriber");
            subscribers.remove(&id);
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| ReservationError::Storage("reservation store lock poisoned".into()))
}

impl ReservationStore for MemoryStore {
    fn insert(&self, submission: ReservationSubmission) -> Result<Reservation> {
        let row = Reservation::from_submission(submission, Uuid::new_v4(), self.clock.now());
        lock(&self.rows)?.push(row.clone());
        info!(reservation = %row.id, service = %row.service_type, "reservation inserted");
        self.broadcast(&row)?;
        Ok(row)
    }

    fn query(&self, query: &ReservationQuery) -> Result<Vec<Reservation>> {
        let rows = lock(&self.rows)?;
        Ok(rows
            .iter()
            .rev()
            .filter(|row| query.matches(row))
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    fn subscribe(&self) -> Result<Subscription> {
        let (sender, receiver) = mpsc::channel();
        let id = Uuid::new_v4();
        lock(&self.subscribers)?.insert(id, sender);
        debug!(subscription = %id, "subscribed to reservation inserts");
        Ok(Subscription { id, receiver })
    }

    fn unsubscribe(&self, id: Uuid) -> Result<()> {
        if lock(&self.subscribers)?.remove(&id).is_some() {
            debug!(subscription = %id, "unsubscribed from reservation inserts");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use crate::domain::details::ServiceDetails;
    use crate::domain::reservation::{PaymentStatus, ReservationStatus};
    use crate::domain::slot::Period;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn submission(name: &str) -> ReservationSubmission {
        ReservationSubmission {
            client_name: name.into(),
            client_email: format!("{}@example.fr", name.to_lowercase()),
            client_phone: "0600000000".into(),
            address: "10 rue de la République, 69001 Lyon".into(),
            city: "Lyon".into(),
            postal_code: "69001".into(),
            latitude: 45.76,
            longitude: 4.83,
            service_type: "canape".into(),
            service_name: "Nettoyage canapé".into(),
            service_details: ServiceDetails::Seats { seats: "2".into() },
            sub_theme_answers: Default::default(),
            sub_services: Vec::new(),
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            period: Period::Morning,
            time_label: "02/06/2025 - Matin (8h - 12h)".into(),
            estimated_price: None,
            status: ReservationStatus::Pending,
            payment_status: PaymentStatus::Pending,
            notes: None,
        }
    }

    #[test]
    fn insert_stamps_row_with_clock() {
        let instant = Utc.with_ymd_and_hms(2025, 5, 30, 8, 0, 0).unwrap();
        let store = MemoryStore::new().with_clock(FixedClock(instant));
        let row = store.insert(submission("Ana")).expect("insert");
        assert_eq!(row.created_at, instant);
        assert_eq!(store.snapshot().expect("snapshot").len(), 1);
    }

    #[test]
    fn query_returns_newest_first_with_filters() {
        let store = MemoryStore::new();
        store.insert(submission("First")).expect("insert");
        let mut confirmed = submission("Second");
        confirmed.status = ReservationStatus::Confirmed;
        store.insert(confirmed).expect("insert");
        store.insert(submission("Third")).expect("insert");

        let all = store.query(&ReservationQuery::default()).expect("query");
        let names: Vec<_> = all.iter().map(|r| r.client_name.as_str()).collect();
        assert_eq!(names, ["Third", "Second", "First"]);

        let pending = store
            .query(
                &ReservationQuery::default()
                    .with_status(ReservationStatus::Pending)
                    .with_limit(1),
            )
            .expect("query");
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].client_name, "Third");
    }

    #[test]
    fn subscribers_receive_inserts_until_unsubscribed() {
        let store = MemoryStore::new();
        let subscription = store.subscribe().expect("subscribe");
        store.insert(submission("Ana")).expect("insert");
        let received = subscription.receiver.try_recv().expect("event");
        assert_eq!(received.client_name, "Ana");

        store.unsubscribe(subscription.id).expect("unsubscribe");
        store.insert(submission("Marc")).expect("insert");
        assert!(subscription.receiver.try_recv().is_err());
        assert_eq!(store.subscriber_count().expect("count"), 0);
    }

    #[test]
    fn dropped_receivers_do_not_fail_inserts() {
        let store = MemoryStore::new();
        let subscription = store.subscribe().expect("subscribe");
        drop(subscription);
        store.insert(submission("Ana")).expect("insert still succeeds");
        assert_eq!(store.subscriber_count().expect("count"), 0);
    }
}
