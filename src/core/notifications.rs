//! Read/unread list of newly inserted reservations.
//!
//! The feed owns a [`Subscription`] on a [`ReservationStore`] and folds the
//! rows it receives into an in-memory list, newest first. Dropping or closing
//! the feed releases the subscription.

use std::sync::mpsc::TryRecvError;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::format::main_service_display;
use crate::core::time::{Clock, SystemClock};
use crate::domain::common::Identifiable;
use crate::domain::i18n::{Translate, Translations};
use crate::domain::reservation::Reservation;
use crate::errors::Result;
use crate::storage::{ReservationStore, Subscription};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub message: String,
    pub is_read: bool,
    pub timestamp: DateTime<Utc>,
    pub reservation: Reservation,
}

impl Notification {
    /// The message comes from the `notifications.new_reservation` template,
    /// with `{client}` and `{service}` filled in.
    pub fn for_reservation(
        reservation: Reservation,
        timestamp: DateTime<Utc>,
        translator: &dyn Translate,
    ) -> Self {
        let message = translator
            .translate("notifications.new_reservation")
            .replace("{client}", &reservation.client_name)
            .replace("{service}", &main_service_display(&reservation));
        Self {
            id: Uuid::new_v4(),
            reservation_id: reservation.id(),
            message,
            is_read: false,
            timestamp,
            reservation,
        }
    }
}

impl Identifiable for Notification {
    fn id(&self) -> Uuid {
        self.id
    }
}

pub struct NotificationFeed {
    store: Arc<dyn ReservationStore>,
    subscription: Option<Subscription>,
    notifications: Vec<Notification>,
    limit: Option<usize>,
    clock: Box<dyn Clock>,
    translator: Box<dyn Translate>,
}

impl NotificationFeed {
    /// Starts listening for inserts on `store`.
    pub fn subscribe(store: Arc<dyn ReservationStore>) -> Result<Self> {
        let subscription = store.subscribe()?;
        debug!(subscription = %subscription.id, "notification feed opened");
        Ok(Self {
            store,
            subscription: Some(subscription),
            notifications: Vec::new(),
            limit: None,
            clock: Box::new(SystemClock),
            translator: Box::new(Translations::french()),
        })
    }

    /// Keeps at most `limit` notifications, discarding the oldest.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_translator(mut self, translator: impl Translate + 'static) -> Self {
        self.translator = Box::new(translator);
        self
    }

    /// Id of the live store subscription, `None` once closed.
    pub fn subscription_id(&self) -> Option<Uuid> {
        self.subscription.as_ref().map(|subscription| subscription.id)
    }

    pub fn is_open(&self) -> bool {
        self.subscription.is_some()
    }

    /// Drains pending events without blocking. Returns how many were received.
    pub fn pump(&mut self) -> usize {
        let Some(subscription) = self.subscription.as_ref() else {
            return 0;
        };
        let mut received = Vec::new();
        let mut disconnected = false;
        loop {
            match subscription.receiver.try_recv() {
                Ok(reservation) => received.push(reservation),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }
        if disconnected {
            warn!("reservation channel disconnected, closing notification feed");
            self.close();
        }

        let count = received.len();
        for reservation in received {
            let notification = Notification::for_reservation(
                reservation,
                self.clock.now(),
                self.translator.as_ref(),
            );
            self.notifications.insert(0, notification);
        }
        if let Some(limit) = self.limit {
            self.notifications.truncate(limit);
        }
        count
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    /// Returns `false` when no notification has this id.
    pub fn mark_as_read(&mut self, id: Uuid) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.is_read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_as_read(&mut self) {
        for notification in &mut self.notifications {
            notification.is_read = true;
        }
    }

    pub fn clear(&mut self) {
        self.notifications.clear();
    }

    /// Releases the store subscription. Already received notifications stay.
    pub fn close(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            if let Err(err) = self.store.unsubscribe(subscription.id) {
                warn!(subscription = %subscription.id, error = %err, "failed to unsubscribe");
            } else {
                debug!(subscription = %subscription.id, "notification feed closed");
            }
        }
    }
}

impl Drop for NotificationFeed {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for NotificationFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationFeed")
            .field("open", &self.is_open())
            .field("notifications", &self.notifications.len())
            .field("limit", &self.limit)
            .finish()
    }
}
