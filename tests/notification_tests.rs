mod common;

use std::sync::Arc;

use reservation_core::{
    core::NotificationFeed,
    domain::Translations,
    storage::{MemoryStore, ReservationQuery, ReservationStore},
};

fn store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new().with_clock(common::fixed_clock()))
}

fn feed_for(store: &Arc<MemoryStore>) -> NotificationFeed {
    let shared: Arc<dyn ReservationStore> = store.clone();
    NotificationFeed::subscribe(shared)
        .expect("subscribe")
        .with_clock(common::fixed_clock())
}

#[test]
fn new_reservations_are_prepended() {
    let store = store();
    let mut feed = feed_for(&store);

    store.insert(common::mattress_submission("Alice")).expect("insert");
    store.insert(common::mattress_submission("Bruno")).expect("insert");
    assert_eq!(feed.pump(), 2);

    let messages: Vec<&str> = feed
        .notifications()
        .iter()
        .map(|n| n.message.as_str())
        .collect();
    assert_eq!(
        messages,
        vec![
            "Nouvelle réservation de Bruno : Nettoyage matelas - 160cm (2 matelas)",
            "Nouvelle réservation de Alice : Nettoyage matelas - 160cm (2 matelas)",
        ]
    );
    assert_eq!(feed.unread_count(), 2);
    assert_eq!(feed.pump(), 0);
}

#[test]
fn read_state_and_clear() {
    let store = store();
    let mut feed = feed_for(&store);
    for name in ["Alice", "Bruno", "Chloé"] {
        store.insert(common::mattress_submission(name)).expect("insert");
    }
    feed.pump();

    let newest = feed.notifications()[0].id;
    assert!(feed.mark_as_read(newest));
    assert!(!feed.mark_as_read(uuid::Uuid::new_v4()));
    assert_eq!(feed.unread_count(), 2);

    feed.mark_all_as_read();
    assert_eq!(feed.unread_count(), 0);
    assert_eq!(feed.notifications().len(), 3);

    feed.clear();
    assert!(feed.notifications().is_empty());
    assert!(feed.is_open());
}

#[test]
fn limit_discards_oldest_notifications() {
    let store = store();
    let mut feed = feed_for(&store).with_limit(Some(2));
    for name in ["Alice", "Bruno", "Chloé"] {
        store.insert(common::mattress_submission(name)).expect("insert");
    }
    feed.pump();

    let clients: Vec<&str> = feed
        .notifications()
        .iter()
        .map(|n| n.reservation.client_name.as_str())
        .collect();
    assert_eq!(clients, vec!["Chloé", "Bruno"]);
}

#[test]
fn closed_feed_stops_receiving() {
    let store = store();
    let mut feed = feed_for(&store);
    assert_eq!(store.subscriber_count().expect("count"), 1);

    feed.close();
    assert!(!feed.is_open());
    assert_eq!(store.subscriber_count().expect("count"), 0);

    store.insert(common::mattress_submission("Alice")).expect("insert");
    assert_eq!(feed.pump(), 0);
    assert!(feed.notifications().is_empty());
}

#[test]
fn lost_channel_closes_the_feed_and_keeps_history() {
    let store = store();
    let mut feed = feed_for(&store);
    store.insert(common::mattress_submission("Alice")).expect("insert");
    assert_eq!(feed.pump(), 1);

    let id = feed.subscription_id().expect("open subscription");
    store.unsubscribe(id).expect("unsubscribe");
    store.insert(common::mattress_submission("Bruno")).expect("insert still succeeds");

    assert_eq!(feed.pump(), 0);
    assert!(!feed.is_open());
    assert!(feed.subscription_id().is_none());
    assert_eq!(feed.notifications().len(), 1);
    assert_eq!(feed.notifications()[0].reservation.client_name, "Alice");
}

#[test]
fn messages_use_the_feed_translations() {
    let store = store();
    let translations = Translations::french().with_entry(
        "notifications.new_reservation",
        "New booking from {client}: {service}",
    );
    let mut feed = feed_for(&store).with_translator(translations);
    store.insert(common::mattress_submission("Alice")).expect("insert");
    feed.pump();
    assert_eq!(
        feed.notifications()[0].message,
        "New booking from Alice: Nettoyage matelas - 160cm (2 matelas)"
    );
}

#[test]
fn dropping_the_feed_unsubscribes() {
    let store = store();
    {
        let _feed = feed_for(&store);
        let _other = feed_for(&store);
        assert_eq!(store.subscriber_count().expect("count"), 2);
    }
    assert_eq!(store.subscriber_count().expect("count"), 0);
}

#[test]
fn store_query_returns_newest_first() {
    let store = store();
    for name in ["Alice", "Bruno", "Chloé"] {
        store.insert(common::mattress_submission(name)).expect("insert");
    }
    let rows = store
        .query(&ReservationQuery::default().with_limit(2))
        .expect("query");
    let clients: Vec<&str> = rows.iter().map(|r| r.client_name.as_str()).collect();
    assert_eq!(clients, vec!["Chloé", "Bruno"]);
}
