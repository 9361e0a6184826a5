mod common;

use reservation_core::{
    config::{Config, ConfigManager},
    storage::{load_reservations, save_reservations, MemoryStore, ReservationStore},
    utils::fs::reservations_file_in,
};

#[test]
fn missing_config_yields_defaults() {
    let manager = common::config_manager();
    assert!(!manager.path().exists());
    assert_eq!(manager.load().expect("load"), Config::default());
}

#[test]
fn config_survives_a_save_and_reload() {
    let base = common::temp_base_dir();
    let manager = ConfigManager::with_base_dir(base.clone()).expect("manager");
    let config = Config {
        whatsapp_number: "33 7 11 22 33 44".into(),
        notification_limit: None,
        schedule_days_ahead: 7,
        ..Config::default()
    };
    manager.save(&config).expect("save");

    let reloaded = ConfigManager::with_base_dir(base)
        .expect("manager")
        .load()
        .expect("load");
    assert_eq!(reloaded, config);
    assert_eq!(
        reloaded.whatsapp_link().expect("link"),
        "https://wa.me/33711223344"
    );
}

#[test]
fn corrupt_config_is_a_config_error() {
    let manager = common::config_manager();
    std::fs::create_dir_all(manager.path().parent().expect("parent")).expect("dir");
    std::fs::write(manager.path(), "{ not json").expect("write");
    assert!(matches!(
        manager.load(),
        Err(reservation_core::errors::ReservationError::Config(_))
    ));
}

#[test]
fn reservation_snapshot_round_trips() {
    let base = common::temp_base_dir();
    let path = reservations_file_in(&base);
    assert!(load_reservations(&path).expect("missing file").is_empty());

    let store = MemoryStore::new().with_clock(common::fixed_clock());
    store.insert(common::mattress_submission("Alice")).expect("insert");
    save_reservations(&store.snapshot().expect("snapshot"), &path).expect("save");

    let rows = load_reservations(&path).expect("load");
    let saved = store.snapshot().expect("snapshot");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, saved[0].id);
    assert_eq!(rows[0].service_details, saved[0].service_details);
    assert_eq!(rows[0].created_at, common::fixed_clock().0);
}
