#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use reservation_core::{
    config::ConfigManager,
    core::{FixedClock, ReservationDraft},
    domain::{
        Contact, MapboxAddress, Period, ReservationSubmission, ServiceCatalog, TimeSlot,
        Translations,
    },
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub static FRENCH: Lazy<Translations> = Lazy::new(Translations::french);

/// Creates an isolated data directory for each test.
pub fn temp_base_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn config_manager() -> ConfigManager {
    ConfigManager::with_base_dir(temp_base_dir()).expect("create config manager for temp dir")
}

pub fn catalog() -> ServiceCatalog {
    ServiceCatalog::new(&*FRENCH)
}

pub fn lyon_address() -> MapboxAddress {
    MapboxAddress {
        id: "address.42".into(),
        place_name: "12 rue de la République, 69002 Lyon".into(),
        center: [4.8357, 45.7640],
        address: "12 rue de la République".into(),
        city: "Lyon".into(),
        postcode: "69002".into(),
    }
}

pub fn contact() -> Contact {
    Contact::new("Camille Martin", "camille@example.fr", "0612345678")
}

/// Monday 2025-03-10, morning.
pub fn monday_morning() -> TimeSlot {
    let date = NaiveDate::from_ymd_opt(2025, 3, 10).expect("date");
    TimeSlot::new(date, Period::Morning, &*FRENCH)
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 8).expect("date")
}

pub fn fixed_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 3, 8, 9, 30, 0).unwrap())
}

/// Complete mattress-cleaning submission for `client`.
pub fn mattress_submission(client: &str) -> ReservationSubmission {
    let mut draft = ReservationDraft::new();
    draft.set_address(lyon_address());
    draft.set_service("matelas");
    draft.set_sub_theme("matressSize", "160");
    draft.set_sub_theme("numberOfMatresses", "2");
    draft.set_slot(monday_morning());
    draft.set_contact(Contact::new(client, "client@example.fr", "0600000000"));
    draft.to_submission(&catalog()).expect("complete draft")
}
