//! Plain data types shared by the wizard, cart and store. No I/O.

pub mod address;
pub mod common;
pub mod contact;
pub mod details;
pub mod i18n;
pub mod reservation;
pub mod service;
pub mod slot;

pub use address::{Geocoder, ManualGeocoder, MapboxAddress};
pub use common::{Displayable, Identifiable, NamedEntity, Priced};
pub use contact::Contact;
pub use details::{Frequency, ServiceDetails};
pub use i18n::{Translate, Translations};
pub use reservation::{
    PaymentStatus, Reservation, ReservationStatus, ReservationSubmission, SubService,
};
pub use service::{QuestionKind, Service, ServiceCatalog, SubThemeQuestion};
pub use slot::{available_slots, Period, TimeSlot};
