//! Reservation wizard logic: step sequencing, draft and cart accumulation,
//! labels, and the notification feed.

pub mod cart;
pub mod draft;
pub mod format;
pub mod notifications;
pub mod progress;
pub mod time;
pub mod wizard;

pub use cart::{Cart, CartCheckout, CartItem};
pub use draft::ReservationDraft;
pub use format::{format_service_name, main_service_display};
pub use notifications::{Notification, NotificationFeed};
pub use progress::ProgressBar;
pub use time::{Clock, FixedClock, SystemClock};
pub use wizard::{Advance, WizardController, WizardStep};
