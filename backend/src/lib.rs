//! Bookkeeping core for the court reservation system.
//!
//! Everything here is in-memory and single-threaded: courts, time-slot
//! reservations, payment confirmation, cancellation with rollback, and
//! reporting. Frontends (the menu CLI) are thin wrappers around
//! [`domain::registry::ReservationRegistry`].

pub mod domain;

pub use domain::errors::{ReservationError, ValidationError};
pub use domain::models::court::Court;
pub use domain::models::journal::{JournalEntry, TransactionKind, TransactionStatus};
pub use domain::models::reservation::{
    PaymentRecord, PaymentStatus, Reservation, ReservationStatus,
};
pub use domain::notifier::{LogNotifier, NotificationSink, RecordingNotifier};
pub use domain::registry::{ReservationRegistry, ALL_TIME_SLOTS};
pub use domain::reporting::{generate_report, SystemReport};
