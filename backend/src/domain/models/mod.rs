//! Domain entities: courts, reservations and the transaction journal.

pub mod court;
pub mod journal;
pub mod reservation;
