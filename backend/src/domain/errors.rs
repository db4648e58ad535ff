//! Error taxonomy for the reservation core.
//!
//! [`ReservationError`] is what callers of courts, reservations and the
//! registry see. [`ValidationError`] is the narrower kind used for raw input
//! checks; constructors translate it into [`ReservationError`] before it
//! crosses their boundary, while the payment-method check deliberately lets
//! it escape unwrapped (see `Reservation::process_payment`).

use thiserror::Error;

/// General reservation failure with an optional short error code.
///
/// Renders as `[<code>] <message>` when a code is present, otherwise just
/// the message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReservationError {
    /// The requested slot is already booked on that court and date.
    #[error("[C001] Court {court_id} is unavailable at {time_slot}")]
    CourtUnavailable { court_id: String, time_slot: String },

    /// A payment attempt was declined.
    #[error("[P001] Payment failed for reservation {reservation_id}, amount: ${amount}")]
    PaymentFailed { reservation_id: String, amount: f64 },

    /// Any other reservation failure; carries no code.
    #[error("{0}")]
    Failed(String),
}

impl ReservationError {
    /// The short error code, when this kind carries one.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            ReservationError::CourtUnavailable { .. } => Some("C001"),
            ReservationError::PaymentFailed { .. } => Some("P001"),
            ReservationError::Failed(_) => None,
        }
    }
}

/// Low-level input validation failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Court ID must be a non-empty string")]
    EmptyCourtId,
    #[error("Hourly rate must be positive")]
    InvalidHourlyRate,
    #[error("Reservation ID and player name are required")]
    MissingReservationFields,
    #[error("Invalid payment method")]
    InvalidPaymentMethod,
}
