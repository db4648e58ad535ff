//! Domain model for a reservation and its payment lifecycle.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{ReservationError, ValidationError};
use crate::domain::models::court::Court;
use crate::domain::notifier::NotificationSink;

/// Payment methods accepted at the counter.
const VALID_PAYMENT_METHODS: [&str; 3] = ["credit", "cash", "online"];

/// Credit payments above this amount are declined.
const CREDIT_LIMIT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub fn to_string(&self) -> String {
        match self {
            ReservationStatus::Pending => "pending".to_string(),
            ReservationStatus::Confirmed => "confirmed".to_string(),
            ReservationStatus::Cancelled => "cancelled".to_string(),
        }
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            _ => Err(format!("Invalid reservation status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Successful,
    Failed,
}

impl PaymentStatus {
    pub fn to_string(&self) -> String {
        match self {
            PaymentStatus::Pending => "pending".to_string(),
            PaymentStatus::Successful => "successful".to_string(),
            PaymentStatus::Failed => "failed".to_string(),
        }
    }
}

/// Record of a single payment attempt, kept whether or not it succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub reservation_id: String,
    pub amount: f64,
    pub method: String,
    pub status: PaymentStatus,
    pub error: Option<String>,
}

/// A booking binding one player to one court, date and time slot.
///
/// The court handle is shared with the registry; both sides see the same
/// schedule.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub reservation_id: String,
    pub player_name: String,
    pub court: Rc<RefCell<Court>>,
    pub date: String,
    pub time_slot: String,
    pub status: ReservationStatus,
    /// Copied from the court's hourly rate at creation time.
    pub total_cost: f64,
}

impl Reservation {
    /// Create a reservation and book its slot on the court.
    ///
    /// Booking is a side effect of construction; there is no separate
    /// commit step. A taken slot propagates unchanged as
    /// [`ReservationError::CourtUnavailable`]; field validation failures
    /// surface as the general kind.
    pub fn new(
        reservation_id: &str,
        player_name: &str,
        court: Rc<RefCell<Court>>,
        date: &str,
        time_slot: &str,
    ) -> Result<Self, ReservationError> {
        if reservation_id.is_empty() || player_name.is_empty() {
            return Err(ReservationError::Failed(format!(
                "Invalid reservation: {}",
                ValidationError::MissingReservationFields
            )));
        }

        court.borrow().is_available(date, time_slot)?;

        let total_cost = court.borrow().hourly_rate;
        court.borrow_mut().book_slot(date, time_slot);

        Ok(Self {
            reservation_id: reservation_id.to_string(),
            player_name: player_name.to_string(),
            court,
            date: date.to_string(),
            time_slot: time_slot.to_string(),
            status: ReservationStatus::Pending,
            total_cost,
        })
    }

    /// Attempt payment and confirm the reservation.
    ///
    /// A [`PaymentRecord`] is built up front and returned on success; on
    /// failure its status and error text are filled in before the error
    /// propagates. The `Payment processing completed: <status>` notice
    /// always fires last, whatever the outcome.
    ///
    /// An unknown payment method surfaces as the narrow
    /// [`ValidationError`] directly, unlike constructor validation.
    pub fn process_payment(
        &mut self,
        payment_method: &str,
        notifier: &dyn NotificationSink,
    ) -> Result<PaymentRecord> {
        let mut payment_log = PaymentRecord {
            reservation_id: self.reservation_id.clone(),
            amount: self.total_cost,
            method: payment_method.to_string(),
            status: PaymentStatus::Pending,
            error: None,
        };

        let outcome = self.attempt_payment(payment_method);
        match &outcome {
            Ok(()) => {
                self.status = ReservationStatus::Confirmed;
                payment_log.status = PaymentStatus::Successful;
                debug!(
                    "Payment of {:.2} by {} accepted for {}",
                    payment_log.amount, payment_log.method, self.reservation_id
                );
            }
            Err(e) => {
                payment_log.status = PaymentStatus::Failed;
                payment_log.error = Some(e.to_string());
                warn!("Payment for {} failed: {}", self.reservation_id, e);
            }
        }

        notifier.notify(&format!(
            "Payment processing completed: {}",
            payment_log.status.to_string()
        ));

        outcome.map(|()| payment_log)
    }

    fn attempt_payment(&self, payment_method: &str) -> Result<()> {
        if self.status != ReservationStatus::Pending {
            return Err(ReservationError::Failed(
                "Cannot process payment for non-pending reservation".to_string(),
            )
            .into());
        }

        if !VALID_PAYMENT_METHODS.contains(&payment_method) {
            return Err(ValidationError::InvalidPaymentMethod.into());
        }

        if payment_method == "credit" && self.total_cost > CREDIT_LIMIT {
            return Err(ReservationError::PaymentFailed {
                reservation_id: self.reservation_id.clone(),
                amount: self.total_cost,
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notifier::RecordingNotifier;

    fn shared_court(court_id: &str, hourly_rate: f64) -> Rc<RefCell<Court>> {
        let court = Court::new(court_id, hourly_rate).expect("Failed to create court");
        Rc::new(RefCell::new(court))
    }

    fn pending_reservation(hourly_rate: f64) -> Reservation {
        let court = shared_court("A", hourly_rate);
        Reservation::new("R1", "John", court, "2023-07-01", "10:00")
            .expect("Failed to create reservation")
    }

    #[test]
    fn test_construction_books_the_slot() {
        let court = shared_court("A", 20.0);
        let reservation = Reservation::new("R1", "John", Rc::clone(&court), "2023-07-01", "10:00")
            .expect("Failed to create reservation");

        assert_eq!(reservation.status, ReservationStatus::Pending);
        assert_eq!(reservation.total_cost, 20.0);
        assert_eq!(court.borrow().booked_slots("2023-07-01"), ["10:00"]);
    }

    #[test]
    fn test_construction_rejects_empty_fields() {
        let court = shared_court("A", 20.0);
        let expected = ReservationError::Failed(
            "Invalid reservation: Reservation ID and player name are required".to_string(),
        );

        let err = Reservation::new("", "John", Rc::clone(&court), "2023-07-01", "10:00")
            .unwrap_err();
        assert_eq!(err, expected);

        let err = Reservation::new("R1", "", Rc::clone(&court), "2023-07-01", "10:00")
            .unwrap_err();
        assert_eq!(err, expected);

        // Nothing was booked on either failure.
        assert!(court.borrow().booked_slots("2023-07-01").is_empty());
    }

    #[test]
    fn test_double_booking_propagates_court_unavailable() {
        let court = shared_court("A", 20.0);
        let _first = Reservation::new("R1", "John", Rc::clone(&court), "2023-07-01", "10:00")
            .expect("Failed to create reservation");

        let err = Reservation::new("R2", "Jane", Rc::clone(&court), "2023-07-01", "10:00")
            .unwrap_err();
        assert_eq!(
            err,
            ReservationError::CourtUnavailable {
                court_id: "A".to_string(),
                time_slot: "10:00".to_string(),
            }
        );

        // A different slot on the same date is still bookable.
        Reservation::new("R2", "Jane", Rc::clone(&court), "2023-07-01", "11:00")
            .expect("Failed to book a different slot");
    }

    #[test]
    fn test_cash_payment_confirms_reservation() {
        let recorder = RecordingNotifier::new();
        let mut reservation = pending_reservation(20.0);

        let record = reservation
            .process_payment("cash", &recorder)
            .expect("Payment should succeed");

        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(record.status, PaymentStatus::Successful);
        assert_eq!(record.amount, 20.0);
        assert!(record.error.is_none());
        assert_eq!(
            recorder.lines(),
            vec!["Payment processing completed: successful"]
        );
    }

    #[test]
    fn test_payment_refused_when_not_pending() {
        let recorder = RecordingNotifier::new();
        let mut reservation = pending_reservation(20.0);
        reservation
            .process_payment("cash", &recorder)
            .expect("Payment should succeed");

        let err = reservation.process_payment("cash", &recorder).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ReservationError>(),
            Some(&ReservationError::Failed(
                "Cannot process payment for non-pending reservation".to_string()
            ))
        );
        // Still confirmed, never re-charged.
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert!(recorder.contains("Payment processing completed: failed"));
    }

    #[test]
    fn test_invalid_method_surfaces_narrow_kind() {
        let recorder = RecordingNotifier::new();
        let mut reservation = pending_reservation(20.0);

        let err = reservation.process_payment("cheque", &recorder).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::InvalidPaymentMethod)
        );
        assert!(err.downcast_ref::<ReservationError>().is_none());
        assert_eq!(reservation.status, ReservationStatus::Pending);
    }

    #[test]
    fn test_credit_over_limit_fails_then_cash_succeeds() {
        let recorder = RecordingNotifier::new();
        let mut reservation = pending_reservation(60.0);

        let err = reservation.process_payment("credit", &recorder).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ReservationError>(),
            Some(&ReservationError::PaymentFailed {
                reservation_id: "R1".to_string(),
                amount: 60.0,
            })
        );
        assert_eq!(reservation.status, ReservationStatus::Pending);

        // Retrying with another method succeeds at the unchanged cost.
        let record = reservation
            .process_payment("online", &recorder)
            .expect("Online payment should succeed");
        assert_eq!(record.amount, 60.0);
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(
            recorder.lines(),
            vec![
                "Payment processing completed: failed",
                "Payment processing completed: successful",
            ]
        );
    }

    #[test]
    fn test_status_string_round_trip() {
        assert_eq!(ReservationStatus::Pending.to_string(), "pending");
        assert_eq!(
            ReservationStatus::from_string("Confirmed"),
            Ok(ReservationStatus::Confirmed)
        );
        assert!(ReservationStatus::from_string("paid").is_err());
    }
}
