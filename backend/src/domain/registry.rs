//! The reservation registry: owns every court and reservation and
//! coordinates the multi-step booking operations.
//!
//! Each mutating operation validates its preconditions, applies the state
//! change, appends exactly one journal entry recording the final
//! disposition, and undoes partial side effects through best-effort
//! rollback when a later step fails. Single-threaded by design: nothing
//! here is safe for interleaved callers without external mutual exclusion.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::Result;
use log::{info, warn};

use crate::domain::errors::ReservationError;
use crate::domain::models::court::Court;
use crate::domain::models::journal::{JournalEntry, TransactionKind, TransactionStatus};
use crate::domain::models::reservation::{PaymentRecord, Reservation, ReservationStatus};
use crate::domain::notifier::{LogNotifier, NotificationSink};

/// Reference slots offered on every court for every date.
pub const ALL_TIME_SLOTS: [&str; 10] = [
    "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00", "18:00",
];

pub struct ReservationRegistry {
    courts: HashMap<String, Rc<RefCell<Court>>>,
    reservations: HashMap<String, Reservation>,
    journal: Vec<JournalEntry>,
    next_reservation_seq: u64,
    notifier: Rc<dyn NotificationSink>,
}

impl Default for ReservationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationRegistry {
    /// Create an empty registry whose notices go to the `log` facade.
    pub fn new() -> Self {
        Self::with_notifier(Rc::new(LogNotifier))
    }

    /// Create an empty registry with an injected notification sink.
    pub fn with_notifier(notifier: Rc<dyn NotificationSink>) -> Self {
        Self {
            courts: HashMap::new(),
            reservations: HashMap::new(),
            journal: Vec::new(),
            next_reservation_seq: 1,
            notifier,
        }
    }

    /// Register a new court.
    ///
    /// Duplicate identifiers and court validation failures both surface as
    /// [`ReservationError`]; the journal entry reflects the actual outcome
    /// either way, and the `Court transaction: <status>` notice fires last
    /// on every path.
    pub fn add_court(&mut self, court_id: &str, hourly_rate: f64) -> Result<Rc<RefCell<Court>>> {
        info!("Adding court {} at {:.2}/hr", court_id, hourly_rate);
        let mut entry = JournalEntry::pending(TransactionKind::AddCourt, court_id);

        let outcome = if self.courts.contains_key(court_id) {
            Err(ReservationError::Failed(format!(
                "Court {} already exists",
                court_id
            )))
        } else {
            Court::new(court_id, hourly_rate)
        };

        let result = match outcome {
            Ok(court) => {
                let court = Rc::new(RefCell::new(court));
                self.courts.insert(court_id.to_string(), Rc::clone(&court));
                entry.status = TransactionStatus::Completed;
                Ok(court)
            }
            Err(e) => {
                warn!("Failed to add court {}: {}", court_id, e);
                entry.status = TransactionStatus::Failed;
                entry.error = Some(e.to_string());
                Err(e.into())
            }
        };

        self.finish_transaction(entry, "Court transaction");
        result
    }

    /// Book a slot for a player, storing the new reservation.
    ///
    /// Construction failures, including [`ReservationError::CourtUnavailable`],
    /// propagate unchanged. Returns a clone of the stored reservation.
    pub fn make_reservation(
        &mut self,
        reservation_id: &str,
        player_name: &str,
        court_id: &str,
        date: &str,
        time_slot: &str,
    ) -> Result<Reservation> {
        info!(
            "Making reservation {} for {} on court {} ({} {})",
            reservation_id, player_name, court_id, date, time_slot
        );
        let mut entry = JournalEntry::pending(TransactionKind::MakeReservation, reservation_id);

        let outcome = if self.reservations.contains_key(reservation_id) {
            Err(ReservationError::Failed(format!(
                "Reservation {} already exists",
                reservation_id
            )))
        } else {
            match self.courts.get(court_id) {
                None => Err(ReservationError::Failed(format!(
                    "Court {} does not exist",
                    court_id
                ))),
                Some(court) => {
                    Reservation::new(reservation_id, player_name, Rc::clone(court), date, time_slot)
                }
            }
        };

        let result = match outcome {
            Ok(reservation) => {
                self.reservations
                    .insert(reservation_id.to_string(), reservation.clone());
                entry.status = TransactionStatus::Completed;
                Ok(reservation)
            }
            Err(e) => {
                warn!("Failed to make reservation {}: {}", reservation_id, e);
                entry.status = TransactionStatus::Failed;
                entry.error = Some(e.to_string());
                Err(e.into())
            }
        };

        self.finish_transaction(entry, "Reservation transaction");
        result
    }

    /// Cancel a reservation, freeing its slot on the court schedule.
    ///
    /// If a step after the schedule mutation fails, the mutation is undone
    /// by [`Self::rollback_cancellation`] before the journal entry is
    /// appended; rollback never masks the primary failure. Cancelling an
    /// unknown identifier fails without touching any schedule.
    pub fn cancel_reservation(&mut self, reservation_id: &str) -> Result<bool> {
        info!("Cancelling reservation {}", reservation_id);
        let mut entry = JournalEntry::pending(TransactionKind::CancelReservation, reservation_id);
        let mut court_updated = false;

        let outcome = match self.reservations.get_mut(reservation_id) {
            None => Err(ReservationError::Failed(format!(
                "Reservation {} does not exist",
                reservation_id
            ))),
            Some(reservation) => {
                court_updated = reservation
                    .court
                    .borrow_mut()
                    .release_slot(&reservation.date, &reservation.time_slot);
                reservation.status = ReservationStatus::Cancelled;
                Ok(())
            }
        };

        let result = match outcome {
            Ok(()) => {
                entry.status = TransactionStatus::Completed;
                Ok(true)
            }
            Err(e) => {
                warn!("Failed to cancel reservation {}: {}", reservation_id, e);
                entry.status = TransactionStatus::Failed;
                entry.error = Some(e.to_string());
                if court_updated {
                    self.rollback_cancellation(reservation_id);
                }
                Err(e.into())
            }
        };

        self.finish_transaction(entry, "Cancellation transaction");
        result
    }

    /// Best-effort compensation for a failed cancellation: re-book the
    /// slot and restore the reservation to confirmed.
    ///
    /// Failures in here are logged and swallowed so a secondary failure
    /// can never replace the primary one being reported.
    pub(crate) fn rollback_cancellation(&mut self, reservation_id: &str) {
        let outcome = match self.reservations.get_mut(reservation_id) {
            None => Err(ReservationError::Failed(format!(
                "Reservation {} is gone, nothing to roll back",
                reservation_id
            ))),
            Some(reservation) => {
                reservation
                    .court
                    .borrow_mut()
                    .book_slot(&reservation.date, &reservation.time_slot);
                reservation.status = ReservationStatus::Confirmed;
                Ok(())
            }
        };

        if let Err(e) = outcome {
            warn!("Rollback error: {}", e);
            self.notifier.notify(&format!("Rollback error: {}", e));
        }
        self.notifier.notify("Rollback operation completed");
    }

    /// Free slots on `court_id` for `date`, in reference order.
    pub fn available_time_slots(&self, court_id: &str, date: &str) -> Result<Vec<String>> {
        let court = match self.courts.get(court_id) {
            Some(court) => court,
            None => {
                let e = ReservationError::Failed(format!("Court {} does not exist", court_id));
                self.notifier
                    .notify(&format!("Error checking availability: {}", e));
                return Err(e.into());
            }
        };

        let court = court.borrow();
        let booked = court.booked_slots(date);
        Ok(ALL_TIME_SLOTS
            .iter()
            .filter(|slot| !booked.iter().any(|b| b == *slot))
            .map(|slot| slot.to_string())
            .collect())
    }

    /// Run payment for a stored reservation through the registry's notifier.
    pub fn process_payment(
        &mut self,
        reservation_id: &str,
        payment_method: &str,
    ) -> Result<PaymentRecord> {
        let reservation = self.reservations.get_mut(reservation_id).ok_or_else(|| {
            ReservationError::Failed(format!("Reservation {} does not exist", reservation_id))
        })?;
        reservation.process_payment(payment_method, self.notifier.as_ref())
    }

    /// Mint the next `R<n>` identifier for callers that want one.
    ///
    /// Uniqueness within the registry is the only requirement the core
    /// enforces; callers are free to supply their own identifiers instead.
    pub fn mint_reservation_id(&mut self) -> String {
        let id = format!("R{}", self.next_reservation_seq);
        self.next_reservation_seq += 1;
        id
    }

    pub fn court(&self, court_id: &str) -> Option<&Rc<RefCell<Court>>> {
        self.courts.get(court_id)
    }

    pub fn courts(&self) -> impl Iterator<Item = &Rc<RefCell<Court>>> {
        self.courts.values()
    }

    pub fn court_count(&self) -> usize {
        self.courts.len()
    }

    pub fn reservation(&self, reservation_id: &str) -> Option<&Reservation> {
        self.reservations.get(reservation_id)
    }

    pub fn reservation_mut(&mut self, reservation_id: &str) -> Option<&mut Reservation> {
        self.reservations.get_mut(reservation_id)
    }

    pub fn reservations(&self) -> impl Iterator<Item = &Reservation> {
        self.reservations.values()
    }

    pub fn reservation_count(&self) -> usize {
        self.reservations.len()
    }

    /// Reservations for a player, matched case-insensitively.
    pub fn reservations_for_player(&self, player_name: &str) -> Vec<&Reservation> {
        let needle = player_name.to_lowercase();
        self.reservations
            .values()
            .filter(|r| r.player_name.to_lowercase() == needle)
            .collect()
    }

    pub fn journal(&self) -> &[JournalEntry] {
        &self.journal
    }

    pub fn notifier(&self) -> &dyn NotificationSink {
        self.notifier.as_ref()
    }

    /// Append the entry and emit the closing `<label>: <status>` notice.
    fn finish_transaction(&mut self, entry: JournalEntry, label: &str) {
        let status = entry.status;
        self.journal.push(entry);
        self.notifier
            .notify(&format!("{}: {}", label, status.to_string()));
    }
}
