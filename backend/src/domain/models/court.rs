//! Domain model for a court and its per-date booking schedule.

use std::collections::HashMap;

use crate::domain::errors::{ReservationError, ValidationError};

/// A bookable court with an hourly rate and a schedule of taken slots.
#[derive(Debug, Clone, PartialEq)]
pub struct Court {
    pub court_id: String,
    pub hourly_rate: f64,
    /// date -> time slots already booked on that date
    pub schedule: HashMap<String, Vec<String>>,
}

impl Court {
    /// Create a court with an empty schedule.
    ///
    /// Validation failures surface as the general [`ReservationError`]
    /// kind, never as the raw [`ValidationError`].
    pub fn new(court_id: &str, hourly_rate: f64) -> Result<Self, ReservationError> {
        Self::validate(court_id, hourly_rate)
            .map_err(|e| ReservationError::Failed(format!("Invalid court data: {}", e)))?;

        Ok(Self {
            court_id: court_id.to_string(),
            hourly_rate,
            schedule: HashMap::new(),
        })
    }

    fn validate(court_id: &str, hourly_rate: f64) -> Result<(), ValidationError> {
        if court_id.is_empty() {
            return Err(ValidationError::EmptyCourtId);
        }
        if !hourly_rate.is_finite() || hourly_rate <= 0.0 {
            return Err(ValidationError::InvalidHourlyRate);
        }
        Ok(())
    }

    /// Check whether `time_slot` is still free on `date`.
    ///
    /// The only non-error return value is `Ok(true)`: a taken slot is
    /// always signalled as [`ReservationError::CourtUnavailable`], so
    /// callers wanting a non-failing check must handle the error.
    pub fn is_available(&self, date: &str, time_slot: &str) -> Result<bool, ReservationError> {
        match self.schedule.get(date) {
            Some(slots) if slots.iter().any(|s| s == time_slot) => {
                Err(ReservationError::CourtUnavailable {
                    court_id: self.court_id.clone(),
                    time_slot: time_slot.to_string(),
                })
            }
            _ => Ok(true),
        }
    }

    /// Mark `time_slot` as booked on `date`.
    pub fn book_slot(&mut self, date: &str, time_slot: &str) {
        self.schedule
            .entry(date.to_string())
            .or_default()
            .push(time_slot.to_string());
    }

    /// Remove one booking of `time_slot` on `date`.
    ///
    /// Returns whether anything was actually removed, so cancellation can
    /// track whether a rollback needs to re-add the slot.
    pub fn release_slot(&mut self, date: &str, time_slot: &str) -> bool {
        match self.schedule.get_mut(date) {
            Some(slots) => match slots.iter().position(|s| s == time_slot) {
                Some(index) => {
                    slots.remove(index);
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// Slots booked on `date`; empty when the date has no entry.
    pub fn booked_slots(&self, date: &str) -> &[String] {
        self.schedule.get(date).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_court_rejects_empty_id() {
        let err = Court::new("", 20.0).unwrap_err();
        assert_eq!(
            err,
            ReservationError::Failed(
                "Invalid court data: Court ID must be a non-empty string".to_string()
            )
        );
    }

    #[test]
    fn test_new_court_rejects_bad_rates() {
        assert!(Court::new("A", 0.0).is_err());
        assert!(Court::new("A", -5.0).is_err());
        assert!(Court::new("A", f64::NAN).is_err());
        assert!(Court::new("A", f64::INFINITY).is_err());
    }

    #[test]
    fn test_new_court_starts_with_empty_schedule() {
        let court = Court::new("A", 20.0).expect("Failed to create court");
        assert_eq!(court.court_id, "A");
        assert_eq!(court.hourly_rate, 20.0);
        assert!(court.schedule.is_empty());
    }

    #[test]
    fn test_availability_signals_taken_slot_as_error() {
        let mut court = Court::new("A", 20.0).expect("Failed to create court");
        assert_eq!(court.is_available("2023-07-01", "10:00"), Ok(true));

        court.book_slot("2023-07-01", "10:00");
        let err = court.is_available("2023-07-01", "10:00").unwrap_err();
        assert_eq!(
            err,
            ReservationError::CourtUnavailable {
                court_id: "A".to_string(),
                time_slot: "10:00".to_string(),
            }
        );

        // Other slots and other dates stay available.
        assert_eq!(court.is_available("2023-07-01", "11:00"), Ok(true));
        assert_eq!(court.is_available("2023-07-02", "10:00"), Ok(true));
    }

    #[test]
    fn test_release_slot_reports_whether_it_removed() {
        let mut court = Court::new("A", 20.0).expect("Failed to create court");
        court.book_slot("2023-07-01", "10:00");

        assert!(court.release_slot("2023-07-01", "10:00"));
        assert!(!court.release_slot("2023-07-01", "10:00"));
        assert!(!court.release_slot("2023-07-02", "10:00"));
        assert!(court.booked_slots("2023-07-01").is_empty());
    }
}
