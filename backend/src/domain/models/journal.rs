//! Append-only transaction journal for auditing registry operations.

use serde::{Deserialize, Serialize};

/// Kind of registry operation a journal entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    AddCourt,
    MakeReservation,
    CancelReservation,
}

impl TransactionKind {
    pub fn to_string(&self) -> String {
        match self {
            TransactionKind::AddCourt => "add_court".to_string(),
            TransactionKind::MakeReservation => "make_reservation".to_string(),
            TransactionKind::CancelReservation => "cancel_reservation".to_string(),
        }
    }
}

/// Disposition of a journalled operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn to_string(&self) -> String {
        match self {
            TransactionStatus::Pending => "pending".to_string(),
            TransactionStatus::Completed => "completed".to_string(),
            TransactionStatus::Failed => "failed".to_string(),
        }
    }
}

/// One journal entry.
///
/// An entry starts `Pending` while its operation is in flight, has its
/// status set exactly once when the disposition is known, and is appended
/// to the journal exactly once. Appended entries are never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub kind: TransactionKind,
    pub entity_id: String,
    pub status: TransactionStatus,
    /// Human-readable description, present only for failed operations.
    pub error: Option<String>,
}

impl JournalEntry {
    /// Start an entry for an in-flight operation.
    pub fn pending(kind: TransactionKind, entity_id: &str) -> Self {
        Self {
            kind,
            entity_id: entity_id.to_string(),
            status: TransactionStatus::Pending,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_status_labels() {
        assert_eq!(TransactionKind::AddCourt.to_string(), "add_court");
        assert_eq!(
            TransactionKind::MakeReservation.to_string(),
            "make_reservation"
        );
        assert_eq!(
            TransactionKind::CancelReservation.to_string(),
            "cancel_reservation"
        );
        assert_eq!(TransactionStatus::Completed.to_string(), "completed");
        assert_eq!(TransactionStatus::Failed.to_string(), "failed");
    }

    #[test]
    fn test_pending_entry_has_no_error() {
        let entry = JournalEntry::pending(TransactionKind::AddCourt, "A");
        assert_eq!(entry.entity_id, "A");
        assert_eq!(entry.status, TransactionStatus::Pending);
        assert!(entry.error.is_none());
    }
}
