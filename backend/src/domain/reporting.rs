//! Aggregate reporting over the registry's current state.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;

use crate::domain::errors::ReservationError;
use crate::domain::models::reservation::ReservationStatus;
use crate::domain::registry::ReservationRegistry;

/// Snapshot summary of the registry.
///
/// Revenue counts confirmed reservations only; pending and cancelled ones
/// contribute nothing.
#[derive(Debug, Clone, Serialize)]
pub struct SystemReport {
    pub generated_at: DateTime<Utc>,
    pub total_courts: usize,
    pub total_reservations: usize,
    pub confirmed_reservations: usize,
    pub total_revenue: f64,
}

/// Summarise the registry.
///
/// Fails when there is nothing to report. Emits a success or failure
/// notice, then `Report generation process completed` regardless of
/// outcome.
pub fn generate_report(registry: &ReservationRegistry) -> Result<SystemReport> {
    let outcome = build_report(registry);

    match &outcome {
        Ok(report) => {
            info!(
                "Report generated: {} reservations, revenue {:.2}",
                report.total_reservations, report.total_revenue
            );
            registry.notifier().notify("Report generated successfully");
        }
        Err(e) => {
            registry
                .notifier()
                .notify(&format!("Report generation failed: {}", e));
        }
    }
    registry
        .notifier()
        .notify("Report generation process completed");

    outcome.map_err(Into::into)
}

fn build_report(registry: &ReservationRegistry) -> Result<SystemReport, ReservationError> {
    if registry.reservation_count() == 0 {
        return Err(ReservationError::Failed(
            "No reservations to report".to_string(),
        ));
    }

    let mut confirmed_reservations = 0;
    let mut total_revenue = 0.0;
    for reservation in registry.reservations() {
        if reservation.status == ReservationStatus::Confirmed {
            confirmed_reservations += 1;
            total_revenue += reservation.total_cost;
        }
    }

    Ok(SystemReport {
        generated_at: Utc::now(),
        total_courts: registry.court_count(),
        total_reservations: registry.reservation_count(),
        confirmed_reservations,
        total_revenue,
    })
}
