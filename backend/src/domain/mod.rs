//! # Domain Module
//!
//! Business logic for the court reservation system.
//!
//! ## Module Organization
//!
//! - **errors**: the reservation error taxonomy and the narrower input
//!   validation errors
//! - **models**: courts, reservations and the transaction journal types
//! - **notifier**: the sink for the human-readable status lines the core
//!   emits alongside its results
//! - **registry**: the aggregate that owns all courts and reservations and
//!   coordinates the multi-step booking operations
//! - **reporting**: aggregate summary derived from the registry state
//!
//! ## Key Rules
//!
//! - Every mutating registry operation validates first, mutates second, and
//!   appends exactly one journal entry recording its final disposition
//! - A reservation's slot is reflected in its court's schedule while the
//!   reservation is not cancelled
//! - Partial side effects are undone by best-effort rollback when a later
//!   step in the same operation fails

pub mod errors;
pub mod models;
pub mod notifier;
pub mod registry;
pub mod reporting;
