//! Record types for tracked health data.
//!
//! # Responsibility
//! - Define the value records persisted in each collection.
//! - Carry display metadata for enumerations consumed by UI surfaces.
//!
//! # Invariants
//! - Every record is identified by a non-empty string id.
//! - Every timestamp is Unix epoch milliseconds (UTC).
//! - Records are replaced whole on update; there is no soft delete.

pub mod goal;
pub mod habit;
pub mod habit_notes;
pub mod health;
pub mod mood;
pub mod reminder;
pub mod todo;
pub mod validation;

use uuid::Uuid;

/// String identifier shared by every record type.
pub type RecordId = String;

/// Generates a fresh record id (UUID v4 text).
pub fn new_record_id() -> RecordId {
    Uuid::new_v4().to_string()
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
