//! Typed repositories over stored collections.
//!
//! # Responsibility
//! - Provide one generic CRUD repository for every record type.
//! - Attach entity-specific filters as inherent methods and free functions.
//!
//! # Invariants
//! - Repository writes enforce `Record::validate()` before persistence.
//! - Update/delete of a missing id is a silent no-op, not an error.

pub mod collection;
pub mod goal_repo;
pub mod health_repo;
pub mod mood_repo;
pub mod reminder_repo;
pub mod todo_repo;
