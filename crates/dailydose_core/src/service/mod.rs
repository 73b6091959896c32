//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep UI layers decoupled from storage details.

pub mod habit_service;
pub mod hydration_service;
pub mod reminder_service;
