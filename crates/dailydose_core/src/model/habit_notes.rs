//! Legacy habit encoding inside `HealthEntry.notes`.
//!
//! Older data stores habit completions as plain entries whose notes read
//! `"HABIT: {title} - {description} ({category})"`. The parse is
//! best-effort: titles or descriptions containing `" - "` or `" ("` split in
//! the wrong place. New writes use `EntryDetail::HabitCompletion` instead.

use crate::model::habit::{HabitDetail, DEFAULT_HABIT_CATEGORY};

pub const HABIT_NOTES_PREFIX: &str = "HABIT: ";
const TITLE_SEPARATOR: &str = " - ";
const CATEGORY_OPEN: &str = " (";
const CATEGORY_CLOSE: &str = ")";

/// Whether `notes` use the legacy habit convention.
///
/// Matches the bare `"HABIT:"` marker, with or without the trailing space.
pub fn is_legacy_habit_notes(notes: &str) -> bool {
    notes.starts_with(HABIT_NOTES_PREFIX.trim_end())
}

/// Encodes habit fields into the legacy notes string.
pub fn encode_habit_notes(detail: &HabitDetail) -> String {
    format!(
        "{HABIT_NOTES_PREFIX}{}{TITLE_SEPARATOR}{}{CATEGORY_OPEN}{}{CATEGORY_CLOSE}",
        detail.title, detail.description, detail.category
    )
}

/// Decodes the legacy notes string into habit fields.
///
/// Every split uses the first occurrence of its delimiter, and a missing
/// delimiter falls back to the whole remaining text.
pub fn decode_habit_notes(notes: &str) -> HabitDetail {
    let info = after_first(notes, HABIT_NOTES_PREFIX).trim();

    let title = before_first(info, TITLE_SEPARATOR).trim();

    let description = if info.contains(TITLE_SEPARATOR) {
        before_first(after_first(info, TITLE_SEPARATOR), CATEGORY_OPEN).trim()
    } else {
        ""
    };

    let category = if info.contains(CATEGORY_OPEN) {
        before_first(after_first(info, CATEGORY_OPEN), CATEGORY_CLOSE).trim()
    } else {
        DEFAULT_HABIT_CATEGORY
    };

    HabitDetail::new(title, description, category)
}

fn after_first<'a>(text: &'a str, delimiter: &str) -> &'a str {
    text.split_once(delimiter).map_or(text, |(_, rest)| rest)
}

fn before_first<'a>(text: &'a str, delimiter: &str) -> &'a str {
    text.split_once(delimiter).map_or(text, |(head, _)| head)
}
