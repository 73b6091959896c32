//! Health metric entries.
//!
//! # Responsibility
//! - Define the `HealthEntry` record and the `HealthType` catalogue.
//! - Distinguish plain metrics from habit completions structurally.
//!
//! # Invariants
//! - `value` is finite.
//! - An entry is a habit completion when `detail` says so, or when legacy
//!   `notes` carry the `"HABIT:"` prefix.

use crate::model::habit::HabitDetail;
use crate::model::habit_notes::{decode_habit_notes, is_legacy_habit_notes};
use crate::model::validation::{require_finite, require_id, ValidationError};
use crate::model::{new_record_id, RecordId};
use serde::{Deserialize, Serialize};

/// Kind of tracked metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthType {
    Weight,
    Height,
    BloodPressure,
    HeartRate,
    BloodSugar,
    Temperature,
    Sleep,
    Steps,
    Water,
    Exercise,
    Habit,
}

impl HealthType {
    pub const ALL: [HealthType; 11] = [
        HealthType::Weight,
        HealthType::Height,
        HealthType::BloodPressure,
        HealthType::HeartRate,
        HealthType::BloodSugar,
        HealthType::Temperature,
        HealthType::Sleep,
        HealthType::Steps,
        HealthType::Water,
        HealthType::Exercise,
        HealthType::Habit,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Weight => "Weight",
            Self::Height => "Height",
            Self::BloodPressure => "Blood Pressure",
            Self::HeartRate => "Heart Rate",
            Self::BloodSugar => "Blood Sugar",
            Self::Temperature => "Temperature",
            Self::Sleep => "Sleep",
            Self::Steps => "Steps",
            Self::Water => "Water Intake",
            Self::Exercise => "Exercise",
            Self::Habit => "Habit",
        }
    }

    /// Unit used when the caller does not supply one.
    pub fn default_unit(self) -> &'static str {
        match self {
            Self::Weight => "kg",
            Self::Height => "cm",
            Self::BloodPressure => "mmHg",
            Self::HeartRate => "bpm",
            Self::BloodSugar => "mg/dL",
            Self::Temperature => "°C",
            Self::Sleep => "hours",
            Self::Steps => "count",
            Self::Water => "L",
            Self::Exercise => "minutes",
            Self::Habit => "habit",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Weight => "⚖️",
            Self::Height => "📏",
            Self::BloodPressure => "🩸",
            Self::HeartRate => "❤️",
            Self::BloodSugar => "🍯",
            Self::Temperature => "🌡️",
            Self::Sleep => "😴",
            Self::Steps => "👟",
            Self::Water => "💧",
            Self::Exercise => "🏃",
            Self::Habit => "⭐",
        }
    }
}

/// Structured payload of a health entry.
///
/// Stored JSON without a `detail` field decodes as `Metric`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryDetail {
    /// Plain measurement; `value` and `unit` carry the data.
    #[default]
    Metric,
    /// Completion of a user-defined habit.
    HabitCompletion(HabitDetail),
}

/// One logged measurement or habit completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthEntry {
    pub id: RecordId,
    /// Serialized as `type` to match the collection schema.
    #[serde(rename = "type")]
    pub kind: HealthType,
    pub value: f64,
    pub unit: String,
    /// Epoch milliseconds.
    pub recorded_at: i64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub detail: EntryDetail,
}

impl HealthEntry {
    /// Creates a metric entry with a fresh id and the type's default unit.
    pub fn metric(kind: HealthType, value: f64, recorded_at: i64) -> Self {
        Self {
            id: new_record_id(),
            kind,
            value,
            unit: kind.default_unit().to_string(),
            recorded_at,
            notes: String::new(),
            detail: EntryDetail::Metric,
        }
    }

    /// Creates a habit completion entry (`value = 1`, unit `habit`).
    pub fn habit_completion(detail: HabitDetail, recorded_at: i64) -> Self {
        Self {
            detail: EntryDetail::HabitCompletion(detail),
            ..Self::metric(HealthType::Habit, 1.0, recorded_at)
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Whether this entry records a habit completion (structured or legacy).
    pub fn is_habit(&self) -> bool {
        matches!(self.detail, EntryDetail::HabitCompletion(_)) || is_legacy_habit_notes(&self.notes)
    }

    /// Habit fields, decoding legacy notes when no structured detail exists.
    pub fn habit_detail(&self) -> Option<HabitDetail> {
        match &self.detail {
            EntryDetail::HabitCompletion(detail) => Some(detail.clone()),
            EntryDetail::Metric if is_legacy_habit_notes(&self.notes) => {
                Some(decode_habit_notes(&self.notes))
            }
            EntryDetail::Metric => None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_id(&self.id)?;
        require_finite("value", self.value)?;
        if let EntryDetail::HabitCompletion(detail) = &self.detail {
            detail.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{EntryDetail, HealthEntry, HealthType};
    use crate::model::habit::HabitDetail;

    #[test]
    fn missing_detail_deserializes_as_metric() {
        let json = r#"{"id":"a","type":"WEIGHT","value":70.0,"unit":"kg","recorded_at":0}"#;
        let entry: HealthEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.kind, HealthType::Weight);
        assert_eq!(entry.detail, EntryDetail::Metric);
        assert!(entry.notes.is_empty());
    }

    #[test]
    fn legacy_notes_are_recognized_as_habits() {
        let entry = HealthEntry::metric(HealthType::Water, 1.0, 0)
            .with_notes("HABIT: Read - 20 pages (Study)");
        assert!(entry.is_habit());
        let detail = entry.habit_detail().unwrap();
        assert_eq!(detail.title, "Read");
        assert_eq!(detail.description, "20 pages");
        assert_eq!(detail.category, "Study");
    }

    #[test]
    fn structured_habit_serializes_with_tag() {
        let entry = HealthEntry::habit_completion(HabitDetail::new("Walk", "", "Walk"), 10);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "HABIT");
        assert_eq!(json["detail"]["kind"], "HABIT_COMPLETION");
        assert_eq!(json["detail"]["title"], "Walk");
    }

    #[test]
    fn validate_rejects_non_finite_value() {
        let entry = HealthEntry::metric(HealthType::Steps, f64::NAN, 0);
        assert!(entry.validate().is_err());
    }
}
