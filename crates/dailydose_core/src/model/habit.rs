//! Habit completion shapes.
//!
//! `HabitEntry` is the transient form UI code edits; it is persisted only as
//! a `HealthEntry` carrying `EntryDetail::HabitCompletion`.

use crate::model::health::{EntryDetail, HealthEntry, HealthType};
use crate::model::validation::{require_id, require_text, ValidationError};
use crate::model::{new_record_id, RecordId};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HABIT_CATEGORY: &str = "General";

/// Structured habit fields stored inside a health entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitDetail {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    DEFAULT_HABIT_CATEGORY.to_string()
}

impl HabitDetail {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)
    }
}

/// Editable habit completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitEntry {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Epoch milliseconds.
    pub recorded_at: i64,
    pub is_completed: bool,
    pub notes: String,
}

impl HabitEntry {
    /// Creates a completed habit with a fresh id in the default category.
    pub fn new(title: impl Into<String>, recorded_at: i64) -> Self {
        Self {
            id: new_record_id(),
            title: title.into(),
            description: String::new(),
            category: DEFAULT_HABIT_CATEGORY.to_string(),
            recorded_at,
            is_completed: true,
            notes: String::new(),
        }
    }

    pub fn detail(&self) -> HabitDetail {
        HabitDetail::new(
            self.title.as_str(),
            self.description.as_str(),
            self.category.as_str(),
        )
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_id(&self.id)?;
        require_text("title", &self.title)
    }

    /// Converts into the persisted health entry shape.
    pub fn to_health_entry(&self) -> HealthEntry {
        HealthEntry {
            id: self.id.clone(),
            kind: HealthType::Habit,
            value: 1.0,
            unit: HealthType::Habit.default_unit().to_string(),
            recorded_at: self.recorded_at,
            notes: self.notes.clone(),
            detail: EntryDetail::HabitCompletion(self.detail()),
        }
    }

    /// Rebuilds a habit from a health entry; `None` for plain metrics.
    ///
    /// Legacy entries keep their encoded notes out of `notes`.
    pub fn from_health_entry(entry: &HealthEntry) -> Option<Self> {
        let detail = entry.habit_detail()?;
        let notes = match entry.detail {
            EntryDetail::HabitCompletion(_) => entry.notes.clone(),
            EntryDetail::Metric => String::new(),
        };
        Some(Self {
            id: entry.id.clone(),
            title: detail.title,
            description: detail.description,
            category: detail.category,
            recorded_at: entry.recorded_at,
            is_completed: true,
            notes,
        })
    }
}

/// Built-in habit categories offered by the habit editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HabitCategory {
    Sleep,
    Walk,
    Study,
    Meditation,
    Workout,
    Travel,
    Eating,
    General,
}

impl HabitCategory {
    pub const ALL: [HabitCategory; 8] = [
        HabitCategory::Sleep,
        HabitCategory::Walk,
        HabitCategory::Study,
        HabitCategory::Meditation,
        HabitCategory::Workout,
        HabitCategory::Travel,
        HabitCategory::Eating,
        HabitCategory::General,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Sleep => "Sleep",
            Self::Walk => "Walk",
            Self::Study => "Study",
            Self::Meditation => "Meditation",
            Self::Workout => "Workout",
            Self::Travel => "Travel",
            Self::Eating => "Eating",
            Self::General => "General",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Sleep => "#673AB7",
            Self::Walk => "#4CAF50",
            Self::Study => "#FF9800",
            Self::Meditation => "#9C27B0",
            Self::Workout => "#F44336",
            Self::Travel => "#2196F3",
            Self::Eating => "#FF5722",
            Self::General => "#9E9E9E",
        }
    }

    /// Exact display-name lookup; stored categories may hold other text.
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.display_name() == name)
    }
}
