//! Todo items.

use crate::model::validation::{require_id, require_text, ValidationError};
use crate::model::{new_record_id, RecordId};
use serde::{Deserialize, Serialize};

/// Todo urgency, ordered `Low < Medium < High < Urgent`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Low => "#4CAF50",
            Self::Medium => "#FF9800",
            Self::High => "#F44336",
            Self::Urgent => "#9C27B0",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub priority: Priority,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds.
    #[serde(default)]
    pub due_date: Option<i64>,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "General".to_string()
}

impl TodoItem {
    pub fn new(title: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: new_record_id(),
            title: title.into(),
            description: String::new(),
            is_completed: false,
            priority: Priority::default(),
            created_at,
            due_date: None,
            category: default_category(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_id(&self.id)?;
        require_text("title", &self.title)
    }
}
