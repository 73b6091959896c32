//! User reminders handed to the platform scheduler.

use crate::model::validation::{require_id, require_text, ValidationError};
use crate::model::{new_record_id, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub message: String,
    /// Epoch milliseconds.
    pub reminder_time: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Epoch milliseconds.
    pub created_at: i64,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_active() -> bool {
    true
}

fn default_category() -> String {
    "Health".to_string()
}

impl Reminder {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        reminder_time: i64,
        created_at: i64,
    ) -> Self {
        Self {
            id: new_record_id(),
            title: title.into(),
            message: message.into(),
            reminder_time,
            is_active: true,
            created_at,
            category: default_category(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_id(&self.id)?;
        require_text("title", &self.title)
    }
}
