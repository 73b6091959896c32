//! Mood log entries and the mood catalogue.

use crate::model::validation::{require_id, ValidationError};
use crate::model::{new_record_id, RecordId};
use serde::{Deserialize, Serialize};

pub const MIN_INTENSITY: u8 = 1;
pub const MAX_INTENSITY: u8 = 10;
pub const DEFAULT_INTENSITY: u8 = 5;

/// Color palette applied to mood-tinted screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodTheme {
    pub primary: &'static str,
    pub primary_light: &'static str,
    pub primary_dark: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
}

const fn theme(
    primary: &'static str,
    primary_light: &'static str,
    primary_dark: &'static str,
    accent: &'static str,
    background: &'static str,
    text_primary: &'static str,
    text_secondary: &'static str,
) -> MoodTheme {
    MoodTheme {
        primary,
        primary_light,
        primary_dark,
        accent,
        background,
        surface: "#FFFFFF",
        text_primary,
        text_secondary,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoodType {
    VeryHappy,
    Happy,
    Neutral,
    Sad,
    VerySad,
    Angry,
    Anxious,
    Excited,
    Calm,
    Tired,
}

impl MoodType {
    pub const ALL: [MoodType; 10] = [
        MoodType::VeryHappy,
        MoodType::Happy,
        MoodType::Neutral,
        MoodType::Sad,
        MoodType::VerySad,
        MoodType::Angry,
        MoodType::Anxious,
        MoodType::Excited,
        MoodType::Calm,
        MoodType::Tired,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::VeryHappy => "Very Happy",
            Self::Happy => "Happy",
            Self::Neutral => "Neutral",
            Self::Sad => "Sad",
            Self::VerySad => "Very Sad",
            Self::Angry => "Angry",
            Self::Anxious => "Anxious",
            Self::Excited => "Excited",
            Self::Calm => "Calm",
            Self::Tired => "Tired",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::VeryHappy => "😄",
            Self::Happy => "😊",
            Self::Neutral => "😐",
            Self::Sad => "😢",
            Self::VerySad => "😭",
            Self::Angry => "😠",
            Self::Anxious => "😰",
            Self::Excited => "🤩",
            Self::Calm => "😌",
            Self::Tired => "😴",
        }
    }

    pub fn color(self) -> &'static str {
        self.theme().primary
    }

    pub fn theme(self) -> MoodTheme {
        match self {
            Self::VeryHappy => theme(
                "#4CAF50", "#81C784", "#388E3C", "#8BC34A", "#E8F5E8", "#2E7D32", "#66BB6A",
            ),
            Self::Happy => theme(
                "#8BC34A", "#AED581", "#689F38", "#CDDC39", "#F1F8E9", "#558B2F", "#9CCC65",
            ),
            Self::Neutral => theme(
                "#FFC107", "#FFD54F", "#F57F17", "#FFEB3B", "#FFFDE7", "#F57F17", "#FFB300",
            ),
            Self::Sad => theme(
                "#FF9800", "#FFB74D", "#F57C00", "#FF5722", "#FFF3E0", "#E65100", "#FF9800",
            ),
            Self::VerySad => theme(
                "#F44336", "#EF5350", "#D32F2F", "#E91E63", "#FFEBEE", "#C62828", "#EF5350",
            ),
            Self::Angry => theme(
                "#E91E63", "#F06292", "#C2185B", "#F44336", "#FCE4EC", "#AD1457", "#F06292",
            ),
            Self::Anxious => theme(
                "#9C27B0", "#BA68C8", "#7B1FA2", "#673AB7", "#F3E5F5", "#6A1B9A", "#AB47BC",
            ),
            Self::Excited => theme(
                "#00BCD4", "#4DD0E1", "#0097A7", "#00E5FF", "#E0F2F1", "#00695C", "#26C6DA",
            ),
            Self::Calm => theme(
                "#607D8B", "#90A4AE", "#455A64", "#78909C", "#ECEFF1", "#37474F", "#78909C",
            ),
            Self::Tired => theme(
                "#795548", "#A1887F", "#5D4037", "#8D6E63", "#EFEBE9", "#3E2723", "#8D6E63",
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: RecordId,
    pub mood: MoodType,
    /// 1-10 scale.
    #[serde(default = "default_intensity")]
    pub intensity: u8,
    #[serde(default)]
    pub notes: String,
    /// Epoch milliseconds.
    pub recorded_at: i64,
}

fn default_intensity() -> u8 {
    DEFAULT_INTENSITY
}

impl MoodEntry {
    pub fn new(mood: MoodType, recorded_at: i64) -> Self {
        Self {
            id: new_record_id(),
            mood,
            intensity: DEFAULT_INTENSITY,
            notes: String::new(),
            recorded_at,
        }
    }

    pub fn with_intensity(mut self, intensity: u8) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_id(&self.id)?;
        if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&self.intensity) {
            return Err(ValidationError::IntensityOutOfRange(self.intensity));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MoodEntry, MoodType, DEFAULT_INTENSITY};
    use crate::model::validation::ValidationError;

    #[test]
    fn intensity_defaults_when_missing_from_json() {
        let json = r#"{"id":"m1","mood":"VERY_HAPPY","recorded_at":5}"#;
        let entry: MoodEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.mood, MoodType::VeryHappy);
        assert_eq!(entry.intensity, DEFAULT_INTENSITY);
    }

    #[test]
    fn intensity_outside_scale_is_rejected() {
        let entry = MoodEntry::new(MoodType::Calm, 0).with_intensity(11);
        assert_eq!(
            entry.validate(),
            Err(ValidationError::IntensityOutOfRange(11))
        );
        let entry = MoodEntry::new(MoodType::Calm, 0).with_intensity(0);
        assert!(entry.validate().is_err());
    }

    #[test]
    fn every_mood_has_display_metadata() {
        for mood in MoodType::ALL {
            assert!(!mood.display_name().is_empty());
            assert!(!mood.emoji().is_empty());
            assert_eq!(mood.color(), mood.theme().primary);
            assert_eq!(mood.theme().surface, "#FFFFFF");
        }
    }
}
