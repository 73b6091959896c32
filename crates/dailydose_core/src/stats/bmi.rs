//! Body-mass index.
//!
//! One category scheme is used throughout: the four WHO adult bands with
//! boundaries at 18.5, 25.0 and 30.0.

use crate::model::health::{HealthEntry, HealthType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Underweight => "#2196F3",
            Self::Normal => "#4CAF50",
            Self::Overweight => "#FF9800",
            Self::Obese => "#F44336",
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            Self::Underweight => {
                "Consider consulting a healthcare provider for healthy weight gain strategies."
            }
            Self::Normal => "Great! You're in a healthy weight range. Keep up the good work!",
            Self::Overweight => {
                "Consider a balanced diet and regular exercise to reach a healthier weight."
            }
            Self::Obese => {
                "Please consult a healthcare provider for a personalized weight management plan."
            }
        }
    }
}

/// `weight_kg / (height_cm / 100)^2`, or 0 when `height_cm <= 0`.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

pub fn bmi_category(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// BMI from the most recent WEIGHT and HEIGHT entries.
///
/// Ties on `recorded_at` keep the entry that appears first. Returns `None`
/// when either measurement is missing.
pub fn bmi_from_entries(entries: &[HealthEntry]) -> Option<f64> {
    let weight = latest_of(entries, HealthType::Weight)?;
    let height = latest_of(entries, HealthType::Height)?;
    Some(bmi(weight.value, height.value))
}

fn latest_of(entries: &[HealthEntry], kind: HealthType) -> Option<&HealthEntry> {
    entries
        .iter()
        .filter(|entry| entry.kind == kind)
        .fold(None, |latest: Option<&HealthEntry>, entry| match latest {
            Some(current) if current.recorded_at >= entry.recorded_at => Some(current),
            _ => Some(entry),
        })
}

#[cfg(test)]
mod tests {
    use super::{bmi, bmi_category, bmi_from_entries, BmiCategory};
    use crate::model::health::{HealthEntry, HealthType};

    fn close(left: f64, right: f64) -> bool {
        (left - right).abs() < 0.01
    }

    #[test]
    fn bmi_matches_reference_values() {
        assert!(close(bmi(70.0, 175.0), 22.86));
        assert_eq!(bmi_category(bmi(70.0, 175.0)), BmiCategory::Normal);
        assert!(close(bmi(50.0, 150.0), 22.22));
        assert_eq!(bmi_category(bmi(50.0, 150.0)), BmiCategory::Normal);
        assert_eq!(bmi(0.0, 175.0), 0.0);
    }

    #[test]
    fn non_positive_height_yields_zero() {
        assert_eq!(bmi(70.0, 0.0), 0.0);
        assert_eq!(bmi(70.0, -10.0), 0.0);
    }

    #[test]
    fn category_boundaries_are_lower_inclusive() {
        assert_eq!(bmi_category(18.49), BmiCategory::Underweight);
        assert_eq!(bmi_category(18.5), BmiCategory::Normal);
        assert_eq!(bmi_category(25.0), BmiCategory::Overweight);
        assert_eq!(bmi_category(30.0), BmiCategory::Obese);
        assert_eq!(bmi_category(45.0), BmiCategory::Obese);
    }

    #[test]
    fn bmi_from_entries_uses_latest_measurements() {
        let entries = vec![
            HealthEntry::metric(HealthType::Weight, 90.0, 100),
            HealthEntry::metric(HealthType::Height, 175.0, 50),
            HealthEntry::metric(HealthType::Weight, 70.0, 300),
            HealthEntry::metric(HealthType::Water, 0.25, 400),
        ];
        let value = bmi_from_entries(&entries).unwrap();
        assert!(close(value, 22.86));
    }

    #[test]
    fn bmi_from_entries_requires_both_measurements() {
        let entries = vec![HealthEntry::metric(HealthType::Weight, 70.0, 0)];
        assert_eq!(bmi_from_entries(&entries), None);
        assert_eq!(bmi_from_entries(&[]), None);
    }

    #[test]
    fn every_category_has_display_text() {
        for category in [
            BmiCategory::Underweight,
            BmiCategory::Normal,
            BmiCategory::Overweight,
            BmiCategory::Obese,
        ] {
            assert!(!category.display_name().is_empty());
            assert!(category.color().starts_with('#'));
            assert!(!category.advice().is_empty());
        }
    }
}
