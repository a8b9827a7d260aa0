use chrono::{DateTime, NaiveDate, Utc};
use fitness_errors::AppError;
use serde::{Deserialize, Serialize};

/// Optional inclusive `from` / `to` bounds on a log listing.
#[derive(Debug, Clone, Deserialize)]
pub struct DateRange<T> {
    pub from: Option<T>,
    pub to: Option<T>,
}

impl<T> Default for DateRange<T> {
    fn default() -> Self {
        Self { from: None, to: None }
    }
}

impl<T: PartialOrd> DateRange<T> {
    pub fn validate(&self) -> Result<(), AppError> {
        match (&self.from, &self.to) {
            (Some(from), Some(to)) if from > to => Err(AppError::Validation(
                "from must not be after to".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLog {
    pub id: uuid::Uuid,
    pub template_id: Option<uuid::Uuid>,
    pub started_at: DateTime<Utc>,
    pub duration_min: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkoutLog {
    pub template_id: Option<uuid::Uuid>,
    pub started_at: Option<DateTime<Utc>>,
    pub duration_min: i32,
    pub notes: Option<String>,
}

impl NewWorkoutLog {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.duration_min < 1 {
            return Err(AppError::Validation(
                "durationMin must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionLog {
    pub id: uuid::Uuid,
    pub logged_at: DateTime<Utc>,
    pub food: String,
    pub calories: f64,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNutritionLog {
    pub logged_at: Option<DateTime<Utc>>,
    pub food: String,
    pub calories: f64,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

impl NewNutritionLog {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.food.trim().is_empty() {
            return Err(AppError::Validation("food is required".to_string()));
        }
        let macros = [
            ("calories", Some(self.calories)),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ];
        for (field, value) in macros {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(AppError::Validation(format!(
                        "{} cannot be negative",
                        field
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressLog {
    pub id: uuid::Uuid,
    pub date: NaiveDate,
    pub weight_kg: f64,
    pub body_fat_pct: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProgressLog {
    pub date: Option<NaiveDate>,
    pub weight_kg: f64,
    pub body_fat_pct: Option<f64>,
}

impl NewProgressLog {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(10.0..=500.0).contains(&self.weight_kg) {
            return Err(AppError::Validation(
                "weightKg must be between 10 and 500".to_string(),
            ));
        }
        if let Some(pct) = self.body_fat_pct {
            if !(1.0..=75.0).contains(&pct) {
                return Err(AppError::Validation(
                    "bodyFatPct must be between 1 and 75".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_ranges() {
        let ok: NewProgressLog =
            serde_json::from_str(r#"{"date":"2025-02-01","weightKg":72.4,"bodyFatPct":18}"#).unwrap();
        assert!(ok.validate().is_ok());

        let light: NewProgressLog = serde_json::from_str(r#"{"weightKg":9.9}"#).unwrap();
        assert!(light.validate().is_err());

        let lean: NewProgressLog =
            serde_json::from_str(r#"{"weightKg":70,"bodyFatPct":0.5}"#).unwrap();
        assert!(lean.validate().is_err());
    }

    #[test]
    fn test_nutrition_rejects_negative_macros() {
        let log: NewNutritionLog =
            serde_json::from_str(r#"{"food":"oats","calories":150,"fat":-1}"#).unwrap();
        assert!(log.validate().is_err());

        let log: NewNutritionLog =
            serde_json::from_str(r#"{"food":"  ","calories":150}"#).unwrap();
        assert!(log.validate().is_err());

        let log: NewNutritionLog =
            serde_json::from_str(r#"{"food":"oats","calories":150,"protein":5}"#).unwrap();
        assert!(log.validate().is_ok());
    }

    #[test]
    fn test_workout_log_duration() {
        let log: NewWorkoutLog = serde_json::from_str(r#"{"durationMin":0}"#).unwrap();
        assert!(log.validate().is_err());
        let log: NewWorkoutLog =
            serde_json::from_str(r#"{"durationMin":45,"startedAt":"2025-01-05T18:00:00Z"}"#).unwrap();
        assert!(log.validate().is_ok());
    }

    #[test]
    fn test_date_range_order() {
        let range = DateRange {
            from: NaiveDate::from_ymd_opt(2025, 2, 1),
            to: NaiveDate::from_ymd_opt(2025, 1, 1),
        };
        assert!(range.validate().is_err());

        let open: DateRange<NaiveDate> = DateRange::default();
        assert!(open.validate().is_ok());
    }
}
