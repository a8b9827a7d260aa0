use fitness_errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        };
        f.write_str(s)
    }
}

/// Body of `POST /api/ai/generate-workout`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRequest {
    pub goal: String,
    pub level: FitnessLevel,
    pub days_per_week: u8,
    pub session_minutes: u16,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub target_muscles: Vec<String>,
}

impl WorkoutRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.goal.trim().chars().count() < 2 {
            return Err(AppError::Validation(
                "goal must be at least 2 characters".to_string(),
            ));
        }
        if !(1..=7).contains(&self.days_per_week) {
            return Err(AppError::Validation(
                "daysPerWeek must be between 1 and 7".to_string(),
            ));
        }
        if !(10..=180).contains(&self.session_minutes) {
            return Err(AppError::Validation(
                "sessionMinutes must be between 10 and 180".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> WorkoutRequest {
        serde_json::from_str(
            r#"{"goal":"hypertrophy","level":"intermediate","daysPerWeek":4,"sessionMinutes":60}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_and_valid() {
        let req = request();
        assert!(req.equipment.is_empty());
        assert!(req.target_muscles.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_fields() {
        let mut req = request();
        req.goal = "x".to_string();
        assert!(req.validate().is_err());

        let mut req = request();
        req.days_per_week = 0;
        assert!(req.validate().is_err());
        req.days_per_week = 8;
        assert!(req.validate().is_err());

        let mut req = request();
        req.session_minutes = 9;
        assert!(req.validate().is_err());
        req.session_minutes = 181;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let res: Result<WorkoutRequest, _> = serde_json::from_str(
            r#"{"goal":"cut","level":"elite","daysPerWeek":3,"sessionMinutes":45}"#,
        );
        assert!(res.is_err());
    }
}
