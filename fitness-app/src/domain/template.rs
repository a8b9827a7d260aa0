use fitness_errors::AppError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTemplate {
    pub id: uuid::Uuid,
    pub name: String,
    pub notes: Option<String>,
    pub goal: Option<String>,
    pub duration_min: Option<i32>,
    pub equipment: Option<String>,
    pub target_muscles: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTemplate {
    pub name: String,
    pub notes: Option<String>,
    pub goal: Option<String>,
    #[serde(alias = "duration")]
    pub duration_min: Option<i32>,
    pub equipment: Option<String>,
    pub target_muscles: Option<String>,
}

/// `PATCH` body: rename or re-note.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplatePatch {
    pub name: Option<String>,
    pub notes: Option<String>,
}

/// `PUT` body: replaces the generator settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSettings {
    pub goal: Option<String>,
    #[serde(alias = "duration")]
    pub duration_min: Option<i32>,
    pub equipment: Option<String>,
    pub target_muscles: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateExercise {
    pub id: uuid::Uuid,
    pub template_id: uuid::Uuid,
    pub exercise_id: uuid::Uuid,
    pub position: i32,
    pub sets: i32,
    pub reps: i32,
    pub rest_sec: i32,
}

fn default_rest_sec() -> i32 {
    60
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateExerciseItem {
    pub exercise_id: uuid::Uuid,
    #[serde(alias = "order")]
    pub position: i32,
    pub sets: i32,
    pub reps: i32,
    #[serde(default = "default_rest_sec")]
    pub rest_sec: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddTemplateExercises {
    pub items: Vec<TemplateExerciseItem>,
}

impl NewTemplate {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_string()));
        }
        validate_duration(self.duration_min)
    }
}

impl TemplatePatch {
    pub fn validate(&self) -> Result<(), AppError> {
        match &self.name {
            Some(name) if name.trim().is_empty() => {
                Err(AppError::Validation("name cannot be empty".to_string()))
            }
            _ => Ok(()),
        }
    }
}

impl TemplateSettings {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_duration(self.duration_min)
    }
}

impl AddTemplateExercises {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.items.is_empty() {
            return Err(AppError::Validation("items must not be empty".to_string()));
        }
        for item in &self.items {
            if item.position < 1 || item.sets < 1 || item.reps < 1 {
                return Err(AppError::Validation(
                    "order, sets and reps must be at least 1".to_string(),
                ));
            }
            if item.rest_sec < 0 {
                return Err(AppError::Validation("restSec cannot be negative".to_string()));
            }
        }
        Ok(())
    }

    pub fn exercise_ids(&self) -> Vec<uuid::Uuid> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(|item| item.exercise_id)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Rejects the batch if any item names an exercise outside `known`.
    pub fn ensure_known(&self, known: &HashSet<uuid::Uuid>) -> Result<(), AppError> {
        match self.items.iter().find(|item| !known.contains(&item.exercise_id)) {
            Some(item) => Err(AppError::Validation(format!(
                "unknown exercise {}",
                item.exercise_id
            ))),
            None => Ok(()),
        }
    }
}

fn validate_duration(duration: Option<i32>) -> Result<(), AppError> {
    match duration {
        Some(d) if d <= 0 => Err(AppError::Validation("duration must be positive".to_string())),
        _ => Ok(()),
    }
}
