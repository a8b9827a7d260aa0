use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Weight {
    Kilograms(f64),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanExercise {
    #[serde(alias = "exercise")]
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(alias = "rest", alias = "restSec", alias = "rest_seconds")]
    pub rest_seconds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
}

/// Exercises in the order the model listed them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiWorkoutPlan {
    pub exercises: Vec<PlanExercise>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PlanShape {
    List(Vec<PlanExercise>),
    Wrapped { exercises: Vec<PlanExercise> },
}

impl AiWorkoutPlan {
    /// Accepts a bare array of entries or `{ "exercises": [...] }`.
    pub fn from_value(value: Value) -> Result<Self, String> {
        let exercises = match serde_json::from_value(value) {
            Ok(PlanShape::List(list)) => list,
            Ok(PlanShape::Wrapped { exercises }) => exercises,
            Err(e) => return Err(format!("expected a list of exercises: {}", e)),
        };

        if exercises.is_empty() {
            return Err("plan has no exercises".to_string());
        }

        for (i, exercise) in exercises.iter().enumerate() {
            if exercise.name.trim().is_empty() {
                return Err(format!("exercise {} has an empty name", i + 1));
            }
            if exercise.sets == 0 || exercise.reps == 0 {
                return Err(format!(
                    "{} needs at least one set and one rep",
                    exercise.name
                ));
            }
        }

        Ok(Self { exercises })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormTips {
    pub tips: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrapped_plan_with_weights() {
        let plan = AiWorkoutPlan::from_value(json!({
            "exercises": [
                {"name": "Bench Press", "sets": 4, "reps": 8, "restSeconds": 120, "weight": 60.5},
                {"name": "Plank", "sets": 3, "reps": 1, "restSec": 45, "weight": "bodyweight"}
            ]
        }))
        .unwrap();

        assert_eq!(plan.exercises[0].weight, Some(Weight::Kilograms(60.5)));
        assert_eq!(
            plan.exercises[1].weight,
            Some(Weight::Label("bodyweight".to_string()))
        );
        assert_eq!(plan.exercises[1].rest_seconds, 45);
    }

    #[test]
    fn test_missing_fields_are_not_invented() {
        let err = AiWorkoutPlan::from_value(json!([{"name": "Squat", "sets": 3}])).unwrap_err();
        assert!(err.contains("expected a list"));
    }

    #[test]
    fn test_rejects_zero_sets_and_empty_names() {
        assert!(AiWorkoutPlan::from_value(
            json!([{"name": "Row", "sets": 0, "reps": 10, "rest": 60}])
        )
        .is_err());
        assert!(AiWorkoutPlan::from_value(
            json!([{"name": " ", "sets": 3, "reps": 10, "rest": 60}])
        )
        .is_err());
        assert!(AiWorkoutPlan::from_value(json!([])).is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let plan = AiWorkoutPlan {
            exercises: vec![PlanExercise {
                name: "Lunge".to_string(),
                sets: 3,
                reps: 10,
                rest_seconds: 60,
                weight: None,
            }],
        };
        let value = serde_json::to_value(&plan).unwrap();
        assert_eq!(value["exercises"][0]["restSeconds"], 60);
        assert!(value["exercises"][0].get("weight").is_none());
    }
}
