use crate::domain::WorkoutRequest;

/// Exact reply the model is told to give for anything that is not fitness.
pub const OFF_TOPIC_REPLY: &str = "I can only help with fitness-related questions.";

pub fn is_off_topic(completion: &str) -> bool {
    completion.trim().trim_matches('"') == OFF_TOPIC_REPLY
}

/// Builds the generator prompt. `request` fields must already be sanitised.
pub fn build_workout_prompt(request: &WorkoutRequest) -> String {
    let equipment = join_or(&request.equipment, "bodyweight");
    let targets = join_or(&request.target_muscles, "balanced");

    format!(
        r#"You are a certified strength and conditioning coach.
Only answer fitness questions. If the goal below is not about fitness, reply with exactly: {refusal}

Create a {level} workout for the goal "{goal}".
Training days per week: {days}
Session length: {minutes} minutes
Available equipment: {equipment}
Target muscles: {targets}

Return ONLY a JSON array, no prose, no markdown. Each element:
{{"name": string, "sets": integer >= 1, "reps": integer >= 1, "restSeconds": integer >= 0, "weight": string or number of kilograms (optional)}}
List the exercises in the order they should be performed."#,
        refusal = OFF_TOPIC_REPLY,
        level = request.level,
        goal = request.goal,
        days = request.days_per_week,
        minutes = request.session_minutes,
        equipment = equipment,
        targets = targets,
    )
}

/// Builds the form-cue prompt. `exercise_name` must already be sanitised.
pub fn build_form_tips_prompt(exercise_name: &str) -> String {
    format!(
        r#"You are a certified strength coach.
If "{name}" is not a physical exercise, reply with exactly: {refusal}

Give bulletproof form cues for "{name}".
Return ONLY JSON of the form {{"tips": [string, ...]}} with 3 to 6 short cues."#,
        name = exercise_name,
        refusal = OFF_TOPIC_REPLY,
    )
}

fn join_or(values: &[String], fallback: &str) -> String {
    if values.is_empty() {
        fallback.to_string()
    } else {
        values.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FitnessLevel;

    #[test]
    fn test_workout_prompt_fills_defaults() {
        let request = WorkoutRequest {
            goal: "run a faster 5k".to_string(),
            level: FitnessLevel::Beginner,
            days_per_week: 3,
            session_minutes: 30,
            equipment: vec![],
            target_muscles: vec!["legs".to_string(), "core".to_string()],
        };
        let prompt = build_workout_prompt(&request);
        assert!(prompt.contains("Create a beginner workout"));
        assert!(prompt.contains("Available equipment: bodyweight"));
        assert!(prompt.contains("Target muscles: legs, core"));
        assert!(prompt.contains(OFF_TOPIC_REPLY));
    }

    #[test]
    fn test_form_tips_prompt() {
        let prompt = build_form_tips_prompt("Deadlift");
        assert!(prompt.contains("form cues for \"Deadlift\""));
        assert!(prompt.contains(r#"{"tips": [string, ...]}"#));
    }

    #[test]
    fn test_off_topic_is_exact_match() {
        assert!(is_off_topic("  I can only help with fitness-related questions.\n"));
        assert!(!is_off_topic("I can only help with fitness-related questions. But here: []"));
    }
}
