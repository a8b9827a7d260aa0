use crate::domain::FormTips;
use crate::infrastructure::gemini::{
    build_form_tips_prompt, is_off_topic, parse_form_tips, GeminiClient,
};
use crate::infrastructure::security::InputSanitizer;
use fitness_errors::AppError;

pub struct GenerateFormTips {
    gemini: GeminiClient,
}

impl GenerateFormTips {
    pub fn new(gemini: GeminiClient) -> Self {
        Self { gemini }
    }

    pub async fn execute(&self, exercise_name: &str) -> Result<FormTips, AppError> {
        if exercise_name.trim().is_empty() {
            return Err(AppError::Validation("exerciseName is required".to_string()));
        }
        let name = InputSanitizer::validate_prompt_field("exerciseName", exercise_name)?;

        let completion = self.gemini.complete(build_form_tips_prompt(&name)).await?;
        interpret_tips(&completion)
    }
}

/// Unreadable tips degrade to an empty list rather than an error.
fn interpret_tips(completion: &str) -> Result<FormTips, AppError> {
    if is_off_topic(completion) {
        return Err(AppError::OffTopic);
    }

    match parse_form_tips(completion) {
        Ok(tips) => Ok(tips),
        Err(e) => {
            tracing::warn!(error = %e, "Form tips unreadable, returning none");
            Ok(FormTips::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_tips_are_recovered() {
        let tips = interpret_tips(r#"{"tips": ["Keep your back straight""#).unwrap();
        assert_eq!(tips.tips, vec!["Keep your back straight".to_string()]);
    }

    #[test]
    fn test_unreadable_tips_are_empty() {
        let tips = interpret_tips("Brace hard and breathe.").unwrap();
        assert!(tips.tips.is_empty());
    }

    #[test]
    fn test_refusal_is_off_topic() {
        assert!(matches!(
            interpret_tips("\"I can only help with fitness-related questions.\""),
            Err(AppError::OffTopic)
        ));
    }
}
