use super::types::{GenerateContentRequest, GenerateContentResponse};
use fitness_errors::AppError;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1";
const MODEL: &str = "models/gemini-2.5-flash";

#[derive(Clone)]
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Sends one text prompt and returns the completion text.
    pub async fn complete(&self, prompt: String) -> Result<String, AppError> {
        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, MODEL);
        let request = GenerateContentRequest::new(prompt);

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Gemini error: {} - {}", status, body);
            return Err(AppError::Upstream(format!("Gemini API error: {}", status)));
        }

        let completion: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Gemini response unreadable: {}", e)))?;

        let text = completion
            .first_text()
            .ok_or_else(|| AppError::Upstream("No candidates in Gemini response".to_string()))?;

        tracing::debug!(chars = text.len(), "Gemini completion received");
        Ok(text.to_string())
    }
}
