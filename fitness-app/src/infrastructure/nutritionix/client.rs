use fitness_errors::AppError;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct NaturalQuery<'a> {
    query: &'a str,
}

/// Nutritionix instant search and natural-language nutrient parsing. Bodies
/// are passed through untouched.
#[derive(Clone)]
pub struct NutritionixClient {
    http_client: reqwest::Client,
    base_url: String,
    app_id: String,
    api_key: String,
}

impl NutritionixClient {
    pub fn new(base_url: String, app_id: String, api_key: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id,
            api_key,
        }
    }

    pub async fn search_instant(&self, query: &str) -> Result<Value, AppError> {
        let request = self
            .http_client
            .get(format!("{}/search/instant", self.base_url))
            .query(&[("query", query)]);
        self.send(request).await
    }

    pub async fn natural_nutrients(&self, text: &str) -> Result<Value, AppError> {
        let request = self
            .http_client
            .post(format!("{}/natural/nutrients", self.base_url))
            .json(&NaturalQuery { query: text });
        self.send(request).await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, AppError> {
        let response = request
            .header("x-app-id", &self.app_id)
            .header("x-app-key", &self.api_key)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Nutritionix request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Nutritionix error: {} - {}", status, body);
            return Err(AppError::Upstream(format!("Nutritionix API error: {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Nutritionix response unreadable: {}", e)))
    }
}
