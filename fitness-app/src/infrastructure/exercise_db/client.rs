use crate::domain::{CatalogLookup, ExerciseApiItem};
use fitness_errors::AppError;
use serde_json::Value;

const EXERCISE_DB_BASE_URL: &str = "https://exercisedb.p.rapidapi.com";

/// ExerciseDB over RapidAPI.
#[derive(Clone)]
pub struct ExerciseDbClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    api_host: String,
}

impl ExerciseDbClient {
    pub fn new(api_key: String, api_host: String) -> Self {
        Self::with_base_url(EXERCISE_DB_BASE_URL.to_string(), api_key, api_host)
    }

    pub fn with_base_url(base_url: String, api_key: String, api_host: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url,
            api_key,
            api_host,
        }
    }

    pub async fn fetch(&self, lookup: &CatalogLookup<'_>) -> Result<Vec<ExerciseApiItem>, AppError> {
        let url = self.url_for(lookup);

        let response = self
            .http_client
            .get(&url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.api_host)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("ExerciseDB request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("ExerciseDB error: {} - {}", status, body);
            return Err(AppError::Upstream(format!("ExerciseDB API error: {}", status)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("ExerciseDB response unreadable: {}", e)))?;

        Ok(items_from_body(body))
    }

    fn url_for(&self, lookup: &CatalogLookup<'_>) -> String {
        let segment = |kind: &str, value: &str| {
            format!(
                "{}/exercises/{}/{}",
                self.base_url,
                kind,
                urlencoding::encode(value)
            )
        };

        match lookup {
            CatalogLookup::Name(name) => segment("name", name),
            CatalogLookup::BodyPart(part) => segment("bodyPart", part),
            CatalogLookup::Equipment(equipment) => segment("equipment", equipment),
            CatalogLookup::Target(target) => segment("target", target),
            CatalogLookup::All(limit) => format!("{}/exercises?limit={}", self.base_url, limit),
        }
    }
}

/// The API answers errors with an object; anything but an array is no data.
fn items_from_body(body: Value) -> Vec<ExerciseApiItem> {
    let Value::Array(entries) = body else {
        tracing::warn!("ExerciseDB returned a non-array body");
        return Vec::new();
    };

    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("Skipping malformed ExerciseDB record: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> ExerciseDbClient {
        ExerciseDbClient::with_base_url("https://api.test".to_string(), "k".to_string(), "h".to_string())
    }

    #[test]
    fn test_urls() {
        let c = client();
        assert_eq!(
            c.url_for(&CatalogLookup::Name("barbell curl")),
            "https://api.test/exercises/name/barbell%20curl"
        );
        assert_eq!(
            c.url_for(&CatalogLookup::BodyPart("upper arms")),
            "https://api.test/exercises/bodyPart/upper%20arms"
        );
        assert_eq!(
            c.url_for(&CatalogLookup::All(50)),
            "https://api.test/exercises?limit=50"
        );
    }

    #[test]
    fn test_items_from_body() {
        let items = items_from_body(json!([
            {"name": "air bike", "target": "abs"},
            {"target": "no name"},
            {"name": "squat", "instructions": ["Stand", "Sit back"]}
        ]));
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].name, "squat");

        assert!(items_from_body(json!({"message": "quota exceeded"})).is_empty());
    }
}
