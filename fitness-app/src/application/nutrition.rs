use crate::infrastructure::nutritionix::NutritionixClient;
use fitness_errors::AppError;
use serde_json::Value;

/// Food search and free-text meal parsing, proxied to Nutritionix.
pub struct NutritionLookup {
    client: NutritionixClient,
}

impl NutritionLookup {
    pub fn new(client: NutritionixClient) -> Self {
        Self { client }
    }

    pub async fn search(&self, query: &str) -> Result<Value, AppError> {
        let query = required("query", query)?;
        self.client.search_instant(query).await
    }

    pub async fn parse(&self, text: &str) -> Result<Value, AppError> {
        let text = required("text", text)?;
        self.client.natural_nutrients(text).await
    }
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(value)
}
