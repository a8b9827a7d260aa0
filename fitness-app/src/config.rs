use fitness_errors::AppError;

const DEFAULT_APP_ADDR: &str = "0.0.0.0:3000";

/// Process configuration read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub google_api_key: String,
    pub exercisedb_api_key: String,
    pub exercisedb_api_host: String,
    pub nutritionix_base_url: String,
    pub nutritionix_app_id: String,
    pub nutritionix_api_key: String,
    pub app_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::Configuration(format!("{} must be set", name)))
        };

        let nutritionix_base_url = required("NUTRITIONIX_BASE_URL")?;
        url::Url::parse(&nutritionix_base_url).map_err(|e| {
            AppError::Configuration(format!("NUTRITIONIX_BASE_URL is not a valid URL: {}", e))
        })?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            google_api_key: required("GOOGLE_API_KEY")?,
            exercisedb_api_key: required("EXERCISEDB_API_KEY")?,
            exercisedb_api_host: required("EXERCISEDB_API_HOST")?,
            nutritionix_base_url,
            nutritionix_app_id: required("NUTRITIONIX_APP_ID")?,
            nutritionix_api_key: required("NUTRITIONIX_API_KEY")?,
            app_addr: lookup("APP_ADDR").unwrap_or_else(|| DEFAULT_APP_ADDR.to_string()),
        })
    }
}
