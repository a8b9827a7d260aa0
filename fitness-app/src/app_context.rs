use crate::application::{
    Accounts, ExerciseCatalog, GenerateFormTips, GenerateWorkout, NutritionLookup,
};
use crate::config::Config;
use crate::infrastructure::db::{LogRepository, ScheduleRepository, TemplateRepository};
use crate::infrastructure::db::{ExerciseRepository, UserRepository};
use crate::infrastructure::exercise_db::ExerciseDbClient;
use crate::infrastructure::gemini::GeminiClient;
use crate::infrastructure::nutritionix::NutritionixClient;
use crate::infrastructure::security::RateLimiter;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub generate_workout: Arc<GenerateWorkout>,
    pub form_tips: Arc<GenerateFormTips>,
    pub exercises: Arc<ExerciseCatalog>,
    pub nutrition: Arc<NutritionLookup>,
    pub accounts: Arc<Accounts>,
    pub template_repo: TemplateRepository,
    pub schedule_repo: ScheduleRepository,
    pub log_repo: LogRepository,
    pub rate_limiter: RateLimiter,
}

impl AppContext {
    pub fn new(config: &Config, db: DatabaseConnection) -> Self {
        let gemini = GeminiClient::new(config.google_api_key.clone());
        let exercise_db = ExerciseDbClient::new(
            config.exercisedb_api_key.clone(),
            config.exercisedb_api_host.clone(),
        );
        let nutritionix = NutritionixClient::new(
            config.nutritionix_base_url.clone(),
            config.nutritionix_app_id.clone(),
            config.nutritionix_api_key.clone(),
        );

        Self {
            generate_workout: Arc::new(GenerateWorkout::new(gemini.clone())),
            form_tips: Arc::new(GenerateFormTips::new(gemini)),
            exercises: Arc::new(ExerciseCatalog::new(
                ExerciseRepository::new(db.clone()),
                exercise_db,
            )),
            nutrition: Arc::new(NutritionLookup::new(nutritionix)),
            accounts: Arc::new(Accounts::new(UserRepository::new(db.clone()))),
            template_repo: TemplateRepository::new(db.clone()),
            schedule_repo: ScheduleRepository::new(db.clone()),
            log_repo: LogRepository::new(db),
            rate_limiter: RateLimiter::new(),
        }
    }
}
