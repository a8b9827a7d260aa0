mod accounts;
mod exercise_catalog;
mod form_tips;
mod generate_workout;
mod nutrition;

pub use accounts::Accounts;
pub use exercise_catalog::ExerciseCatalog;
pub use form_tips::GenerateFormTips;
pub use generate_workout::GenerateWorkout;
pub use nutrition::NutritionLookup;
