pub mod exercise;
pub mod nutrition_log;
pub mod progress_log;
pub mod saved_exercise;
pub mod template_exercise;
pub mod user;
pub mod workout_log;
pub mod workout_schedule;
pub mod workout_template;

pub use exercise::Entity as Exercise;
pub use nutrition_log::Entity as NutritionLog;
pub use progress_log::Entity as ProgressLog;
pub use saved_exercise::Entity as SavedExercise;
pub use template_exercise::Entity as TemplateExercise;
pub use user::Entity as User;
pub use workout_log::Entity as WorkoutLog;
pub use workout_schedule::Entity as WorkoutSchedule;
pub use workout_template::Entity as WorkoutTemplate;
