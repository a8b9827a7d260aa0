mod exercise;
mod logs;
mod schedule;
mod template;
mod user;
mod workout_plan;
mod workout_request;

pub use exercise::{
    CatalogEntry, CatalogLookup, CatalogPage, CatalogSource, Exercise, ExerciseApiItem,
    ExerciseQuery, Instructions, DEFAULT_EXERCISE_LIMIT, MAX_EXERCISE_LIMIT,
};
pub use logs::{
    DateRange, NewNutritionLog, NewProgressLog, NewWorkoutLog, NutritionLog, ProgressLog,
    WorkoutLog,
};
pub use schedule::{CalendarEvent, NewScheduleEntry, ScheduleEntry, ScheduleStatus, ScheduleUpdate};
pub use template::{
    AddTemplateExercises, NewTemplate, TemplateExercise, TemplateExerciseItem, TemplatePatch,
    TemplateSettings, WorkoutTemplate,
};
pub use user::{normalize_email, Credentials, ProfileUpdate, Registration, SessionUser, User};
pub use workout_plan::{AiWorkoutPlan, FormTips, PlanExercise, Weight};
pub use workout_request::{FitnessLevel, WorkoutRequest};
