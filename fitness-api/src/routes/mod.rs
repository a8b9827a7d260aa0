mod ai;
mod auth;
mod exercises;
mod limits;
mod logs;
mod nutrition;
mod schedule;
mod user;
mod workouts;

use axum::routing::{get, patch, post};
use axum::Router;
use fitness_app::AppContext;

pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/user/me", get(user::me))
        .route("/api/user", patch(user::update))
        .route("/api/ai/generate-workout", post(ai::generate_workout))
        .route("/api/ai/form-tips", post(ai::form_tips))
        .route("/api/exercises", get(exercises::list))
        .route("/api/exercises/refresh", post(exercises::refresh))
        .route("/api/exercises/saved", get(exercises::saved))
        .route(
            "/api/exercises/saved/{id}",
            post(exercises::save).delete(exercises::unsave),
        )
        .route("/api/nutrition/search", get(nutrition::search))
        .route("/api/nutrition/parse", post(nutrition::parse))
        .route("/api/workouts", get(workouts::list))
        .route(
            "/api/workouts/templates",
            get(workouts::list).post(workouts::create),
        )
        .route(
            "/api/workouts/{id}",
            get(workouts::get)
                .patch(workouts::patch)
                .put(workouts::update_settings)
                .delete(workouts::delete),
        )
        .route(
            "/api/workouts/{id}/exercises",
            get(workouts::list_exercises).post(workouts::add_exercises),
        )
        .route(
            "/api/workouts/schedule",
            get(schedule::list).post(schedule::create),
        )
        .route(
            "/api/workouts/schedule/{id}",
            patch(schedule::update).delete(schedule::delete),
        )
        .route(
            "/api/logs/workouts",
            get(logs::list_workouts).post(logs::create_workout),
        )
        .route(
            "/api/logs/nutrition",
            get(logs::list_nutrition).post(logs::create_nutrition),
        )
        .route(
            "/api/logs/progress",
            get(logs::list_progress).post(logs::create_progress),
        )
        .route("/api/progress", get(logs::list_progress))
        .with_state(ctx)
}
