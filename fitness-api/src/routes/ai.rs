use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use fitness_app::domain::{AiWorkoutPlan, FormTips, WorkoutRequest};
use fitness_app::infrastructure::security::RouteLimit;
use fitness_app::AppContext;
use fitness_errors::AppError;
use serde::Deserialize;

use super::limits::enforce;
use crate::session::CurrentUser;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormTipsBody {
    #[serde(default)]
    exercise_name: String,
}

pub async fn generate_workout(
    State(ctx): State<AppContext>,
    CurrentUser(_): CurrentUser,
    headers: HeaderMap,
    Json(body): Json<WorkoutRequest>,
) -> Result<Json<AiWorkoutPlan>, AppError> {
    enforce(&ctx.rate_limiter, RouteLimit::AI_GENERATE, &headers)?;
    Ok(Json(ctx.generate_workout.execute(body).await?))
}

pub async fn form_tips(
    State(ctx): State<AppContext>,
    CurrentUser(_): CurrentUser,
    headers: HeaderMap,
    Json(body): Json<FormTipsBody>,
) -> Result<Json<FormTips>, AppError> {
    enforce(&ctx.rate_limiter, RouteLimit::AI_FORM_TIPS, &headers)?;
    Ok(Json(ctx.form_tips.execute(&body.exercise_name).await?))
}
