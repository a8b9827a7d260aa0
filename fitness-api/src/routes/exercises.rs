use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use fitness_app::domain::{CatalogPage, Exercise, ExerciseQuery};
use fitness_app::infrastructure::security::RouteLimit;
use fitness_app::AppContext;
use fitness_errors::AppError;
use serde::Serialize;
use uuid::Uuid;

use super::limits::enforce;
use crate::session::CurrentUser;

#[derive(Serialize)]
pub struct RefreshResponse {
    count: usize,
}

pub async fn list(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    Query(query): Query<ExerciseQuery>,
) -> Result<Json<CatalogPage>, AppError> {
    enforce(&ctx.rate_limiter, RouteLimit::EXERCISES, &headers)?;
    Ok(Json(ctx.exercises.list(query).await?))
}

pub async fn refresh(
    State(ctx): State<AppContext>,
    CurrentUser(_): CurrentUser,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, AppError> {
    enforce(&ctx.rate_limiter, RouteLimit::EXERCISES, &headers)?;
    let count = ctx.exercises.refresh().await?;
    Ok(Json(RefreshResponse { count }))
}

pub async fn saved(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Exercise>>, AppError> {
    Ok(Json(ctx.exercises.saved(user.id).await?))
}

pub async fn save(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Path(exercise_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ctx.exercises.save(user.id, exercise_id).await?;
    Ok(StatusCode::CREATED)
}

pub async fn unsave(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Path(exercise_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ctx.exercises.unsave(user.id, exercise_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
