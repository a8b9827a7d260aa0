use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fitness_app::domain::{
    AddTemplateExercises, NewTemplate, TemplateExercise, TemplatePatch, TemplateSettings,
    WorkoutTemplate,
};
use fitness_app::infrastructure::db::{db_error, write_error};
use fitness_app::AppContext;
use fitness_errors::AppError;
use uuid::Uuid;

use crate::session::CurrentUser;

pub async fn list(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<WorkoutTemplate>>, AppError> {
    let templates = ctx.template_repo.list_for_user(user.id).await.map_err(db_error)?;
    Ok(Json(templates.into_iter().map(WorkoutTemplate::from).collect()))
}

pub async fn create(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<NewTemplate>,
) -> Result<(StatusCode, Json<WorkoutTemplate>), AppError> {
    body.validate()?;
    let template = ctx.template_repo.create(user.id, &body).await.map_err(write_error)?;
    tracing::info!(template_id = %template.id, "Workout template saved");
    Ok((StatusCode::CREATED, Json(template.into())))
}

pub async fn get(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkoutTemplate>, AppError> {
    let template = ctx
        .template_repo
        .find_owned(id, user.id)
        .await
        .map_err(db_error)?
        .ok_or(AppError::NotFound)?;
    Ok(Json(template.into()))
}

pub async fn patch(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<TemplatePatch>,
) -> Result<Json<WorkoutTemplate>, AppError> {
    body.validate()?;
    let template = ctx
        .template_repo
        .patch(id, user.id, &body)
        .await
        .map_err(db_error)?
        .ok_or(AppError::NotFound)?;
    Ok(Json(template.into()))
}

pub async fn update_settings(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<TemplateSettings>,
) -> Result<Json<WorkoutTemplate>, AppError> {
    body.validate()?;
    let template = ctx
        .template_repo
        .update_settings(id, user.id, &body)
        .await
        .map_err(db_error)?
        .ok_or(AppError::NotFound)?;
    Ok(Json(template.into()))
}

pub async fn delete(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if ctx.template_repo.delete_owned(id, user.id).await.map_err(db_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

pub async fn list_exercises(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<TemplateExercise>>, AppError> {
    ensure_owned(&ctx, id, user.id).await?;
    let items = ctx.template_repo.list_exercises(id).await.map_err(db_error)?;
    Ok(Json(items.into_iter().map(TemplateExercise::from).collect()))
}

pub async fn add_exercises(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<AddTemplateExercises>,
) -> Result<(StatusCode, Json<Vec<TemplateExercise>>), AppError> {
    body.validate()?;
    ensure_owned(&ctx, id, user.id).await?;
    let known = ctx.exercises.known_ids(&body.exercise_ids()).await?;
    body.ensure_known(&known)?;
    let items = ctx
        .template_repo
        .add_exercises(id, &body.items)
        .await
        .map_err(write_error)?;
    Ok((
        StatusCode::CREATED,
        Json(items.into_iter().map(TemplateExercise::from).collect()),
    ))
}

/// Someone else's template looks exactly like a missing one.
async fn ensure_owned(ctx: &AppContext, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
    ctx.template_repo
        .find_owned(id, user_id)
        .await
        .map_err(db_error)?
        .map(|_| ())
        .ok_or(AppError::NotFound)
}
