use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fitness_app::domain::{CalendarEvent, NewScheduleEntry, ScheduleEntry, ScheduleUpdate};
use fitness_app::infrastructure::db::{db_error, write_error};
use fitness_app::AppContext;
use fitness_errors::AppError;
use uuid::Uuid;

use crate::session::CurrentUser;

pub async fn list(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    let rows = ctx
        .schedule_repo
        .list_with_templates(user.id)
        .await
        .map_err(db_error)?;
    let events = rows
        .iter()
        .map(|(entry, name)| CalendarEvent::new(entry, name.as_deref()))
        .collect();
    Ok(Json(events))
}

pub async fn create(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<NewScheduleEntry>,
) -> Result<(StatusCode, Json<ScheduleEntry>), AppError> {
    ctx.template_repo
        .find_owned(body.template_id, user.id)
        .await
        .map_err(db_error)?
        .ok_or(AppError::NotFound)?;

    let entry = ctx
        .schedule_repo
        .create(user.id, body.template_id, body.date)
        .await
        .map_err(write_error)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<ScheduleUpdate>,
) -> Result<Json<ScheduleEntry>, AppError> {
    let entry = ctx
        .schedule_repo
        .update_status(id, user.id, body.status, body.note)
        .await
        .map_err(db_error)?
        .ok_or(AppError::NotFound)?;
    tracing::info!(schedule_id = %id, status = %entry.status, "Schedule entry updated");
    Ok(Json(entry))
}

pub async fn delete(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if ctx.schedule_repo.delete_owned(id, user.id).await.map_err(db_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
