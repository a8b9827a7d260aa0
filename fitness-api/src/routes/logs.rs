use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use fitness_app::domain::{
    DateRange, NewNutritionLog, NewProgressLog, NewWorkoutLog, NutritionLog, ProgressLog,
    WorkoutLog,
};
use fitness_app::infrastructure::db::{db_error, write_error};
use fitness_app::AppContext;
use fitness_errors::AppError;
use std::future::Future;
use uuid::Uuid;

use crate::session::CurrentUser;

pub async fn list_workouts(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Query(range): Query<DateRange<DateTime<Utc>>>,
) -> Result<Json<Vec<WorkoutLog>>, AppError> {
    range.validate()?;
    let logs = ctx.log_repo.list_workouts(user.id, &range).await.map_err(db_error)?;
    Ok(Json(logs.into_iter().map(WorkoutLog::from).collect()))
}

pub async fn create_workout(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<NewWorkoutLog>,
) -> Result<(StatusCode, Json<WorkoutLog>), AppError> {
    body.validate()?;
    let (templates, user_id) = (&ctx.template_repo, user.id);
    check_template(body.template_id, |id| async move {
        Ok(templates.find_owned(id, user_id).await.map_err(db_error)?.is_some())
    })
    .await?;
    let log = ctx.log_repo.create_workout(user.id, body).await.map_err(write_error)?;
    Ok((StatusCode::CREATED, Json(log.into())))
}

/// A log may only point at one of the caller's own templates.
async fn check_template<F, Fut>(template_id: Option<Uuid>, owned: F) -> Result<(), AppError>
where
    F: FnOnce(Uuid) -> Fut,
    Fut: Future<Output = Result<bool, AppError>>,
{
    let Some(id) = template_id else {
        return Ok(());
    };
    if owned(id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound)
    }
}

pub async fn list_nutrition(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Query(range): Query<DateRange<DateTime<Utc>>>,
) -> Result<Json<Vec<NutritionLog>>, AppError> {
    range.validate()?;
    let logs = ctx.log_repo.list_nutrition(user.id, &range).await.map_err(db_error)?;
    Ok(Json(logs.into_iter().map(NutritionLog::from).collect()))
}

pub async fn create_nutrition(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<NewNutritionLog>,
) -> Result<(StatusCode, Json<NutritionLog>), AppError> {
    body.validate()?;
    let log = ctx.log_repo.create_nutrition(user.id, body).await.map_err(write_error)?;
    Ok((StatusCode::CREATED, Json(log.into())))
}

pub async fn list_progress(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Query(range): Query<DateRange<NaiveDate>>,
) -> Result<Json<Vec<ProgressLog>>, AppError> {
    range.validate()?;
    let logs = ctx.log_repo.list_progress(user.id, &range).await.map_err(db_error)?;
    Ok(Json(logs.into_iter().map(ProgressLog::from).collect()))
}

pub async fn create_progress(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<NewProgressLog>,
) -> Result<(StatusCode, Json<ProgressLog>), AppError> {
    body.validate()?;
    let log = ctx.log_repo.create_progress(user.id, body).await.map_err(write_error)?;
    Ok((StatusCode::CREATED, Json(log.into())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_foreign_template_is_not_found() {
        let result = check_template(Some(Uuid::new_v4()), |_| async { Ok(false) }).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_own_template_is_accepted() {
        assert!(check_template(Some(Uuid::new_v4()), |_| async { Ok(true) }).await.is_ok());
    }

    #[tokio::test]
    async fn test_log_without_template_skips_lookup() {
        let result = check_template(None, |_| async {
            Err(AppError::Internal("lookup should not run".to_string()))
        })
        .await;
        assert!(result.is_ok());
    }
}
