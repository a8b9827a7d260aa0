use axum::extract::State;
use axum::Json;
use fitness_app::domain::{ProfileUpdate, User};
use fitness_app::AppContext;
use fitness_errors::AppError;

use crate::session::CurrentUser;

pub async fn me(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<User>, AppError> {
    Ok(Json(ctx.accounts.profile(user.id).await?))
}

pub async fn update(
    State(ctx): State<AppContext>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<ProfileUpdate>,
) -> Result<Json<User>, AppError> {
    Ok(Json(ctx.accounts.update_profile(user.id, body).await?))
}
