use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use fitness_app::domain::{Credentials, Registration, SessionUser};
use fitness_app::AppContext;
use fitness_errors::AppError;
use tower_sessions::Session;

use crate::session::{sign_in, sign_out};

pub async fn register(
    State(ctx): State<AppContext>,
    session: Session,
    Json(body): Json<Registration>,
) -> Result<(StatusCode, Json<SessionUser>), AppError> {
    let user = ctx.accounts.register(body).await?;
    sign_in(&session, &user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(ctx): State<AppContext>,
    session: Session,
    Json(body): Json<Credentials>,
) -> Result<Json<SessionUser>, AppError> {
    let user = ctx.accounts.login(body).await?;
    sign_in(&session, &user).await?;
    tracing::info!(user_id = %user.id, "Signed in");
    Ok(Json(user))
}

pub async fn logout(session: Session) -> Result<StatusCode, AppError> {
    sign_out(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}
