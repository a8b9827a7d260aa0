use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use fitness_app::domain::SessionUser;
use fitness_errors::AppError;
use tower_sessions::Session;

pub const SESSION_USER_KEY: &str = "user";

/// The signed-in user. Rejects with 401 when the session has none.
pub struct CurrentUser(pub SessionUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(msg.to_string()))?;

        let user: Option<SessionUser> = session
            .get(SESSION_USER_KEY)
            .await
            .map_err(|e| AppError::Internal(format!("session read failed: {}", e)))?;

        user.map(CurrentUser).ok_or(AppError::Unauthorized)
    }
}

pub async fn sign_in(session: &Session, user: &SessionUser) -> Result<(), AppError> {
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session cycle failed: {}", e)))?;
    session
        .insert(SESSION_USER_KEY, user)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {}", e)))
}

pub async fn sign_out(session: &Session) -> Result<(), AppError> {
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("session flush failed: {}", e)))
}

/// Rate-limit identity of the caller: the forwarded-for header as sent, or
/// `"local"` when there is none.
pub fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("local")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_key_from_forwarded_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(client_key(&headers), "local");

        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7"));
        assert_eq!(client_key(&headers), "203.0.113.7");

        headers.insert("x-forwarded-for", HeaderValue::from_static("  "));
        assert_eq!(client_key(&headers), "local");
    }
}
