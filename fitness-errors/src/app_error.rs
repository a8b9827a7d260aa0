use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Not found")]
    NotFound,

    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Upstream service failed: {0}")]
    Upstream(String),

    #[error("AI response could not be parsed: {0}")]
    AiResponse(String),

    #[error("Request is not about fitness")]
    OffTopic,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Missing or invalid configuration: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation(msg) => msg,
            Self::Unauthorized => "Please sign in to continue.",
            Self::InvalidCredentials => "Email or password is incorrect.",
            Self::Conflict(msg) => msg,
            Self::NotFound => "Not found",
            Self::RateLimited(msg) => msg,
            Self::Upstream(_) => "An external service is unavailable. Try again later.",
            Self::AiResponse(_) => "The AI returned a response we could not read. Try again.",
            Self::OffTopic => "I can only help with fitness-related questions.",
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) => {
                "Something went wrong on our side. Try again later."
            }
        }
    }
}

#[cfg(feature = "http")]
mod http_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        error: String,
    }

    impl AppError {
        pub fn status_code(&self) -> StatusCode {
            match self {
                AppError::Validation(_) => StatusCode::BAD_REQUEST,
                AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AppError::Conflict(_) => StatusCode::CONFLICT,
                AppError::NotFound => StatusCode::NOT_FOUND,
                AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                AppError::Upstream(_) | AppError::AiResponse(_) => StatusCode::BAD_GATEWAY,
                AppError::OffTopic => StatusCode::UNPROCESSABLE_ENTITY,
                AppError::Database(_) | AppError::Configuration(_) | AppError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        }
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            if status.is_server_error() {
                tracing::error!(error = %self, "request failed");
            }
            let error = self.user_message().to_string();
            (status, Json(ErrorResponse { error })).into_response()
        }
    }
}
