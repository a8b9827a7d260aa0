use axum::http::HeaderMap;
use fitness_app::infrastructure::security::{RateLimiter, RouteLimit};
use fitness_errors::AppError;

use crate::session::client_key;

/// Spends one permit of `route` for the caller or fails with 429.
pub fn enforce(limiter: &RateLimiter, route: RouteLimit, headers: &HeaderMap) -> Result<(), AppError> {
    let client = client_key(headers);
    let decision = limiter.check_route(route, &client);
    if decision.allowed {
        return Ok(());
    }

    tracing::warn!(route = route.tag, client = %client, "Rate limit exceeded");
    Err(AppError::RateLimited(denial_message(route)))
}

fn denial_message(route: RouteLimit) -> String {
    if route == RouteLimit::AI_GENERATE || route == RouteLimit::AI_FORM_TIPS {
        format!(
            "You've reached your limit of {} AI requests per minute. Please wait a moment and try again.",
            route.limit
        )
    } else {
        "Rate limit exceeded".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_enforce_denies_after_budget() {
        let limiter = RateLimiter::new();
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("198.51.100.1"));

        for _ in 0..RouteLimit::AI_GENERATE.limit {
            assert!(enforce(&limiter, RouteLimit::AI_GENERATE, &headers).is_ok());
        }
        let err = enforce(&limiter, RouteLimit::AI_GENERATE, &headers).unwrap_err();
        assert!(err.user_message().contains("10 AI requests per minute"));

        // Separate budget per route and per client.
        assert!(enforce(&limiter, RouteLimit::AI_FORM_TIPS, &headers).is_ok());
        assert!(enforce(&limiter, RouteLimit::AI_GENERATE, &HeaderMap::new()).is_ok());
    }

    #[test]
    fn test_non_ai_denial_message() {
        assert_eq!(denial_message(RouteLimit::NUTRITION_SEARCH), "Rate limit exceeded");
    }
}
