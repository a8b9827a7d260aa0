mod input_sanitizer;
mod password;
mod rate_limiter;

pub use input_sanitizer::InputSanitizer;
pub use password::PasswordHasherService;
pub use rate_limiter::{Clock, RateDecision, RateLimiter, RouteLimit, SystemClock};
