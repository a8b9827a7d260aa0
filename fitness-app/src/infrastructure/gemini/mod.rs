mod client;
mod prompt;
mod response_parser;
mod types;

pub use client::GeminiClient;
pub use prompt::{build_form_tips_prompt, build_workout_prompt, is_off_topic, OFF_TOPIC_REPLY};
pub use response_parser::{
    parse_form_tips, parse_model_output, parse_workout_plan, recover, strip_code_fences,
    ParseFailure, PlanError,
};
