pub mod db;
pub mod exercise_db;
pub mod gemini;
pub mod nutritionix;
pub mod security;
