mod client;

pub use client::NutritionixClient;
