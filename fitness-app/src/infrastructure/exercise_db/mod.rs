mod client;

pub use client::ExerciseDbClient;
