pub mod entities;
mod exercise_repository;
mod log_repository;
mod schedule_repository;
mod template_repository;
mod user_repository;

pub use exercise_repository::ExerciseRepository;
pub use log_repository::LogRepository;
pub use schedule_repository::ScheduleRepository;
pub use template_repository::TemplateRepository;
pub use user_repository::UserRepository;

use fitness_errors::AppError;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use std::time::Duration;

pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

/// Applies the bundled schema. Statements are idempotent (`IF NOT EXISTS`),
/// so a failing statement is logged and the rest still run.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let migration = include_str!("../../../../migrations/001_initial.sql");

    for statement in migration.split(';') {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }
        if let Err(e) = db
            .execute(Statement::from_string(
                sea_orm::DatabaseBackend::Postgres,
                statement.to_string(),
            ))
            .await
        {
            tracing::warn!("Migration statement skipped: {}", e);
        }
    }

    Ok(())
}

pub fn db_error(e: DbErr) -> AppError {
    tracing::error!("Database error: {}", e);
    AppError::Database(e.to_string())
}

/// For inserts and updates: constraint violations are the caller's fault,
/// anything else is ours.
pub fn write_error(e: DbErr) -> AppError {
    classify_write_error(e.sql_err(), e)
}

fn classify_write_error(sql_err: Option<SqlErr>, e: DbErr) -> AppError {
    match sql_err {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::warn!("Unique constraint violated: {}", detail);
            AppError::Conflict("Record already exists".to_string())
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            tracing::warn!("Foreign key constraint violated: {}", detail);
            AppError::Validation("Referenced record does not exist".to_string())
        }
        _ => db_error(e),
    }
}
