use super::entities::{nutrition_log, progress_log, workout_log, NutritionLog, ProgressLog, WorkoutLog};
use crate::domain::{DateRange, NewNutritionLog, NewProgressLog, NewWorkoutLog};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Workout, nutrition and progress logs. Listings are newest first.
#[derive(Clone)]
pub struct LogRepository {
    db: DatabaseConnection,
}

impl LogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_workouts(
        &self,
        user_id: Uuid,
        range: &DateRange<DateTime<Utc>>,
    ) -> Result<Vec<workout_log::Model>, DbErr> {
        let mut select = WorkoutLog::find().filter(workout_log::Column::UserId.eq(user_id));
        if let Some(from) = range.from {
            select = select.filter(workout_log::Column::StartedAt.gte(from));
        }
        if let Some(to) = range.to {
            select = select.filter(workout_log::Column::StartedAt.lte(to));
        }
        select
            .order_by_desc(workout_log::Column::StartedAt)
            .all(&self.db)
            .await
    }

    pub async fn create_workout(
        &self,
        user_id: Uuid,
        log: NewWorkoutLog,
    ) -> Result<workout_log::Model, DbErr> {
        let active = workout_log::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            template_id: Set(log.template_id),
            started_at: Set(log.started_at.unwrap_or_else(Utc::now)),
            duration_min: Set(log.duration_min),
            notes: Set(log.notes),
        };
        active.insert(&self.db).await
    }

    pub async fn list_nutrition(
        &self,
        user_id: Uuid,
        range: &DateRange<DateTime<Utc>>,
    ) -> Result<Vec<nutrition_log::Model>, DbErr> {
        let mut select = NutritionLog::find().filter(nutrition_log::Column::UserId.eq(user_id));
        if let Some(from) = range.from {
            select = select.filter(nutrition_log::Column::LoggedAt.gte(from));
        }
        if let Some(to) = range.to {
            select = select.filter(nutrition_log::Column::LoggedAt.lte(to));
        }
        select
            .order_by_desc(nutrition_log::Column::LoggedAt)
            .all(&self.db)
            .await
    }

    pub async fn create_nutrition(
        &self,
        user_id: Uuid,
        log: NewNutritionLog,
    ) -> Result<nutrition_log::Model, DbErr> {
        let active = nutrition_log::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            logged_at: Set(log.logged_at.unwrap_or_else(Utc::now)),
            food: Set(log.food.trim().to_string()),
            calories: Set(log.calories),
            protein: Set(log.protein),
            carbs: Set(log.carbs),
            fat: Set(log.fat),
        };
        active.insert(&self.db).await
    }

    pub async fn list_progress(
        &self,
        user_id: Uuid,
        range: &DateRange<NaiveDate>,
    ) -> Result<Vec<progress_log::Model>, DbErr> {
        let mut select = ProgressLog::find().filter(progress_log::Column::UserId.eq(user_id));
        if let Some(from) = range.from {
            select = select.filter(progress_log::Column::Date.gte(from));
        }
        if let Some(to) = range.to {
            select = select.filter(progress_log::Column::Date.lte(to));
        }
        select
            .order_by_desc(progress_log::Column::Date)
            .all(&self.db)
            .await
    }

    pub async fn create_progress(
        &self,
        user_id: Uuid,
        log: NewProgressLog,
    ) -> Result<progress_log::Model, DbErr> {
        let active = progress_log::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            date: Set(log.date.unwrap_or_else(|| Utc::now().date_naive())),
            weight_kg: Set(log.weight_kg),
            body_fat_pct: Set(log.body_fat_pct),
        };
        active.insert(&self.db).await
    }
}
