use super::entities::{template_exercise, workout_template, TemplateExercise, WorkoutTemplate};
use crate::domain::{NewTemplate, TemplateExerciseItem, TemplatePatch, TemplateSettings};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, TransactionTrait};
use uuid::Uuid;

/// Workout templates and their exercises. Every lookup is scoped to the owner.
#[derive(Clone)]
pub struct TemplateRepository {
    db: DatabaseConnection,
}

impl TemplateRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<workout_template::Model>, DbErr> {
        WorkoutTemplate::find()
            .filter(workout_template::Column::UserId.eq(user_id))
            .order_by_desc(workout_template::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn find_owned(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<workout_template::Model>, DbErr> {
        WorkoutTemplate::find_by_id(id)
            .filter(workout_template::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        template: &NewTemplate,
    ) -> Result<workout_template::Model, DbErr> {
        let active = workout_template::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(template.name.trim().to_string()),
            notes: Set(template.notes.clone()),
            goal: Set(template.goal.clone()),
            duration_min: Set(template.duration_min),
            equipment: Set(template.equipment.clone()),
            target_muscles: Set(template.target_muscles.clone()),
            created_at: Set(Some(chrono::Utc::now())),
        };
        active.insert(&self.db).await
    }

    pub async fn patch(
        &self,
        id: Uuid,
        user_id: Uuid,
        patch: &TemplatePatch,
    ) -> Result<Option<workout_template::Model>, DbErr> {
        let Some(existing) = self.find_owned(id, user_id).await? else {
            return Ok(None);
        };

        let mut active: workout_template::ActiveModel = existing.into();
        if let Some(name) = &patch.name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(notes) = &patch.notes {
            active.notes = Set(Some(notes.clone()));
        }
        active.update(&self.db).await.map(Some)
    }

    /// Replaces goal, duration, equipment and target muscles wholesale.
    pub async fn update_settings(
        &self,
        id: Uuid,
        user_id: Uuid,
        settings: &TemplateSettings,
    ) -> Result<Option<workout_template::Model>, DbErr> {
        let Some(existing) = self.find_owned(id, user_id).await? else {
            return Ok(None);
        };

        let mut active: workout_template::ActiveModel = existing.into();
        active.goal = Set(settings.goal.clone());
        active.duration_min = Set(settings.duration_min);
        active.equipment = Set(settings.equipment.clone());
        active.target_muscles = Set(settings.target_muscles.clone());
        active.update(&self.db).await.map(Some)
    }

    pub async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> Result<bool, DbErr> {
        let result = WorkoutTemplate::delete_many()
            .filter(workout_template::Column::Id.eq(id))
            .filter(workout_template::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn list_exercises(
        &self,
        template_id: Uuid,
    ) -> Result<Vec<template_exercise::Model>, DbErr> {
        TemplateExercise::find()
            .filter(template_exercise::Column::TemplateId.eq(template_id))
            .order_by_asc(template_exercise::Column::Position)
            .all(&self.db)
            .await
    }

    pub async fn add_exercises(
        &self,
        template_id: Uuid,
        items: &[TemplateExerciseItem],
    ) -> Result<Vec<template_exercise::Model>, DbErr> {
        let txn = self.db.begin().await?;

        let mut inserted = Vec::with_capacity(items.len());
        for item in items {
            let active = template_exercise::ActiveModel {
                id: Set(Uuid::new_v4()),
                template_id: Set(template_id),
                exercise_id: Set(item.exercise_id),
                position: Set(item.position),
                sets: Set(item.sets),
                reps: Set(item.reps),
                rest_sec: Set(item.rest_sec),
            };
            inserted.push(active.insert(&txn).await?);
        }

        txn.commit().await?;
        Ok(inserted)
    }
}
