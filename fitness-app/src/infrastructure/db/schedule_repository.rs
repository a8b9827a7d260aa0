use super::entities::{workout_schedule, workout_template, WorkoutSchedule, WorkoutTemplate};
use crate::domain::{ScheduleEntry, ScheduleStatus};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct ScheduleRepository {
    db: DatabaseConnection,
}

impl ScheduleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Entries for `user_id` with the name of the scheduled template.
    pub async fn list_with_templates(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<(ScheduleEntry, Option<String>)>, DbErr> {
        let rows: Vec<(workout_schedule::Model, Option<workout_template::Model>)> =
            WorkoutSchedule::find()
                .filter(workout_schedule::Column::UserId.eq(user_id))
                .order_by_asc(workout_schedule::Column::Date)
                .find_also_related(WorkoutTemplate)
                .all(&self.db)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(entry, template)| (to_entry(entry), template.map(|t| t.name)))
            .collect())
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        template_id: Uuid,
        date: chrono::DateTime<chrono::Utc>,
    ) -> Result<ScheduleEntry, DbErr> {
        let status = ScheduleStatus::Upcoming;
        let active = workout_schedule::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            template_id: Set(template_id),
            date: Set(date),
            status: Set(status.as_str().to_string()),
            note: Set(None),
            color: Set(status.color().to_string()),
        };
        active.insert(&self.db).await.map(to_entry)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        user_id: Uuid,
        status: ScheduleStatus,
        note: Option<String>,
    ) -> Result<Option<ScheduleEntry>, DbErr> {
        let existing = WorkoutSchedule::find_by_id(id)
            .filter(workout_schedule::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: workout_schedule::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.color = Set(status.color().to_string());
        active.note = Set(note);
        active.update(&self.db).await.map(|m| Some(to_entry(m)))
    }

    pub async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> Result<bool, DbErr> {
        let result = WorkoutSchedule::delete_many()
            .filter(workout_schedule::Column::Id.eq(id))
            .filter(workout_schedule::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

fn to_entry(m: workout_schedule::Model) -> ScheduleEntry {
    // Rows written outside this service may carry a status we do not know.
    let status = m.status.parse().unwrap_or(ScheduleStatus::Upcoming);
    ScheduleEntry {
        id: m.id,
        template_id: m.template_id,
        date: m.date,
        status,
        note: m.note,
        color: status.color().to_string(),
    }
}
