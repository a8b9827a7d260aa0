use super::entities::{exercise, saved_exercise, Exercise, SavedExercise};
use crate::domain::{CatalogEntry, ExerciseQuery};
use sea_orm::sea_query::{Expr, Func, LikeExpr, OnConflict};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Clone)]
pub struct ExerciseRepository {
    db: DatabaseConnection,
}

impl ExerciseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<exercise::Model>, DbErr> {
        Exercise::find_by_id(id).one(&self.db).await
    }

    /// The subset of `ids` that exist in the catalog.
    pub async fn existing_ids(&self, ids: &[Uuid]) -> Result<HashSet<Uuid>, DbErr> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let found = Exercise::find()
            .select_only()
            .column(exercise::Column::Id)
            .filter(exercise::Column::Id.is_in(ids.iter().copied()))
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await?;
        Ok(found.into_iter().collect())
    }

    /// Cached exercises matching every filter in `query`; name is a
    /// case-insensitive substring match.
    pub async fn search(&self, query: &ExerciseQuery) -> Result<Vec<exercise::Model>, DbErr> {
        let mut select = Exercise::find();

        if let Some(body_part) = query.body_part() {
            select = select.filter(exercise::Column::BodyPart.eq(body_part));
        }
        if let Some(equipment) = query.equipment() {
            select = select.filter(exercise::Column::Equipment.eq(equipment));
        }
        if let Some(target) = query.target() {
            select = select.filter(exercise::Column::Target.eq(target));
        }
        if let Some(pattern) = query.name_pattern() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(exercise::Column::Name)))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }

        select
            .order_by_asc(exercise::Column::Name)
            .limit(query.effective_limit())
            .all(&self.db)
            .await
    }

    /// Inserts new exercises and refreshes existing ones, matched by name.
    /// Postgres rejects an upsert touching the same row twice, so repeated
    /// names keep their first occurrence.
    pub async fn upsert_many(&self, entries: Vec<CatalogEntry>) -> Result<Vec<exercise::Model>, DbErr> {
        let mut seen = HashSet::new();
        let entries: Vec<CatalogEntry> = entries
            .into_iter()
            .filter(|e| seen.insert(e.name.clone()))
            .collect();
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let now = chrono::Utc::now();
        let names: Vec<String> = entries.iter().map(|e| e.name.clone()).collect();
        let models = entries.into_iter().map(|e| exercise::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(e.name),
            gif_url: Set(e.gif_url),
            body_part: Set(e.body_part),
            equipment: Set(e.equipment),
            target: Set(e.target),
            instructions: Set(e.instructions),
            updated_at: Set(Some(now)),
        });

        Exercise::insert_many(models)
            .on_conflict(
                OnConflict::column(exercise::Column::Name)
                    .update_columns([
                        exercise::Column::GifUrl,
                        exercise::Column::BodyPart,
                        exercise::Column::Equipment,
                        exercise::Column::Target,
                        exercise::Column::Instructions,
                        exercise::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        Exercise::find()
            .filter(exercise::Column::Name.is_in(names))
            .order_by_asc(exercise::Column::Name)
            .all(&self.db)
            .await
    }

    pub async fn list_saved(&self, user_id: Uuid) -> Result<Vec<exercise::Model>, DbErr> {
        let rows = SavedExercise::find()
            .filter(saved_exercise::Column::UserId.eq(user_id))
            .order_by_desc(saved_exercise::Column::CreatedAt)
            .find_also_related(Exercise)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().filter_map(|(_, exercise)| exercise).collect())
    }

    /// Saving twice is a no-op.
    pub async fn save(&self, user_id: Uuid, exercise_id: Uuid) -> Result<(), DbErr> {
        let active = saved_exercise::ActiveModel {
            user_id: Set(user_id),
            exercise_id: Set(exercise_id),
            created_at: Set(Some(chrono::Utc::now())),
        };

        SavedExercise::insert(active)
            .on_conflict(
                OnConflict::columns([
                    saved_exercise::Column::UserId,
                    saved_exercise::Column::ExerciseId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .do_nothing()
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub async fn unsave(&self, user_id: Uuid, exercise_id: Uuid) -> Result<bool, DbErr> {
        let result = SavedExercise::delete_many()
            .filter(saved_exercise::Column::UserId.eq(user_id))
            .filter(saved_exercise::Column::ExerciseId.eq(exercise_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
