use crate::domain::{
    CatalogEntry, CatalogLookup, CatalogPage, CatalogSource, Exercise, ExerciseQuery,
    MAX_EXERCISE_LIMIT,
};
use crate::infrastructure::db::{db_error, ExerciseRepository};
use crate::infrastructure::exercise_db::ExerciseDbClient;
use fitness_errors::AppError;
use std::collections::HashSet;
use uuid::Uuid;

/// Exercise library backed by a local cache of the ExerciseDB catalog.
pub struct ExerciseCatalog {
    repo: ExerciseRepository,
    client: ExerciseDbClient,
}

impl ExerciseCatalog {
    pub fn new(repo: ExerciseRepository, client: ExerciseDbClient) -> Self {
        Self { repo, client }
    }

    /// Serves from the cache when it has matches, otherwise fetches from the
    /// API and caches the result.
    pub async fn list(&self, query: ExerciseQuery) -> Result<CatalogPage, AppError> {
        query.validate()?;

        let cached = self.repo.search(&query).await.map_err(db_error)?;
        if !cached.is_empty() {
            return Ok(CatalogPage {
                source: CatalogSource::Cache,
                items: cached.into_iter().map(Exercise::from).collect(),
            });
        }

        let fetched = self.client.fetch(&query.lookup()).await?;
        let entries: Vec<CatalogEntry> = fetched
            .into_iter()
            .map(CatalogEntry::from)
            .take(query.effective_limit() as usize)
            .collect();
        tracing::info!(count = entries.len(), "Caching exercises from ExerciseDB");

        let stored = self.repo.upsert_many(entries).await.map_err(db_error)?;
        Ok(CatalogPage {
            source: CatalogSource::Api,
            items: stored.into_iter().map(Exercise::from).collect(),
        })
    }

    /// Pulls the full catalog page and upserts it. Returns how many were stored.
    pub async fn refresh(&self) -> Result<usize, AppError> {
        let fetched = self.client.fetch(&CatalogLookup::All(MAX_EXERCISE_LIMIT)).await?;
        let entries: Vec<CatalogEntry> = fetched.into_iter().map(CatalogEntry::from).collect();

        let stored = self.repo.upsert_many(entries).await.map_err(db_error)?;
        tracing::info!(count = stored.len(), "Exercise catalog refreshed");
        Ok(stored.len())
    }

    pub async fn known_ids(&self, ids: &[Uuid]) -> Result<HashSet<Uuid>, AppError> {
        self.repo.existing_ids(ids).await.map_err(db_error)
    }

    pub async fn saved(&self, user_id: Uuid) -> Result<Vec<Exercise>, AppError> {
        let saved = self.repo.list_saved(user_id).await.map_err(db_error)?;
        Ok(saved.into_iter().map(Exercise::from).collect())
    }

    pub async fn save(&self, user_id: Uuid, exercise_id: Uuid) -> Result<(), AppError> {
        if self.repo.find_by_id(exercise_id).await.map_err(db_error)?.is_none() {
            return Err(AppError::NotFound);
        }
        self.repo.save(user_id, exercise_id).await.map_err(db_error)
    }

    pub async fn unsave(&self, user_id: Uuid, exercise_id: Uuid) -> Result<(), AppError> {
        if self.repo.unsave(user_id, exercise_id).await.map_err(db_error)? {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }
}
