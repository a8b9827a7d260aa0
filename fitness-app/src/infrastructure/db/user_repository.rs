use super::entities::{user, User};
use crate::domain::ProfileUpdate;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, DbErr> {
        User::find_by_id(id).one(&self.db).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    pub async fn create(
        &self,
        email: String,
        name: String,
        password_hash: String,
    ) -> Result<user::Model, DbErr> {
        let now = chrono::Utc::now();
        let active = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            name: Set(name),
            password_hash: Set(password_hash),
            goals: Set(None),
            equipment: Set(None),
            dietary_info: Set(None),
            preferences: Set(None),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };
        active.insert(&self.db).await
    }

    /// Applies only the fields present in `update`.
    pub async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<user::Model>, DbErr> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.into();
        if let Some(name) = &update.name {
            active.name = Set(name.clone());
        }
        if let Some(goals) = &update.goals {
            active.goals = Set(Some(goals.clone()));
        }
        if let Some(equipment) = &update.equipment {
            active.equipment = Set(Some(equipment.clone()));
        }
        if let Some(dietary_info) = &update.dietary_info {
            active.dietary_info = Set(Some(dietary_info.clone()));
        }
        if let Some(preferences) = &update.preferences {
            active.preferences = Set(Some(preferences.clone()));
        }
        active.updated_at = Set(Some(chrono::Utc::now()));
        active.update(&self.db).await.map(Some)
    }
}
