use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workout_templates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub goal: Option<String>,
    pub duration_min: Option<i32>,
    pub equipment: Option<String>,
    pub target_muscles: Option<String>,
    pub created_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::template_exercise::Entity")]
    TemplateExercises,
    #[sea_orm(has_many = "super::workout_schedule::Entity")]
    Schedules,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::template_exercise::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TemplateExercises.def()
    }
}

impl Related<super::workout_schedule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::WorkoutTemplate {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            notes: m.notes,
            goal: m.goal,
            duration_min: m.duration_min,
            equipment: m.equipment,
            target_muscles: m.target_muscles,
            created_at: m.created_at,
        }
    }
}
