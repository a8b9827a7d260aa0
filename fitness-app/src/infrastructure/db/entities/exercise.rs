use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "exercises")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub gif_url: Option<String>,
    pub body_part: Option<String>,
    pub equipment: Option<String>,
    pub target: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub instructions: Option<String>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::saved_exercise::Entity")]
    SavedExercises,
}

impl Related<super::saved_exercise::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SavedExercises.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Exercise {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            gif_url: m.gif_url,
            body_part: m.body_part,
            equipment: m.equipment,
            target: m.target,
            instructions: m.instructions,
        }
    }
}
