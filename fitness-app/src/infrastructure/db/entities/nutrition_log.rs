use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "nutrition_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub logged_at: DateTimeUtc,
    pub food: String,
    pub calories: f64,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::NutritionLog {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            logged_at: m.logged_at,
            food: m.food,
            calories: m.calories,
            protein: m.protein,
            carbs: m.carbs,
            fat: m.fat,
        }
    }
}
