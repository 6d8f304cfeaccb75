//! Guide profile entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guides")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub user_id: String,

    #[sea_orm(nullable)]
    pub photo: Option<String>,

    pub is_available: bool,

    /// Minor units
    #[sea_orm(nullable)]
    pub price_per_day: Option<i64>,
    pub currency: String,

    #[sea_orm(nullable)]
    pub avg_response_time_minutes: Option<i32>,
    pub response_count: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
