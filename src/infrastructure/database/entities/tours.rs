//! Tour entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tours")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub owner_id: String,
    pub title: String,

    #[sea_orm(nullable)]
    pub image: Option<String>,

    pub is_active: bool,

    /// Price per guest in minor units (tetri)
    pub price: i64,
    pub currency: String,

    /// DAILY, WEEKDAYS, WEEKENDS, SPECIFIC_DATES, BY_REQUEST
    pub availability_type: String,

    /// JSON array of `YYYY-MM-DD` strings
    #[sea_orm(column_type = "Text", nullable)]
    pub available_dates: Option<String>,

    #[sea_orm(nullable)]
    pub max_people: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
