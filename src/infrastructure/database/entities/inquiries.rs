//! Inquiry entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inquiries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Customer
    pub user_id: String,

    /// TOUR, GUIDE, DRIVER, COMPANY
    pub target_type: String,

    /// JSON array of target ids
    #[sea_orm(column_type = "Text")]
    pub target_ids: String,

    pub subject: String,

    #[sea_orm(column_type = "Text")]
    pub message: String,

    #[sea_orm(nullable)]
    pub requested_date: Option<Date>,

    #[sea_orm(nullable)]
    pub guests: Option<i32>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inquiry_responses::Entity")]
    Responses,
}

impl Related<super::inquiry_responses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Responses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
