//! Inquiry response entity, one row per recipient

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inquiry_responses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub inquiry_id: String,
    pub recipient_id: String,

    /// PENDING, RESPONDED, ACCEPTED, DECLINED, EXPIRED
    pub status: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub message: Option<String>,

    #[sea_orm(nullable)]
    pub responded_at: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inquiries::Entity",
        from = "Column::InquiryId",
        to = "super::inquiries::Column::Id"
    )]
    Inquiry,
}

impl Related<super::inquiries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inquiry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
