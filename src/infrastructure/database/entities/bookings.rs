//! Booking entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub reference_number: String,

    /// Customer
    pub user_id: String,

    /// TOUR, GUIDE, DRIVER
    pub entity_type: String,
    pub entity_id: String,

    #[sea_orm(nullable)]
    pub provider_user_id: Option<String>,

    #[sea_orm(nullable)]
    pub inquiry_id: Option<String>,

    pub entity_name: String,

    #[sea_orm(nullable)]
    pub entity_image: Option<String>,

    #[sea_orm(nullable)]
    pub provider_name: Option<String>,

    #[sea_orm(nullable)]
    pub date: Option<Date>,

    pub guests: i32,

    /// Minor units
    pub total_price: i64,
    pub currency: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,

    #[sea_orm(nullable)]
    pub contact_phone: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub provider_notes: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub declined_reason: Option<String>,

    /// PENDING, CONFIRMED, COMPLETED, CANCELLED, DECLINED
    pub status: String,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,

    #[sea_orm(nullable)]
    pub cancelled_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
