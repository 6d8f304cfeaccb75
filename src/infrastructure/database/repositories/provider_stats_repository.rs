//! SeaORM implementation of ProviderStatsRepository
//!
//! Guides, drivers and companies each keep their own statistic columns.

use async_trait::async_trait;
use log::debug;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, UpdateResult};
use sea_orm::sea_query::Expr;

use super::stats_from_columns;
use crate::domain::provider::{
    ProviderKind, ProviderProfile, ProviderStatsRepository, ResponseStats,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{companies, drivers, guides};

pub struct SeaOrmProviderStatsRepository {
    db: DatabaseConnection,
}

impl SeaOrmProviderStatsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProviderStatsRepository for SeaOrmProviderStatsRepository {
    async fn find_profile(
        &self,
        kind: ProviderKind,
        user_id: &str,
    ) -> DomainResult<Option<ProviderProfile>> {
        let found = match kind {
            ProviderKind::Guide => guides::Entity::find()
                .filter(guides::Column::UserId.eq(user_id))
                .one(&self.db)
                .await?
                .map(|m| (m.id, stats_from_columns(m.avg_response_time_minutes, m.response_count))),
            ProviderKind::Driver => drivers::Entity::find()
                .filter(drivers::Column::UserId.eq(user_id))
                .one(&self.db)
                .await?
                .map(|m| (m.id, stats_from_columns(m.avg_response_time_minutes, m.response_count))),
            ProviderKind::Company => companies::Entity::find()
                .filter(companies::Column::UserId.eq(user_id))
                .one(&self.db)
                .await?
                .map(|m| (m.id, stats_from_columns(m.avg_response_time_minutes, m.response_count))),
        };

        Ok(found.map(|(profile_id, stats)| ProviderProfile {
            kind,
            profile_id,
            user_id: user_id.to_string(),
            stats,
        }))
    }

    async fn update_stats(
        &self,
        kind: ProviderKind,
        profile_id: &str,
        stats: ResponseStats,
    ) -> DomainResult<()> {
        debug!(
            "Updating {} {} response stats: avg={:?} count={}",
            kind, profile_id, stats.avg_response_time_minutes, stats.response_count
        );

        let avg = stats.avg_response_time_minutes;
        let count = stats.response_count;
        let result: UpdateResult = match kind {
            ProviderKind::Guide => {
                guides::Entity::update_many()
                    .col_expr(guides::Column::AvgResponseTimeMinutes, Expr::value(avg))
                    .col_expr(guides::Column::ResponseCount, Expr::value(count))
                    .filter(guides::Column::Id.eq(profile_id))
                    .exec(&self.db)
                    .await?
            }
            ProviderKind::Driver => {
                drivers::Entity::update_many()
                    .col_expr(drivers::Column::AvgResponseTimeMinutes, Expr::value(avg))
                    .col_expr(drivers::Column::ResponseCount, Expr::value(count))
                    .filter(drivers::Column::Id.eq(profile_id))
                    .exec(&self.db)
                    .await?
            }
            ProviderKind::Company => {
                companies::Entity::update_many()
                    .col_expr(companies::Column::AvgResponseTimeMinutes, Expr::value(avg))
                    .col_expr(companies::Column::ResponseCount, Expr::value(count))
                    .filter(companies::Column::Id.eq(profile_id))
                    .exec(&self.db)
                    .await?
            }
        };

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Profile", profile_id));
        }
        Ok(())
    }
}
