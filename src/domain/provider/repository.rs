//! Provider statistics repository interface

use async_trait::async_trait;

use super::model::{ProviderKind, ProviderProfile, ResponseStats};
use crate::shared::DomainResult;

#[async_trait]
pub trait ProviderStatsRepository: Send + Sync {
    /// The user's profile of the given kind, if they have one
    async fn find_profile(
        &self,
        kind: ProviderKind,
        user_id: &str,
    ) -> DomainResult<Option<ProviderProfile>>;

    async fn update_stats(
        &self,
        kind: ProviderKind,
        profile_id: &str,
        stats: ResponseStats,
    ) -> DomainResult<()>;
}
