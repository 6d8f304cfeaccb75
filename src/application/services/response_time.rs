//! Provider response-time tracking
//!
//! A user may own several provider profiles at once (say a guide and a
//! driver profile); each of them absorbs the same response event.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::provider::{ProviderKind, ProviderProfile};
use crate::domain::{DomainResult, RepositoryProvider};

/// Whole minutes between two instants, rounded half away from zero.
pub fn response_minutes(inquiry_created_at: DateTime<Utc>, responded_at: DateTime<Utc>) -> i64 {
    let millis = (responded_at - inquiry_created_at).num_milliseconds();
    (millis as f64 / 60_000.0).round() as i64
}

#[derive(Clone)]
pub struct ResponseTimeTracker {
    repos: Arc<dyn RepositoryProvider>,
}

impl ResponseTimeTracker {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Fold one response into every profile the responder owns.
    /// Returns the updated profiles; empty if the user has none.
    pub async fn record_response(
        &self,
        responder_id: &str,
        inquiry_created_at: DateTime<Utc>,
        responded_at: DateTime<Utc>,
    ) -> DomainResult<Vec<ProviderProfile>> {
        let minutes = response_minutes(inquiry_created_at, responded_at);
        let stats_repo = self.repos.provider_stats();

        let mut updated = Vec::new();
        for kind in ProviderKind::ALL {
            let Some(mut profile) = stats_repo.find_profile(kind, responder_id).await? else {
                continue;
            };
            profile.stats = profile.stats.record(minutes);
            stats_repo
                .update_stats(kind, &profile.profile_id, profile.stats)
                .await?;

            debug!(
                kind = %kind,
                profile_id = %profile.profile_id,
                minutes,
                avg = ?profile.stats.avg_response_time_minutes,
                count = profile.stats.response_count,
                "Response time recorded"
            );
            updated.push(profile);
        }
        Ok(updated)
    }
}
