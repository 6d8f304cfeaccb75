//! Background task that expires unanswered inquiry responses.
//!
//! Runs in a tokio::spawn loop, marking `PENDING` responses older than
//! `expiry_days` as `EXPIRED`. Providers can still reply afterwards.

use std::sync::Arc;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use tokio::time::Duration;
use tracing::{info, warn};

use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::shutdown::ShutdownSignal;

/// Start the inquiry expiry background task.
pub fn start_inquiry_expiry_task(
    repos: Arc<dyn RepositoryProvider>,
    shutdown: ShutdownSignal,
    expiry_days: i64,
    check_interval_secs: u64,
) {
    tokio::spawn(async move {
        info!(
            expiry_days,
            check_interval = check_interval_secs,
            "⏳ Inquiry expiry task started"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(check_interval_secs.max(1)));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = expire_stale_responses(&repos, Utc::now(), expiry_days).await {
                        warn!(error = %e, "Inquiry expiry check error");
                    }
                }
                _ = shutdown.wait() => {
                    info!("⏳ Inquiry expiry task shutting down");
                    break;
                }
            }
        }

        info!("⏳ Inquiry expiry task stopped");
    });
}

/// Expire responses still pending `expiry_days` after creation.
/// Returns how many were expired.
pub async fn expire_stale_responses(
    repos: &Arc<dyn RepositoryProvider>,
    now: DateTime<Utc>,
    expiry_days: i64,
) -> DomainResult<usize> {
    let cutoff = ChronoDuration::try_days(expiry_days)
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or_else(|| {
            DomainError::Storage(format!("expiry window of {} days is out of range", expiry_days))
        })?;
    let stale = repos.inquiries().find_stale_pending(cutoff).await?;

    if stale.is_empty() {
        return Ok(0);
    }

    info!(count = stale.len(), "Expiring stale inquiry responses");

    let mut expired = 0;
    for mut response in stale {
        response.expire();
        match repos.inquiries().update_response(response).await {
            Ok(()) => expired += 1,
            Err(e) => warn!(error = %e, "Failed to expire inquiry response"),
        }
    }

    metrics::counter!("inquiry_responses_expired_total").increment(expired as u64);
    Ok(expired)
}
