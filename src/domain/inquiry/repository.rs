//! Inquiry repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Inquiry, InquiryResponse};
use crate::shared::DomainResult;

#[async_trait]
pub trait InquiryRepository: Send + Sync {
    /// Insert an inquiry together with its recipients' responses
    async fn save(&self, inquiry: Inquiry, responses: Vec<InquiryResponse>) -> DomainResult<()>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Inquiry>>;

    async fn find_response(
        &self,
        inquiry_id: &str,
        recipient_id: &str,
    ) -> DomainResult<Option<InquiryResponse>>;

    async fn find_responses(&self, inquiry_id: &str) -> DomainResult<Vec<InquiryResponse>>;

    async fn update_response(&self, response: InquiryResponse) -> DomainResult<()>;

    /// Pending responses created before `created_before`
    async fn find_stale_pending(
        &self,
        created_before: DateTime<Utc>,
    ) -> DomainResult<Vec<InquiryResponse>>;
}
