//! SeaORM implementation of InquiryRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::domain::inquiry::{
    Inquiry, InquiryRepository, InquiryResponse, InquiryResponseStatus, InquiryTargetType,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{inquiries, inquiry_responses};

pub struct SeaOrmInquiryRepository {
    db: DatabaseConnection,
}

impl SeaOrmInquiryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn inquiry_to_domain(m: inquiries::Model) -> DomainResult<Inquiry> {
    let target_type = InquiryTargetType::parse(&m.target_type).ok_or_else(|| {
        DomainError::Storage(format!("Inquiry {} has unknown target type {}", m.id, m.target_type))
    })?;
    let target_ids: Vec<String> = serde_json::from_str(&m.target_ids).map_err(|e| {
        DomainError::Storage(format!("Inquiry {} has malformed target ids: {}", m.id, e))
    })?;

    Ok(Inquiry {
        id: m.id,
        user_id: m.user_id,
        target_type,
        target_ids,
        subject: m.subject,
        message: m.message,
        requested_date: m.requested_date,
        guests: m.guests,
        created_at: m.created_at,
    })
}

fn response_to_domain(m: inquiry_responses::Model) -> DomainResult<InquiryResponse> {
    let status = InquiryResponseStatus::parse(&m.status).ok_or_else(|| {
        DomainError::Storage(format!("Inquiry response {} has unknown status {}", m.id, m.status))
    })?;

    Ok(InquiryResponse {
        id: m.id,
        inquiry_id: m.inquiry_id,
        recipient_id: m.recipient_id,
        status,
        message: m.message,
        responded_at: m.responded_at,
        created_at: m.created_at,
    })
}

fn response_to_active(r: InquiryResponse) -> inquiry_responses::ActiveModel {
    inquiry_responses::ActiveModel {
        id: Set(r.id),
        inquiry_id: Set(r.inquiry_id),
        recipient_id: Set(r.recipient_id),
        status: Set(r.status.as_str().to_string()),
        message: Set(r.message),
        responded_at: Set(r.responded_at),
        created_at: Set(r.created_at),
    }
}

fn responses_to_domain(models: Vec<inquiry_responses::Model>) -> DomainResult<Vec<InquiryResponse>> {
    models.into_iter().map(response_to_domain).collect()
}

#[async_trait]
impl InquiryRepository for SeaOrmInquiryRepository {
    async fn save(&self, inquiry: Inquiry, responses: Vec<InquiryResponse>) -> DomainResult<()> {
        debug!(
            "Saving inquiry: {} with {} recipient(s)",
            inquiry.id,
            responses.len()
        );

        let target_ids = serde_json::to_string(&inquiry.target_ids)
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let model = inquiries::ActiveModel {
            id: Set(inquiry.id),
            user_id: Set(inquiry.user_id),
            target_type: Set(inquiry.target_type.as_str().to_string()),
            target_ids: Set(target_ids),
            subject: Set(inquiry.subject),
            message: Set(inquiry.message),
            requested_date: Set(inquiry.requested_date),
            guests: Set(inquiry.guests),
            created_at: Set(inquiry.created_at),
        };

        let txn = self.db.begin().await?;
        model.insert(&txn).await?;
        for response in responses {
            response_to_active(response).insert(&txn).await?;
        }
        txn.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Inquiry>> {
        inquiries::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .map(inquiry_to_domain)
            .transpose()
    }

    async fn find_response(
        &self,
        inquiry_id: &str,
        recipient_id: &str,
    ) -> DomainResult<Option<InquiryResponse>> {
        inquiry_responses::Entity::find()
            .filter(inquiry_responses::Column::InquiryId.eq(inquiry_id))
            .filter(inquiry_responses::Column::RecipientId.eq(recipient_id))
            .one(&self.db)
            .await?
            .map(response_to_domain)
            .transpose()
    }

    async fn find_responses(&self, inquiry_id: &str) -> DomainResult<Vec<InquiryResponse>> {
        let models = inquiry_responses::Entity::find()
            .filter(inquiry_responses::Column::InquiryId.eq(inquiry_id))
            .order_by_asc(inquiry_responses::Column::CreatedAt)
            .all(&self.db)
            .await?;
        responses_to_domain(models)
    }

    async fn update_response(&self, response: InquiryResponse) -> DomainResult<()> {
        debug!(
            "Updating inquiry response: {} -> {}",
            response.id, response.status
        );

        let existing = inquiry_responses::Entity::find_by_id(response.id.clone())
            .one(&self.db)
            .await?;
        if existing.is_none() {
            return Err(DomainError::not_found("InquiryResponse", response.id));
        }

        response_to_active(response).update(&self.db).await?;
        Ok(())
    }

    async fn find_stale_pending(
        &self,
        created_before: DateTime<Utc>,
    ) -> DomainResult<Vec<InquiryResponse>> {
        let models = inquiry_responses::Entity::find()
            .filter(inquiry_responses::Column::Status.eq(InquiryResponseStatus::Pending.as_str()))
            .filter(inquiry_responses::Column::CreatedAt.lt(created_before))
            .all(&self.db)
            .await?;
        responses_to_domain(models)
    }
}
