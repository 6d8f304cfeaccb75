//! Delivery sinks for in-app notifications and email
//!
//! Real delivery (push, SMTP provider) lives outside this crate; the sinks
//! here cover development and tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Mutex;
use thiserror::Error;
use tracing::info;

use crate::shared::DomainError;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Recipient not found: {0}")]
    RecipientNotFound(String),

    #[error("Lookup failed: {0}")]
    Lookup(#[from] DomainError),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    BookingRequest,
    BookingConfirmed,
    BookingDeclined,
    BookingCancelled,
    BookingCompleted,
    InquiryResponse,
}

/// In-app notification shown in the recipient's inbox
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub booking_id: Option<String>,
    pub inquiry_id: Option<String>,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError>;
}

#[async_trait]
pub trait EmailSink: Send + Sync {
    async fn send(&self, email: EmailMessage) -> Result<(), NotifyError>;
}

/// Per-user inbox kept in memory.
#[derive(Default)]
pub struct InMemoryNotificationSink {
    inbox: DashMap<String, Vec<Notification>>,
}

impl InMemoryNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_user(&self, user_id: &str) -> Vec<Notification> {
        self.inbox
            .get(user_id)
            .map(|n| n.value().clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl NotificationSink for InMemoryNotificationSink {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        self.inbox
            .entry(notification.user_id.clone())
            .or_default()
            .push(notification);
        Ok(())
    }
}

/// Writes emails to the log instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct LogEmailSink;

#[async_trait]
impl EmailSink for LogEmailSink {
    async fn send(&self, email: EmailMessage) -> Result<(), NotifyError> {
        info!(
            to = %email.to,
            subject = %email.subject,
            "📧 Email (not delivered, log sink)"
        );
        Ok(())
    }
}

/// Captures outgoing emails; a mail trap for local runs and tests.
#[derive(Default)]
pub struct InMemoryEmailSink {
    sent: Mutex<Vec<EmailMessage>>,
}

impl InMemoryEmailSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn sent_to(&self, address: &str) -> Vec<EmailMessage> {
        self.sent()
            .into_iter()
            .filter(|m| m.to == address)
            .collect()
    }
}

#[async_trait]
impl EmailSink for InMemoryEmailSink {
    async fn send(&self, email: EmailMessage) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .map_err(|e| NotifyError::Delivery(e.to_string()))?
            .push(email);
        Ok(())
    }
}
