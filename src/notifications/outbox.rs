//! Fire-and-forget notification outbox
//!
//! `Notifier::emit` queues a notice on an unbounded channel and returns at
//! once. A single worker task resolves recipients, renders the text and
//! hands it to the sinks. Delivery failures are logged and counted; they
//! never reach the operation that emitted the notice.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::domain::user::User;
use crate::domain::RepositoryProvider;

use super::events::{render, Notice};
use super::sinks::{EmailMessage, EmailSink, Notification, NotificationSink, NotifyError};

/// Settings for rendering and email delivery
#[derive(Debug, Clone)]
pub struct NotifierSettings {
    /// Base URL of the public site, used for deep links
    pub public_url: String,
    pub email_enabled: bool,
    pub from_address: String,
}

impl Default for NotifierSettings {
    fn default() -> Self {
        Self {
            public_url: "http://localhost:3000".to_string(),
            email_enabled: true,
            from_address: "bookings@localhost".to_string(),
        }
    }
}

enum OutboxMessage {
    Notice(Box<Notice>),
    Flush(oneshot::Sender<()>),
}

/// Handle for emitting notices. Cheap to clone.
#[derive(Clone)]
pub struct Notifier {
    sender: mpsc::UnboundedSender<OutboxMessage>,
}

impl Notifier {
    /// Start the outbox worker. Must be called inside a tokio runtime.
    pub fn spawn(
        repos: Arc<dyn RepositoryProvider>,
        notifications: Arc<dyn NotificationSink>,
        email: Arc<dyn EmailSink>,
        settings: NotifierSettings,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = OutboxWorker {
            repos,
            notifications,
            email,
            settings,
        };
        tokio::spawn(worker.run(receiver));
        Self { sender }
    }

    /// Queue a notice. Never blocks and never fails the caller.
    pub fn emit(&self, notice: Notice) {
        let event_type = notice.event_type();
        if self
            .sender
            .send(OutboxMessage::Notice(Box::new(notice)))
            .is_err()
        {
            warn!(event_type, "Notification outbox is closed, notice dropped");
        }
    }

    /// Wait until every notice queued before this call has been handled.
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        if self.sender.send(OutboxMessage::Flush(tx)).is_ok() {
            let _ = rx.await;
        }
    }
}

struct OutboxWorker {
    repos: Arc<dyn RepositoryProvider>,
    notifications: Arc<dyn NotificationSink>,
    email: Arc<dyn EmailSink>,
    settings: NotifierSettings,
}

impl OutboxWorker {
    async fn run(self, mut receiver: mpsc::UnboundedReceiver<OutboxMessage>) {
        while let Some(message) = receiver.recv().await {
            match message {
                OutboxMessage::Notice(notice) => self.handle(&notice).await,
                OutboxMessage::Flush(done) => {
                    let _ = done.send(());
                }
            }
        }
        debug!("Notification outbox stopped");
    }

    async fn handle(&self, notice: &Notice) {
        let booking_id = notice.booking().map(|b| b.id.as_str());
        let inquiry_id = notice.inquiry_id();

        let Some(recipient_id) = notice.recipient_id() else {
            debug!(
                event_type = notice.event_type(),
                ?booking_id,
                "Notice has no recipient, skipped"
            );
            return;
        };

        let recipient = match self.find_user(recipient_id).await {
            Ok(user) => user,
            Err(e) => {
                warn!(
                    event_type = notice.event_type(),
                    ?booking_id,
                    ?inquiry_id,
                    error = %e,
                    "Failed to resolve notification recipient"
                );
                metrics::counter!("notifications_failed_total", "channel" => "lookup").increment(1);
                return;
            }
        };

        let actor_name = self.actor_name(notice).await;
        let rendered = render(notice, &actor_name, &self.settings.public_url);

        let notification = Notification {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: recipient.id.clone(),
            kind: rendered.kind,
            title: rendered.title.clone(),
            message: rendered.message.clone(),
            booking_id: booking_id.map(String::from),
            inquiry_id: inquiry_id.map(String::from),
            link: rendered.link.clone(),
            created_at: Utc::now(),
        };
        if let Err(e) = self.notifications.notify(notification).await {
            warn!(
                event_type = notice.event_type(),
                ?booking_id,
                ?inquiry_id,
                error = %e,
                "Failed to deliver in-app notification"
            );
            metrics::counter!("notifications_failed_total", "channel" => "in_app").increment(1);
        }

        if !self.settings.email_enabled || !recipient.email_notifications {
            debug!(
                event_type = notice.event_type(),
                user_id = %recipient.id,
                "Email skipped by preference"
            );
            return;
        }

        let email = EmailMessage {
            from: self.settings.from_address.clone(),
            to: recipient.email.clone(),
            subject: rendered.email_subject,
            body: rendered.email_body,
        };
        if let Err(e) = self.email.send(email).await {
            warn!(
                event_type = notice.event_type(),
                ?booking_id,
                ?inquiry_id,
                error = %e,
                "Failed to send email"
            );
            metrics::counter!("notifications_failed_total", "channel" => "email").increment(1);
        }
    }

    async fn find_user(&self, id: &str) -> Result<User, NotifyError> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| NotifyError::RecipientNotFound(id.to_string()))
    }

    /// Actor's display name, falling back to the booking snapshot.
    async fn actor_name(&self, notice: &Notice) -> String {
        if let Some(actor_id) = notice.actor_id() {
            if let Ok(Some(user)) = self.repos.users().find_by_id(actor_id).await {
                return user.name;
            }
        }
        notice
            .booking()
            .and_then(|b| b.provider_name.clone())
            .unwrap_or_else(|| "Someone".to_string())
    }
}
