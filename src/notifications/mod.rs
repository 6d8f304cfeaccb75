//! Notifications module
//!
//! Booking and inquiry side effects: in-app notifications and emails,
//! delivered off the request path through an outbox worker.
//!
//! # Usage
//! ```ignore
//! use tour_booking::notifications::{Notice, Notifier, NotifierSettings};
//!
//! let notifier = Notifier::spawn(repos, inbox, mailer, NotifierSettings::default());
//! notifier.emit(Notice::BookingConfirmed(booking));
//! ```

pub mod events;
pub mod outbox;
pub mod sinks;

pub use events::{render, Notice, Rendered};
pub use outbox::{Notifier, NotifierSettings};
pub use sinks::{
    EmailMessage, EmailSink, InMemoryEmailSink, InMemoryNotificationSink, LogEmailSink,
    Notification, NotificationKind, NotificationSink, NotifyError,
};
