//! Notices emitted by the booking core and how they read
//!
//! Each notice names one recipient and, where relevant, the actor whose
//! name appears in the text. Rendering is pure so it can be tested without
//! the outbox.

use crate::domain::booking::Booking;
use crate::domain::inquiry::{Inquiry, InquiryResponse, InquiryResponseStatus};

use super::sinks::NotificationKind;

#[derive(Debug, Clone)]
pub enum Notice {
    /// Customer asked for a booking; goes to the provider
    BookingRequested(Booking),
    BookingConfirmed(Booking),
    BookingDeclined(Booking),
    /// Customer cancelled; goes to the provider
    BookingCancelled(Booking),
    BookingCompleted(Booking),
    /// Booking auto-created from an accepted inquiry; goes to the customer
    InquiryBookingConfirmed(Booking),
    InquiryAnswered {
        inquiry: Inquiry,
        response: InquiryResponse,
    },
}

impl Notice {
    pub fn event_type(&self) -> &'static str {
        match self {
            Notice::BookingRequested(_) => "booking_requested",
            Notice::BookingConfirmed(_) => "booking_confirmed",
            Notice::BookingDeclined(_) => "booking_declined",
            Notice::BookingCancelled(_) => "booking_cancelled",
            Notice::BookingCompleted(_) => "booking_completed",
            Notice::InquiryBookingConfirmed(_) => "inquiry_booking_confirmed",
            Notice::InquiryAnswered { .. } => "inquiry_answered",
        }
    }

    pub fn booking(&self) -> Option<&Booking> {
        match self {
            Notice::BookingRequested(b)
            | Notice::BookingConfirmed(b)
            | Notice::BookingDeclined(b)
            | Notice::BookingCancelled(b)
            | Notice::BookingCompleted(b)
            | Notice::InquiryBookingConfirmed(b) => Some(b),
            Notice::InquiryAnswered { .. } => None,
        }
    }

    pub fn inquiry_id(&self) -> Option<&str> {
        match self {
            Notice::InquiryAnswered { inquiry, .. } => Some(&inquiry.id),
            other => other.booking().and_then(|b| b.inquiry_id.as_deref()),
        }
    }

    /// User who receives the notice. `None` when there is nobody to tell
    /// (legacy bookings without a recorded provider).
    pub fn recipient_id(&self) -> Option<&str> {
        match self {
            Notice::BookingRequested(b) | Notice::BookingCancelled(b) => {
                b.provider_user_id.as_deref()
            }
            Notice::BookingConfirmed(b)
            | Notice::BookingDeclined(b)
            | Notice::BookingCompleted(b)
            | Notice::InquiryBookingConfirmed(b) => Some(&b.user_id),
            Notice::InquiryAnswered { inquiry, .. } => Some(&inquiry.user_id),
        }
    }

    /// User whose name is quoted in the text.
    pub fn actor_id(&self) -> Option<&str> {
        match self {
            Notice::BookingRequested(b) | Notice::BookingCancelled(b) => Some(&b.user_id),
            Notice::BookingConfirmed(b)
            | Notice::BookingDeclined(b)
            | Notice::BookingCompleted(b)
            | Notice::InquiryBookingConfirmed(b) => b.provider_user_id.as_deref(),
            Notice::InquiryAnswered { response, .. } => Some(&response.recipient_id),
        }
    }
}

/// Text for both channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub email_subject: String,
    pub email_body: String,
}

fn booking_date(b: &Booking) -> String {
    b.date
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| "a date to be arranged".to_string())
}

fn guests(b: &Booking) -> String {
    if b.guests == 1 {
        "1 guest".to_string()
    } else {
        format!("{} guests", b.guests)
    }
}

pub fn render(notice: &Notice, actor_name: &str, public_url: &str) -> Rendered {
    let base = public_url.trim_end_matches('/');
    match notice {
        Notice::BookingRequested(b) => {
            let message = format!(
                "{} requested {} for {}, {}. Reference {}.",
                actor_name, b.entity_name, booking_date(b), guests(b), b.reference_number
            );
            Rendered {
                kind: NotificationKind::BookingRequest,
                title: "New booking request".to_string(),
                email_subject: format!("New booking request for {}", b.entity_name),
                email_body: format!("{}\n\nReview it at {}/dashboard/bookings/{}", message, base, b.id),
                link: Some(format!("{}/dashboard/bookings/{}", base, b.id)),
                message,
            }
        }
        Notice::BookingConfirmed(b) => {
            let mut message = format!(
                "{} confirmed your booking of {} for {}, {}.",
                actor_name, b.entity_name, booking_date(b), guests(b)
            );
            if let Some(notes) = &b.provider_notes {
                message.push_str(&format!(" Notes from the provider: {}", notes));
            }
            Rendered {
                kind: NotificationKind::BookingConfirmed,
                title: "Booking confirmed".to_string(),
                email_subject: format!("Your booking {} is confirmed", b.reference_number),
                email_body: message.clone(),
                link: Some(format!("{}/bookings/{}", base, b.id)),
                message,
            }
        }
        Notice::BookingDeclined(b) => {
            let reason = b.declined_reason.as_deref().unwrap_or("No reason given");
            let message = format!(
                "{} declined your booking of {} for {}. Reason: {}",
                actor_name, b.entity_name, booking_date(b), reason
            );
            Rendered {
                kind: NotificationKind::BookingDeclined,
                title: "Booking declined".to_string(),
                email_subject: format!("Your booking {} was declined", b.reference_number),
                email_body: message.clone(),
                link: Some(format!("{}/bookings/{}", base, b.id)),
                message,
            }
        }
        Notice::BookingCancelled(b) => {
            let message = format!(
                "{} cancelled booking {} of {} for {}.",
                actor_name, b.reference_number, b.entity_name, booking_date(b)
            );
            Rendered {
                kind: NotificationKind::BookingCancelled,
                title: "Booking cancelled".to_string(),
                email_subject: format!("Booking {} was cancelled", b.reference_number),
                email_body: message.clone(),
                link: Some(format!("{}/dashboard/bookings/{}", base, b.id)),
                message,
            }
        }
        Notice::BookingCompleted(b) => {
            let review_link = format!(
                "{}/{}/{}#reviews",
                base,
                b.entity_type.path_segment(),
                b.entity_id
            );
            let message = format!(
                "Your booking of {} with {} is complete. Tell others how it went: {}",
                b.entity_name, actor_name, review_link
            );
            Rendered {
                kind: NotificationKind::BookingCompleted,
                title: "How was your trip?".to_string(),
                email_subject: format!("Leave a review for {}", b.entity_name),
                email_body: message.clone(),
                link: Some(review_link),
                message,
            }
        }
        Notice::InquiryBookingConfirmed(b) => {
            let message = format!(
                "{} accepted your inquiry. Your booking of {} for {} is confirmed. Reference {}.",
                actor_name, b.entity_name, booking_date(b), b.reference_number
            );
            Rendered {
                kind: NotificationKind::BookingConfirmed,
                title: "Booking confirmed".to_string(),
                email_subject: format!("Your booking {} is confirmed", b.reference_number),
                email_body: message.clone(),
                link: Some(format!("{}/bookings/{}", base, b.id)),
                message,
            }
        }
        Notice::InquiryAnswered { inquiry, response } => {
            let verb = match response.status {
                InquiryResponseStatus::Accepted => "accepted",
                InquiryResponseStatus::Declined => "declined",
                _ => "replied to",
            };
            let mut message = format!("{} {} your inquiry \"{}\".", actor_name, verb, inquiry.subject);
            if let Some(text) = &response.message {
                message.push_str(&format!(" \"{}\"", text));
            }
            Rendered {
                kind: NotificationKind::InquiryResponse,
                title: "New reply to your inquiry".to_string(),
                email_subject: format!("{} {} your inquiry", actor_name, verb),
                email_body: message.clone(),
                link: Some(format!("{}/inquiries/{}", base, inquiry.id)),
                message,
            }
        }
    }
}
