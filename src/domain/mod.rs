//! Domain layer: entities, state machines and repository interfaces

pub mod booking;
pub mod catalog;
pub mod inquiry;
pub mod provider;
pub mod repositories;
pub mod user;

pub use booking::{Booking, BookingFilter, BookingStatus};
pub use catalog::{AvailabilityType, EntityType};
pub use inquiry::{Inquiry, InquiryResponse, InquiryResponseStatus, InquiryTargetType};
pub use provider::{ProviderKind, ResponseStats};
pub use repositories::RepositoryProvider;
pub use user::User;

pub use crate::shared::errors::{DomainError, DomainResult, ErrorCode};
