//! Booking aggregate
//!
//! Contains the Booking entity, its state machine, and repository interface.

pub mod model;
pub mod repository;

pub use model::{
    generate_reference_number, Booking, BookingDraft, BookingFilter, BookingStatus,
    EntitySnapshot, DEFAULT_CURRENCY,
};
pub use repository::BookingRepository;
