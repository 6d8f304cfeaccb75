//! Bookings module: customer requests and provider decisions

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
