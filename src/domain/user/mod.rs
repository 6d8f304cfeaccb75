//! User aggregate
//!
//! Customers and providers share one user table; the booking core only
//! reads names, emails and the email-notification preference.

pub mod model;
pub mod repository;

pub use model::User;
pub use repository::UserRepository;
