//! # Tour Booking
//!
//! Booking lifecycle engine for a tour marketplace: direct bookings of
//! tours, guides and drivers, the provider confirm/decline/complete state
//! machine, per-date tour capacity, and multi-recipient inquiries whose
//! accepted responses become confirmed bookings.
//!
//! ## Architecture
//!
//! - **domain**: entities, state machines and repository traits
//! - **application**: booking, availability, inquiry and response-time services
//! - **infrastructure**: SeaORM persistence and an in-memory store
//! - **notifications**: outbox delivering in-app notifications and emails
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: bootstrap and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod notifications;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};

pub use interfaces::http::{create_api_router, ApiState};

pub use notifications::{Notice, Notifier, NotifierSettings};
