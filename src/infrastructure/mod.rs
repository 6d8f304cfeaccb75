//! Infrastructure layer - external concerns

pub mod database;
pub mod memory;

pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use memory::InMemoryRepositoryProvider;
