//! Provider profiles and their response-time statistic

pub mod model;
pub mod repository;

pub use model::{ProviderKind, ProviderProfile, ResponseStats};
pub use repository::ProviderStatsRepository;
