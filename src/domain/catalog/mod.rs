//! Catalog aggregate
//!
//! Bookable entities (tours, guides, drivers), companies, and the
//! read-only repository the booking core consults.

pub mod model;
pub mod repository;

pub use model::{AvailabilityType, Company, Driver, EntityType, Guide, Tour};
pub use repository::CatalogRepository;
