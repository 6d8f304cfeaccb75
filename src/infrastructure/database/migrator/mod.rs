//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_users;
mod m20250101_000002_create_tours;
mod m20250101_000003_create_guides;
mod m20250101_000004_create_drivers;
mod m20250101_000005_create_companies;
mod m20250101_000006_create_bookings;
mod m20250101_000007_create_inquiries;
mod m20250101_000008_create_inquiry_responses;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users::Migration),
            Box::new(m20250101_000002_create_tours::Migration),
            Box::new(m20250101_000003_create_guides::Migration),
            Box::new(m20250101_000004_create_drivers::Migration),
            Box::new(m20250101_000005_create_companies::Migration),
            Box::new(m20250101_000006_create_bookings::Migration),
            Box::new(m20250101_000007_create_inquiries::Migration),
            Box::new(m20250101_000008_create_inquiry_responses::Migration),
        ]
    }
}
