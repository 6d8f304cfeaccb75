//! SeaORM implementation of CatalogRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use super::{from_minor, stats_from_columns};
use crate::domain::catalog::{AvailabilityType, CatalogRepository, Company, Driver, Guide, Tour};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{companies, drivers, guides, tours};

pub struct SeaOrmCatalogRepository {
    db: DatabaseConnection,
}

impl SeaOrmCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn tour_to_domain(m: tours::Model) -> Tour {
    Tour {
        id: m.id,
        owner_id: m.owner_id,
        title: m.title,
        image: m.image,
        is_active: m.is_active,
        price: from_minor(m.price),
        currency: m.currency,
        availability_type: AvailabilityType::from_str(&m.availability_type),
        available_dates: m.available_dates,
        max_people: m.max_people,
    }
}

fn guide_to_domain(m: guides::Model) -> Guide {
    Guide {
        id: m.id,
        user_id: m.user_id,
        photo: m.photo,
        is_available: m.is_available,
        price_per_day: m.price_per_day.map(from_minor),
        currency: m.currency,
        stats: stats_from_columns(m.avg_response_time_minutes, m.response_count),
    }
}

fn driver_to_domain(m: drivers::Model) -> Driver {
    Driver {
        id: m.id,
        user_id: m.user_id,
        photo: m.photo,
        is_available: m.is_available,
        stats: stats_from_columns(m.avg_response_time_minutes, m.response_count),
    }
}

fn company_to_domain(m: companies::Model) -> Company {
    Company {
        id: m.id,
        user_id: m.user_id,
        name: m.name,
        logo: m.logo,
        stats: stats_from_columns(m.avg_response_time_minutes, m.response_count),
    }
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn find_tour(&self, id: &str) -> DomainResult<Option<Tour>> {
        let model = tours::Entity::find_by_id(id.to_string()).one(&self.db).await?;
        Ok(model.map(tour_to_domain))
    }

    async fn find_guide(&self, id: &str) -> DomainResult<Option<Guide>> {
        let model = guides::Entity::find_by_id(id.to_string()).one(&self.db).await?;
        Ok(model.map(guide_to_domain))
    }

    async fn find_driver(&self, id: &str) -> DomainResult<Option<Driver>> {
        let model = drivers::Entity::find_by_id(id.to_string()).one(&self.db).await?;
        Ok(model.map(driver_to_domain))
    }

    async fn find_company(&self, id: &str) -> DomainResult<Option<Company>> {
        let model = companies::Entity::find_by_id(id.to_string()).one(&self.db).await?;
        Ok(model.map(company_to_domain))
    }
}
