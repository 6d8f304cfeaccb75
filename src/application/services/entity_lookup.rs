//! Resolves `(EntityType, id)` references to tours, guides and drivers
//!
//! All type dispatch for bookable entities lives here.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::booking::{EntitySnapshot, DEFAULT_CURRENCY};
use crate::domain::catalog::EntityType;
use crate::domain::{DomainResult, RepositoryProvider};

/// Ownership, activity and pricing of a bookable entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    pub owner_id: String,
    pub is_active: bool,
    pub price: Decimal,
    pub currency: String,
}

#[derive(Clone)]
pub struct EntityLookup {
    repos: Arc<dyn RepositoryProvider>,
}

impl EntityLookup {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// `None` when the entity does not exist.
    pub async fn lookup(
        &self,
        entity_type: EntityType,
        entity_id: &str,
    ) -> DomainResult<Option<EntityRecord>> {
        let catalog = self.repos.catalog();
        let record = match entity_type {
            EntityType::Tour => catalog.find_tour(entity_id).await?.map(|t| EntityRecord {
                owner_id: t.owner_id,
                is_active: t.is_active,
                price: t.price,
                currency: t.currency,
            }),
            EntityType::Guide => catalog.find_guide(entity_id).await?.map(|g| EntityRecord {
                owner_id: g.user_id,
                is_active: g.is_available,
                price: g.price_per_day.unwrap_or(Decimal::ZERO),
                currency: g.currency,
            }),
            // Drivers are not priced per booking yet.
            EntityType::Driver => catalog.find_driver(entity_id).await?.map(|d| EntityRecord {
                owner_id: d.user_id,
                is_active: d.is_available,
                price: Decimal::ZERO,
                currency: DEFAULT_CURRENCY.to_string(),
            }),
        };
        Ok(record)
    }

    /// Display fields to copy onto a booking. Deleted entities yield a
    /// generic label instead of an error.
    pub async fn lookup_info(
        &self,
        entity_type: EntityType,
        entity_id: &str,
    ) -> DomainResult<EntitySnapshot> {
        let catalog = self.repos.catalog();
        let (name, image, owner_id) = match entity_type {
            EntityType::Tour => match catalog.find_tour(entity_id).await? {
                Some(t) => (Some(t.title), t.image, Some(t.owner_id)),
                None => (None, None, None),
            },
            EntityType::Guide => match catalog.find_guide(entity_id).await? {
                Some(g) => (None, g.photo, Some(g.user_id)),
                None => (None, None, None),
            },
            EntityType::Driver => match catalog.find_driver(entity_id).await? {
                Some(d) => (None, d.photo, Some(d.user_id)),
                None => (None, None, None),
            },
        };

        let owner_name = match &owner_id {
            Some(id) => self.repos.users().find_by_id(id).await?.map(|u| u.name),
            None => None,
        };

        // Guides and drivers are listed under their owner's name.
        let entity_name = name
            .or_else(|| owner_name.clone())
            .unwrap_or_else(|| entity_type.label().to_string());

        Ok(EntitySnapshot {
            entity_name,
            entity_image: image,
            provider_user_id: owner_id,
            provider_name: owner_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryRepositoryProvider;

    fn setup() -> (Arc<InMemoryRepositoryProvider>, EntityLookup) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let lookup = EntityLookup::new(repos.clone());
        (repos, lookup)
    }

    #[tokio::test]
    async fn guide_price_defaults_to_zero() {
        let (repos, lookup) = setup();
        let user = repos.seed_user("guide-user", "Giorgi");
        let mut guide = repos.seed_guide("g1", &user.id);
        guide.price_per_day = None;
        repos.put_guide(guide);

        let rec = lookup.lookup(EntityType::Guide, "g1").await.unwrap().unwrap();
        assert_eq!(rec.owner_id, "guide-user");
        assert_eq!(rec.price, Decimal::ZERO);
    }

    #[tokio::test]
    async fn driver_is_unpriced_gel() {
        let (repos, lookup) = setup();
        repos.seed_user("driver-user", "Levan");
        repos.seed_driver("d1", "driver-user");

        let rec = lookup.lookup(EntityType::Driver, "d1").await.unwrap().unwrap();
        assert_eq!(rec.price, Decimal::ZERO);
        assert_eq!(rec.currency, "GEL");
        assert!(rec.is_active);
    }

    #[tokio::test]
    async fn missing_entity_is_none() {
        let (_repos, lookup) = setup();
        assert!(lookup.lookup(EntityType::Tour, "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn info_uses_owner_name_for_guides() {
        let (repos, lookup) = setup();
        repos.seed_user("guide-user", "Giorgi");
        repos.seed_guide("g1", "guide-user");

        let info = lookup.lookup_info(EntityType::Guide, "g1").await.unwrap();
        assert_eq!(info.entity_name, "Giorgi");
        assert_eq!(info.provider_user_id.as_deref(), Some("guide-user"));
        assert_eq!(info.provider_name.as_deref(), Some("Giorgi"));
    }

    #[tokio::test]
    async fn info_for_deleted_entity_falls_back() {
        let (_repos, lookup) = setup();
        let info = lookup.lookup_info(EntityType::Driver, "gone").await.unwrap();
        assert_eq!(info.entity_name, "Driver");
        assert!(info.provider_user_id.is_none());
        assert!(info.entity_image.is_none());
    }
}
