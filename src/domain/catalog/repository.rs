//! Catalog repository interface

use async_trait::async_trait;

use super::model::{Company, Driver, Guide, Tour};
use crate::shared::DomainResult;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn find_tour(&self, id: &str) -> DomainResult<Option<Tour>>;

    async fn find_guide(&self, id: &str) -> DomainResult<Option<Guide>>;

    async fn find_driver(&self, id: &str) -> DomainResult<Option<Driver>>;

    async fn find_company(&self, id: &str) -> DomainResult<Option<Company>>;
}
