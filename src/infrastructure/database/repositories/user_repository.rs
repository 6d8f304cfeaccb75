//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::domain::user::{User, UserRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::users;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn user_model_to_domain(model: users::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        email_notifications: model.email_notifications,
        created_at: model.created_at,
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = users::Entity::find_by_id(id.to_string()).one(&self.db).await?;
        Ok(model.map(user_model_to_domain))
    }
}
