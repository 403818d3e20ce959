use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::{
    entity,
    error::AuthResult,
    models::User,
    repository::UserRepository,
};

#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> AuthResult<User> {
        let model = entity::ActiveModel::from(&user).insert(&self.db).await?;

        tracing::info!(user_id = %model.id, "Created user");
        Ok(model.into())
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(model.map(User::from))
    }
}
