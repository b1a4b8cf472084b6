//! Contact message repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use super::entities::message::{self, ActiveModel, Entity as MessageEntity};
use crate::domain::{Message, NewMessage};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, message: NewMessage) -> AppResult<Message>;

    /// List all messages, oldest first
    async fn list(&self) -> AppResult<Vec<Message>>;
}

pub struct MessageStore {
    db: DatabaseConnection,
}

impl MessageStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MessageRepository for MessageStore {
    async fn create(&self, new: NewMessage) -> AppResult<Message> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(new.first_name),
            last_name: Set(new.last_name),
            email: Set(new.email),
            phone: Set(new.phone),
            message: Set(new.message),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Message::from(model))
    }

    async fn list(&self) -> AppResult<Vec<Message>> {
        let models = MessageEntity::find()
            .order_by_asc(message::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Message::from).collect())
    }
}
