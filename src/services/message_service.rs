//! Message service - contact form submissions.

use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

use crate::domain::{Message, NewMessage};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait MessageService: Send + Sync {
    async fn send(&self, message: NewMessage) -> AppResult<Message>;

    async fn list(&self) -> AppResult<Vec<Message>>;
}

pub struct MessageManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> MessageManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> MessageService for MessageManager<U> {
    async fn send(&self, message: NewMessage) -> AppResult<Message> {
        message.validate()?;
        let stored = self.uow.messages().create(message).await?;
        tracing::info!(message_id = %stored.id, email = %stored.email, "Message received");
        Ok(stored)
    }

    async fn list(&self) -> AppResult<Vec<Message>> {
        self.uow.messages().list().await
    }
}
