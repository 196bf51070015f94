use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use crate::domain::error::DomainError;
use crate::domain::model::{NewWebhook, Webhook};

/// Repository trait for Webhook persistence operations.
#[async_trait]
pub trait WebhooksRepository: Send + Sync {
    /// Find a webhook by ID.
    async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Webhook>, DomainError>;

    /// Insert a new webhook, returning the generated ID.
    async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        webhook: NewWebhook,
    ) -> Result<i32, DomainError>;

    /// Delete a webhook by ID. Returns whether a row was removed.
    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i32) -> Result<bool, DomainError>;
}
