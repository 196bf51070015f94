use std::sync::Arc;

use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{info, instrument};

use crate::domain::error::DomainError;
use crate::domain::model::{CreateWebhook, Webhook};
use crate::domain::repos::{CitiesRepository, WebhooksRepository};

/// Orchestrates webhook registration and removal, including the
/// referential checks against the city table.
pub struct WebhookService<R: WebhooksRepository, CR: CitiesRepository> {
    db: Arc<DatabaseConnection>,
    repo: Arc<R>,
    cities: Arc<CR>,
}

impl<R: WebhooksRepository, CR: CitiesRepository> WebhookService<R, CR> {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>, repo: Arc<R>, cities: Arc<CR>) -> Self {
        Self { db: db.into(), repo, cities }
    }

    /// Validates the request, confirms the referenced city exists and
    /// inserts the registration. Check and insert run in one
    /// transaction so a concurrent city delete cannot slip between
    /// them.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateWebhook) -> Result<Webhook, DomainError> {
        let webhook = input.validate()?;
        let city_id = webhook.city_id;

        let txn = self.db.begin().await?;

        self.cities
            .get(&txn, city_id)
            .await?
            .ok_or_else(|| DomainError::not_found("city", city_id))?;

        let id = self.repo.create(&txn, webhook).await?;

        // Re-read to pick up the generated id.
        let created = self
            .repo
            .get(&txn, id)
            .await?
            .ok_or_else(|| DomainError::database("webhook row missing after insert"))?;

        txn.commit().await?;

        info!("Successfully created webhook with id={}", id);
        Ok(created)
    }

    /// Deletes the webhook, returning its last state. Fails not-found
    /// when the webhook is absent or its city no longer exists.
    #[instrument(skip(self), fields(webhook_id = %id))]
    pub async fn delete(&self, id: i32) -> Result<Webhook, DomainError> {
        let webhook = self
            .repo
            .get(self.db.as_ref(), id)
            .await?
            .ok_or_else(|| DomainError::not_found("webhook", id))?;

        self.cities
            .get(self.db.as_ref(), webhook.city_id)
            .await?
            .ok_or_else(|| DomainError::not_found("city", webhook.city_id))?;

        let deleted = self.repo.delete(self.db.as_ref(), id).await?;
        if !deleted {
            return Err(DomainError::not_found("webhook", id));
        }

        info!("Successfully deleted webhook");
        Ok(webhook)
    }
}
