use std::sync::Arc;

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{info, instrument};

use crate::domain::error::DomainError;
use crate::domain::model::{CreateTemperature, Temperature};
use crate::domain::repos::{CitiesRepository, TemperaturesRepository};

/// Orchestrates temperature observation creation, including the
/// referential check against the city table.
pub struct TemperatureService<R: TemperaturesRepository, CR: CitiesRepository> {
    db: Arc<DatabaseConnection>,
    repo: Arc<R>,
    cities: Arc<CR>,
}

impl<R: TemperaturesRepository, CR: CitiesRepository> TemperatureService<R, CR> {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>, repo: Arc<R>, cities: Arc<CR>) -> Self {
        Self { db: db.into(), repo, cities }
    }

    /// Validates the request, confirms the referenced city exists and
    /// inserts the observation. Check and insert run in one
    /// transaction so a concurrent city delete cannot slip between
    /// them.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateTemperature) -> Result<Temperature, DomainError> {
        let temperature = input.validate()?;
        let city_id = temperature.city_id;

        let txn = self.db.begin().await?;

        self.cities
            .get(&txn, city_id)
            .await?
            .ok_or_else(|| DomainError::not_found("city", city_id))?;

        let id = self.repo.create(&txn, temperature, Utc::now()).await?;

        // Re-read to pick up the generated id and timestamp.
        let created = self
            .repo
            .get(&txn, id)
            .await?
            .ok_or_else(|| DomainError::database("temperature row missing after insert"))?;

        txn.commit().await?;

        info!("Successfully created temperature with id={}", id);
        Ok(created)
    }
}
