use std::sync::Arc;

use chrono::Utc;
use sea_orm::DatabaseConnection;
use tracing::{debug, info, instrument};

use crate::domain::error::DomainError;
use crate::domain::model::{City, CityPatch, CreateCity};
use crate::domain::repos::CitiesRepository;

/// Orchestrates validation, persistence and response shaping for
/// cities.
pub struct CityService<R: CitiesRepository> {
    db: Arc<DatabaseConnection>,
    repo: Arc<R>,
}

impl<R: CitiesRepository> CityService<R> {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>, repo: Arc<R>) -> Self {
        Self { db: db.into(), repo }
    }

    #[instrument(skip(self), fields(city_id = %id))]
    pub async fn get(&self, id: i32) -> Result<City, DomainError> {
        debug!("Getting city by id");

        let found = self.repo.get(self.db.as_ref(), id).await?;
        found.ok_or_else(|| DomainError::not_found("city", id))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateCity) -> Result<City, DomainError> {
        let city = input.validate()?;

        let id = self.repo.create(self.db.as_ref(), city, Utc::now()).await?;

        info!("Successfully created city with id={}", id);
        // Re-read to pick up the generated id and timestamp.
        self.get(id).await
    }

    /// Merges the present patch fields into the stored city. An
    /// all-absent patch returns the current state without touching the
    /// store.
    #[instrument(skip(self, patch), fields(city_id = %id))]
    pub async fn update(&self, id: i32, patch: CityPatch) -> Result<City, DomainError> {
        patch.validate()?;

        let mut city = self.get(id).await?;

        if !patch.apply_to(&mut city) {
            debug!("Patch carries no fields, skipping write");
            return Ok(city);
        }

        self.repo.update(self.db.as_ref(), &city).await?;

        info!("Successfully updated city");
        Ok(city)
    }

    /// Deletes the city, returning its last state. Dependent
    /// temperature and webhook rows are removed by the store's
    /// cascading foreign keys.
    #[instrument(skip(self), fields(city_id = %id))]
    pub async fn delete(&self, id: i32) -> Result<City, DomainError> {
        let city = self.get(id).await?;

        let deleted = self.repo.delete(self.db.as_ref(), id).await?;
        if !deleted {
            return Err(DomainError::not_found("city", id));
        }

        info!("Successfully deleted city");
        Ok(city)
    }
}
