use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::ConnectionTrait;

use crate::domain::error::DomainError;
use crate::domain::model::{City, NewCity};

/// Repository trait for City persistence operations.
///
/// Methods are generic over the connection so callers can pass either
/// the pooled connection or an open transaction.
#[async_trait]
pub trait CitiesRepository: Send + Sync {
    /// Find a city by ID.
    async fn get<C: ConnectionTrait>(&self, conn: &C, id: i32)
        -> Result<Option<City>, DomainError>;

    /// Insert a new city, returning the generated ID.
    async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        city: NewCity,
        created_at: DateTime<Utc>,
    ) -> Result<i32, DomainError>;

    /// Persist the given city state under its ID.
    async fn update<C: ConnectionTrait>(&self, conn: &C, city: &City) -> Result<(), DomainError>;

    /// Delete a city by ID. Returns whether a row was removed.
    /// Dependent temperature and webhook rows cascade at the store.
    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i32) -> Result<bool, DomainError>;
}
