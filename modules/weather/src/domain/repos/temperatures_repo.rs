use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::ConnectionTrait;

use crate::domain::error::DomainError;
use crate::domain::model::{Forecast, NewTemperature, Temperature};

/// Repository trait for Temperature persistence and aggregation.
#[async_trait]
pub trait TemperaturesRepository: Send + Sync {
    /// Find a temperature observation by ID.
    async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Temperature>, DomainError>;

    /// Insert a new observation, returning the generated ID.
    async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        temperature: NewTemperature,
        created_at: DateTime<Utc>,
    ) -> Result<i32, DomainError>;

    /// Aggregate `MIN(min)`, `MAX(max)` and the row count over all
    /// observations of `city_id` recorded at or after `since`. The
    /// aggregation happens store-side; zero matching rows yield the
    /// empty forecast.
    async fn forecast<C: ConnectionTrait>(
        &self,
        conn: &C,
        city_id: i32,
        since: DateTime<Utc>,
    ) -> Result<Forecast, DomainError>;
}
