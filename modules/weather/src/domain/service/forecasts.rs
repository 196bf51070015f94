use std::sync::Arc;

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use tracing::{debug, instrument};

use crate::domain::error::DomainError;
use crate::domain::model::Forecast;
use crate::domain::repos::TemperaturesRepository;

/// Trailing window the forecast aggregates over.
const LOOKBACK_HOURS: i64 = 24;

/// Computes the rolling forecast projection for a city.
pub struct ForecastService<R: TemperaturesRepository> {
    db: Arc<DatabaseConnection>,
    repo: Arc<R>,
}

impl<R: TemperaturesRepository> ForecastService<R> {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>, repo: Arc<R>) -> Self {
        Self { db: db.into(), repo }
    }

    /// Aggregates min/max/sample over the city's observations from the
    /// last 24 hours. A city without observations in the window (or an
    /// unknown city) yields the empty forecast rather than an error.
    #[instrument(skip(self), fields(city_id = %city_id))]
    pub async fn get(&self, city_id: i32) -> Result<Forecast, DomainError> {
        debug!("Aggregating forecast");

        let since = Utc::now() - Duration::hours(LOOKBACK_HOURS);
        self.repo.forecast(self.db.as_ref(), city_id, since).await
    }
}
