//! SeaORM-backed repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, QueryFilter,
    QuerySelect,
};

use crate::domain::error::DomainError;
use crate::domain::model::{City, Forecast, NewCity, NewTemperature, NewWebhook, Temperature, Webhook};
use crate::domain::repos::{CitiesRepository, TemperaturesRepository, WebhooksRepository};

use super::entity::{city, temperature, webhook};

pub struct SeaOrmCitiesRepository;

#[async_trait]
impl CitiesRepository for SeaOrmCitiesRepository {
    async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<City>, DomainError> {
        let found = city::Entity::find_by_id(id).one(conn).await?;
        Ok(found.map(Into::into))
    }

    async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        new: NewCity,
        created_at: DateTime<Utc>,
    ) -> Result<i32, DomainError> {
        let model = city::ActiveModel {
            name: Set(new.name),
            latitude: Set(new.latitude),
            longitude: Set(new.longitude),
            created_at: Set(created_at),
            ..Default::default()
        };
        let res = city::Entity::insert(model).exec(conn).await?;
        Ok(res.last_insert_id)
    }

    async fn update<C: ConnectionTrait>(&self, conn: &C, c: &City) -> Result<(), DomainError> {
        let model = city::ActiveModel {
            id: Set(c.id),
            name: Set(c.name.clone()),
            latitude: Set(c.latitude),
            longitude: Set(c.longitude),
            created_at: Set(c.created_at),
        };
        city::Entity::update(model).exec(conn).await?;
        Ok(())
    }

    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i32) -> Result<bool, DomainError> {
        let res = city::Entity::delete_by_id(id).exec(conn).await?;
        Ok(res.rows_affected > 0)
    }
}

pub struct SeaOrmTemperaturesRepository;

/// Shape of the store-side aggregate row.
#[derive(Debug, FromQueryResult)]
struct ForecastRow {
    min: Option<i32>,
    max: Option<i32>,
    sample: i64,
}

#[async_trait]
impl TemperaturesRepository for SeaOrmTemperaturesRepository {
    async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Temperature>, DomainError> {
        let found = temperature::Entity::find_by_id(id).one(conn).await?;
        Ok(found.map(Into::into))
    }

    async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        new: NewTemperature,
        created_at: DateTime<Utc>,
    ) -> Result<i32, DomainError> {
        let model = temperature::ActiveModel {
            city_id: Set(new.city_id),
            min: Set(new.min),
            max: Set(new.max),
            created_at: Set(created_at),
            ..Default::default()
        };
        let res = temperature::Entity::insert(model).exec(conn).await?;
        Ok(res.last_insert_id)
    }

    /// `SELECT MIN(min), MAX(max), COUNT(*) ... WHERE city_id = ? AND
    /// created_at >= ?`. No `GROUP BY`, so the zero-row case still
    /// produces one row with NULL extrema and a zero count.
    async fn forecast<C: ConnectionTrait>(
        &self,
        conn: &C,
        city_id: i32,
        since: DateTime<Utc>,
    ) -> Result<Forecast, DomainError> {
        let row = temperature::Entity::find()
            .select_only()
            .column_as(temperature::Column::Min.min(), "min")
            .column_as(temperature::Column::Max.max(), "max")
            .column_as(temperature::Column::Id.count(), "sample")
            .filter(temperature::Column::CityId.eq(city_id))
            .filter(temperature::Column::CreatedAt.gte(since))
            .into_model::<ForecastRow>()
            .one(conn)
            .await?;

        Ok(match row {
            Some(row) => Forecast {
                city_id,
                min: row.min,
                max: row.max,
                sample: row.sample,
            },
            None => Forecast::empty(city_id),
        })
    }
}

pub struct SeaOrmWebhooksRepository;

#[async_trait]
impl WebhooksRepository for SeaOrmWebhooksRepository {
    async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Webhook>, DomainError> {
        let found = webhook::Entity::find_by_id(id).one(conn).await?;
        Ok(found.map(Into::into))
    }

    async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        new: NewWebhook,
    ) -> Result<i32, DomainError> {
        let model = webhook::ActiveModel {
            city_id: Set(new.city_id),
            callback_url: Set(new.callback_url),
            ..Default::default()
        };
        let res = webhook::Entity::insert(model).exec(conn).await?;
        Ok(res.last_insert_id)
    }

    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i32) -> Result<bool, DomainError> {
        let res = webhook::Entity::delete_by_id(id).exec(conn).await?;
        Ok(res.rows_affected > 0)
    }
}
