//! Wire representations of requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::model::{
    City, CityPatch, CreateCity, CreateTemperature, CreateWebhook, Forecast, Temperature, Webhook,
};

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateCityRequest {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<CreateCityRequest> for CreateCity {
    fn from(r: CreateCityRequest) -> Self {
        Self {
            name: r.name,
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

/// Absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PatchCityRequest {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<PatchCityRequest> for CityPatch {
    fn from(r: PatchCityRequest) -> Self {
        Self {
            name: r.name,
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateTemperatureRequest {
    pub city_id: Option<i32>,
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl From<CreateTemperatureRequest> for CreateTemperature {
    fn from(r: CreateTemperatureRequest) -> Self {
        Self {
            city_id: r.city_id,
            min: r.min,
            max: r.max,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateWebhookRequest {
    pub city_id: Option<i32>,
    pub callback_url: Option<String>,
}

impl From<CreateWebhookRequest> for CreateWebhook {
    fn from(r: CreateWebhookRequest) -> Self {
        Self {
            city_id: r.city_id,
            callback_url: r.callback_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CityDto {
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl From<City> for CityDto {
    fn from(c: City) -> Self {
        Self {
            id: c.id,
            name: c.name,
            latitude: c.latitude,
            longitude: c.longitude,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TemperatureDto {
    pub id: i32,
    pub city_id: i32,
    pub min: i32,
    pub max: i32,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl From<Temperature> for TemperatureDto {
    fn from(t: Temperature) -> Self {
        Self {
            id: t.id,
            city_id: t.city_id,
            min: t.min,
            max: t.max,
            created_at: t.created_at,
        }
    }
}

/// `min`/`max` serialize as `null` when no observation fell inside the
/// window, which keeps "no data" distinguishable from an all-zero day.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ForecastDto {
    pub city_id: i32,
    pub min: Option<i32>,
    pub max: Option<i32>,
    pub sample: i64,
}

impl From<Forecast> for ForecastDto {
    fn from(f: Forecast) -> Self {
        Self {
            city_id: f.city_id,
            min: f.min,
            max: f.max,
            sample: f.sample,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WebhookDto {
    pub id: i32,
    pub city_id: i32,
    pub callback_url: String,
}

impl From<Webhook> for WebhookDto {
    fn from(w: Webhook) -> Self {
        Self {
            id: w.id,
            city_id: w.city_id,
            callback_url: w.callback_url,
        }
    }
}
