use std::sync::Arc;

use axum::routing::{delete, get, patch, post};
use axum::{Extension, Json, Router};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::domain::service::{CityService, ForecastService, TemperatureService, WebhookService};
use crate::infra::storage::repos::{
    SeaOrmCitiesRepository, SeaOrmTemperaturesRepository, SeaOrmWebhooksRepository,
};

use super::dto;
use super::error::{ErrorBody, ErrorDetail};
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weather API",
        description = "Per-city temperature observations, rolling forecasts and webhook registration"
    ),
    paths(
        handlers::create_city,
        handlers::patch_city,
        handlers::delete_city,
        handlers::create_temperature,
        handlers::get_forecast,
        handlers::create_webhook,
        handlers::delete_webhook,
    ),
    components(schemas(
        dto::CreateCityRequest,
        dto::PatchCityRequest,
        dto::CreateTemperatureRequest,
        dto::CreateWebhookRequest,
        dto::CityDto,
        dto::TemperatureDto,
        dto::ForecastDto,
        dto::WebhookDto,
        ErrorBody,
        ErrorDetail,
    )),
    tags(
        (name = "cities"),
        (name = "temperatures"),
        (name = "forecasts"),
        (name = "webhooks"),
    )
)]
struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Builds the `/v1` router over the given connection pool. Services
/// and repositories are wired here and shared via extensions; each
/// request runs independently on the pooled connection.
pub fn router(db: impl Into<Arc<DatabaseConnection>>) -> Router {
    let db = db.into();
    let cities_repo = Arc::new(SeaOrmCitiesRepository);
    let temperatures_repo = Arc::new(SeaOrmTemperaturesRepository);
    let webhooks_repo = Arc::new(SeaOrmWebhooksRepository);

    let cities = Arc::new(CityService::new(db.clone(), cities_repo.clone()));
    let temperatures = Arc::new(TemperatureService::new(
        db.clone(),
        temperatures_repo.clone(),
        cities_repo.clone(),
    ));
    let forecasts = Arc::new(ForecastService::new(db.clone(), temperatures_repo));
    let webhooks = Arc::new(WebhookService::new(db, webhooks_repo, cities_repo));

    Router::new()
        .route(
            "/v1/cities",
            post(handlers::create_city::<SeaOrmCitiesRepository>),
        )
        .route(
            "/v1/cities/{id}",
            patch(handlers::patch_city::<SeaOrmCitiesRepository>)
                .delete(handlers::delete_city::<SeaOrmCitiesRepository>),
        )
        .route(
            "/v1/temperatures",
            post(handlers::create_temperature::<SeaOrmTemperaturesRepository, SeaOrmCitiesRepository>),
        )
        .route(
            "/v1/forecasts/{city_id}",
            get(handlers::get_forecast::<SeaOrmTemperaturesRepository>),
        )
        .route(
            "/v1/webhooks",
            post(handlers::create_webhook::<SeaOrmWebhooksRepository, SeaOrmCitiesRepository>),
        )
        .route(
            "/v1/webhooks/{id}",
            delete(handlers::delete_webhook::<SeaOrmWebhooksRepository, SeaOrmCitiesRepository>),
        )
        .route("/openapi.json", get(openapi_json))
        .layer(Extension(cities))
        .layer(Extension(temperatures))
        .layer(Extension(forecasts))
        .layer(Extension(webhooks))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
