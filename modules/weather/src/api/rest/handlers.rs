use std::sync::Arc;

use axum::extract::{Extension, FromRequest, Path, Request};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::domain::repos::{CitiesRepository, TemperaturesRepository, WebhooksRepository};
use crate::domain::service::{CityService, ForecastService, TemperatureService, WebhookService};

use super::dto::{
    CityDto, CreateCityRequest, CreateTemperatureRequest, CreateWebhookRequest, ForecastDto,
    PatchCityRequest, TemperatureDto, WebhookDto,
};
use super::error::{ApiError, ErrorBody};

/// Path segments are parsed by hand so a malformed id maps onto the
/// wire error contract rather than the framework's default rejection.
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| ApiError::bad_request())
}

/// Body extractor mapping undecodable JSON onto the wire error
/// contract. Unknown fields and absent fields are left to the
/// validation layer.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(_) => Err(ApiError::bad_request()),
        }
    }
}

#[utoipa::path(
    post,
    path = "/v1/cities",
    tag = "cities",
    request_body = CreateCityRequest,
    responses(
        (status = 201, description = "City created", body = CityDto),
        (status = 400, description = "Validation failure", body = ErrorBody)
    )
)]
pub async fn create_city<R>(
    Extension(svc): Extension<Arc<CityService<R>>>,
    ApiJson(req): ApiJson<CreateCityRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: CitiesRepository + 'static,
{
    let city = svc.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(CityDto::from(city))))
}

#[utoipa::path(
    patch,
    path = "/v1/cities/{id}",
    tag = "cities",
    params(("id" = i32, Path, description = "City identifier")),
    request_body = PatchCityRequest,
    responses(
        (status = 200, description = "City updated", body = CityDto),
        (status = 400, description = "Validation failure or malformed id", body = ErrorBody),
        (status = 404, description = "City not found", body = ErrorBody)
    )
)]
pub async fn patch_city<R>(
    Extension(svc): Extension<Arc<CityService<R>>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<PatchCityRequest>,
) -> Result<Json<CityDto>, ApiError>
where
    R: CitiesRepository + 'static,
{
    let id = parse_id(&id)?;
    let city = svc.update(id, req.into()).await?;
    Ok(Json(city.into()))
}

#[utoipa::path(
    delete,
    path = "/v1/cities/{id}",
    tag = "cities",
    params(("id" = i32, Path, description = "City identifier")),
    responses(
        (status = 200, description = "City deleted, last state returned", body = CityDto),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "City not found", body = ErrorBody)
    )
)]
pub async fn delete_city<R>(
    Extension(svc): Extension<Arc<CityService<R>>>,
    Path(id): Path<String>,
) -> Result<Json<CityDto>, ApiError>
where
    R: CitiesRepository + 'static,
{
    let id = parse_id(&id)?;
    let city = svc.delete(id).await?;
    Ok(Json(city.into()))
}

#[utoipa::path(
    post,
    path = "/v1/temperatures",
    tag = "temperatures",
    request_body = CreateTemperatureRequest,
    responses(
        (status = 201, description = "Observation recorded", body = TemperatureDto),
        (status = 400, description = "Validation failure", body = ErrorBody),
        (status = 404, description = "Referenced city not found", body = ErrorBody)
    )
)]
pub async fn create_temperature<R, CR>(
    Extension(svc): Extension<Arc<TemperatureService<R, CR>>>,
    ApiJson(req): ApiJson<CreateTemperatureRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: TemperaturesRepository + 'static,
    CR: CitiesRepository + 'static,
{
    let temperature = svc.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(TemperatureDto::from(temperature))))
}

#[utoipa::path(
    get,
    path = "/v1/forecasts/{city_id}",
    tag = "forecasts",
    params(("city_id" = i32, Path, description = "City identifier")),
    responses(
        (status = 200, description = "Rolling 24h aggregate", body = ForecastDto),
        (status = 400, description = "Malformed id", body = ErrorBody)
    )
)]
pub async fn get_forecast<R>(
    Extension(svc): Extension<Arc<ForecastService<R>>>,
    Path(city_id): Path<String>,
) -> Result<Json<ForecastDto>, ApiError>
where
    R: TemperaturesRepository + 'static,
{
    let city_id = parse_id(&city_id)?;
    let forecast = svc.get(city_id).await?;
    Ok(Json(forecast.into()))
}

#[utoipa::path(
    post,
    path = "/v1/webhooks",
    tag = "webhooks",
    request_body = CreateWebhookRequest,
    responses(
        (status = 201, description = "Webhook registered", body = WebhookDto),
        (status = 400, description = "Validation failure", body = ErrorBody),
        (status = 404, description = "Referenced city not found", body = ErrorBody)
    )
)]
pub async fn create_webhook<R, CR>(
    Extension(svc): Extension<Arc<WebhookService<R, CR>>>,
    ApiJson(req): ApiJson<CreateWebhookRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: WebhooksRepository + 'static,
    CR: CitiesRepository + 'static,
{
    let webhook = svc.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(WebhookDto::from(webhook))))
}

#[utoipa::path(
    delete,
    path = "/v1/webhooks/{id}",
    tag = "webhooks",
    params(("id" = i32, Path, description = "Webhook identifier")),
    responses(
        (status = 200, description = "Webhook removed, last state returned", body = WebhookDto),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Webhook or its city not found", body = ErrorBody)
    )
)]
pub async fn delete_webhook<R, CR>(
    Extension(svc): Extension<Arc<WebhookService<R, CR>>>,
    Path(id): Path<String>,
) -> Result<Json<WebhookDto>, ApiError>
where
    R: WebhooksRepository + 'static,
    CR: CitiesRepository + 'static,
{
    let id = parse_id(&id)?;
    let webhook = svc.delete(id).await?;
    Ok(Json(webhook.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use crate::domain::model::{City, NewCity};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::{patch, post};
    use axum::Router;
    use chrono::{DateTime, TimeZone, Utc};
    use sea_orm::{ConnectionTrait, DatabaseBackend, MockDatabase};
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tower::ServiceExt as _;

    #[derive(Default)]
    struct MockCitiesRepo {
        rows: Mutex<HashMap<i32, City>>,
    }

    #[async_trait]
    impl CitiesRepository for MockCitiesRepo {
        async fn get<C: ConnectionTrait>(
            &self,
            _conn: &C,
            id: i32,
        ) -> Result<Option<City>, DomainError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn create<C: ConnectionTrait>(
            &self,
            _conn: &C,
            city: NewCity,
            created_at: DateTime<Utc>,
        ) -> Result<i32, DomainError> {
            let id = self.rows.lock().unwrap().len() as i32 + 1;
            self.rows.lock().unwrap().insert(
                id,
                City {
                    id,
                    name: city.name,
                    latitude: city.latitude,
                    longitude: city.longitude,
                    created_at,
                },
            );
            Ok(id)
        }

        async fn update<C: ConnectionTrait>(
            &self,
            _conn: &C,
            city: &City,
        ) -> Result<(), DomainError> {
            self.rows.lock().unwrap().insert(city.id, city.clone());
            Ok(())
        }

        async fn delete<C: ConnectionTrait>(&self, _conn: &C, id: i32) -> Result<bool, DomainError> {
            Ok(self.rows.lock().unwrap().remove(&id).is_some())
        }
    }

    fn test_router(repo: Arc<MockCitiesRepo>) -> Router {
        let conn = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let service = Arc::new(CityService::new(conn, repo));
        Router::new()
            .route("/v1/cities", post(create_city::<MockCitiesRepo>))
            .route(
                "/v1/cities/{id}",
                patch(patch_city::<MockCitiesRepo>).delete(delete_city::<MockCitiesRepo>),
            )
            .layer(Extension(service))
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_city_returns_201_with_payload() {
        let app = test_router(Arc::new(MockCitiesRepo::default()));

        let response = app
            .oneshot(json_request(
                "POST",
                "/v1/cities",
                r#"{"name":"Berlin","latitude":52.52,"longitude":13.4}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["name"], "Berlin");
        assert_eq!(json["id"], 1);
    }

    #[tokio::test]
    async fn create_city_empty_json_lists_every_missing_field() {
        let app = test_router(Arc::new(MockCitiesRepo::default()));

        let response = app
            .oneshot(json_request("POST", "/v1/cities", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error_code"], "VALIDATION_ERROR");
        let details = json["details"].as_array().unwrap();
        assert_eq!(details.len(), 3);
        assert_eq!(details[0]["field"], "name");
        assert_eq!(details[0]["error"], "cannot be blank");
    }

    #[tokio::test]
    async fn create_city_mistyped_field_is_400_with_wire_body() {
        let app = test_router(Arc::new(MockCitiesRepo::default()));

        let response = app
            .oneshot(json_request(
                "POST",
                "/v1/cities",
                r#"{"name":"Berlin","latitude":"north","longitude":13.4}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error_code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn patch_city_bad_id_is_400() {
        let app = test_router(Arc::new(MockCitiesRepo::default()));

        let response = app
            .oneshot(json_request(
                "PATCH",
                "/v1/cities/abc",
                r#"{"name":"Paris"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error_code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn patch_unknown_city_is_404() {
        let app = test_router(Arc::new(MockCitiesRepo::default()));

        let response = app
            .oneshot(json_request(
                "PATCH",
                "/v1/cities/12",
                r#"{"name":"Paris"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error_code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn delete_city_returns_last_state() {
        let repo = Arc::new(MockCitiesRepo::default());
        repo.rows.lock().unwrap().insert(
            3,
            City {
                id: 3,
                name: "Ivanovo".to_owned(),
                latitude: 57.0,
                longitude: 40.97,
                created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            },
        );
        let app = test_router(repo);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/v1/cities/3")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["name"], "Ivanovo");

        // Deleting the same id again fails not-found.
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/v1/cities/3")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
