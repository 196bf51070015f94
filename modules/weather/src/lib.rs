//! Weather module: per-city temperature observations, derived rolling
//! forecasts and webhook registrations.
//!
//! Layered the usual way: `domain` holds the models, validation and
//! services, `infra` the SeaORM storage, `api` the REST surface.

pub mod api;
pub mod domain;
pub mod infra;

pub use api::rest::routes::router;
pub use infra::storage::migrations::Migrator;
