mod cities_repo;
mod temperatures_repo;
mod webhooks_repo;

pub use cities_repo::CitiesRepository;
pub use temperatures_repo::TemperaturesRepository;
pub use webhooks_repo::WebhooksRepository;
