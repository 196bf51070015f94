mod cities;
mod forecasts;
mod temperatures;
mod webhooks;

pub use cities::CityService;
pub use forecasts::ForecastService;
pub use temperatures::TemperatureService;
pub use webhooks::WebhookService;
