use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub backend: BackendConfig,
    pub endpoints: EndpointsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    /// Sent as the `Cookie` header; the seat and booking endpoints sit
    /// behind the site's login session.
    pub session_cookie: Option<String>,
}

/// Site-absolute paths. Seat and payment routes get the flight id (and seat
/// number) appended as path segments.
#[derive(Debug, Deserialize, Clone)]
pub struct EndpointsConfig {
    pub seats: String,
    pub reserve: String,
    pub booking_confirm: String,
    pub payment: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Self::defaults_builder()?
            // Shipped defaults, optional so the binary runs from any directory
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `SEATMAP__BACKEND__BASE_URL=http://10.0.0.5:5000`
            .add_source(config::Environment::with_prefix("SEATMAP").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Built-in defaults only, ignoring files and the environment.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::defaults_builder()?.build()?.try_deserialize()
    }

    fn defaults_builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("backend.base_url", "http://localhost:5000")?
            .set_default("endpoints.seats", "/api/seats")?
            .set_default("endpoints.reserve", "/api/seats/reserve")?
            .set_default("endpoints.booking_confirm", "/api/bookings/confirm")?
            .set_default("endpoints.payment", "/payment")
    }
}
