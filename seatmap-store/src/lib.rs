pub mod app_config;
pub mod http_api;

pub use app_config::Config;
pub use http_api::{HttpSeatApi, StoreError};
