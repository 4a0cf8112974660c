use std::sync::Arc;

use seatmap_core::SeatApi;
use seatmap_store::{Config, HttpSeatApi};

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn SeatApi>,
    pub payment_path: String,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api = HttpSeatApi::new(config)?;
        Ok(Self {
            api: Arc::new(api),
            payment_path: config.endpoints.payment.clone(),
        })
    }
}
