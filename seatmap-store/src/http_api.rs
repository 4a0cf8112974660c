//! reqwest-backed `SeatApi` talking JSON to the booking site.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use seatmap_core::location::check_segments;
use seatmap_core::{ClientError, ClientResult, SeatApi};
use seatmap_shared::models::{
    BookingConfirmRequest, BookingConfirmResponse, ReservationRequest, ReservationResponse,
    SeatsResponse,
};

use crate::app_config::{Config, EndpointsConfig};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid backend base url {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("invalid session cookie header")]
    InvalidCookie,

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct HttpSeatApi {
    http: Client,
    base_url: Url,
    endpoints: EndpointsConfig,
}

impl HttpSeatApi {
    pub fn new(config: &Config) -> Result<Self, StoreError> {
        let base_url = Url::parse(&config.backend.base_url).map_err(|source| {
            StoreError::InvalidBaseUrl {
                url: config.backend.base_url.clone(),
                source,
            }
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(cookie) = &config.backend.session_cookie {
            let value = HeaderValue::from_str(cookie).map_err(|_| StoreError::InvalidCookie)?;
            headers.insert(COOKIE, value);
        }

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url,
            endpoints: config.endpoints.clone(),
        })
    }

    fn endpoint(&self, path: &str, segments: &[&str]) -> ClientResult<Url> {
        check_segments(segments)?;
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::NetworkFailure(format!("invalid endpoint {}: {}", path, e)))?;
        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| ClientError::NetworkFailure(format!("invalid endpoint {}", path)))?
                .pop_if_empty()
                .extend(segments);
        }
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let url = response.url().clone();
        let body = response.text().await.map_err(transport)?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), "Backend responded");

        if !status.is_success() {
            // The site reports domain failures as 4xx with an `error` body
            return Err(match error_field(&body) {
                Some(message) => ClientError::DomainError(message),
                None => ClientError::NetworkFailure(format!("HTTP error! status: {}", status.as_u16())),
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }
}

fn transport(err: reqwest::Error) -> ClientError {
    ClientError::NetworkFailure(err.to_string())
}

fn error_field(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error")?.as_str().map(str::to_owned)
}

#[async_trait]
impl SeatApi for HttpSeatApi {
    async fn fetch_seats(&self, flight_id: &str) -> ClientResult<SeatsResponse> {
        let url = self.endpoint(&self.endpoints.seats, &[flight_id])?;
        self.send(self.http.get(url)).await
    }

    async fn reserve_seat(&self, request: &ReservationRequest) -> ClientResult<ReservationResponse> {
        let url = self.endpoint(&self.endpoints.reserve, &[])?;
        self.send(self.http.post(url).json(request)).await
    }

    async fn confirm_booking(
        &self,
        request: &BookingConfirmRequest,
    ) -> ClientResult<BookingConfirmResponse> {
        let url = self.endpoint(&self.endpoints.booking_confirm, &[])?;
        self.send(self.http.post(url).json(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str) -> HttpSeatApi {
        let mut config = Config::defaults().unwrap();
        config.backend.base_url = base_url.to_string();
        HttpSeatApi::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_urls() {
        let api = api("http://localhost:5000");
        assert_eq!(
            api.endpoint("/api/seats", &["AA 100"]).unwrap().as_str(),
            "http://localhost:5000/api/seats/AA%20100"
        );
        assert_eq!(
            api.endpoint("/api/seats/reserve", &[]).unwrap().as_str(),
            "http://localhost:5000/api/seats/reserve"
        );
    }

    #[test]
    fn test_endpoint_rejects_dot_segments() {
        let api = api("http://localhost:5000");
        assert!(matches!(
            api.endpoint("/api/seats", &[".."]),
            Err(ClientError::InvalidLocation(_))
        ));
        assert!(matches!(
            api.endpoint("/api/seats", &["."]),
            Err(ClientError::InvalidLocation(_))
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = Config::defaults().unwrap();
        config.backend.base_url = "not a url".to_string();
        assert!(matches!(
            HttpSeatApi::new(&config),
            Err(StoreError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_error_field() {
        assert_eq!(error_field(r#"{"error":"Flight not found"}"#).as_deref(), Some("Flight not found"));
        assert_eq!(error_field("<html>oops</html>"), None);
        assert_eq!(error_field(r#"{"message":"ok"}"#), None);
    }
}
