use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDateTime};
use seatmap_shared::models::{BookingConfirmRequest, BookingConfirmResponse};
use seatmap_shared::Masked;
use tracing::{info, warn};

use crate::location::PageLocation;
use crate::ports::{BookingView, SeatApi};
use crate::{ClientError, ClientResult};

/// Summary of a finalized booking, as shown on the confirmation page.
#[derive(Debug, Clone)]
pub struct BookingDetails {
    pub booking_id: String,
    pub passenger_name: Masked<String>,
    pub flight_number: String,
    pub seat: Option<String>,
    pub total_price: f64,
    pub booking_date: String,
}

impl BookingDetails {
    pub fn from_response(response: BookingConfirmResponse) -> ClientResult<Self> {
        if let Some(message) = response.error {
            return Err(ClientError::DomainError(message));
        }

        Ok(Self {
            booking_id: required(response.booking_id.map(|id| id.to_string()), "booking_id")?,
            passenger_name: required(response.passenger_name, "passenger_name")?,
            flight_number: required(response.flight_number, "flight_number")?,
            seat: response.seat.filter(|seat| !seat.trim().is_empty()),
            total_price: required(response.total_price, "total_price")?,
            booking_date: required(response.booking_date, "booking_date")?,
        })
    }

    pub fn seat_label(&self) -> &str {
        self.seat.as_deref().unwrap_or("Not Assigned")
    }

    pub fn price_label(&self) -> String {
        format!("${:.2}", self.total_price)
    }

    /// Booking date in local time, or the raw text when it cannot be parsed.
    pub fn booking_date_label(&self) -> String {
        match parse_booking_date(&self.booking_date) {
            Some(date) => date.format("%b %-d, %Y %H:%M").to_string(),
            None => self.booking_date.clone(),
        }
    }
}

fn required<T>(value: Option<T>, field: &str) -> ClientResult<T> {
    value.ok_or_else(|| ClientError::MalformedResponse(format!("missing field {}", field)))
}

/// Accepts RFC 3339, the RFC 2822 style the backend's JSON encoder emits for
/// datetimes, and naive ISO timestamps (taken as local time).
pub fn parse_booking_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Local).naive_local());
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(&raw.replace(" GMT", " +0000")) {
        return Some(date.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// The booking-confirmation page flow.
pub struct BookingConfirmation<V> {
    api: Arc<dyn SeatApi>,
    view: V,
}

impl<V: BookingView> BookingConfirmation<V> {
    pub fn new(api: Arc<dyn SeatApi>, view: V) -> Self {
        Self { api, view }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Confirm the booking named by the page's `booking_id` parameter. A
    /// missing parameter is rendered without contacting the backend.
    pub async fn run(&mut self, location: &PageLocation) -> ClientResult<BookingDetails> {
        match location.require("booking_id") {
            Ok(booking_id) => self.confirm(&booking_id).await,
            Err(err) => {
                warn!(location = location.as_str(), "Booking confirmation opened without a booking id");
                self.view.render_error(&err);
                Err(err)
            }
        }
    }

    pub async fn confirm(&mut self, booking_id: &str) -> ClientResult<BookingDetails> {
        let request = BookingConfirmRequest {
            booking_id: booking_id.to_string(),
        };

        let details = self
            .api
            .confirm_booking(&request)
            .await
            .and_then(BookingDetails::from_response);

        match details {
            Ok(details) => {
                info!(
                    booking_id,
                    passenger = %details.passenger_name,
                    flight_number = %details.flight_number,
                    "Booking confirmed"
                );
                self.view.render_booking(&details);
                Ok(details)
            }
            Err(err) => {
                warn!(booking_id, error = %err, "Failed to fetch booking details");
                self.view.render_error(&err);
                Err(err)
            }
        }
    }
}
