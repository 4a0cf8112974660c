use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pii::Masked;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingConfirmRequest {
    pub booking_id: String,
}

/// Booking identifiers come back as integers from the relational store and
/// as strings from the document store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum BookingId {
    Number(i64),
    Text(String),
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingId::Number(n) => write!(f, "{}", n),
            BookingId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Body of `POST /api/bookings/confirm`. Either the booking summary or an
/// `error`; required fields are checked by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingConfirmResponse {
    pub booking_id: Option<BookingId>,
    pub passenger_name: Option<Masked<String>>,
    pub flight_number: Option<String>,
    pub seat: Option<String>,
    pub total_price: Option<f64>,
    pub booking_date: Option<String>,
    pub error: Option<String>,
}
