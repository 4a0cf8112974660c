use serde::{Deserialize, Serialize};

/// A single entry of the seats endpoint's list form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatRecord {
    pub seat_number: String,
    #[serde(default)]
    pub seat_class: Option<String>,
    pub is_available: bool,
}

/// Body of `GET /api/seats/{flight_id}`.
///
/// The backend answers either with a `seats` list or with the capacity form
/// (`total_seats` plus the seat numbers already booked). Records are kept as
/// raw JSON so one bad entry does not reject the whole list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeatsResponse {
    pub seats: Option<Vec<serde_json::Value>>,
    pub total_seats: Option<u32>,
    pub booked_seats: Option<serde_json::Value>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationRequest {
    pub flight_id: String,
    pub seat_number: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub message: Option<String>,
    pub error: Option<String>,
}
