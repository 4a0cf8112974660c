use std::collections::HashSet;

use seatmap_shared::models::{SeatRecord, SeatsResponse};
use serde_json::Value;
use tracing::warn;

use crate::layout;
use crate::{ClientError, ClientResult};

/// A bookable seat as fetched for one page view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub seat_number: String,
    pub seat_class: Option<String>,
    pub is_available: bool,
}

impl Seat {
    pub fn available(seat_number: impl Into<String>) -> Self {
        Self {
            seat_number: seat_number.into(),
            seat_class: None,
            is_available: true,
        }
    }

    pub fn reserved(seat_number: impl Into<String>) -> Self {
        Self {
            seat_number: seat_number.into(),
            seat_class: None,
            is_available: false,
        }
    }
}

impl From<SeatRecord> for Seat {
    fn from(record: SeatRecord) -> Self {
        Self {
            seat_number: record.seat_number.trim().to_string(),
            seat_class: record.seat_class.filter(|class| !class.trim().is_empty()),
            is_available: record.is_available,
        }
    }
}

/// Turn a seats endpoint body into the seat inventory.
///
/// A server `error` wins over any data. The list form is preferred over the
/// capacity form when both are present.
pub fn parse_inventory(response: SeatsResponse) -> ClientResult<Vec<Seat>> {
    if let Some(message) = response.error {
        return Err(ClientError::DomainError(message));
    }

    if let Some(records) = response.seats {
        return Ok(parse_records(records));
    }

    if let Some(total_seats) = response.total_seats {
        let booked = booked_seat_numbers(response.booked_seats)?;
        return layout::capacity_grid(total_seats, &booked);
    }

    Err(ClientError::MalformedResponse(
        "response has neither seats nor total_seats".to_string(),
    ))
}

fn parse_records(records: Vec<Value>) -> Vec<Seat> {
    let mut seen = HashSet::new();
    let mut seats = Vec::with_capacity(records.len());

    for (index, value) in records.into_iter().enumerate() {
        let seat: Seat = match serde_json::from_value::<SeatRecord>(value) {
            Ok(record) => record.into(),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed seat record");
                continue;
            }
        };

        if seat.seat_number.is_empty() {
            warn!(index, "Skipping seat record with empty seat number");
            continue;
        }
        if !seen.insert(seat.seat_number.clone()) {
            warn!(index, seat_number = %seat.seat_number, "Skipping duplicate seat record");
            continue;
        }

        seats.push(seat);
    }

    seats
}

fn booked_seat_numbers(value: Option<Value>) -> ClientResult<HashSet<String>> {
    let items = match value {
        None | Some(Value::Null) => return Ok(HashSet::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ClientError::MalformedResponse(
                "booked_seats must be a list of seat numbers".to_string(),
            ))
        }
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(seat) => Ok(seat.trim().to_string()),
            other => Err(ClientError::MalformedResponse(format!(
                "booked seat entry is not a seat number: {}",
                other
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(body: Value) -> SeatsResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_list_form() {
        let seats = parse_inventory(response(json!({
            "seats": [
                { "seat_number": "1A", "seat_class": "First", "is_available": true },
                { "seat_number": "1B", "is_available": false }
            ]
        })))
        .unwrap();

        assert_eq!(seats.len(), 2);
        assert_eq!(seats[0].seat_class.as_deref(), Some("First"));
        assert!(!seats[1].is_available);
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let seats = parse_inventory(response(json!({
            "seats": [
                { "seat_number": "1A", "is_available": true },
                { "seat_number": "1B" },
                { "is_available": true },
                { "seat_number": "  ", "is_available": true },
                { "seat_number": "1A", "is_available": false },
                "2C",
                { "seat_number": "2D", "is_available": false }
            ]
        })))
        .unwrap();

        let numbers: Vec<&str> = seats.iter().map(|s| s.seat_number.as_str()).collect();
        assert_eq!(numbers, vec!["1A", "2D"]);
        assert!(seats[0].is_available);
    }

    #[test]
    fn test_error_field_is_domain_error() {
        let result = parse_inventory(response(json!({
            "seats": [],
            "error": "Flight not found"
        })));
        assert_eq!(result, Err(ClientError::DomainError("Flight not found".to_string())));
    }

    #[test]
    fn test_capacity_form_marks_booked() {
        let seats = parse_inventory(response(json!({
            "total_seats": 8,
            "booked_seats": ["1B", "2F"]
        })))
        .unwrap();

        assert_eq!(seats.len(), 12);
        let reserved: Vec<&str> = seats
            .iter()
            .filter(|s| !s.is_available)
            .map(|s| s.seat_number.as_str())
            .collect();
        assert_eq!(reserved, vec!["1B", "2F"]);
    }

    #[test]
    fn test_booked_count_is_malformed() {
        let result = parse_inventory(response(json!({
            "total_seats": 100,
            "booked_seats": 3
        })));
        assert!(matches!(result, Err(ClientError::MalformedResponse(_))));
    }

    #[test]
    fn test_oversized_capacity_is_malformed() {
        let result = parse_inventory(response(json!({
            "total_seats": 4294967295u32,
            "booked_seats": []
        })));
        assert!(matches!(result, Err(ClientError::MalformedResponse(_))));
    }

    #[test]
    fn test_empty_body_is_malformed() {
        let result = parse_inventory(SeatsResponse::default());
        assert!(matches!(result, Err(ClientError::MalformedResponse(_))));
    }
}
