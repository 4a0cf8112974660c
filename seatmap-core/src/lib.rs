pub mod confirmation;
pub mod layout;
pub mod location;
pub mod ports;
pub mod seat;
pub mod selection;

#[cfg(test)]
mod testing;

pub use confirmation::{BookingConfirmation, BookingDetails};
pub use location::PageLocation;
pub use ports::{BookingView, SeatApi, SeatElementState, SeatView};
pub use seat::Seat;
pub use selection::{Phase, SeatSelectionClient};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("Missing parameter: {0}")]
    MissingParameter(String),
    #[error("Invalid page location: {0}")]
    InvalidLocation(String),
    #[error("Network failure: {0}")]
    NetworkFailure(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("{0}")]
    DomainError(String),
    #[error("No seat selected")]
    NoSelection,
    #[error("Seat {0} is not available")]
    SeatUnavailable(String),
    #[error("A reservation is already in progress")]
    ReservationInProgress,
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Text shown to the user. Transport and parse details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::MissingParameter(name) => format!("{} is missing.", parameter_label(name)),
            ClientError::InvalidLocation(_) => "The page address is not valid.".to_string(),
            ClientError::NetworkFailure(_) | ClientError::MalformedResponse(_) => {
                "Something went wrong. Please try again later.".to_string()
            }
            ClientError::DomainError(message) => message.clone(),
            ClientError::NoSelection => {
                "No seat selected. Please select a seat before confirming.".to_string()
            }
            ClientError::SeatUnavailable(seat) => format!("Seat {} is not available.", seat),
            ClientError::ReservationInProgress => {
                "Your reservation is being processed. Please wait.".to_string()
            }
        }
    }
}

fn parameter_label(name: &str) -> &str {
    match name {
        "flight_id" => "Flight ID",
        "booking_id" => "Booking ID",
        other => other,
    }
}
