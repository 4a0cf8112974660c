pub mod booking;
pub mod seats;

pub use booking::{BookingConfirmRequest, BookingConfirmResponse, BookingId};
pub use seats::{ReservationRequest, ReservationResponse, SeatRecord, SeatsResponse};
