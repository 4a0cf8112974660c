use async_trait::async_trait;
use seatmap_shared::models::{
    BookingConfirmRequest, BookingConfirmResponse, ReservationRequest, ReservationResponse,
    SeatsResponse,
};

use crate::confirmation::BookingDetails;
use crate::layout::SeatRow;
use crate::ClientResult;

/// Backend of the booking flows
#[async_trait]
pub trait SeatApi: Send + Sync {
    /// Fetch the seat inventory of a flight
    async fn fetch_seats(&self, flight_id: &str) -> ClientResult<SeatsResponse>;

    /// Claim a seat for a flight
    async fn reserve_seat(&self, request: &ReservationRequest) -> ClientResult<ReservationResponse>;

    /// Look up a finalized booking for its confirmation view
    async fn confirm_booking(
        &self,
        request: &BookingConfirmRequest,
    ) -> ClientResult<BookingConfirmResponse>;
}

/// How a rendered seat element behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatElementState {
    Selectable,
    Selected,
    Disabled,
}

/// Rendered surface of the seat-selection page.
pub trait SeatView {
    /// Draw one element per seat. Unavailable seats are drawn disabled.
    fn render_seats(&mut self, rows: &[SeatRow<'_>]);

    fn clear_seats(&mut self);

    fn set_seat_state(&mut self, seat_number: &str, state: SeatElementState);

    fn set_confirm_enabled(&mut self, enabled: bool);

    fn show_message(&mut self, message: &str);

    fn show_error(&mut self, error: &crate::ClientError);

    /// Leave the page for another route of the site.
    fn navigate(&mut self, path: &str);
}

/// Rendered surface of the booking-confirmation page.
pub trait BookingView {
    fn render_booking(&mut self, details: &BookingDetails);

    fn render_error(&mut self, error: &crate::ClientError);
}
