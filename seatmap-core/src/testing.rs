//! In-memory backend and recording views for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use seatmap_shared::models::{
    BookingConfirmRequest, BookingConfirmResponse, ReservationRequest, ReservationResponse,
    SeatsResponse,
};

use crate::confirmation::BookingDetails;
use crate::layout::SeatRow;
use crate::ports::{BookingView, SeatApi, SeatElementState, SeatView};
use crate::{ClientError, ClientResult};

#[derive(Default)]
pub struct FakeApi {
    seats: Mutex<Option<ClientResult<SeatsResponse>>>,
    reservation: Mutex<Option<ClientResult<ReservationResponse>>>,
    booking: Mutex<Option<ClientResult<BookingConfirmResponse>>>,
    seat_requests: Mutex<Vec<String>>,
    reservations: Mutex<Vec<ReservationRequest>>,
    booking_requests: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn with_seats(seats: ClientResult<SeatsResponse>) -> Self {
        let api = Self::default();
        api.set_seats(seats);
        api
    }

    pub fn set_seats(&self, seats: ClientResult<SeatsResponse>) {
        *self.seats.lock().unwrap() = Some(seats);
    }

    pub fn set_reservation(&self, response: ClientResult<ReservationResponse>) {
        *self.reservation.lock().unwrap() = Some(response);
    }

    pub fn set_booking(&self, response: ClientResult<BookingConfirmResponse>) {
        *self.booking.lock().unwrap() = Some(response);
    }

    pub fn seat_requests(&self) -> Vec<String> {
        self.seat_requests.lock().unwrap().clone()
    }

    pub fn reservations(&self) -> Vec<ReservationRequest> {
        self.reservations.lock().unwrap().clone()
    }

    pub fn booking_requests(&self) -> Vec<String> {
        self.booking_requests.lock().unwrap().clone()
    }
}

fn canned<T: Clone>(slot: &Mutex<Option<ClientResult<T>>>) -> ClientResult<T> {
    slot.lock()
        .unwrap()
        .clone()
        .unwrap_or_else(|| Err(ClientError::NetworkFailure("no canned response".into())))
}

#[async_trait]
impl SeatApi for FakeApi {
    async fn fetch_seats(&self, flight_id: &str) -> ClientResult<SeatsResponse> {
        self.seat_requests.lock().unwrap().push(flight_id.to_string());
        canned(&self.seats)
    }

    async fn reserve_seat(&self, request: &ReservationRequest) -> ClientResult<ReservationResponse> {
        self.reservations.lock().unwrap().push(request.clone());
        canned(&self.reservation)
    }

    async fn confirm_booking(
        &self,
        request: &BookingConfirmRequest,
    ) -> ClientResult<BookingConfirmResponse> {
        self.booking_requests.lock().unwrap().push(request.booking_id.clone());
        canned(&self.booking)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Rendered(usize),
    Cleared,
    SeatState(String, SeatElementState),
    ConfirmEnabled(bool),
    Message(String),
    Error(ClientError),
    Navigate(String),
}

/// Keeps the current element states plus a log of every call.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub rendered: Vec<String>,
    pub states: Vec<(String, SeatElementState)>,
    pub confirm_enabled: bool,
    pub messages: Vec<String>,
    pub errors: Vec<ClientError>,
    pub navigations: Vec<String>,
    pub events: Vec<ViewEvent>,
}

impl RecordingView {
    fn with_state(&self, wanted: SeatElementState) -> Vec<String> {
        self.states
            .iter()
            .filter(|(_, state)| *state == wanted)
            .map(|(seat, _)| seat.clone())
            .collect()
    }

    pub fn selected(&self) -> Vec<String> {
        self.with_state(SeatElementState::Selected)
    }

    pub fn disabled(&self) -> Vec<String> {
        self.with_state(SeatElementState::Disabled)
    }
}

impl SeatView for RecordingView {
    fn render_seats(&mut self, rows: &[SeatRow<'_>]) {
        for seat in rows.iter().flat_map(|row| row.seats.iter()) {
            let state = if seat.is_available {
                SeatElementState::Selectable
            } else {
                SeatElementState::Disabled
            };
            self.rendered.push(seat.seat_number.clone());
            self.states.push((seat.seat_number.clone(), state));
        }
        self.events.push(ViewEvent::Rendered(self.rendered.len()));
    }

    fn clear_seats(&mut self) {
        self.rendered.clear();
        self.states.clear();
        self.events.push(ViewEvent::Cleared);
    }

    fn set_seat_state(&mut self, seat_number: &str, state: SeatElementState) {
        for (seat, current) in self.states.iter_mut() {
            if seat == seat_number {
                *current = state;
            }
        }
        self.events.push(ViewEvent::SeatState(seat_number.to_string(), state));
    }

    fn set_confirm_enabled(&mut self, enabled: bool) {
        self.confirm_enabled = enabled;
        self.events.push(ViewEvent::ConfirmEnabled(enabled));
    }

    fn show_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
        self.events.push(ViewEvent::Message(message.to_string()));
    }

    fn show_error(&mut self, error: &ClientError) {
        self.errors.push(error.clone());
        self.events.push(ViewEvent::Error(error.clone()));
    }

    fn navigate(&mut self, path: &str) {
        self.navigations.push(path.to_string());
        self.events.push(ViewEvent::Navigate(path.to_string()));
    }
}

#[derive(Debug, Default)]
pub struct RecordingBookingView {
    pub bookings: Vec<String>,
    pub errors: Vec<ClientError>,
}

impl BookingView for RecordingBookingView {
    fn render_booking(&mut self, details: &BookingDetails) {
        self.bookings.push(details.booking_id.clone());
    }

    fn render_error(&mut self, error: &ClientError) {
        self.errors.push(error.clone());
    }
}
