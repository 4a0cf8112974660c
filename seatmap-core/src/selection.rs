use std::sync::Arc;

use seatmap_shared::models::ReservationRequest;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::layout::group_rows;
use crate::location::{route, PageLocation};
use crate::ports::{SeatApi, SeatElementState, SeatView};
use crate::seat::{parse_inventory, Seat};
use crate::{ClientError, ClientResult};

pub const DEFAULT_PAYMENT_PATH: &str = "/payment";

/// Where the seat-selection flow stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loaded,
    Selected,
    Reserving,
    Reserved,
    Failed,
}

/// Seat map, selection and reservation for one flight on one page view.
///
/// Idle → Loaded → Selected → Reserving → Reserved (navigates away) or
/// Failed, which keeps the selection so the user can confirm again.
pub struct SeatSelectionClient<V> {
    session_id: Uuid,
    api: Arc<dyn SeatApi>,
    view: V,
    payment_path: String,
    flight_id: Option<String>,
    seats: Vec<Seat>,
    selected: Option<String>,
    phase: Phase,
}

impl<V: SeatView> SeatSelectionClient<V> {
    pub fn new(api: Arc<dyn SeatApi>, view: V) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            api,
            view,
            payment_path: DEFAULT_PAYMENT_PATH.to_string(),
            flight_id: None,
            seats: Vec::new(),
            selected: None,
            phase: Phase::Idle,
        }
    }

    /// Open the flow for the flight named by the page's `flight_id`
    /// parameter. The error is shown on the view before it is returned.
    pub fn from_location(
        location: &PageLocation,
        api: Arc<dyn SeatApi>,
        mut view: V,
    ) -> Result<Self, (ClientError, V)> {
        match location.require("flight_id") {
            Ok(flight_id) => {
                let mut client = Self::new(api, view);
                client.flight_id = Some(flight_id);
                Ok(client)
            }
            Err(err) => {
                view.show_error(&err);
                Err((err, view))
            }
        }
    }

    pub fn with_payment_path(mut self, path: impl Into<String>) -> Self {
        self.payment_path = path.into();
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn flight_id(&self) -> Option<&str> {
        self.flight_id.as_deref()
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn selected_seat(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Reload the seat map of the flight this client was opened for.
    pub async fn reload(&mut self) -> ClientResult<usize> {
        match self.flight_id.clone() {
            Some(flight_id) => self.load_seats(&flight_id).await,
            None => {
                let err = ClientError::MissingParameter("flight_id".to_string());
                self.view.show_error(&err);
                Err(err)
            }
        }
    }

    /// Fetch and render the seat map of a flight. Any previous map and
    /// selection are discarded first, so a failure leaves no seats rendered.
    pub async fn load_seats(&mut self, flight_id: &str) -> ClientResult<usize> {
        if self.phase == Phase::Reserving {
            return Err(self.fail_input(ClientError::ReservationInProgress));
        }

        let flight_id = flight_id.trim();
        if flight_id.is_empty() {
            return Err(self.fail_input(ClientError::MissingParameter("flight_id".to_string())));
        }

        self.reset();
        self.flight_id = Some(flight_id.to_string());
        debug!(session_id = %self.session_id, flight_id, "Loading seat map");

        let inventory = match self.api.fetch_seats(flight_id).await {
            Ok(response) => parse_inventory(response),
            Err(err) => Err(err),
        };

        match inventory {
            Ok(seats) => {
                self.seats = seats;
                let rows = group_rows(&self.seats);
                self.view.render_seats(&rows);
                self.phase = Phase::Loaded;

                let available = self.seats.iter().filter(|s| s.is_available).count();
                info!(
                    session_id = %self.session_id,
                    flight_id,
                    seats = self.seats.len(),
                    available,
                    "Seat map loaded"
                );
                Ok(self.seats.len())
            }
            Err(err) => {
                warn!(session_id = %self.session_id, flight_id, error = %err, "Failed to load seat map");
                self.view.show_error(&err);
                Err(err)
            }
        }
    }

    /// Make `seat_number` the single selected seat. Unknown and unavailable
    /// seats are refused without touching the current selection.
    ///
    /// An exact match wins; otherwise the seat is matched ignoring ASCII
    /// case, and the selection holds the number as the backend spelled it.
    pub fn select_seat(&mut self, seat_number: &str) -> ClientResult<()> {
        if self.phase == Phase::Reserving {
            return Err(self.fail_input(ClientError::ReservationInProgress));
        }

        let requested = seat_number.trim();
        let found = self
            .find_seat(requested)
            .map(|seat| (seat.seat_number.clone(), seat.is_available));
        let seat_number = match found {
            Some((seat_number, true)) => seat_number,
            Some((seat_number, false)) => {
                return Err(self.fail_input(ClientError::SeatUnavailable(seat_number)))
            }
            None => return Err(self.fail_input(ClientError::SeatUnavailable(requested.to_string()))),
        };

        if let Some(previous) = self.selected.take() {
            if previous != seat_number {
                self.view.set_seat_state(&previous, SeatElementState::Selectable);
            }
        }

        self.view.set_seat_state(&seat_number, SeatElementState::Selected);
        debug!(session_id = %self.session_id, %seat_number, "Seat selected");
        self.selected = Some(seat_number);
        self.view.set_confirm_enabled(true);
        self.phase = Phase::Selected;

        Ok(())
    }

    fn find_seat(&self, seat_number: &str) -> Option<&Seat> {
        self.seats
            .iter()
            .find(|seat| seat.seat_number == seat_number)
            .or_else(|| {
                self.seats
                    .iter()
                    .find(|seat| seat.seat_number.eq_ignore_ascii_case(seat_number))
            })
    }

    /// Reserve the selected seat and navigate to its payment step.
    ///
    /// The confirm action stays disabled while the request is pending. On
    /// failure the selection is kept and the action re-enabled for a retry.
    pub async fn confirm_selection(&mut self) -> ClientResult<String> {
        if self.phase == Phase::Reserving {
            return Err(self.fail_input(ClientError::ReservationInProgress));
        }

        let (flight_id, seat_number) = match self.flight_id.clone().zip(self.selected.clone()) {
            Some(pending) => pending,
            None => return Err(self.fail_input(ClientError::NoSelection)),
        };
        let payment_route = match route(&self.payment_path, &[flight_id.as_str(), seat_number.as_str()]) {
            Ok(path) => path,
            Err(err) => return Err(self.fail_input(err)),
        };

        self.phase = Phase::Reserving;
        self.view.set_confirm_enabled(false);
        info!(session_id = %self.session_id, %flight_id, %seat_number, "Reserving seat");

        let request = ReservationRequest {
            flight_id: flight_id.clone(),
            seat_number: seat_number.clone(),
        };
        let outcome = self
            .api
            .reserve_seat(&request)
            .await
            .and_then(|response| match response.error {
                Some(message) => Err(ClientError::DomainError(message)),
                None => Ok(response.message),
            });

        match outcome {
            Ok(message) => {
                let message =
                    message.unwrap_or_else(|| format!("Seat {} reserved successfully!", seat_number));
                self.view.show_message(&message);
                self.view.navigate(&payment_route);

                self.phase = Phase::Reserved;
                self.selected = None;
                self.seats.clear();

                info!(session_id = %self.session_id, %flight_id, %seat_number, "Seat reserved");
                Ok(payment_route)
            }
            Err(err) => {
                warn!(
                    session_id = %self.session_id,
                    %flight_id,
                    %seat_number,
                    error = %err,
                    "Seat reservation failed"
                );
                self.phase = Phase::Failed;
                self.view.show_error(&err);
                self.view.set_confirm_enabled(true);
                Err(err)
            }
        }
    }

    fn reset(&mut self) {
        self.seats.clear();
        self.selected = None;
        self.phase = Phase::Idle;
        self.view.clear_seats();
        self.view.set_confirm_enabled(false);
    }

    fn fail_input(&mut self, err: ClientError) -> ClientError {
        debug!(session_id = %self.session_id, error = %err, "Rejected user action");
        self.view.show_error(&err);
        err
    }
}
