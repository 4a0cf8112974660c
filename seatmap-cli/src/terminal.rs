//! Plain-text renderings of the seat map and booking confirmation.
//!
//! Seat cells: `[12A]` selectable, `<12A>` selected, `(12A)` reserved.

use std::collections::HashMap;
use std::fmt;
use std::io::Write;

use seatmap_core::layout::SeatRow;
use seatmap_core::{BookingDetails, BookingView, ClientError, SeatElementState, SeatView};
use tracing::warn;

struct RowLine {
    label: String,
    seat_class: Option<String>,
    seats: Vec<String>,
}

pub struct TerminalSeatView<W> {
    out: W,
    rows: Vec<RowLine>,
    states: HashMap<String, SeatElementState>,
    confirm_enabled: bool,
    location: Option<String>,
}

impl<W: Write> TerminalSeatView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            rows: Vec::new(),
            states: HashMap::new(),
            confirm_enabled: false,
            location: None,
        }
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    pub fn confirm_enabled(&self) -> bool {
        self.confirm_enabled
    }

    /// Route of the last navigation, once the page has been left.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Print the whole seat map and the state of the confirm action.
    pub fn redraw(&mut self) {
        if self.rows.is_empty() {
            self.line(format_args!("No seats to show."));
            return;
        }

        let mut text = String::new();
        for row in &self.rows {
            let cells: Vec<String> = row
                .seats
                .iter()
                .map(|seat| cell(seat, self.states.get(seat).copied()))
                .collect();
            text.push_str(&format!("{:>4} {}", row.label, cells.join(" ")));
            if let Some(class) = &row.seat_class {
                text.push_str(&format!("  {}", class));
            }
            text.push('\n');
        }
        let confirm = if self.confirm_enabled { "ready" } else { "disabled" };
        text.push_str(&format!("[ ] free  < > selected  ( ) reserved   confirm: {}", confirm));
        self.line(format_args!("{}", text));
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", args) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}

fn cell(seat: &str, state: Option<SeatElementState>) -> String {
    match state {
        Some(SeatElementState::Selected) => format!("<{}>", seat),
        Some(SeatElementState::Disabled) => format!("({})", seat),
        _ => format!("[{}]", seat),
    }
}

impl<W: Write> SeatView for TerminalSeatView<W> {
    fn render_seats(&mut self, rows: &[SeatRow<'_>]) {
        self.rows = rows
            .iter()
            .map(|row| RowLine {
                label: row.number.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string()),
                seat_class: row.seat_class().map(str::to_string),
                seats: row.seats.iter().map(|seat| seat.seat_number.clone()).collect(),
            })
            .collect();
        self.states = rows
            .iter()
            .flat_map(|row| row.seats.iter())
            .map(|seat| {
                let state = if seat.is_available {
                    SeatElementState::Selectable
                } else {
                    SeatElementState::Disabled
                };
                (seat.seat_number.clone(), state)
            })
            .collect();
        self.redraw();
    }

    fn clear_seats(&mut self) {
        self.rows.clear();
        self.states.clear();
    }

    fn set_seat_state(&mut self, seat_number: &str, state: SeatElementState) {
        if let Some(current) = self.states.get_mut(seat_number) {
            *current = state;
        }
        if state == SeatElementState::Selected {
            self.line(format_args!("Selected seat {}.", seat_number));
        }
    }

    fn set_confirm_enabled(&mut self, enabled: bool) {
        self.confirm_enabled = enabled;
    }

    fn show_message(&mut self, message: &str) {
        self.line(format_args!("{}", message));
    }

    fn show_error(&mut self, error: &ClientError) {
        self.line(format_args!("Error: {}", error.user_message()));
    }

    fn navigate(&mut self, path: &str) {
        self.location = Some(path.to_string());
        self.line(format_args!("Continue to payment: {}", path));
    }
}

pub struct TerminalBookingView<W> {
    out: W,
}

impl<W: Write> TerminalBookingView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<W: Write> BookingView for TerminalBookingView<W> {
    fn render_booking(&mut self, details: &BookingDetails) {
        let text = format!(
            "Booking Confirmation\n\
             Booking ID:     {}\n\
             Passenger Name: {}\n\
             Flight Number:  {}\n\
             Seat:           {}\n\
             Total Price:    {}\n\
             Booking Date:   {}",
            details.booking_id,
            details.passenger_name.expose(),
            details.flight_number,
            details.seat_label(),
            details.price_label(),
            details.booking_date_label(),
        );
        self.write(&text);
    }

    fn render_error(&mut self, error: &ClientError) {
        let message = match error {
            ClientError::NetworkFailure(_) | ClientError::MalformedResponse(_) => {
                "Could not fetch booking details. Please try again later.".to_string()
            }
            other => other.user_message(),
        };
        self.write(&format!("Error: {}", message));
    }
}
