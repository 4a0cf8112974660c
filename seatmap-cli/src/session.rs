use std::io::Write;
use std::str::FromStr;

use seatmap_core::{
    BookingConfirmation, BookingView, ClientError, PageLocation, Phase, SeatSelectionClient,
    SeatView,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::state::AppState;
use crate::terminal::{TerminalBookingView, TerminalSeatView};

/// How a page flow ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Left the page for another route (the payment step).
    Navigated(String),
    /// The flow finished on the same page.
    Completed,
    /// The last action failed; the error has already been shown.
    Failed(ClientError),
}

#[derive(Debug, Clone, Default)]
pub struct SeatsOptions {
    /// Seat to select right after loading.
    pub select: Option<String>,
    /// Confirm the preselected seat instead of reading commands.
    pub confirm: bool,
}

/// A line typed at the seat-selection prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(String),
    Confirm,
    Reload,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let command = match words.next() {
            Some(word) => word.to_ascii_lowercase(),
            None => return Err("empty command".to_string()),
        };

        match command.as_str() {
            "select" | "s" => match words.next() {
                Some(seat) => Ok(Command::Select(seat.to_string())),
                None => Err("usage: select <seat>".to_string()),
            },
            "confirm" | "c" => Ok(Command::Confirm),
            "reload" | "r" => Ok(Command::Reload),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command: {}", other)),
        }
    }
}

const HELP: &str = "Commands: select <seat>, confirm, reload, show, quit";

/// Seat-selection page: load the map for the location's flight, then apply
/// the one-shot options or read commands from `input` until the page is
/// left, the user quits, or input ends.
pub async fn run_seats<R, W>(
    state: &AppState,
    location: &str,
    options: SeatsOptions,
    input: R,
    out: W,
) -> (FlowOutcome, TerminalSeatView<W>)
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut view = TerminalSeatView::new(out);
    let location = match PageLocation::parse(location) {
        Ok(location) => location,
        Err(err) => {
            view.show_error(&err);
            return (FlowOutcome::Failed(err), view);
        }
    };

    let mut client = match SeatSelectionClient::from_location(&location, state.api.clone(), view) {
        Ok(client) => client.with_payment_path(state.payment_path.clone()),
        Err((err, view)) => return (FlowOutcome::Failed(err), view),
    };

    if let Err(err) = client.reload().await {
        return (FlowOutcome::Failed(err), client.into_view());
    }

    if let Some(seat) = &options.select {
        if let Err(err) = client.select_seat(seat) {
            return (FlowOutcome::Failed(err), client.into_view());
        }
    }

    let outcome = if options.confirm {
        match client.confirm_selection().await {
            Ok(path) => FlowOutcome::Navigated(path),
            Err(err) => FlowOutcome::Failed(err),
        }
    } else {
        interact(&mut client, input).await
    };

    (outcome, client.into_view())
}

async fn interact<R, W>(
    client: &mut SeatSelectionClient<TerminalSeatView<W>>,
    input: R,
) -> FlowOutcome
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut last_error = None;

    client_message(client, HELP);
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                debug!(error = %e, "Input closed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(message) => {
                client_message(client, &message);
                continue;
            }
        };

        let result = match command {
            Command::Select(seat) => client.select_seat(&seat),
            Command::Confirm => match client.confirm_selection().await {
                Ok(path) => return FlowOutcome::Navigated(path),
                Err(err) => Err(err),
            },
            Command::Reload => client.reload().await.map(|_| ()),
            Command::Show => {
                redraw(client);
                Ok(())
            }
            Command::Help => {
                client_message(client, HELP);
                Ok(())
            }
            Command::Quit => break,
        };
        last_error = result.err();
    }

    info!(phase = ?client.phase(), "Seat selection closed");
    match last_error {
        Some(err) if client.phase() != Phase::Reserved => FlowOutcome::Failed(err),
        _ => FlowOutcome::Completed,
    }
}

fn client_message<W: Write>(client: &mut SeatSelectionClient<TerminalSeatView<W>>, text: &str) {
    client.view_mut().show_message(text);
}

fn redraw<W: Write>(client: &mut SeatSelectionClient<TerminalSeatView<W>>) {
    client.view_mut().redraw();
}

/// Booking-confirmation page for the location's `booking_id`.
pub async fn run_confirmation<W: Write>(
    state: &AppState,
    location: &str,
    out: W,
) -> (FlowOutcome, W) {
    let mut flow = BookingConfirmation::new(state.api.clone(), TerminalBookingView::new(out));

    let result = match PageLocation::parse(location) {
        Ok(location) => flow.run(&location).await.map(|_| ()),
        Err(err) => {
            let mut view = flow.into_view();
            view.render_error(&err);
            return (FlowOutcome::Failed(err), view.into_writer());
        }
    };

    let outcome = match result {
        Ok(()) => FlowOutcome::Completed,
        Err(err) => FlowOutcome::Failed(err),
    };
    (outcome, flow.into_view().into_writer())
}
