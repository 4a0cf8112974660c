use std::collections::{BTreeMap, HashSet};

use crate::seat::Seat;
use crate::{ClientError, ClientResult};

/// Seat letters of a standard single-aisle cabin row.
pub const SEAT_LETTERS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];

/// Largest cabin the capacity form may describe.
pub const MAX_CAPACITY: u32 = 1200;

/// Build the seat grid for the capacity form of the seats endpoint:
/// `ceil(total_seats / 6)` full rows, seats named `{row}{letter}`.
pub fn capacity_grid(total_seats: u32, booked: &HashSet<String>) -> ClientResult<Vec<Seat>> {
    if total_seats > MAX_CAPACITY {
        return Err(ClientError::MalformedResponse(format!(
            "total_seats {} exceeds {}",
            total_seats, MAX_CAPACITY
        )));
    }

    let per_row = SEAT_LETTERS.len() as u32;
    let rows = total_seats.div_ceil(per_row);

    let seats = (1..=rows)
        .flat_map(|row| SEAT_LETTERS.into_iter().map(move |letter| format!("{}{}", row, letter)))
        .map(|seat_number| {
            if booked.contains(&seat_number) {
                Seat::reserved(seat_number)
            } else {
                Seat::available(seat_number)
            }
        })
        .collect();
    Ok(seats)
}

/// Split `12C` into row 12 and position `C`.
pub fn split_seat_number(seat_number: &str) -> Option<(u32, &str)> {
    let digits = seat_number
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(seat_number.len());
    if digits == 0 {
        return None;
    }
    let row = seat_number[..digits].parse().ok()?;
    Some((row, &seat_number[digits..]))
}

/// One rendered row of the seat map. `number` is `None` for seats whose
/// number has no row prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatRow<'a> {
    pub number: Option<u32>,
    pub seats: Vec<&'a Seat>,
}

impl SeatRow<'_> {
    /// Cabin class of the row, taken from the first seat that carries one.
    pub fn seat_class(&self) -> Option<&str> {
        self.seats.iter().find_map(|seat| seat.seat_class.as_deref())
    }
}

/// Group seats into rows, ascending by row number, positions ordered within
/// a row. Unnumbered seats trail in response order.
pub fn group_rows(seats: &[Seat]) -> Vec<SeatRow<'_>> {
    let mut numbered: BTreeMap<u32, Vec<&Seat>> = BTreeMap::new();
    let mut unnumbered = Vec::new();

    for seat in seats {
        match split_seat_number(&seat.seat_number) {
            Some((row, _)) => numbered.entry(row).or_default().push(seat),
            None => unnumbered.push(seat),
        }
    }

    let mut rows: Vec<SeatRow<'_>> = numbered
        .into_iter()
        .map(|(number, mut seats)| {
            seats.sort_by(|a, b| position(a).cmp(position(b)));
            SeatRow { number: Some(number), seats }
        })
        .collect();

    if !unnumbered.is_empty() {
        rows.push(SeatRow { number: None, seats: unnumbered });
    }

    rows
}

fn position(seat: &Seat) -> &str {
    split_seat_number(&seat.seat_number)
        .map(|(_, position)| position)
        .unwrap_or("")
}
