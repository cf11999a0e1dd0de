//! Seat-mode selection: individual seats, capped at a maximum count.

use crate::pricing::{PriceBreakdown, seat_total};
use crate::types::{Money, Seat, SeatId, VenueLayout};
use serde::{Deserialize, Serialize};

/// Result of clicking a seat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToggleOutcome {
    /// The seat was added
    Selected,
    /// The seat was already selected and has been removed
    Deselected,
    /// The selection is full; nothing changed
    LimitReached,
    /// The seat is already sold; nothing changed
    Unavailable,
}

/// Seats picked by the user, in the order they were picked
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatSelection {
    seats: Vec<SeatId>,
}

impl SeatSelection {
    /// Empty selection
    #[must_use]
    pub const fn new() -> Self {
        Self { seats: Vec::new() }
    }

    /// Toggle `seat` in or out of the selection
    ///
    /// Sold seats are never added. A selected seat is always removable, even
    /// when the selection is full. Otherwise the seat is added only while
    /// fewer than `max` seats are selected.
    pub fn toggle(&mut self, seat: &Seat, max: usize) -> ToggleOutcome {
        if !seat.is_selectable() {
            return ToggleOutcome::Unavailable;
        }
        if let Some(index) = self.seats.iter().position(|id| id == &seat.id) {
            self.seats.remove(index);
            return ToggleOutcome::Deselected;
        }
        if self.seats.len() >= max {
            return ToggleOutcome::LimitReached;
        }
        self.seats.push(seat.id.clone());
        ToggleOutcome::Selected
    }

    /// True if `id` is selected
    #[must_use]
    pub fn contains(&self, id: &SeatId) -> bool {
        self.seats.contains(id)
    }

    /// Number of selected seats
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// True if no seat is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Selected seat ids, oldest pick first
    pub fn iter(&self) -> impl Iterator<Item = &SeatId> {
        self.seats.iter()
    }

    /// Drop every selected seat
    pub fn clear(&mut self) {
        self.seats.clear();
    }

    /// Sum of the zone prices of the selected seats
    #[must_use]
    pub fn total(&self, layout: &VenueLayout) -> Money {
        seat_total(layout, &self.seats)
    }

    /// Selected seats itemised per zone
    #[must_use]
    pub fn breakdown(&self, layout: &VenueLayout) -> PriceBreakdown {
        PriceBreakdown::for_seats(layout, &self.seats)
    }

    pub(crate) fn to_vec(&self) -> Vec<SeatId> {
        self.seats.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SeatStatus, ZoneId};

    fn seat(number: u32, status: SeatStatus) -> Seat {
        Seat::new(ZoneId::new("b-east"), "A", number, status)
    }

    #[test]
    fn toggling_twice_restores_the_selection() {
        let mut selection = SeatSelection::new();
        let a1 = seat(1, SeatStatus::Available);
        assert_eq!(selection.toggle(&a1, 10), ToggleOutcome::Selected);
        assert!(selection.contains(&a1.id));
        assert_eq!(selection.toggle(&a1, 10), ToggleOutcome::Deselected);
        assert!(selection.is_empty());
    }

    #[test]
    fn booked_seats_are_rejected() {
        let mut selection = SeatSelection::new();
        assert_eq!(
            selection.toggle(&seat(1, SeatStatus::Booked), 10),
            ToggleOutcome::Unavailable
        );
        assert!(selection.is_empty());
    }

    #[test]
    fn wheelchair_spaces_are_selectable() {
        let mut selection = SeatSelection::new();
        assert_eq!(
            selection.toggle(&seat(1, SeatStatus::Wheelchair), 10),
            ToggleOutcome::Selected
        );
    }

    #[test]
    fn full_selection_still_allows_removal() {
        let mut selection = SeatSelection::new();
        for n in 1..=2 {
            selection.toggle(&seat(n, SeatStatus::Available), 2);
        }
        assert_eq!(
            selection.toggle(&seat(3, SeatStatus::Available), 2),
            ToggleOutcome::LimitReached
        );
        assert_eq!(selection.len(), 2);
        assert_eq!(
            selection.toggle(&seat(1, SeatStatus::Available), 2),
            ToggleOutcome::Deselected
        );
        let ids: Vec<&str> = selection.iter().map(SeatId::as_str).collect();
        assert_eq!(ids, vec!["b-east-A-2"]);
    }
}
