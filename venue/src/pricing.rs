//! Price totals for a selection.
//!
//! A total is always derived from the layout on demand, never cached next to
//! the selection, so it cannot drift from the prices the user sees.

use crate::types::{Money, SeatId, VenueLayout, ZoneId};
use serde::{Deserialize, Serialize};

/// One zone's share of a total
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceLine {
    /// Zone the tickets belong to
    pub zone_id: ZoneId,
    /// Zone display name
    pub zone_name: String,
    /// Price of one ticket
    pub unit_price: Money,
    /// Tickets in this zone
    pub quantity: u32,
    /// `unit_price × quantity`
    pub subtotal: Money,
}

/// Total of a selection, itemised per zone
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Lines in zone render order
    pub lines: Vec<PriceLine>,
    /// Sum of all subtotals
    pub total: Money,
}

impl PriceBreakdown {
    /// Itemise a set of selected seats
    ///
    /// Each seat costs its zone's price. Seats that do not resolve to a zone
    /// of `layout` are skipped and logged.
    pub fn for_seats<'a, I>(layout: &VenueLayout, seats: I) -> Self
    where
        I: IntoIterator<Item = &'a SeatId>,
    {
        let mut counts: Vec<u32> = vec![0; layout.zones.len()];
        for seat_id in seats {
            let index = layout
                .seat(seat_id)
                .and_then(|seat| layout.zones.iter().position(|z| z.id == seat.zone_id));
            match index {
                Some(index) => counts[index] += 1,
                None => tracing::warn!(%seat_id, "Selected seat is not part of the layout"),
            }
        }

        let lines = layout
            .zones
            .iter()
            .zip(counts)
            .filter(|(_, quantity)| *quantity > 0)
            .map(|(zone, quantity)| PriceLine {
                zone_id: zone.id.clone(),
                zone_name: zone.name.clone(),
                unit_price: zone.price,
                quantity,
                subtotal: zone.price.saturating_multiply(quantity),
            })
            .collect();
        Self::from_lines(lines)
    }

    /// Itemise `quantity` tickets in one zone
    ///
    /// An unknown zone yields an empty breakdown and is logged.
    #[must_use]
    pub fn for_zone(layout: &VenueLayout, zone_id: &ZoneId, quantity: u32) -> Self {
        let Some(zone) = layout.zone(zone_id) else {
            tracing::warn!(%zone_id, "Selected zone is not part of the layout");
            return Self::default();
        };
        if quantity == 0 {
            return Self::default();
        }
        Self::from_lines(vec![PriceLine {
            zone_id: zone.id.clone(),
            zone_name: zone.name.clone(),
            unit_price: zone.price,
            quantity,
            subtotal: zone.price.saturating_multiply(quantity),
        }])
    }

    fn from_lines(lines: Vec<PriceLine>) -> Self {
        let total = lines.iter().map(|line| line.subtotal).sum();
        Self { lines, total }
    }

    /// Number of tickets across all lines
    #[must_use]
    pub fn ticket_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

/// Total price of the selected seats
pub fn seat_total<'a, I>(layout: &VenueLayout, seats: I) -> Money
where
    I: IntoIterator<Item = &'a SeatId>,
{
    PriceBreakdown::for_seats(layout, seats).total
}

/// Total price of `quantity` tickets in `zone_id`
#[must_use]
pub fn zone_total(layout: &VenueLayout, zone_id: &ZoneId, quantity: u32) -> Money {
    PriceBreakdown::for_zone(layout, zone_id, quantity).total
}
