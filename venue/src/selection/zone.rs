//! Zone-mode selection: one zone plus a ticket quantity.

use crate::pricing::{PriceBreakdown, zone_total};
use crate::types::{Money, VenueLayout, ZoneId};
use serde::{Deserialize, Serialize};

/// The zone picked by the user and how many tickets they want in it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSelection {
    zone: Option<ZoneId>,
    quantity: u32,
}

impl Default for ZoneSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneSelection {
    /// Nothing selected, quantity 1
    #[must_use]
    pub const fn new() -> Self {
        Self {
            zone: None,
            quantity: 1,
        }
    }

    /// Click on a zone
    ///
    /// Clicking the selected zone deselects it; clicking another zone
    /// replaces the selection. Either way the quantity goes back to 1.
    pub fn select(&mut self, zone_id: ZoneId) {
        if self.zone.as_ref() == Some(&zone_id) {
            self.zone = None;
        } else {
            self.zone = Some(zone_id);
        }
        self.quantity = 1;
    }

    /// Set the ticket quantity, clamped to `1..=max`
    ///
    /// Ignored while no zone is selected. Returns the quantity now in effect.
    pub fn set_quantity(&mut self, quantity: u32, max: u32) -> u32 {
        if self.zone.is_some() {
            self.quantity = quantity.clamp(1, max.max(1));
        }
        self.quantity
    }

    /// Selected zone, if any
    #[must_use]
    pub const fn zone(&self) -> Option<&ZoneId> {
        self.zone.as_ref()
    }

    /// Ticket quantity; always at least 1
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// True if no zone is selected
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.zone.is_none()
    }

    /// Deselect the zone and reset the quantity
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// `price × quantity`, or zero without a zone
    #[must_use]
    pub fn total(&self, layout: &VenueLayout) -> Money {
        self.zone
            .as_ref()
            .map_or(Money::ZERO, |zone| zone_total(layout, zone, self.quantity))
    }

    /// The selection as a single price line
    #[must_use]
    pub fn breakdown(&self, layout: &VenueLayout) -> PriceBreakdown {
        self.zone.as_ref().map_or_else(PriceBreakdown::default, |zone| {
            PriceBreakdown::for_zone(layout, zone, self.quantity)
        })
    }
}
