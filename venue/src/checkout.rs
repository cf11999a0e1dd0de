//! Checkout handoff.
//!
//! When the user confirms, the session packs its selection into a
//! [`CheckoutSummary`] and hands it to whatever runs payment. Payment itself
//! happens elsewhere.

use crate::pricing::PriceBreakdown;
use crate::selection::{SeatingState, SelectedItems};
use crate::types::{Money, SportType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything checkout needs to charge for a selection
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    /// Kind of venue
    pub sport_type: SportType,
    /// Seats, or a zone and quantity
    pub items: SelectedItems,
    /// Per-zone price lines
    pub breakdown: PriceBreakdown,
    /// Amount to charge
    pub total: Money,
    /// When the summary was built
    pub prepared_at: DateTime<Utc>,
}

impl CheckoutSummary {
    /// Summarise the selection of `state`
    ///
    /// Returns `None` if nothing is selected.
    #[must_use]
    pub fn prepare(state: &SeatingState, prepared_at: DateTime<Utc>) -> Option<Self> {
        let items = state.selection.items();
        if items == SelectedItems::None {
            return None;
        }
        let breakdown = state.selection.breakdown(&state.layout);
        Some(Self {
            sport_type: state.layout.sport_type,
            total: breakdown.total,
            items,
            breakdown,
            prepared_at,
        })
    }

    /// Number of tickets being bought
    #[must_use]
    pub fn ticket_count(&self) -> u32 {
        self.breakdown.ticket_count()
    }
}
