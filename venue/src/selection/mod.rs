//! Selection engine.
//!
//! A layout is selected either seat by seat or zone by zone, never both.
//! [`SelectionState`] holds whichever of the two the layout calls for and
//! [`SelectionReducer`] applies the user's clicks to it.
//!
//! Nothing here fails. A click that cannot be honoured (a sold seat, a full
//! selection, an action meant for the other mode) leaves the state untouched;
//! the only one the user is told about is a full selection, through the
//! [`Notice`] publisher in the environment.

mod seat;
mod zone;

pub use seat::{SeatSelection, ToggleOutcome};
pub use zone::ZoneSelection;

use crate::pricing::PriceBreakdown;
use crate::types::{Money, SeatId, SelectionType, VenueLayout, ZoneId};
use seatplan_core::{SmallVec, effect::Effect, environment::Publisher, reducer::Reducer, smallvec};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default cap on selected seats and on zone ticket quantity
pub const MAX_SELECTION: usize = 10;

// ============================================================================
// State
// ============================================================================

/// What the user has picked, in the layout's selection mode
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionState {
    /// Individual seats
    Seats(SeatSelection),
    /// A zone and a quantity
    Zone(ZoneSelection),
}

impl SelectionState {
    /// Empty selection of the mode `layout` uses
    #[must_use]
    pub const fn for_layout(layout: &VenueLayout) -> Self {
        match layout.selection_type {
            SelectionType::Seat => Self::Seats(SeatSelection::new()),
            SelectionType::Zone => Self::Zone(ZoneSelection::new()),
        }
    }

    /// Price of the current selection
    #[must_use]
    pub fn total(&self, layout: &VenueLayout) -> Money {
        match self {
            Self::Seats(seats) => seats.total(layout),
            Self::Zone(zone) => zone.total(layout),
        }
    }

    /// Price of the current selection, itemised per zone
    #[must_use]
    pub fn breakdown(&self, layout: &VenueLayout) -> PriceBreakdown {
        match self {
            Self::Seats(seats) => seats.breakdown(layout),
            Self::Zone(zone) => zone.breakdown(layout),
        }
    }

    /// The selection as handed to checkout
    #[must_use]
    pub fn items(&self) -> SelectedItems {
        match self {
            Self::Seats(seats) if !seats.is_empty() => SelectedItems::Seats(seats.to_vec()),
            Self::Zone(zone) => zone.zone().map_or(SelectedItems::None, |zone_id| {
                SelectedItems::Zone {
                    zone_id: zone_id.clone(),
                    quantity: zone.quantity(),
                }
            }),
            Self::Seats(_) => SelectedItems::None,
        }
    }

    /// True if nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Seats(seats) => seats.is_empty(),
            Self::Zone(zone) => zone.is_empty(),
        }
    }

    /// Forget the selection, keeping the mode
    pub fn clear(&mut self) {
        match self {
            Self::Seats(seats) => seats.clear(),
            Self::Zone(zone) => zone.clear(),
        }
    }
}

/// What goes to checkout
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectedItems {
    /// Specific seats, in the order they were picked
    Seats(Vec<SeatId>),
    /// A quantity of unnumbered tickets in one zone
    #[serde(rename_all = "camelCase")]
    Zone {
        /// Zone the tickets are for
        zone_id: ZoneId,
        /// Number of tickets
        quantity: u32,
    },
    /// Nothing selected
    None,
}

/// A layout and the selection made on it
///
/// The layout is shared and immutable; replacing it (another showtime) resets
/// the selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatingState {
    /// Layout being booked
    pub layout: Arc<VenueLayout>,
    /// Current selection
    pub selection: SelectionState,
}

impl SeatingState {
    /// Fresh session on `layout` with nothing selected
    #[must_use]
    pub fn new(layout: impl Into<Arc<VenueLayout>>) -> Self {
        let layout = layout.into();
        let selection = SelectionState::for_layout(&layout);
        Self { layout, selection }
    }

    /// Price of the current selection
    #[must_use]
    pub fn total(&self) -> Money {
        self.selection.total(&self.layout)
    }
}

// ============================================================================
// Actions
// ============================================================================

/// User intents on the seat map
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionAction {
    /// Click on a seat (seat mode)
    ToggleSeat {
        /// Seat clicked
        seat_id: SeatId,
    },
    /// Click on a zone (zone mode)
    SelectZone {
        /// Zone clicked
        zone_id: ZoneId,
    },
    /// Change the ticket quantity (zone mode)
    SetQuantity {
        /// Requested quantity; clamped
        quantity: u32,
    },
    /// Drop the whole selection
    Clear,
    /// Switch to another layout (another date or showtime)
    ReplaceLayout {
        /// New layout
        layout: Arc<VenueLayout>,
    },
}

// ============================================================================
// Notices
// ============================================================================

/// Message shown to the user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Notice {
    /// A seat click was refused because the selection is full
    SelectionLimitReached {
        /// Current cap
        max: usize,
    },
    /// Checkout was requested with nothing selected
    NothingSelected,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectionLimitReached { max } => {
                write!(f, "You can only select up to {max} seats.")
            },
            Self::NothingSelected => write!(f, "Select at least one seat or zone to continue."),
        }
    }
}

/// Publishes notices to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Publisher<Notice> for TracingNotifier {
    fn publish(&self, notice: Notice) {
        tracing::info!(%notice, "User notice");
    }
}

// ============================================================================
// Reducer
// ============================================================================

/// Collaborators of the selection reducer
#[derive(Clone)]
pub struct SelectionEnvironment {
    /// Cap on selected seats and on zone quantity
    pub max_selection: usize,
    /// Where user notices go
    pub notices: Arc<dyn Publisher<Notice>>,
}

impl SelectionEnvironment {
    /// Environment with the default cap of [`MAX_SELECTION`]
    #[must_use]
    pub fn new(notices: Arc<dyn Publisher<Notice>>) -> Self {
        Self {
            max_selection: MAX_SELECTION,
            notices,
        }
    }

    /// Override the cap; values below 1 are raised to 1
    #[must_use]
    pub fn with_max_selection(mut self, max: usize) -> Self {
        self.max_selection = max.max(1);
        self
    }

    fn max_quantity(&self) -> u32 {
        u32::try_from(self.max_selection).unwrap_or(u32::MAX)
    }

    pub(crate) fn notify(&self, notice: Notice) -> Effect<SelectionAction> {
        let notices = Arc::clone(&self.notices);
        Effect::run(move || {
            notices.publish(notice);
            None
        })
    }
}

impl fmt::Debug for SelectionEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionEnvironment")
            .field("max_selection", &self.max_selection)
            .finish_non_exhaustive()
    }
}

/// Applies seat and zone clicks to a [`SeatingState`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionReducer;

impl SelectionReducer {
    /// Create a new selection reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for SelectionReducer {
    type State = SeatingState;
    type Action = SelectionAction;
    type Environment = SelectionEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SelectionAction::ToggleSeat { seat_id } => {
                let SelectionState::Seats(selection) = &mut state.selection else {
                    tracing::debug!(%seat_id, "Ignoring seat click on a zone-mode layout");
                    return smallvec![Effect::None];
                };
                let Some(seat) = state.layout.seat(&seat_id) else {
                    tracing::warn!(%seat_id, "Ignoring click on unknown seat");
                    return smallvec![Effect::None];
                };

                let outcome = selection.toggle(seat, env.max_selection);
                tracing::debug!(%seat_id, ?outcome, selected = selection.len(), "Seat toggled");
                if outcome == ToggleOutcome::LimitReached {
                    return smallvec![env.notify(Notice::SelectionLimitReached {
                        max: env.max_selection,
                    })];
                }
            },

            SelectionAction::SelectZone { zone_id } => {
                let SelectionState::Zone(selection) = &mut state.selection else {
                    tracing::debug!(%zone_id, "Ignoring zone click on a seat-mode layout");
                    return smallvec![Effect::None];
                };
                if state.layout.zone(&zone_id).is_none() {
                    tracing::warn!(%zone_id, "Ignoring click on unknown zone");
                    return smallvec![Effect::None];
                }

                selection.select(zone_id);
                tracing::debug!(zone = ?selection.zone(), "Zone selection changed");
            },

            SelectionAction::SetQuantity { quantity } => {
                let SelectionState::Zone(selection) = &mut state.selection else {
                    tracing::debug!(quantity, "Ignoring quantity change on a seat-mode layout");
                    return smallvec![Effect::None];
                };

                let applied = selection.set_quantity(quantity, env.max_quantity());
                tracing::debug!(requested = quantity, applied, "Quantity set");
            },

            SelectionAction::Clear => {
                state.selection.clear();
            },

            SelectionAction::ReplaceLayout { layout } => {
                tracing::debug!(
                    sport = ?layout.sport_type,
                    mode = ?layout.selection_type,
                    "Layout replaced, selection reset"
                );
                state.selection = SelectionState::for_layout(&layout);
                state.layout = layout;
            },
        }

        smallvec![Effect::None]
    }
}
