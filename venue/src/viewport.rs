//! Zoom and pan of the seat map.
//!
//! Pure view state. Nothing here touches the layout or the selection, so a
//! user can zoom in the middle of picking seats without losing anything.

use crate::types::{SelectionType, VenueLayout};
use seatplan_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use serde::{Deserialize, Serialize};

/// Scale change per zoom step
pub const ZOOM_STEP: f64 = 0.2;
/// Smallest scale
pub const MIN_SCALE: f64 = 0.4;
/// Largest scale
pub const MAX_SCALE: f64 = 2.5;

/// Current zoom and pan
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportState {
    /// Zoom factor, `MIN_SCALE..=MAX_SCALE`
    pub scale: f64,
    /// Horizontal offset in canvas pixels
    pub pan_x: f64,
    /// Vertical offset in canvas pixels
    pub pan_y: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl ViewportState {
    /// Initial view of `layout`
    ///
    /// Zone-mode venues are larger and start zoomed out.
    #[must_use]
    pub fn for_layout(layout: &VenueLayout) -> Self {
        let scale = match layout.selection_type {
            SelectionType::Zone => 0.8,
            SelectionType::Seat => 1.0,
        };
        Self {
            scale,
            ..Self::default()
        }
    }
}

/// Toolbar and drag input
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportAction {
    /// Zoom in one step
    ZoomIn,
    /// Zoom out one step
    ZoomOut,
    /// Back to scale 1 and no offset
    ResetZoom,
    /// Drag the map
    Pan {
        /// Horizontal movement
        dx: f64,
        /// Vertical movement
        dy: f64,
    },
}

/// Applies zoom and pan input
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewportReducer;

impl Reducer for ViewportReducer {
    type State = ViewportState;
    type Action = ViewportAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ViewportAction::ZoomIn => {
                state.scale = (state.scale + ZOOM_STEP).min(MAX_SCALE);
            },
            ViewportAction::ZoomOut => {
                state.scale = (state.scale - ZOOM_STEP).max(MIN_SCALE);
            },
            ViewportAction::ResetZoom => {
                *state = ViewportState::default();
            },
            ViewportAction::Pan { dx, dy } => {
                state.pan_x += dx;
                state.pan_y += dy;
            },
        }

        smallvec![Effect::None]
    }
}
