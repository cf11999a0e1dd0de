//! Booking session.
//!
//! One session is one user on one event's booking page. It combines the
//! selection and viewport reducers and adds the final confirm step, which
//! hands the selection to checkout.
//!
//! ```text
//!   Selection(..) ──► SelectionReducer ──► SeatingState
//!   Viewport(..)  ──► ViewportReducer  ──► ViewportState
//!   Confirm       ──► CheckoutSummary ──► checkout publisher
//!                                      └─► CheckoutPrepared (feedback)
//! ```

use crate::checkout::CheckoutSummary;
use crate::selection::{
    Notice, SeatingState, SelectionAction, SelectionEnvironment, SelectionReducer,
};
use crate::types::VenueLayout;
use crate::viewport::{ViewportAction, ViewportReducer, ViewportState};
use seatplan_core::{
    SmallVec,
    effect::Effect,
    environment::{Clock, Publisher},
    reducer::Reducer,
    smallvec,
};
use std::fmt;
use std::sync::Arc;

/// State of one booking page
#[derive(Clone, Debug, PartialEq)]
pub struct BookingState {
    /// Layout and selection
    pub seating: SeatingState,
    /// Zoom and pan
    pub viewport: ViewportState,
    /// Summary most recently handed to checkout
    pub last_checkout: Option<CheckoutSummary>,
}

impl BookingState {
    /// Fresh session on `layout`
    #[must_use]
    pub fn new(layout: impl Into<Arc<VenueLayout>>) -> Self {
        let seating = SeatingState::new(layout);
        let viewport = ViewportState::for_layout(&seating.layout);
        Self {
            seating,
            viewport,
            last_checkout: None,
        }
    }
}

/// Everything that can happen on a booking page
#[derive(Clone, Debug, PartialEq)]
pub enum BookingAction {
    /// Seat or zone input
    Selection(SelectionAction),
    /// Zoom or pan input
    Viewport(ViewportAction),
    /// The user pressed proceed
    Confirm,
    /// Checkout accepted the summary
    CheckoutPrepared(CheckoutSummary),
}

/// Collaborators of a booking session
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Selection cap and notice sink
    pub selection: SelectionEnvironment,
    /// Time source for checkout timestamps
    pub clock: Arc<dyn Clock>,
    /// Receives confirmed selections
    pub checkout: Arc<dyn Publisher<CheckoutSummary>>,
}

impl BookingEnvironment {
    /// Create a new booking environment
    #[must_use]
    pub fn new(
        selection: SelectionEnvironment,
        clock: Arc<dyn Clock>,
        checkout: Arc<dyn Publisher<CheckoutSummary>>,
    ) -> Self {
        Self {
            selection,
            clock,
            checkout,
        }
    }
}

impl fmt::Debug for BookingEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingEnvironment")
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

/// Reducer for a whole booking page
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingReducer;

impl BookingReducer {
    /// Create a new booking reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for BookingReducer {
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            BookingAction::Selection(action) => {
                if let SelectionAction::ReplaceLayout { layout } = &action {
                    state.viewport = ViewportState::for_layout(layout);
                    state.last_checkout = None;
                }
                SelectionReducer
                    .reduce(&mut state.seating, action, &env.selection)
                    .into_iter()
                    .map(|effect| effect.map(BookingAction::Selection))
                    .collect()
            },

            BookingAction::Viewport(action) => ViewportReducer
                .reduce(&mut state.viewport, action, &())
                .into_iter()
                .map(|effect| effect.map(BookingAction::Viewport))
                .collect(),

            BookingAction::Confirm => {
                let Some(summary) = CheckoutSummary::prepare(&state.seating, env.clock.now())
                else {
                    tracing::debug!("Confirm pressed with an empty selection");
                    return smallvec![
                        env.selection
                            .notify(Notice::NothingSelected)
                            .map(BookingAction::Selection)
                    ];
                };

                tracing::info!(
                    total = %summary.total,
                    tickets = summary.ticket_count(),
                    "Handing selection to checkout"
                );
                let checkout = Arc::clone(&env.checkout);
                smallvec![Effect::run(move || {
                    checkout.publish(summary.clone());
                    Some(BookingAction::CheckoutPrepared(summary))
                })]
            },

            BookingAction::CheckoutPrepared(summary) => {
                state.last_checkout = Some(summary);
                smallvec![Effect::None]
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{Archetype, build_layout};
    use crate::types::{Money, ZoneId};
    use seatplan_testing::{RecordingPublisher, ReducerTest, assertions, test_clock, test_rng};

    struct Collaborators {
        notices: Arc<RecordingPublisher<Notice>>,
        checkout: Arc<RecordingPublisher<CheckoutSummary>>,
    }

    fn environment() -> (BookingEnvironment, Collaborators) {
        let notices = Arc::new(RecordingPublisher::new());
        let checkout = Arc::new(RecordingPublisher::new());
        let env = BookingEnvironment::new(
            SelectionEnvironment::new(notices.clone()),
            Arc::new(test_clock()),
            checkout.clone(),
        );
        (env, Collaborators { notices, checkout })
    }

    fn field() -> VenueLayout {
        build_layout(Archetype::Field, Money::from_major(500), &mut test_rng())
    }

    #[test]
    fn zone_layouts_start_zoomed_out() {
        let state = BookingState::new(field());
        assert!((state.viewport.scale - 0.8).abs() < 1e-9);
    }

    #[test]
    fn zooming_keeps_the_selection() {
        let (env, _) = environment();
        ReducerTest::new(BookingReducer::new())
            .with_env(env)
            .given_state(BookingState::new(field()))
            .when_action(BookingAction::Selection(SelectionAction::SelectZone {
                zone_id: ZoneId::new("z-east"),
            }))
            .when_action(BookingAction::Viewport(ViewportAction::ZoomIn))
            .when_action(BookingAction::Viewport(ViewportAction::ZoomIn))
            .then_state(|state| {
                assert_eq!(state.seating.total(), Money::from_major(400));
                assert!((state.viewport.scale - 1.2).abs() < 1e-9);
            })
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn confirm_hands_off_and_feeds_back() {
        let (env, collaborators) = environment();
        let mut state = BookingState::new(field());
        BookingReducer.reduce(
            &mut state,
            BookingAction::Selection(SelectionAction::SelectZone {
                zone_id: ZoneId::new("z-north"),
            }),
            &env,
        );

        let effects = BookingReducer.reduce(&mut state, BookingAction::Confirm, &env);
        let produced = assertions::run_jobs(effects.into_vec());

        assert_eq!(collaborators.checkout.len(), 1);
        let published = collaborators.checkout.last();
        assert_eq!(published.as_ref().map(|s| s.total), Some(Money::from_major(500)));
        assert_eq!(produced.len(), 1);
        assert!(matches!(
            &produced[0],
            BookingAction::CheckoutPrepared(s) if Some(s) == published.as_ref()
        ));
    }

    #[test]
    fn confirm_without_selection_notifies() {
        let (env, collaborators) = environment();
        let mut state = BookingState::new(field());

        let effects = BookingReducer.reduce(&mut state, BookingAction::Confirm, &env);
        assert!(assertions::run_jobs(effects.into_vec()).is_empty());

        assert!(collaborators.checkout.is_empty());
        assert_eq!(collaborators.notices.messages(), vec![Notice::NothingSelected]);
        assert!(state.last_checkout.is_none());
    }

    #[test]
    fn replacing_the_layout_resets_view_and_checkout() {
        let (env, _) = environment();
        let mut state = BookingState::new(field());
        state.viewport.scale = 2.0;
        let court = build_layout(Archetype::Court, Money::from_major(500), &mut test_rng());

        BookingReducer.reduce(
            &mut state,
            BookingAction::Selection(SelectionAction::ReplaceLayout {
                layout: Arc::new(court),
            }),
            &env,
        );
        assert!((state.viewport.scale - 1.0).abs() < 1e-9);
        assert_eq!(state.seating.layout.seat_count(), 272);
    }
}
