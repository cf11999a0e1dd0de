//! # Seatplan Venue
//!
//! Venue seating layouts and the seat/zone selection engine of the booking
//! page.
//!
//! ## Flow
//!
//! 1. A catalog event ([`catalog::EventDescriptor`]) is classified into one of
//!    four archetypes and turned into a [`types::VenueLayout`] by
//!    [`generator::layout_for_event`].
//! 2. The layout decides the selection mode: individual seats (courts) or a
//!    zone plus quantity (everything else).
//! 3. A [`session::BookingReducer`] running in a store applies the user's
//!    clicks, zoom and confirm input, and hands the final selection to
//!    checkout as a [`checkout::CheckoutSummary`].
//!
//! ## Example
//!
//! ```
//! use seatplan_venue::generator::generate_layout;
//! use seatplan_venue::selection::{
//!     SeatingState, SelectionAction, SelectionEnvironment, SelectionReducer, TracingNotifier,
//! };
//! use seatplan_venue::types::{Money, ZoneId};
//! use seatplan_core::reducer::Reducer;
//! use rand::SeedableRng;
//! use std::sync::Arc;
//!
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
//! let layout = generate_layout("sports cricket test", Money::from_major(1000), &mut rng);
//! let mut state = SeatingState::new(layout);
//! let env = SelectionEnvironment::new(Arc::new(TracingNotifier));
//!
//! let pick = SelectionAction::SelectZone { zone_id: ZoneId::new("z-n") };
//! SelectionReducer.reduce(&mut state, pick, &env);
//! SelectionReducer.reduce(&mut state, SelectionAction::SetQuantity { quantity: 2 }, &env);
//! assert_eq!(state.total(), Money::from_major(6000));
//! ```

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod pricing;
pub mod selection;
pub mod session;
pub mod types;
pub mod viewport;

pub use checkout::CheckoutSummary;
pub use config::SeatingConfig;
pub use error::SeatingError;
pub use generator::{Archetype, generate_layout, layout_for_event};
pub use selection::{Notice, SeatingState, SelectionAction, SelectionReducer, SelectionState};
pub use session::{BookingAction, BookingEnvironment, BookingReducer, BookingState};
pub use types::{Money, SeatId, VenueLayout, ZoneId};
