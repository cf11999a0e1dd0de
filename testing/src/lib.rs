//! # Seatplan Testing
//!
//! Testing utilities and helpers for the seatplan booking engine.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - Deterministic random sources for layout generation
//! - A Given-When-Then builder for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use seatplan_testing::{ReducerTest, test_clock};
//!
//! ReducerTest::new(SelectionReducer::new())
//!     .with_env(selection_env())
//!     .given_state(SeatingState::new(layout))
//!     .when_action(SelectionAction::Clear)
//!     .then_state(|state| assert!(state.selection.is_empty()))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use seatplan_core::environment::{Clock, Publisher};

pub mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Publisher, Utc};
    use std::sync::Mutex;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use seatplan_testing::mocks::FixedClock;
    /// use seatplan_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Publisher that keeps every message it receives
    ///
    /// Stands in for the notice banner and the checkout collaborator.
    ///
    /// ```
    /// use seatplan_core::environment::Publisher;
    /// use seatplan_testing::mocks::RecordingPublisher;
    ///
    /// let outbox = RecordingPublisher::new();
    /// outbox.publish("hello");
    /// assert_eq!(outbox.messages(), vec!["hello"]);
    /// ```
    #[derive(Debug, Default)]
    pub struct RecordingPublisher<T> {
        messages: Mutex<Vec<T>>,
    }

    impl<T> RecordingPublisher<T> {
        /// Create an empty recorder
        #[must_use]
        pub const fn new() -> Self {
            Self {
                messages: Mutex::new(Vec::new()),
            }
        }

        /// Number of messages received so far
        #[must_use]
        pub fn len(&self) -> usize {
            self.messages.lock().map_or(0, |m| m.len())
        }

        /// True if nothing was published
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    impl<T: Clone> RecordingPublisher<T> {
        /// Snapshot of every message received, oldest first
        #[must_use]
        pub fn messages(&self) -> Vec<T> {
            self.messages.lock().map(|m| m.clone()).unwrap_or_default()
        }

        /// The most recent message, if any
        #[must_use]
        pub fn last(&self) -> Option<T> {
            self.messages.lock().ok().and_then(|m| m.last().cloned())
        }
    }

    impl<T: Send> Publisher<T> for RecordingPublisher<T> {
        fn publish(&self, message: T) {
            if let Ok(mut messages) = self.messages.lock() {
                messages.push(message);
            }
        }
    }
}

/// Deterministic random sources
///
/// Layout generation marks seats as already sold at random. Tests pin the
/// outcome by injecting one of these instead of the thread RNG.
pub mod rng {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Seed used when a test does not care which seed it gets
    pub const TEST_SEED: u64 = 0x5EA7_5EA7;

    /// `ChaCha8Rng` seeded from `seed`; identical across platforms
    #[must_use]
    pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    /// `ChaCha8Rng` seeded with [`TEST_SEED`]
    #[must_use]
    pub fn test_rng() -> ChaCha8Rng {
        seeded_rng(TEST_SEED)
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, RecordingPublisher, test_clock};
pub use reducer_test::{ReducerTest, assertions};
pub use rng::{seeded_rng, test_rng};
