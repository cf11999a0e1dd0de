//! # Seatplan Runtime
//!
//! Runtime implementation for the seatplan booking engine.
//!
//! This crate provides the Store that owns session state, runs the reducer and
//! executes the effect descriptions it returns.
//!
//! ## Core Components
//!
//! - **Store**: Owns the state, reducer and environment of one booking session
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to the reducer
//! - **Feedback Loop**: action → reducer → effects → action, bounded per `send`
//!
//! Everything runs on the caller's thread. A booking session belongs to a
//! single user and there is nothing to wait for, so `send` returns only once
//! the feedback loop has settled.
//!
//! ## Example
//!
//! ```ignore
//! use seatplan_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use seatplan_core::{effect::Effect, reducer::Reducer};
use std::collections::VecDeque;

/// Metric names and descriptions
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// The reducer kept feeding actions back into itself
        ///
        /// State changes made before the limit was hit are kept.
        #[error("Feedback loop did not settle within {limit} actions")]
        FeedbackLimitExceeded {
            /// Maximum number of actions processed per `send`
            limit: usize,
        },
    }
}

/// Default bound on the number of actions a single `send` may process
pub const DEFAULT_FEEDBACK_LIMIT: usize = 32;

/// Store module - the runtime for reducers
pub mod store {
    use super::{DEFAULT_FEEDBACK_LIMIT, Effect, Reducer, VecDeque};
    use crate::error::StoreError;
    use crate::metrics::{
        ACTIONS_TOTAL, EFFECTS_COUNT, FEEDBACK_LIMIT_EXCEEDED, REDUCER_DURATION, counter,
        histogram,
    };

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (owned, mutated only through the reducer)
    /// 2. Action processing (via reducer)
    /// 3. Effect execution (with feedback loop)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer type
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: S,
        reducer: R,
        environment: E,
        feedback_limit: usize,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub const fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                feedback_limit: DEFAULT_FEEDBACK_LIMIT,
            }
        }

        /// Override the number of actions a single `send` may process
        ///
        /// A limit of zero is treated as one: the action passed to `send` is
        /// always reduced.
        #[must_use]
        pub fn with_feedback_limit(mut self, limit: usize) -> Self {
            self.feedback_limit = limit.max(1);
            self
        }

        /// Send an action to the store
        ///
        /// Reduces the action, executes the returned effects and keeps going
        /// until no effect produces a follow-up action.
        ///
        /// Returns the number of actions reduced, counting the one passed in.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::FeedbackLimitExceeded`] when the loop is
        /// still producing actions after the configured limit.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&mut self, action: A) -> Result<usize, StoreError> {
            let mut pending = VecDeque::from([action]);
            let mut processed = 0usize;

            while let Some(next) = pending.pop_front() {
                if processed >= self.feedback_limit {
                    counter!(FEEDBACK_LIMIT_EXCEEDED).increment(1);
                    tracing::warn!(
                        limit = self.feedback_limit,
                        dropped = pending.len() + 1,
                        "Feedback loop did not settle, dropping remaining actions"
                    );
                    return Err(StoreError::FeedbackLimitExceeded {
                        limit: self.feedback_limit,
                    });
                }
                processed += 1;
                counter!(ACTIONS_TOTAL).increment(1);

                let effects = {
                    let span = tracing::debug_span!("reducer_execution");
                    let _enter = span.enter();

                    let start = std::time::Instant::now();
                    let effects = self.reducer.reduce(&mut self.state, next, &self.environment);
                    histogram!(REDUCER_DURATION).record(start.elapsed().as_secs_f64());
                    effects
                };

                tracing::trace!("Reducer completed, returned {} effects", effects.len());
                // Precision loss acceptable for metrics (effect counts < 2^52)
                #[allow(clippy::cast_precision_loss)]
                histogram!(EFFECTS_COUNT).record(effects.len() as f64);

                for effect in effects {
                    Self::execute_effect(effect, &mut pending);
                }
            }

            tracing::debug!(processed, "Action processing completed");
            Ok(processed)
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let selected = store.state(|s| s.selection.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// Access the injected environment
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// Tear the store down and keep the final state
        #[must_use]
        pub fn into_state(self) -> S {
            self.state
        }

        fn execute_effect(effect: Effect<A>, pending: &mut VecDeque<A>) {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                },
                Effect::Send(action) => {
                    tracing::trace!("Executing Effect::Send");
                    pending.push_back(*action);
                },
                Effect::Run(job) => {
                    tracing::trace!("Executing Effect::Run");
                    if let Some(action) = job() {
                        tracing::trace!("Effect::Run produced a follow-up action");
                        pending.push_back(action);
                    }
                },
            }
        }
    }
}

pub use error::StoreError;
pub use store::Store;
