//! Metric names and descriptions emitted by the Store.
//!
//! The runtime only records metrics through the `metrics` facade. Whether they
//! go anywhere depends on the recorder the host application installs; with no
//! recorder every call is a no-op.

use metrics::{describe_counter, describe_histogram};

// Re-export metrics macros for use in other modules
pub use metrics::{counter, histogram};

/// Actions reduced by a store, including fed-back actions
pub const ACTIONS_TOTAL: &str = "store.actions.total";

/// Number of effects returned per reducer call
pub const EFFECTS_COUNT: &str = "store.effects.count";

/// Wall time spent inside `Reducer::reduce`
pub const REDUCER_DURATION: &str = "store.reducer.duration_seconds";

/// Sends aborted because the feedback loop did not settle
pub const FEEDBACK_LIMIT_EXCEEDED: &str = "store.feedback.limit_exceeded";

/// Register descriptions for every metric the Store emits.
///
/// Call once after installing a recorder.
pub fn describe_metrics() {
    describe_counter!(ACTIONS_TOTAL, "Total number of actions processed by stores");
    describe_histogram!(EFFECTS_COUNT, "Number of effects returned by a single reducer call");
    describe_histogram!(REDUCER_DURATION, "Time taken to execute reducers");
    describe_counter!(
        FEEDBACK_LIMIT_EXCEEDED,
        "Total number of sends aborted by the feedback limit"
    );
}
