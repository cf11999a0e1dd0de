//! Error types for the venue crate.
//!
//! Selecting seats never fails; a rejected selection is an outcome, not an
//! error. These errors cover the edges of the crate: parsing catalog data,
//! validating layouts that arrive from outside the generator, and reading
//! configuration.

use crate::types::{SeatId, ZoneId};
use thiserror::Error;

/// Errors raised while loading or checking seating data
#[derive(Error, Debug)]
pub enum SeatingError {
    /// Catalog event JSON could not be parsed
    #[error("Invalid event descriptor: {0}")]
    InvalidEvent(#[from] serde_json::Error),

    /// A layout without any zone has nothing to render or select
    #[error("Layout has no zones")]
    EmptyLayout,

    /// Two zones share an id
    #[error("Duplicate zone id: {0}")]
    DuplicateZone(ZoneId),

    /// Two seats share a composite id
    #[error("Duplicate seat id: {0}")]
    DuplicateSeat(SeatId),

    /// A seat claims to belong to a zone other than the one holding it
    #[error("Seat {seat} is listed under zone {zone}")]
    SeatOutsideZone {
        /// Offending seat
        seat: SeatId,
        /// Zone whose rows contain the seat
        zone: ZoneId,
    },

    /// A seat id does not match `{zone}-{row}-{number}`
    #[error("Seat id {0} does not match its zone, row and number")]
    MalformedSeatId(SeatId),

    /// An environment variable holds a value that cannot be used
    #[error("Invalid value {value:?} for {key}")]
    InvalidConfig {
        /// Variable name
        key: &'static str,
        /// Raw value found in the environment
        value: String,
    },
}
