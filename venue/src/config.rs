//! Configuration management for the seating engine.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Binaries call `dotenvy::dotenv()` first so a local `.env` file works too.

use crate::error::SeatingError;
use crate::selection::MAX_SELECTION;
use crate::types::Money;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Cap on selected seats and on zone quantity
pub const ENV_MAX_SELECTION: &str = "SEATPLAN_MAX_SELECTION";
/// Base price (major units) for events the catalog does not price
pub const ENV_DEFAULT_BASE_PRICE: &str = "SEATPLAN_DEFAULT_BASE_PRICE";
/// Seed for reproducible layouts
pub const ENV_RNG_SEED: &str = "SEATPLAN_RNG_SEED";
/// Actions a single store `send` may process
pub const ENV_STORE_FEEDBACK_LIMIT: &str = "SEATPLAN_STORE_FEEDBACK_LIMIT";

const DEFAULT_BASE_PRICE: u64 = crate::catalog::FALLBACK_BASE_PRICE;
const DEFAULT_FEEDBACK_LIMIT: usize = 32;

/// Seating configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingConfig {
    /// Cap on selected seats and on zone quantity (at least 1)
    pub max_selection: usize,
    /// Base price for unpriced events, major units
    pub default_base_price: u64,
    /// Fixed generator seed; `None` seeds from OS entropy
    pub rng_seed: Option<u64>,
    /// Bound on the store feedback loop
    pub store_feedback_limit: usize,
}

impl Default for SeatingConfig {
    fn default() -> Self {
        Self {
            max_selection: MAX_SELECTION,
            default_base_price: DEFAULT_BASE_PRICE,
            rng_seed: None,
            store_feedback_limit: DEFAULT_FEEDBACK_LIMIT,
        }
    }
}

impl SeatingConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or malformed variables fall back to their defaults; malformed
    /// ones are logged.
    #[must_use]
    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_else(|error| {
            tracing::warn!(%error, "Invalid seating configuration, using defaults");
            Self::default()
        })
    }

    /// Load configuration from environment variables, rejecting bad values.
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::InvalidConfig`] if a variable is set but does
    /// not parse, or if `SEATPLAN_MAX_SELECTION` or
    /// `SEATPLAN_DEFAULT_BASE_PRICE` is zero.
    pub fn try_from_env() -> Result<Self, SeatingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Same as [`SeatingConfig::try_from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SeatingError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            max_selection: parse_or(&lookup, ENV_MAX_SELECTION, defaults.max_selection)?,
            default_base_price: parse_or(
                &lookup,
                ENV_DEFAULT_BASE_PRICE,
                defaults.default_base_price,
            )?,
            rng_seed: parse_optional(&lookup, ENV_RNG_SEED)?,
            store_feedback_limit: parse_or(
                &lookup,
                ENV_STORE_FEEDBACK_LIMIT,
                defaults.store_feedback_limit,
            )?,
        };

        if config.max_selection == 0 {
            return Err(SeatingError::InvalidConfig {
                key: ENV_MAX_SELECTION,
                value: "0".to_string(),
            });
        }
        if config.default_base_price == 0 {
            return Err(SeatingError::InvalidConfig {
                key: ENV_DEFAULT_BASE_PRICE,
                value: "0".to_string(),
            });
        }
        Ok(config)
    }

    /// Base price for unpriced events
    #[must_use]
    pub const fn fallback_price(&self) -> Money {
        Money::from_major(self.default_base_price)
    }

    /// Random source for layout generation
    ///
    /// Seeded when `rng_seed` is set, otherwise seeded from OS entropy.
    #[must_use]
    pub fn rng(&self) -> LayoutRng {
        match self.rng_seed {
            Some(seed) => LayoutRng::Seeded(ChaCha8Rng::seed_from_u64(seed)),
            None => LayoutRng::Entropy(StdRng::from_entropy()),
        }
    }
}

/// Random source picked by [`SeatingConfig::rng`]
#[derive(Debug, Clone)]
pub enum LayoutRng {
    /// Reproducible stream
    Seeded(ChaCha8Rng),
    /// Fresh stream per process
    Entropy(StdRng),
}

impl RngCore for LayoutRng {
    fn next_u32(&mut self) -> u32 {
        match self {
            Self::Seeded(rng) => rng.next_u32(),
            Self::Entropy(rng) => rng.next_u32(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self {
            Self::Seeded(rng) => rng.next_u64(),
            Self::Entropy(rng) => rng.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        match self {
            Self::Seeded(rng) => rng.fill_bytes(dest),
            Self::Entropy(rng) => rng.fill_bytes(dest),
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        match self {
            Self::Seeded(rng) => rng.try_fill_bytes(dest),
            Self::Entropy(rng) => rng.try_fill_bytes(dest),
        }
    }
}

fn parse_optional<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, SeatingError>
where
    F: Fn(&'static str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| SeatingError::InvalidConfig { key, value: raw }),
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, SeatingError>
where
    F: Fn(&'static str) -> Option<String>,
    T: FromStr,
{
    Ok(parse_optional(lookup, key)?.unwrap_or(default))
}
