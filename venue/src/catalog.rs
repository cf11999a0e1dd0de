//! Event descriptors handed over by the catalog.
//!
//! The booking page receives an event from a Ticketmaster-style discovery
//! API. Only the classification names and the first price range matter for
//! seating; everything else in the payload is ignored.

use crate::error::SeatingError;
use crate::types::Money;
use serde::{Deserialize, Serialize};

/// Base price used when the catalog does not quote one (major units)
pub const FALLBACK_BASE_PRICE: u64 = 500;

/// A named catalog term (`{ "id": "...", "name": "Soccer" }`)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedTerm {
    /// Catalog id of the term
    #[serde(default)]
    pub id: String,
    /// Display name of the term
    #[serde(default)]
    pub name: String,
}

/// One classification entry of an event
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Broad segment, e.g. "Sports", "Music"
    #[serde(default)]
    pub segment: Option<NamedTerm>,
    /// Genre, e.g. "Cricket", "Rock"
    #[serde(default)]
    pub genre: Option<NamedTerm>,
    /// Sub-genre, e.g. "International"
    #[serde(default)]
    pub sub_genre: Option<NamedTerm>,
}

/// Price range quoted for an event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    /// ISO currency code
    #[serde(default)]
    pub currency: String,
    /// Cheapest ticket, major units
    pub min: f64,
    /// Most expensive ticket, major units
    pub max: f64,
}

/// The slice of a catalog event the seating engine needs
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDescriptor {
    /// Catalog id
    #[serde(default)]
    pub id: String,
    /// Event title
    #[serde(default)]
    pub name: String,
    /// Classifications; only the first is consulted
    #[serde(default)]
    pub classifications: Vec<Classification>,
    /// Price ranges; only the first is consulted
    #[serde(default)]
    pub price_ranges: Vec<PriceRange>,
}

impl EventDescriptor {
    /// Describe an event from free text rather than catalog JSON
    ///
    /// The text is stored as the genre of a single classification.
    #[must_use]
    pub fn new(name: impl Into<String>, classification: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            classifications: vec![Classification {
                segment: None,
                genre: Some(NamedTerm {
                    id: String::new(),
                    name: classification.into(),
                }),
                sub_genre: None,
            }],
            price_ranges: Vec::new(),
        }
    }

    /// Attach a price range, keeping the builder style of [`EventDescriptor::new`]
    #[must_use]
    pub fn with_price(mut self, min: f64, max: f64) -> Self {
        self.price_ranges.push(PriceRange {
            currency: String::new(),
            min,
            max,
        });
        self
    }

    /// Parse a catalog event payload
    ///
    /// # Errors
    ///
    /// Returns [`SeatingError::InvalidEvent`] if the payload is not valid JSON
    /// or does not have the expected shape.
    pub fn from_json(payload: &str) -> Result<Self, SeatingError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// `"{segment} {genre} {subGenre}"` of the first classification, lowercased
    ///
    /// Missing parts contribute an empty string, so an event without any
    /// classification yields `"  "`.
    #[must_use]
    pub fn classification_text(&self) -> String {
        let first = self.classifications.first();
        format!(
            "{} {} {}",
            term_name(first.and_then(|c| c.segment.as_ref())),
            term_name(first.and_then(|c| c.genre.as_ref())),
            term_name(first.and_then(|c| c.sub_genre.as_ref()))
        )
        .to_lowercase()
    }

    /// Minimum of the first price range, or `fallback` when unusable
    ///
    /// A price is unusable when it is missing, zero, negative or not finite.
    #[must_use]
    pub fn base_price(&self, fallback: Money) -> Money {
        self.price_ranges
            .first()
            .and_then(|range| Money::from_major_f64(range.min))
            .unwrap_or(fallback)
    }
}

fn term_name(term: Option<&NamedTerm>) -> &str {
    term.map_or("", |t| t.name.as_str())
}
