//! Domain types for venue seating.
//!
//! A [`VenueLayout`] is built once per booking session and never mutated
//! afterwards. Everything the user does afterwards changes the selection
//! state in [`crate::selection`], not the layout.

use crate::error::SeatingError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::iter::Sum;

// ============================================================================
// Money Value Object (minor units to avoid floating point errors)
// ============================================================================

/// Ticket price in minor currency units (paise, cents)
///
/// Serialised as the raw minor-unit integer.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Zero
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from minor units
    #[must_use]
    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Creates a `Money` value from whole major units, saturating on overflow
    #[must_use]
    pub const fn from_major(major: u64) -> Self {
        Self(major.saturating_mul(100))
    }

    /// Converts a catalog price such as `45.5` into `Money`
    ///
    /// Returns `None` for NaN, infinities, zero, negative amounts and amounts
    /// too large to represent.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn from_major_f64(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount <= 0.0 {
            return None;
        }
        let minor = (amount * 100.0).round();
        if minor < 1.0 || minor >= u64::MAX as f64 {
            return None;
        }
        Some(Self(minor as u64))
    }

    /// Returns the amount in minor units
    #[must_use]
    pub const fn minor(&self) -> u64 {
        self.0
    }

    /// Returns the amount in whole major units (rounded down)
    #[must_use]
    pub const fn major(&self) -> u64 {
        self.0 / 100
    }

    /// Checks if the amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Applies a percentage multiplier (`250` = 2.5×), rounding down to the minor unit
    #[must_use]
    pub const fn scale_percent(self, percent: u32) -> Self {
        Self(self.0.saturating_mul(percent as u64) / 100)
    }

    /// Adds two money amounts, saturating at the maximum
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiplies money by a quantity, saturating at the maximum
    #[must_use]
    pub const fn saturating_multiply(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.major(), self.0 % 100)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of a pricing zone, unique within a layout
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(String);

impl ZoneId {
    /// Creates a new `ZoneId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Composite seat identity: `"{zoneId}-{rowLabel}-{seatNumber}"`
///
/// The id is derived from where the seat sits, never from render order, so a
/// selection keyed by `SeatId` survives re-rendering and zooming.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(String);

impl SeatId {
    /// Builds the id of seat `number` in row `row` of `zone`
    #[must_use]
    pub fn compose(zone: &ZoneId, row: &str, number: u32) -> Self {
        Self(format!("{zone}-{row}-{number}"))
    }

    /// Wraps an id received from a caller (click handler, checkout payload)
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the id back into `(zone, row, number)`
    ///
    /// Zone ids may contain `-`, so the id is split from the right.
    #[must_use]
    pub fn parts(&self) -> Option<(&str, &str, u32)> {
        let mut pieces = self.0.rsplitn(3, '-');
        let number = pieces.next()?.parse().ok()?;
        let row = pieces.next()?;
        let zone = pieces.next()?;
        if row.is_empty() || zone.is_empty() {
            return None;
        }
        Some((zone, row, number))
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SeatId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// ============================================================================
// Seats and Rows
// ============================================================================

/// Generated status of a seat
///
/// `Booked` is fixed at generation time. Whether a seat is *selected* is
/// session state and lives in [`crate::selection::SeatSelection`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    /// Free to select
    Available,
    /// Already sold
    Booked,
    /// Wheelchair space, free to select
    Wheelchair,
}

impl SeatStatus {
    /// True if a user may put this seat into their selection
    #[must_use]
    pub const fn is_selectable(self) -> bool {
        matches!(self, Self::Available | Self::Wheelchair)
    }
}

/// A single seat in a row
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    /// Composite identity
    pub id: SeatId,
    /// Owning zone
    pub zone_id: ZoneId,
    /// Row label, e.g. `"A"`
    pub row: String,
    /// Seat number within the row, from 1
    pub number: u32,
    /// Generated status
    pub status: SeatStatus,
}

impl Seat {
    /// Creates a seat and derives its composite id
    #[must_use]
    pub fn new(zone_id: ZoneId, row: impl Into<String>, number: u32, status: SeatStatus) -> Self {
        let row = row.into();
        Self {
            id: SeatId::compose(&zone_id, &row, number),
            zone_id,
            row,
            number,
            status,
        }
    }

    /// Short label shown on hover, e.g. `"C14"`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}{}", self.row, self.number)
    }

    /// True if the seat may be selected
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        self.status.is_selectable()
    }
}

/// A row of seat slots, left to right
///
/// A `None` slot is an aisle or structural gap; it is rendered as space and
/// can never be selected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Row label, e.g. `"A"`
    pub label: String,
    /// Seats and gaps in display order
    pub slots: Vec<Option<Seat>>,
}

impl Row {
    /// Iterate over the seats of the row, skipping gaps
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.slots.iter().flatten()
    }

    /// Number of real seats in the row
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.seats().count()
    }
}

// ============================================================================
// Zones
// ============================================================================

/// Where a zone sits around the field or stage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZonePosition {
    /// Above the field
    Top,
    /// Below the field
    Bottom,
    /// Left of the field
    Left,
    /// Right of the field
    Right,
    /// Upper-left diagonal
    TopLeft,
    /// Upper-right diagonal
    TopRight,
    /// Lower-left diagonal
    BottomLeft,
    /// Lower-right diagonal
    BottomRight,
    /// On the field itself
    Center,
}

/// What a zone offers for sale
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ZoneSeating {
    /// Numbered seats; the user picks individual seats
    Rows {
        /// Rows, top to bottom
        rows: Vec<Row>,
    },
    /// Unnumbered tickets; the user picks a quantity
    Capacity {
        /// Tickets still on sale
        available: u32,
    },
}

/// A pricing/seating section of a venue
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Identity, unique within the layout
    pub id: ZoneId,
    /// Display name, e.g. `"North Stand"`
    pub name: String,
    /// Price of one ticket in this zone
    pub price: Money,
    /// Render hint (hex colour)
    pub color: String,
    /// Anchor around the field
    pub position: ZonePosition,
    /// Seat grid or capacity block
    pub seating: ZoneSeating,
}

impl Zone {
    /// Rows of a seated zone; empty for a capacity zone
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        match &self.seating {
            ZoneSeating::Rows { rows } => rows,
            ZoneSeating::Capacity { .. } => &[],
        }
    }

    /// Remaining tickets of a capacity zone
    #[must_use]
    pub const fn available_capacity(&self) -> Option<u32> {
        match self.seating {
            ZoneSeating::Capacity { available } => Some(available),
            ZoneSeating::Rows { .. } => None,
        }
    }

    /// Iterate over every seat in the zone
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.rows().iter().flat_map(|row| row.seats())
    }

    /// Number of tickets the zone could still sell
    #[must_use]
    pub fn sellable(&self) -> u64 {
        match &self.seating {
            ZoneSeating::Capacity { available } => u64::from(*available),
            ZoneSeating::Rows { .. } => self.seats().filter(|s| s.is_selectable()).count() as u64,
        }
    }
}

// ============================================================================
// Layout
// ============================================================================

/// What is drawn in the middle of the venue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SportType {
    /// Rectangular pitch
    Football,
    /// Indoor court
    Basketball,
    /// Circular ground
    Cricket,
    /// Stage and floor
    Music,
    /// Generic court
    Default,
}

/// Granularity of what a user selects
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionType {
    /// Individual seats
    Seat,
    /// A zone plus a ticket quantity
    Zone,
}

/// Seating chart of one event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueLayout {
    /// Field or stage drawn at the centre
    pub sport_type: SportType,
    /// Selection granularity for the whole layout
    pub selection_type: SelectionType,
    /// Zones in render order
    pub zones: Vec<Zone>,
}

impl VenueLayout {
    /// Look up a zone by id
    #[must_use]
    pub fn zone(&self, id: &ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| &z.id == id)
    }

    /// Look up a seat by id
    #[must_use]
    pub fn seat(&self, id: &SeatId) -> Option<&Seat> {
        self.seats().find(|s| &s.id == id)
    }

    /// Iterate over every seat in every zone
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.zones.iter().flat_map(|zone| zone.seats())
    }

    /// Number of seats across all seated zones
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.seats().count()
    }

    /// Tickets still on sale across the whole venue
    #[must_use]
    pub fn total_sellable(&self) -> u64 {
        self.zones.iter().map(Zone::sellable).sum()
    }

    /// Check the structural invariants of a layout
    ///
    /// Generated layouts always pass. Call this on layouts that come from
    /// anywhere else (a saved JSON document, a hand-written fixture).
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: no zones, a repeated zone id,
    /// a repeated seat id, a seat filed under the wrong zone, or a seat whose
    /// id does not match its zone, row and number.
    pub fn validate(&self) -> Result<(), SeatingError> {
        if self.zones.is_empty() {
            return Err(SeatingError::EmptyLayout);
        }

        let mut zone_ids = HashSet::new();
        let mut seat_ids = HashSet::new();
        for zone in &self.zones {
            if !zone_ids.insert(&zone.id) {
                return Err(SeatingError::DuplicateZone(zone.id.clone()));
            }
            for seat in zone.seats() {
                if seat.zone_id != zone.id {
                    return Err(SeatingError::SeatOutsideZone {
                        seat: seat.id.clone(),
                        zone: zone.id.clone(),
                    });
                }
                if seat.id != SeatId::compose(&seat.zone_id, &seat.row, seat.number) {
                    return Err(SeatingError::MalformedSeatId(seat.id.clone()));
                }
                if !seat_ids.insert(&seat.id) {
                    return Err(SeatingError::DuplicateSeat(seat.id.clone()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn seated_zone(id: &str, price: u64) -> Zone {
        let zone_id = ZoneId::new(id);
        Zone {
            id: zone_id.clone(),
            name: id.to_uppercase(),
            price: Money::from_major(price),
            color: "#1D8EFF".to_string(),
            position: ZonePosition::Top,
            seating: ZoneSeating::Rows {
                rows: vec![Row {
                    label: "A".to_string(),
                    slots: vec![
                        Some(Seat::new(zone_id.clone(), "A", 1, SeatStatus::Available)),
                        None,
                        Some(Seat::new(zone_id, "A", 2, SeatStatus::Booked)),
                    ],
                }],
            },
        }
    }

    #[test]
    fn money_formats_minor_units() {
        assert_eq!(Money::from_major(1250).to_string(), "1250.00");
        assert_eq!(Money::from_minor(4550).to_string(), "45.50");
    }

    #[test]
    fn money_scales_by_percent() {
        assert_eq!(Money::from_major(500).scale_percent(250), Money::from_major(1250));
        assert_eq!(Money::from_major(500).scale_percent(80), Money::from_major(400));
    }

    #[test]
    fn money_from_catalog_price() {
        assert_eq!(Money::from_major_f64(45.5), Some(Money::from_minor(4550)));
        assert_eq!(Money::from_major_f64(0.0), None);
        assert_eq!(Money::from_major_f64(-10.0), None);
        assert_eq!(Money::from_major_f64(f64::NAN), None);
    }

    #[test]
    fn seat_id_round_trips_through_parts() {
        let id = SeatId::compose(&ZoneId::new("b-north"), "C", 14);
        assert_eq!(id.as_str(), "b-north-C-14");
        assert_eq!(id.parts(), Some(("b-north", "C", 14)));
        assert_eq!(SeatId::new("nonsense").parts(), None);
    }

    #[test]
    fn gaps_are_not_seats() {
        let zone = seated_zone("b-east", 500);
        assert_eq!(zone.rows()[0].slots.len(), 3);
        assert_eq!(zone.rows()[0].seat_count(), 2);
        assert_eq!(zone.sellable(), 1);
        assert_eq!(zone.seats().next().map(Seat::label), Some("A1".to_string()));
    }

    #[test]
    fn layout_lookups() {
        let layout = VenueLayout {
            sport_type: SportType::Basketball,
            selection_type: SelectionType::Seat,
            zones: vec![seated_zone("b-east", 500), seated_zone("b-west", 1500)],
        };
        assert!(layout.validate().is_ok());
        assert_eq!(layout.seat_count(), 4);
        let seat = layout.seat(&SeatId::new("b-west-A-2"));
        assert_eq!(seat.map(|s| s.status), Some(SeatStatus::Booked));
        assert!(layout.zone(&ZoneId::new("b-south")).is_none());
    }

    #[test]
    fn validate_rejects_duplicates_and_empty_layouts() {
        let empty = VenueLayout {
            sport_type: SportType::Music,
            selection_type: SelectionType::Zone,
            zones: vec![],
        };
        assert!(matches!(empty.validate(), Err(SeatingError::EmptyLayout)));

        let twice = VenueLayout {
            sport_type: SportType::Basketball,
            selection_type: SelectionType::Seat,
            zones: vec![seated_zone("b-east", 500), seated_zone("b-east", 500)],
        };
        assert!(matches!(twice.validate(), Err(SeatingError::DuplicateZone(_))));
    }

    #[test]
    fn validate_rejects_misfiled_seats() {
        let mut zone = seated_zone("b-east", 500);
        if let ZoneSeating::Rows { rows } = &mut zone.seating {
            let stray = Seat::new(ZoneId::new("b-west"), "A", 1, SeatStatus::Available);
            rows[0].slots[0] = Some(stray);
        }
        let layout = VenueLayout {
            sport_type: SportType::Basketball,
            selection_type: SelectionType::Seat,
            zones: vec![zone],
        };
        assert!(matches!(layout.validate(), Err(SeatingError::SeatOutsideZone { .. })));
    }

    #[test]
    fn layout_serialises_with_wire_names() {
        let layout = VenueLayout {
            sport_type: SportType::Cricket,
            selection_type: SelectionType::Zone,
            zones: vec![Zone {
                id: ZoneId::new("z-nw"),
                name: "North West Stand".to_string(),
                price: Money::from_major(1000),
                color: "#10b981".to_string(),
                position: ZonePosition::TopLeft,
                seating: ZoneSeating::Capacity { available: 300 },
            }],
        };
        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["sportType"], "cricket");
        assert_eq!(json["selectionType"], "zone");
        assert_eq!(json["zones"][0]["position"], "top-left");
        assert_eq!(json["zones"][0]["seating"]["kind"], "capacity");
        assert_eq!(json["zones"][0]["seating"]["available"], 300);
    }
}
