//! Procedural venue layouts.
//!
//! An event's classification text picks one of four archetypes (field,
//! court, ground, stage). Each archetype is a fixed table of zones whose
//! prices are multiples of the event's base price. Only the court archetype
//! carries numbered seats; those are marked as already sold at random to
//! simulate existing occupancy.
//!
//! Randomness is injected. Production passes the thread RNG, tests pass a
//! seeded `ChaCha8Rng`. Zone topology, prices and positions never depend on
//! the RNG.

use crate::catalog::{EventDescriptor, FALLBACK_BASE_PRICE};
use crate::types::{
    Money, Row, Seat, SeatStatus, SelectionType, SportType, VenueLayout, Zone, ZoneId,
    ZonePosition, ZoneSeating,
};
use rand::Rng;

/// Chance that a generated seat is already sold
pub const BOOKED_PROBABILITY: f64 = 0.25;

/// Chance that an unsold seat in a premium row is a wheelchair space
pub const WHEELCHAIR_PROBABILITY: f64 = 0.05;

const BLUE: &str = "#1D8EFF";
const GREEN: &str = "#10b981";
const PURPLE: &str = "#a855f7";
const AMBER: &str = "#F59E0B";

/// Procedural layout template
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Archetype {
    /// Rectangular pitch with four stands (soccer, football, rugby)
    Field,
    /// Indoor court with numbered seats (basketball, tennis, volleyball)
    Court,
    /// Circular ground with eight stands (cricket)
    Ground,
    /// Stage with standing areas (music, and everything unrecognised)
    Stage,
}

impl Archetype {
    /// Pick the archetype for a classification text
    ///
    /// Case-insensitive substring search, first match wins. Text that matches
    /// nothing gets the stage layout.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        let text = text.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|word| text.contains(word));

        if mentions(&["soccer", "football", "rugby"]) {
            Self::Field
        } else if mentions(&["basketball", "tennis", "volleyball"]) {
            Self::Court
        } else if mentions(&["cricket"]) {
            Self::Ground
        } else {
            if !mentions(&["music", "concert"]) {
                tracing::debug!(
                    classification = %text,
                    "No archetype keyword matched, using stage layout"
                );
            }
            Self::Stage
        }
    }

    /// Field or stage drawn at the centre
    #[must_use]
    pub const fn sport_type(self) -> SportType {
        match self {
            Self::Field => SportType::Football,
            Self::Court => SportType::Basketball,
            Self::Ground => SportType::Cricket,
            Self::Stage => SportType::Music,
        }
    }

    /// Selection granularity of layouts built from this archetype
    #[must_use]
    pub const fn selection_type(self) -> SelectionType {
        match self {
            Self::Court => SelectionType::Seat,
            Self::Field | Self::Ground | Self::Stage => SelectionType::Zone,
        }
    }

    fn zones(self) -> &'static [ZoneTemplate] {
        match self {
            Self::Field => &FIELD_ZONES,
            Self::Court => &COURT_ZONES,
            Self::Ground => &GROUND_ZONES,
            Self::Stage => &STAGE_ZONES,
        }
    }
}

// ============================================================================
// Zone templates
// ============================================================================

#[derive(Clone, Copy, Debug)]
enum SeatPlan {
    Capacity(u32),
    Grid {
        rows: usize,
        seats_per_row: usize,
        premium: bool,
    },
}

#[derive(Clone, Copy, Debug)]
struct ZoneTemplate {
    id: &'static str,
    name: &'static str,
    price_percent: u32,
    color: &'static str,
    position: ZonePosition,
    plan: SeatPlan,
}

impl ZoneTemplate {
    const fn capacity(
        id: &'static str,
        name: &'static str,
        price_percent: u32,
        color: &'static str,
        position: ZonePosition,
        available: u32,
    ) -> Self {
        Self {
            id,
            name,
            price_percent,
            color,
            position,
            plan: SeatPlan::Capacity(available),
        }
    }

    const fn grid(
        id: &'static str,
        name: &'static str,
        price_percent: u32,
        color: &'static str,
        position: ZonePosition,
        seats_per_row: usize,
        premium: bool,
    ) -> Self {
        Self {
            id,
            name,
            price_percent,
            color,
            position,
            plan: SeatPlan::Grid {
                rows: COURT_ROWS,
                seats_per_row,
                premium,
            },
        }
    }

    fn instantiate<R: Rng + ?Sized>(&self, base_price: Money, rng: &mut R) -> Zone {
        let id = ZoneId::new(self.id);
        let seating = match self.plan {
            SeatPlan::Capacity(available) => ZoneSeating::Capacity { available },
            SeatPlan::Grid {
                rows,
                seats_per_row,
                premium,
            } => ZoneSeating::Rows {
                rows: (0..rows)
                    .map(|index| {
                        generate_row(
                            &row_label(index),
                            1,
                            seats_per_row,
                            &[],
                            &id,
                            premium && index == 0,
                            rng,
                        )
                    })
                    .collect(),
            },
        };

        Zone {
            id,
            name: self.name.to_string(),
            price: base_price.scale_percent(self.price_percent),
            color: self.color.to_string(),
            position: self.position,
            seating,
        }
    }
}

const COURT_ROWS: usize = 4;
const COURT_SEATS_LONG_SIDE: usize = 22;
const COURT_SEATS_SHORT_SIDE: usize = 12;

const FIELD_ZONES: [ZoneTemplate; 4] = [
    ZoneTemplate::capacity("z-north", "North Stand", 100, BLUE, ZonePosition::Top, 500),
    ZoneTemplate::capacity("z-south", "South Stand", 100, BLUE, ZonePosition::Bottom, 500),
    ZoneTemplate::capacity("z-east", "East Stand (Away)", 80, GREEN, ZonePosition::Right, 300),
    ZoneTemplate::capacity("z-west", "West Stand (Premium)", 250, PURPLE, ZonePosition::Left, 200),
];

const COURT_ZONES: [ZoneTemplate; 4] = [
    ZoneTemplate::grid(
        "b-north",
        "Courtside North",
        150,
        AMBER,
        ZonePosition::Top,
        COURT_SEATS_LONG_SIDE,
        false,
    ),
    ZoneTemplate::grid(
        "b-south",
        "Courtside South",
        150,
        AMBER,
        ZonePosition::Bottom,
        COURT_SEATS_LONG_SIDE,
        false,
    ),
    ZoneTemplate::grid(
        "b-east",
        "General East",
        100,
        BLUE,
        ZonePosition::Right,
        COURT_SEATS_SHORT_SIDE,
        false,
    ),
    ZoneTemplate::grid(
        "b-west",
        "VIP West",
        300,
        PURPLE,
        ZonePosition::Left,
        COURT_SEATS_SHORT_SIDE,
        true,
    ),
];

const GROUND_ZONES: [ZoneTemplate; 8] = [
    ZoneTemplate::capacity("z-n", "Pavilion End", 300, PURPLE, ZonePosition::Top, 200),
    ZoneTemplate::capacity("z-s", "Media End", 200, AMBER, ZonePosition::Bottom, 400),
    ZoneTemplate::capacity("z-e", "East Stand", 100, BLUE, ZonePosition::Right, 600),
    ZoneTemplate::capacity("z-w", "West Stand", 100, BLUE, ZonePosition::Left, 600),
    ZoneTemplate::capacity("z-nw", "North West Stand", 100, GREEN, ZonePosition::TopLeft, 300),
    ZoneTemplate::capacity("z-ne", "North East Stand", 100, GREEN, ZonePosition::TopRight, 300),
    ZoneTemplate::capacity("z-sw", "South West Stand", 100, GREEN, ZonePosition::BottomLeft, 300),
    ZoneTemplate::capacity("z-se", "South East Stand", 100, GREEN, ZonePosition::BottomRight, 300),
];

const STAGE_ZONES: [ZoneTemplate; 4] = [
    ZoneTemplate::capacity("m-ga", "General Admission", 100, GREEN, ZonePosition::Bottom, 1500),
    ZoneTemplate::capacity("m-vip", "VIP Standing", 250, AMBER, ZonePosition::Top, 200),
    ZoneTemplate::capacity("m-left", "Left Wing", 150, BLUE, ZonePosition::Left, 300),
    ZoneTemplate::capacity("m-right", "Right Wing", 150, BLUE, ZonePosition::Right, 300),
];

// ============================================================================
// Generation
// ============================================================================

/// Build the layout for a classification text and base price
pub fn generate_layout<R: Rng + ?Sized>(
    classification: &str,
    base_price: Money,
    rng: &mut R,
) -> VenueLayout {
    build_layout(Archetype::classify(classification), base_price, rng)
}

/// Build the layout for a catalog event
///
/// `fallback_price` is used when the event quotes no usable price.
pub fn layout_for_event<R: Rng + ?Sized>(
    event: &EventDescriptor,
    fallback_price: Money,
    rng: &mut R,
) -> VenueLayout {
    let base_price = event.base_price(fallback_price);
    generate_layout(&event.classification_text(), base_price, rng)
}

/// Build the layout of a given archetype
///
/// A zero base price counts as unpriced and is replaced by
/// [`FALLBACK_BASE_PRICE`].
pub fn build_layout<R: Rng + ?Sized>(
    archetype: Archetype,
    base_price: Money,
    rng: &mut R,
) -> VenueLayout {
    let base_price = if base_price.is_zero() {
        tracing::debug!(fallback = FALLBACK_BASE_PRICE, "No base price, using fallback");
        Money::from_major(FALLBACK_BASE_PRICE)
    } else {
        base_price
    };
    let zones: Vec<Zone> = archetype
        .zones()
        .iter()
        .map(|template| template.instantiate(base_price, rng))
        .collect();

    let layout = VenueLayout {
        sport_type: archetype.sport_type(),
        selection_type: archetype.selection_type(),
        zones,
    };

    tracing::debug!(
        ?archetype,
        %base_price,
        zones = layout.zones.len(),
        seats = layout.seat_count(),
        "Generated venue layout"
    );
    layout
}

/// Generate one row of seats
///
/// `slot_count` slots are laid out left to right. Indices listed in
/// `gap_indices` become aisles; the remaining slots are seats numbered
/// consecutively from `start_number`. Each seat is sold with probability
/// [`BOOKED_PROBABILITY`]; in a premium row an unsold seat becomes a
/// wheelchair space with probability [`WHEELCHAIR_PROBABILITY`].
pub fn generate_row<R: Rng + ?Sized>(
    label: &str,
    start_number: u32,
    slot_count: usize,
    gap_indices: &[usize],
    zone_id: &ZoneId,
    premium: bool,
    rng: &mut R,
) -> Row {
    let mut number = start_number;
    let slots = (0..slot_count)
        .map(|index| {
            if gap_indices.contains(&index) {
                return None;
            }
            let mut status = if rng.gen_bool(BOOKED_PROBABILITY) {
                SeatStatus::Booked
            } else {
                SeatStatus::Available
            };
            if premium && status == SeatStatus::Available && rng.gen_bool(WHEELCHAIR_PROBABILITY) {
                status = SeatStatus::Wheelchair;
            }
            let seat = Seat::new(zone_id.clone(), label, number, status);
            number += 1;
            Some(seat)
        })
        .collect();

    Row {
        label: label.to_string(),
        slots,
    }
}

/// Spreadsheet-style row label: 0 → `A`, 25 → `Z`, 26 → `AA`
#[must_use]
pub fn row_label(index: usize) -> String {
    let mut remaining = index + 1;
    let mut label = Vec::new();
    while remaining > 0 {
        remaining -= 1;
        let offset = u8::try_from(remaining % 26).unwrap_or_default();
        label.push(char::from(b'A' + offset));
        remaining /= 26;
    }
    label.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatplan_testing::{seeded_rng, test_rng};

    #[test]
    fn classify_matches_keywords_in_order() {
        assert_eq!(Archetype::classify("Sports Soccer MLS"), Archetype::Field);
        assert_eq!(Archetype::classify("RUGBY union"), Archetype::Field);
        assert_eq!(Archetype::classify("sports basketball nba"), Archetype::Court);
        assert_eq!(Archetype::classify("Tennis"), Archetype::Court);
        assert_eq!(Archetype::classify("Cricket International"), Archetype::Ground);
        assert_eq!(Archetype::classify("Music Rock"), Archetype::Stage);
        assert_eq!(Archetype::classify("arts & theatre"), Archetype::Stage);
        assert_eq!(Archetype::classify(""), Archetype::Stage);
        // Earlier keywords win
        assert_eq!(Archetype::classify("football and cricket"), Archetype::Field);
    }

    #[test]
    fn court_has_four_rows_per_zone() {
        let layout = build_layout(Archetype::Court, Money::from_major(500), &mut test_rng());
        assert_eq!(layout.selection_type, SelectionType::Seat);
        for zone in &layout.zones {
            assert_eq!(zone.rows().len(), 4);
            let expected = if matches!(zone.position, ZonePosition::Top | ZonePosition::Bottom) {
                22
            } else {
                12
            };
            for row in zone.rows() {
                assert_eq!(row.seat_count(), expected);
            }
        }
        assert_eq!(layout.seat_count(), 2 * 4 * 22 + 2 * 4 * 12);
    }

    #[test]
    fn wheelchair_spaces_only_in_the_premium_front_row() {
        for seed in 0..50 {
            let layout =
                build_layout(Archetype::Court, Money::from_major(500), &mut seeded_rng(seed));
            for seat in layout.seats().filter(|s| s.status == SeatStatus::Wheelchair) {
                assert_eq!(seat.zone_id.as_str(), "b-west");
                assert_eq!(seat.row, "A");
            }
        }
    }

    #[test]
    fn capacity_archetypes_have_no_seats() {
        for archetype in [Archetype::Field, Archetype::Ground, Archetype::Stage] {
            let layout = build_layout(archetype, Money::from_major(500), &mut test_rng());
            assert_eq!(layout.selection_type, SelectionType::Zone);
            assert_eq!(layout.seat_count(), 0);
            assert!(layout.zones.iter().all(|z| z.available_capacity().is_some()));
        }
    }

    #[test]
    fn field_prices_and_capacities() {
        let layout = build_layout(Archetype::Field, Money::from_major(500), &mut test_rng());
        let summary: Vec<(&str, Money, Option<u32>)> = layout
            .zones
            .iter()
            .map(|z| (z.id.as_str(), z.price, z.available_capacity()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("z-north", Money::from_major(500), Some(500)),
                ("z-south", Money::from_major(500), Some(500)),
                ("z-east", Money::from_major(400), Some(300)),
                ("z-west", Money::from_major(1250), Some(200)),
            ]
        );
    }

    #[test]
    fn zero_base_price_uses_the_fallback() {
        let unpriced = generate_layout("Rock Concert", Money::ZERO, &mut test_rng());
        let prices: Vec<u64> = unpriced.zones.iter().map(|z| z.price.major()).collect();
        assert_eq!(prices, vec![500, 1250, 750, 750]);
        assert_eq!(
            unpriced,
            generate_layout("Rock Concert", Money::from_major(500), &mut test_rng())
        );
    }

    #[test]
    fn rows_skip_gaps_when_numbering() {
        let zone = ZoneId::new("x");
        let row = generate_row("B", 1, 6, &[2, 3], &zone, false, &mut test_rng());
        let numbers: Vec<Option<u32>> =
            row.slots.iter().map(|s| s.as_ref().map(|s| s.number)).collect();
        assert_eq!(numbers, vec![Some(1), Some(2), None, None, Some(3), Some(4)]);
        assert_eq!(row.seats().last().map(|s| s.id.as_str()), Some("x-B-4"));
    }

    #[test]
    fn same_seed_same_statuses() {
        let a = generate_layout("basketball", Money::from_major(800), &mut seeded_rng(99));
        let b = generate_layout("basketball", Money::from_major(800), &mut seeded_rng(99));
        assert_eq!(a, b);
    }

    #[test]
    fn row_labels() {
        assert_eq!(row_label(0), "A");
        assert_eq!(row_label(3), "D");
        assert_eq!(row_label(25), "Z");
        assert_eq!(row_label(26), "AA");
        assert_eq!(row_label(27), "AB");
    }
}
