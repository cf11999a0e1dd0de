//! Seat picker example binary
//!
//! Generates a venue for an event and walks through a booking session:
//! pick seats or a zone, zoom, confirm.
//!
//! ```text
//! seat-picker [CLASSIFICATION | EVENT.json] [BASE_PRICE]
//! ```
//!
//! Set `SEATPLAN_RNG_SEED` for a reproducible seat map.

use seatplan_core::environment::{Publisher, SystemClock};
use seatplan_runtime::{Store, metrics::describe_metrics};
use seatplan_venue::catalog::{EventDescriptor, PriceRange};
use seatplan_venue::checkout::CheckoutSummary;
use seatplan_venue::generator::layout_for_event;
use seatplan_venue::selection::{SelectionAction, SelectionEnvironment, TracingNotifier};
use seatplan_venue::session::{BookingAction, BookingEnvironment, BookingReducer, BookingState};
use seatplan_venue::types::{SelectionType, VenueLayout, ZoneSeating};
use seatplan_venue::viewport::ViewportAction;
use seatplan_venue::{SeatingConfig, SeatingError};
use std::error::Error;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CLASSIFICATION: &str = "Sports Basketball NBA";

/// Prints the checkout handoff as JSON
struct PrintingCheckout;

impl Publisher<CheckoutSummary> for PrintingCheckout {
    fn publish(&self, summary: CheckoutSummary) {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("\n>>> Checkout handoff\n{json}"),
            Err(error) => tracing::error!(%error, "Failed to serialise checkout summary"),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "seat_picker=info,seatplan_venue=debug,seatplan_runtime=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    describe_metrics();

    let config = SeatingConfig::try_from_env()?;
    let event = event_from_args(std::env::args().skip(1).collect())?;

    println!("=== Seat Picker: {} ===\n", display_name(&event));

    let mut rng = config.rng();
    let layout = layout_for_event(&event, config.fallback_price(), &mut rng);
    print_layout(&layout);

    let env = BookingEnvironment::new(
        SelectionEnvironment::new(Arc::new(TracingNotifier))
            .with_max_selection(config.max_selection),
        Arc::new(SystemClock),
        Arc::new(PrintingCheckout),
    );
    let script = script_for(&layout);
    let mut store = Store::new(BookingState::new(layout), BookingReducer::new(), env)
        .with_feedback_limit(config.store_feedback_limit);

    for action in script {
        println!(">>> Sending: {action:?}");
        store.send(action)?;
        let total = store.state(|s| s.seating.total());
        println!("    Total: {total}");
    }

    let scale = store.state(|s| s.viewport.scale);
    println!("\n>>> Sending: Confirm (zoom {scale:.1}x)");
    store.send(BookingAction::Confirm)?;

    match store.state(|s| s.last_checkout.as_ref().map(CheckoutSummary::ticket_count)) {
        Some(tickets) => println!("\n=== {tickets} ticket(s) handed to checkout ==="),
        None => println!("\n=== Nothing to check out ==="),
    }
    Ok(())
}

/// Build the event from command-line arguments
///
/// A first argument ending in `.json` is read as a catalog event payload;
/// anything else is used as classification text.
fn event_from_args(args: Vec<String>) -> Result<EventDescriptor, Box<dyn Error>> {
    let mut args = args.into_iter();
    let first = args.next().unwrap_or_else(|| DEFAULT_CLASSIFICATION.to_string());

    let mut event = if std::path::Path::new(&first)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    {
        EventDescriptor::from_json(&std::fs::read_to_string(&first)?)?
    } else {
        EventDescriptor::new(first.clone(), first)
    };

    if let Some(raw) = args.next() {
        let price: f64 = raw.parse().map_err(|_| SeatingError::InvalidConfig {
            key: "BASE_PRICE",
            value: raw.clone(),
        })?;
        event.price_ranges.insert(
            0,
            PriceRange {
                currency: String::new(),
                min: price,
                max: price,
            },
        );
    }
    Ok(event)
}

fn display_name(event: &EventDescriptor) -> &str {
    if event.name.is_empty() {
        "Unnamed event"
    } else {
        &event.name
    }
}

fn print_layout(layout: &VenueLayout) {
    println!(
        "Venue: {:?} ({:?} selection), {} tickets on sale",
        layout.sport_type,
        layout.selection_type,
        layout.total_sellable()
    );
    for zone in &layout.zones {
        let offer = match &zone.seating {
            ZoneSeating::Rows { rows } => {
                format!("{} rows, {} seats", rows.len(), zone.seats().count())
            },
            ZoneSeating::Capacity { available } => format!("{available} available"),
        };
        println!("  {:<22} {:>10}  {offer}", zone.name, zone.price.to_string());
    }
    println!();
}

/// A short scripted session that fits the layout's selection mode
fn script_for(layout: &VenueLayout) -> Vec<BookingAction> {
    let mut script = Vec::new();
    match layout.selection_type {
        SelectionType::Seat => {
            // A sold seat first, then a few free ones from the priciest zone
            if let Some(sold) = layout.seats().find(|s| !s.is_selectable()) {
                script.push(SelectionAction::ToggleSeat {
                    seat_id: sold.id.clone(),
                });
            }
            if let Some(zone) = layout.zones.iter().max_by_key(|z| z.price) {
                script.extend(zone.seats().filter(|s| s.is_selectable()).take(3).map(|s| {
                    SelectionAction::ToggleSeat {
                        seat_id: s.id.clone(),
                    }
                }));
            }
        },
        SelectionType::Zone => {
            if let Some(zone) = layout.zones.iter().min_by_key(|z| z.price) {
                script.push(SelectionAction::SelectZone {
                    zone_id: zone.id.clone(),
                });
                script.push(SelectionAction::SetQuantity { quantity: 2 });
            }
        },
    }

    script
        .into_iter()
        .map(BookingAction::Selection)
        .chain([
            BookingAction::Viewport(ViewportAction::ZoomIn),
            BookingAction::Viewport(ViewportAction::Pan { dx: -40.0, dy: 25.0 }),
        ])
        .collect()
}
