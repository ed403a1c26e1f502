use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use mimalloc::MiMalloc;
use peregrine_durations::{
    cache::InMemoryDurationCache,
    coordinate::Coordinate,
    source::DurationSource,
    table_api::{TableClient, TableConfig},
    transport_mode::TransportMode,
};
use peregrine_optimizer::{
    problem::location::{Activity, Location, Trip},
    solver::{
        exact, params::OptimizerParams, progressive::ProgressiveOptimizer,
        resolver::DurationResolver, route::OrderedRoute,
    },
};
use tracing::{Level, info};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn swiss_day_trip() -> Trip {
    let lausanne = Coordinate::new(46.5197, 6.6323);
    let bern = Coordinate::new(46.9480, 7.4474);

    Trip {
        start: Location::new("Geneva", Coordinate::new(46.2044, 6.1432)),
        end: Location::new("Zurich", Coordinate::new(47.3769, 8.5417)),
        waypoints: vec![
            Location::new("Lausanne", lausanne),
            Location::new("Fribourg", Coordinate::new(46.8065, 7.1620)),
            Location::new("Bern", bern),
            Location::new("Interlaken", Coordinate::new(46.6863, 7.8632)),
            Location::new("Lucerne", Coordinate::new(47.0502, 8.3093)),
        ],
        activities: vec![
            Activity {
                coordinate: lausanne,
                duration_seconds: 3600.0,
            },
            Activity {
                coordinate: bern,
                duration_seconds: 5400.0,
            },
        ],
        mode: TransportMode::Car,
    }
}

/// Routed durations when OSRM_URL points at a table service, straight-line
/// ones otherwise.
fn duration_source() -> DurationSource {
    match std::env::var("OSRM_URL") {
        Ok(base_url) => {
            info!("Using the table service at {}", base_url);
            DurationSource::Table(TableClient::new(TableConfig {
                base_url,
                ..TableConfig::default()
            }))
        }
        Err(_) => DurationSource::AsTheCrowFlies { speed_kmh: 80.0 },
    }
}

fn log_route(route: &OrderedRoute) {
    for (i, leg) in route.ordered_locations.windows(2).enumerate() {
        info!(
            "  {} -> {} ({:.0} min)",
            leg[0].name,
            leg[1].name,
            route.segment_durations[i] / 60.0
        );
    }
    info!("Total travel: {:.0} min", route.total_duration / 60.0);
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let trip = swiss_day_trip();
    let cache = Arc::new(InMemoryDurationCache::new());
    let resolver = DurationResolver::new(duration_source(), Arc::clone(&cache));
    let optimizer = ProgressiveOptimizer::new(resolver, OptimizerParams::default());

    let bar = ProgressBar::new(100);
    bar.set_style(ProgressStyle::default_bar().template("[{bar:40}] {pos}%").unwrap());

    let route = optimizer
        .optimize(&trip, |fraction| {
            bar.set_position((fraction * 100.0) as u64);
        })
        .await;
    bar.finish_and_clear();

    info!("Progressive route over {} waypoints:", trip.waypoints.len());
    log_route(&route);
    info!("Cached durations: {}", cache.len());

    // The cache now covers every visited leg, and the matrix resolution
    // below fills in the rest, so the exact pass below mostly stays off
    // the network even with a table service configured.
    let coordinates: Vec<Coordinate> = route
        .ordered_locations
        .iter()
        .map(|location| location.coordinate)
        .collect();
    let matrix = optimizer.resolver().duration_matrix(&coordinates, trip.mode).await;
    let tour = exact::open_tour(&matrix, 0, coordinates.len() - 1);

    let progressive_order: Vec<usize> = (0..coordinates.len()).collect();
    let order: Vec<&str> = tour
        .iter()
        .map(|&i| route.ordered_locations[i].name.as_str())
        .collect();
    info!("Exact order: {}", order.join(" -> "));
    info!(
        "Progressive {:.0} min travel, exact {:.0} min",
        exact::tour_cost(&matrix, &progressive_order) / 60.0,
        exact::tour_cost(&matrix, &tour) / 60.0
    );

    Ok(())
}
