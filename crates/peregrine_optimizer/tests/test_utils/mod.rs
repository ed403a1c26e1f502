use peregrine_durations::{
    cache::InMemoryDurationCache,
    coordinate::Coordinate,
    source::{DurationSource, FixedDurations},
};
use peregrine_optimizer::{
    problem::location::Location,
    solver::{
        params::OptimizerParams, progressive::ProgressiveOptimizer, resolver::DurationResolver,
    },
};

pub fn location(name: &str, latitude: f64, longitude: f64) -> Location {
    Location::new(name, Coordinate::new(latitude, longitude))
}

pub fn geneva() -> Location {
    location("Geneva", 46.2044, 6.1432)
}

pub fn zurich() -> Location {
    location("Zurich", 47.3769, 8.5417)
}

/// Four stops strung west to east between Geneva and Zurich.
pub fn swiss_cities() -> Vec<Location> {
    vec![
        location("Lausanne", 46.5197, 6.6323),
        location("Fribourg", 46.8065, 7.1620),
        location("Bern", 46.9480, 7.4474),
        location("Lucerne", 47.0502, 8.3093),
    ]
}

/// Symmetric canned durations proportional to straight-line distance, for
/// every pair in `locations`.
pub fn symmetric_durations(locations: &[Location], seconds_per_km: f64) -> FixedDurations {
    let mut durations = FixedDurations::default();

    for (i, a) in locations.iter().enumerate() {
        for b in &locations[i + 1..] {
            let seconds = a.coordinate.haversine_distance_km(&b.coordinate) * seconds_per_km;
            durations.insert_symmetric(&a.coordinate, &b.coordinate, seconds);
        }
    }

    durations
}

pub fn crow_flies_optimizer(speed_kmh: f64) -> ProgressiveOptimizer<InMemoryDurationCache> {
    crow_flies_optimizer_with(speed_kmh, OptimizerParams::default())
}

pub fn crow_flies_optimizer_with(
    speed_kmh: f64,
    params: OptimizerParams,
) -> ProgressiveOptimizer<InMemoryDurationCache> {
    let resolver = DurationResolver::new(
        DurationSource::AsTheCrowFlies { speed_kmh },
        InMemoryDurationCache::new(),
    );

    ProgressiveOptimizer::new(resolver, params)
}

pub fn fixed_optimizer(durations: FixedDurations) -> ProgressiveOptimizer<InMemoryDurationCache> {
    let resolver =
        DurationResolver::new(DurationSource::Fixed(durations), InMemoryDurationCache::new());

    ProgressiveOptimizer::new(resolver, OptimizerParams::default())
}
