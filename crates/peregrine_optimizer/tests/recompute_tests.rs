mod test_utils;

use peregrine_durations::transport_mode::TransportMode;
use peregrine_optimizer::{
    problem::location::Location,
    solver::route::{LARGE_DURATION, OrderedRoute, UNREACHABLE_TOTAL},
};

use test_utils::{
    crow_flies_optimizer, fixed_optimizer, geneva, location, swiss_cities, symmetric_durations,
    zurich,
};

const SENTINEL: f64 = -1.0;

fn route_through(stops: Vec<Location>, segment_durations: Vec<f64>) -> OrderedRoute {
    OrderedRoute {
        ordered_locations: stops,
        total_duration: 0.0,
        segment_durations,
    }
}

#[tokio::test]
async fn segments_beside_an_added_stop_are_resolved() {
    let cities = swiss_cities();
    let stops = vec![geneva(), cities[0].clone(), cities[2].clone(), zurich()];
    let optimizer = fixed_optimizer(symmetric_durations(&stops, 45.0));
    let route = route_through(stops.clone(), vec![SENTINEL, SENTINEL, 500.0]);

    let repaired = optimizer
        .recompute(route, &[1], TransportMode::Car, SENTINEL, |_| {})
        .await;

    let inbound = stops[0]
        .coordinate
        .haversine_distance_km(&stops[1].coordinate)
        * 45.0;
    let outbound = stops[1]
        .coordinate
        .haversine_distance_km(&stops[2].coordinate)
        * 45.0;
    assert_eq!(repaired.segment_durations, vec![inbound, outbound, 500.0]);
    assert_eq!(repaired.total_duration, inbound + outbound + 500.0);
}

#[tokio::test]
async fn sentinels_away_from_added_stops_are_left_alone() {
    let cities = swiss_cities();
    let stops = vec![
        geneva(),
        cities[0].clone(),
        cities[1].clone(),
        cities[2].clone(),
        zurich(),
    ];
    let optimizer = crow_flies_optimizer(80.0);
    let route = route_through(stops, vec![100.0, SENTINEL, 200.0, 300.0]);

    let repaired = optimizer
        .recompute(route, &[3], TransportMode::Car, SENTINEL, |_| {})
        .await;

    // Neither segment beside index 3 carries the sentinel, and the stale
    // segment at index 1 is not beside an added stop.
    assert_eq!(
        repaired.segment_durations,
        vec![100.0, SENTINEL, 200.0, 300.0]
    );
    assert_eq!(repaired.total_duration, 100.0 + SENTINEL + 200.0 + 300.0);
}

#[tokio::test]
async fn boundary_and_out_of_range_indexes_are_skipped() {
    let stops = vec![
        geneva(),
        location("Interlaken", 46.6863, 7.8632),
        zurich(),
    ];
    let optimizer = crow_flies_optimizer(80.0);
    let route = route_through(stops, vec![SENTINEL, SENTINEL]);

    let repaired = optimizer
        .recompute(route, &[0, 2, 99], TransportMode::Car, SENTINEL, |_| {})
        .await;

    assert_eq!(repaired.segment_durations, vec![SENTINEL, SENTINEL]);
}

#[tokio::test]
async fn valid_routes_only_get_a_fresh_total() {
    let cities = swiss_cities();
    let stops = vec![geneva(), cities[0].clone(), cities[2].clone(), zurich()];
    let optimizer = crow_flies_optimizer(80.0);
    let route = route_through(stops, vec![100.0, 200.0, 300.0]);

    let repaired = optimizer
        .recompute(route, &[1, 2], TransportMode::Car, SENTINEL, |_| {})
        .await;

    assert_eq!(repaired.segment_durations, vec![100.0, 200.0, 300.0]);
    assert_eq!(repaired.total_duration, 600.0);
}

#[tokio::test]
async fn recomputing_twice_changes_nothing() {
    let cities = swiss_cities();
    let stops = vec![geneva(), cities[0].clone(), cities[1].clone(), zurich()];
    let optimizer = fixed_optimizer(symmetric_durations(&stops, 45.0));
    let route = route_through(stops, vec![SENTINEL, SENTINEL, SENTINEL]);

    let once = optimizer
        .recompute(route, &[1, 2], TransportMode::Car, SENTINEL, |_| {})
        .await;
    let twice = optimizer
        .recompute(once.clone(), &[1, 2], TransportMode::Car, SENTINEL, |_| {})
        .await;

    assert_eq!(once, twice);
}

#[tokio::test]
async fn a_remaining_unresolvable_leg_collapses_the_total() {
    let cities = swiss_cities();
    let stops = vec![geneva(), cities[0].clone(), zurich()];
    let optimizer = crow_flies_optimizer(80.0);
    let route = route_through(stops, vec![LARGE_DURATION, 400.0]);

    let repaired = optimizer
        .recompute(route, &[], TransportMode::Car, SENTINEL, |_| {})
        .await;

    assert_eq!(repaired.segment_durations, vec![LARGE_DURATION, 400.0]);
    assert_eq!(repaired.total_duration, UNREACHABLE_TOTAL);
}

#[tokio::test]
async fn progress_counts_processed_indexes() {
    let cities = swiss_cities();
    let stops = vec![
        geneva(),
        cities[0].clone(),
        cities[1].clone(),
        cities[2].clone(),
        zurich(),
    ];
    let optimizer = crow_flies_optimizer(80.0);
    let route = route_through(stops, vec![SENTINEL; 4]);

    let mut progress = Vec::new();
    optimizer
        .recompute(route, &[1, 2], TransportMode::Car, SENTINEL, |fraction| {
            progress.push(fraction)
        })
        .await;

    assert_eq!(progress, vec![0.5, 1.0, 1.0]);
}

#[tokio::test]
async fn resolved_segments_come_from_the_duration_source() {
    let cities = swiss_cities();
    let lausanne = cities[0].clone();
    let stops = vec![geneva(), lausanne.clone(), zurich()];
    let optimizer = crow_flies_optimizer(100.0);
    let route = route_through(stops, vec![SENTINEL, SENTINEL]);

    let repaired = optimizer
        .recompute(route, &[1], TransportMode::Car, SENTINEL, |_| {})
        .await;

    let inbound = geneva()
        .coordinate
        .haversine_distance(&lausanne.coordinate)
        / (100.0 / 3.6);
    let outbound = lausanne
        .coordinate
        .haversine_distance(&zurich().coordinate)
        / (100.0 / 3.6);
    assert_eq!(repaired.segment_durations, vec![inbound, outbound]);
}
