use fxhash::{FxHashMap, FxHashSet};
use peregrine_durations::{
    cache::DurationCache,
    coordinate::{CoordKey, Coordinate},
};
use tracing::{Level, debug, instrument};

use crate::problem::{
    location::{Location, Trip},
    location_index::LocationIndex,
};
use crate::solver::{
    params::OptimizerParams,
    resolver::DurationResolver,
    route::{self, OrderedRoute},
};

/// Turn angles above the max double back on the route; angles below the
/// min re-trace the previous heading. Both get penalized.
const ZIGZAG_MAX_ANGLE_DEGREES: f64 = 90.0;
const ZIGZAG_MIN_ANGLE_DEGREES: f64 = 25.0;

/// Greedy route construction that resolves travel durations as it goes.
///
/// Each step scores a shortlist of the nearest unvisited stops and moves
/// to the cheapest one, so the trip is ordered with one batched duration
/// lookup per step instead of a full pairwise matrix up front. The result
/// is good rather than optimal; [`crate::solver::exact`] covers the small
/// cases where optimality matters.
pub struct ProgressiveOptimizer<C> {
    resolver: DurationResolver<C>,
    params: OptimizerParams,
}

impl<C: DurationCache> ProgressiveOptimizer<C> {
    pub fn new(resolver: DurationResolver<C>, params: OptimizerParams) -> Self {
        Self { resolver, params }
    }

    pub fn resolver(&self) -> &DurationResolver<C> {
        &self.resolver
    }

    /// Orders `trip`'s waypoints into a route from its start to its end.
    ///
    /// Waypoints are de-duplicated by coordinate, and the start's own
    /// coordinate is never revisited. `on_progress` sees the fraction of
    /// stops placed so far and always ends on `1.0`.
    #[instrument(skip_all, level = Level::DEBUG)]
    pub async fn optimize(&self, trip: &Trip, mut on_progress: impl FnMut(f32)) -> OrderedRoute {
        let activity_seconds = trip.activity_seconds();
        let end_key = trip.end.key();

        let mut seen = FxHashSet::default();
        seen.insert(trip.start.key());
        let unvisited: Vec<Location> = trip
            .waypoints
            .iter()
            .filter(|waypoint| seen.insert(waypoint.key()))
            .cloned()
            .collect();
        let total_stops = unvisited.len();

        debug!(
            "ProgressiveOptimizer: {} stops after de-duplication",
            total_stops
        );

        let index = LocationIndex::new(&unvisited);
        let mut visited: FxHashSet<usize> = FxHashSet::default();

        let mut ordered_locations = vec![trip.start.clone()];
        let mut segment_durations: Vec<f64> = Vec::new();
        let mut total = 0.0;
        let mut current = trip.start.clone();
        let mut previous: Option<Coordinate> = None;

        while visited.len() < total_stops && current.key() != end_key {
            let candidates =
                self.candidates(&index, &visited, &unvisited, &current.coordinate, end_key);
            let ends: Vec<Coordinate> = candidates
                .iter()
                .map(|&position| unvisited[position].coordinate)
                .collect();
            let durations = self
                .resolver
                .resolve_from_start(&current.coordinate, &ends, trip.mode)
                .await;

            let remaining: Vec<&Location> = (0..total_stops)
                .filter(|position| !visited.contains(position))
                .map(|position| &unvisited[position])
                .collect();
            let center = centroid(&remaining);
            let average_activity = average_activity(&remaining, &activity_seconds);
            let progress_factor = 2.0 - remaining.len() as f64 / total_stops as f64;

            let mut best: Option<(usize, f64)> = None;
            let mut best_score = f64::INFINITY;

            for &candidate in &candidates {
                let location = &unvisited[candidate];
                let travel = durations[&location.key()];
                let activity = activity_seconds
                    .get(&location.key())
                    .copied()
                    .unwrap_or(0.0);

                let score = travel
                    + activity / self.params.activity_time_divisor
                    + self.penalty(
                        previous.as_ref(),
                        &current.coordinate,
                        &location.coordinate,
                        &trip.end.coordinate,
                        center.as_ref(),
                        activity,
                        average_activity,
                        progress_factor,
                    );

                if score < best_score {
                    best_score = score;
                    best = Some((candidate, travel));
                }
            }

            let (chosen, travel) = best.expect("every step scores at least one candidate");
            let location = unvisited[chosen].clone();

            segment_durations.push(travel.max(0.0));
            total += travel.max(0.0);
            previous = Some(current.coordinate);
            current = location.clone();
            ordered_locations.push(location);
            visited.insert(chosen);

            on_progress(visited.len() as f32 / total_stops as f32);
        }

        if current.key() != end_key {
            let travel = self
                .resolver
                .resolve_one(&current.coordinate, &trip.end.coordinate, trip.mode)
                .await
                .max(0.0);

            segment_durations.push(travel);
            total += travel;
            ordered_locations.push(trip.end.clone());
        }

        on_progress(1.0);

        OrderedRoute {
            ordered_locations,
            total_duration: route::total_or_unreachable(total),
            segment_durations,
        }
    }

    /// Positions of the stops to score next: the nearest unvisited ones,
    /// skipping any stop on the end's coordinate so the route does not
    /// finish early.
    fn candidates(
        &self,
        index: &LocationIndex,
        visited: &FxHashSet<usize>,
        unvisited: &[Location],
        from: &Coordinate,
        end_key: CoordKey,
    ) -> Vec<usize> {
        let picked: Vec<usize> = index
            .nearest_iter(from)
            .filter(|position| !visited.contains(position))
            .filter(|&position| unvisited[position].key() != end_key)
            .take(self.params.nearest_candidates)
            .collect();

        if !picked.is_empty() {
            return picked;
        }

        // Only the end's own coordinate is left.
        index
            .nearest_iter(from)
            .filter(|position| !visited.contains(position))
            .take(self.params.nearest_candidates)
            .collect()
    }

    #[allow(clippy::too_many_arguments)]
    fn penalty(
        &self,
        previous: Option<&Coordinate>,
        current: &Coordinate,
        candidate: &Coordinate,
        end: &Coordinate,
        center: Option<&Coordinate>,
        activity: f64,
        average_activity: f64,
        progress_factor: f64,
    ) -> f64 {
        let mut penalty = current.haversine_distance_km(candidate);

        if let Some(previous) = previous {
            let angle = turn_angle_degrees(previous, current, candidate);
            if angle > ZIGZAG_MAX_ANGLE_DEGREES || angle < ZIGZAG_MIN_ANGLE_DEGREES {
                penalty += angle * self.params.zigzag_angle_multiplier;
            }
        }

        if activity < average_activity {
            penalty += (average_activity - activity) * self.params.activity_diff_multiplier;
        }

        if let Some(center) = center {
            penalty +=
                candidate.haversine_distance_km(center) * self.params.center_distance_multiplier;
        }

        // Grows as the candidate nears the end and as fewer stops remain,
        // steering the route away from the end until late in the trip.
        penalty += 100.0 / (candidate.haversine_distance_km(end) + 1.0)
            * self.params.end_direction_multiplier
            * progress_factor;

        penalty
    }
}

/// Change of heading at `current` when coming from `previous` and
/// continuing to `next`, folded into `[0, 180]` degrees.
fn turn_angle_degrees(previous: &Coordinate, current: &Coordinate, next: &Coordinate) -> f64 {
    let inbound = previous.bearing(current);
    let outbound = current.bearing(next);

    let angle = (outbound - inbound).abs() % 360.0;
    if angle > 180.0 { 360.0 - angle } else { angle }
}

fn centroid(locations: &[&Location]) -> Option<Coordinate> {
    if locations.is_empty() {
        return None;
    }

    let count = locations.len() as f64;
    let latitude: f64 = locations
        .iter()
        .map(|location| location.coordinate.latitude)
        .sum();
    let longitude: f64 = locations
        .iter()
        .map(|location| location.coordinate.longitude)
        .sum();

    Some(Coordinate::new(latitude / count, longitude / count))
}

fn average_activity(locations: &[&Location], activity_seconds: &FxHashMap<CoordKey, f64>) -> f64 {
    if locations.is_empty() {
        return 0.0;
    }

    let total: f64 = locations
        .iter()
        .map(|location| {
            activity_seconds
                .get(&location.key())
                .copied()
                .unwrap_or(0.0)
        })
        .sum();

    total / locations.len() as f64
}
