use serde::{Deserialize, Serialize};

use crate::problem::location::Location;

/// Marks a leg whose duration could not be resolved.
pub const LARGE_DURATION: f64 = 1e9;

/// Totals at or above this are reported as [`UNREACHABLE_TOTAL`].
pub const UNREACHABLE_THRESHOLD: f64 = LARGE_DURATION / 20.0;

/// Sentinel total for a route with at least one unresolvable leg. Distinct
/// from every real total, which is non-negative.
pub const UNREACHABLE_TOTAL: f64 = -1.0;

/// An ordered trip: locations in visit order plus the travel duration of
/// every leg. `segment_durations[i]` is the leg from `ordered_locations[i]`
/// to `ordered_locations[i + 1]`, so there is always one segment fewer
/// than there are locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedRoute {
    pub ordered_locations: Vec<Location>,
    pub total_duration: f64,
    pub segment_durations: Vec<f64>,
}

/// Applies the unreachable rule to a summed total.
pub(crate) fn total_or_unreachable(total: f64) -> f64 {
    if total >= UNREACHABLE_THRESHOLD {
        UNREACHABLE_TOTAL
    } else {
        total
    }
}
