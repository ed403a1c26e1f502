/// Scoring weights and search limits for the progressive optimizer.
#[derive(Debug, Clone)]
pub struct OptimizerParams {
    /// How many of the nearest unvisited stops are scored each step.
    pub nearest_candidates: usize,

    /// Divides a candidate's activity seconds before they enter its score.
    pub activity_time_divisor: f64,

    /// Applied to the turn angle when a candidate doubles back on the
    /// route or repeats the current heading too closely.
    pub zigzag_angle_multiplier: f64,

    /// Applied to a candidate's activity-time shortfall against the
    /// average of the remaining stops. Disabled at 0.
    pub activity_diff_multiplier: f64,

    /// Applied to the distance between a candidate and the centroid of
    /// the remaining stops.
    pub center_distance_multiplier: f64,

    /// Applied to the closeness-to-end term that keeps the route from
    /// drifting towards the end while stops remain.
    pub end_direction_multiplier: f64,
}

impl Default for OptimizerParams {
    fn default() -> Self {
        Self {
            nearest_candidates: 7,
            activity_time_divisor: 8.0,
            zigzag_angle_multiplier: 10.0,
            activity_diff_multiplier: 0.0,
            center_distance_multiplier: 1.0,
            end_direction_multiplier: 75.0,
        }
    }
}
