use crate::{coordinate::Coordinate, transport_mode::TransportMode};

/// Estimated legs never go under five minutes, however close the points.
const MIN_ESTIMATE_MINUTES: f64 = 5.0;

/// Straight-line duration estimate in seconds.
///
/// Used when neither the cache nor the table service can provide a routed
/// duration: great-circle distance at the mode's average speed, floored at
/// five minutes. A crude approximation, only ever a last resort.
pub fn estimate_duration(from: &Coordinate, to: &Coordinate, mode: TransportMode) -> f64 {
    let distance_km = from.haversine_distance_km(to);
    let minutes = (distance_km / mode.fallback_speed_kmh() * 60.0).max(MIN_ESTIMATE_MINUTES);

    minutes * 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn car_covers_80_km_in_about_an_hour() {
        // One degree of latitude is ~111.2 km, so head 80 km due north.
        let from = Coordinate::new(46.0, 6.0);
        let to = Coordinate::new(46.0 + 80.0 / 111.195, 6.0);

        let seconds = estimate_duration(&from, &to, TransportMode::Car);

        assert!((seconds - 3600.0).abs() < 30.0, "got {seconds} s");
    }

    #[test]
    fn short_hops_are_floored_at_five_minutes() {
        let from = Coordinate::new(46.2044, 6.1432);
        let to = Coordinate::new(46.2045, 6.1432);

        assert_eq!(estimate_duration(&from, &to, TransportMode::Walking), 300.0);
        assert_eq!(estimate_duration(&from, &from, TransportMode::Car), 300.0);
    }

    #[test]
    fn train_beats_tram_over_the_same_leg() {
        let from = Coordinate::new(46.2044, 6.1432);
        let to = Coordinate::new(47.3769, 8.5417);

        let train = estimate_duration(&from, &to, TransportMode::Train);
        let tram = estimate_duration(&from, &to, TransportMode::Tram);

        assert!(train < tram);
    }
}
