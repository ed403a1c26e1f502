use fxhash::FxHashMap;
use peregrine_durations::{
    coordinate::{CoordKey, Coordinate},
    transport_mode::TransportMode,
};
use serde::{Deserialize, Serialize};

/// A named stop. Two locations are the same place exactly when their
/// coordinates are equal; names are display labels and never affect
/// routing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub coordinate: Coordinate,
    pub name: String,
}

impl Location {
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            name: name.into(),
        }
    }

    pub fn key(&self) -> CoordKey {
        self.coordinate.key()
    }
}

/// Time spent at a stop, in seconds. A scoring input only; activities
/// never gate where the route may go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub coordinate: Coordinate,
    pub duration_seconds: f64,
}

/// Everything the optimizers need to order one trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub start: Location,
    pub end: Location,
    pub waypoints: Vec<Location>,
    pub activities: Vec<Activity>,
    pub mode: TransportMode,
}

impl Trip {
    /// Activity seconds per distinct coordinate. Activities sharing a
    /// coordinate add up.
    pub fn activity_seconds(&self) -> FxHashMap<CoordKey, f64> {
        let mut seconds: FxHashMap<CoordKey, f64> = FxHashMap::default();

        for activity in &self.activities {
            *seconds.entry(activity.coordinate.key()).or_insert(0.0) += activity.duration_seconds;
        }

        seconds
    }
}
