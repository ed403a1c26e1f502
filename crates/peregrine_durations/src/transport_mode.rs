use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// How the traveller moves between stops.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Car,
    Walking,
    Train,
    Bus,
    Tram,
}

impl TransportMode {
    /// Routing profile used for table requests. The routing service has no
    /// transit profiles, so train, bus and tram degrade to driving
    /// durations.
    pub fn osrm_profile(&self) -> OsrmProfile {
        match self {
            TransportMode::Walking => OsrmProfile::Walking,
            TransportMode::Car | TransportMode::Train | TransportMode::Bus | TransportMode::Tram => {
                OsrmProfile::Driving
            }
        }
    }

    /// Average speed assumed when a leg has to be estimated.
    pub fn fallback_speed_kmh(&self) -> f64 {
        match self {
            TransportMode::Car => 80.0,
            TransportMode::Train => 100.0,
            TransportMode::Walking | TransportMode::Bus | TransportMode::Tram => 60.0,
        }
    }
}

/// https://project-osrm.org/docs/v5.24.0/api/#table-service
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OsrmProfile {
    Driving,
    Walking,
}

impl Display for OsrmProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                OsrmProfile::Driving => "driving",
                OsrmProfile::Walking => "walking",
            }
        )
    }
}
