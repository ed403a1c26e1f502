use fxhash::FxHashMap;
use tracing::warn;

use crate::{
    coordinate::{CoordKey, Coordinate},
    table_api::TableClient,
    transport_mode::TransportMode,
};

/// Where batched travel durations come from.
pub enum DurationSource {
    /// Routed durations from an OSRM-compatible table service.
    Table(TableClient),

    /// Straight-line durations at a fixed speed. No network involved.
    AsTheCrowFlies { speed_kmh: f64 },

    /// Canned durations, for tests and offline runs.
    Fixed(FixedDurations),
}

impl DurationSource {
    /// One batched lookup from `start` to every coordinate in `ends`,
    /// keyed by the end's coordinate identity.
    ///
    /// Always yields one entry per requested end; empty `ends` return an
    /// empty map without touching the network. A failed lookup is logged
    /// and maps every end to `None` so callers can fall back to estimates
    /// instead of aborting.
    pub async fn fetch_from_start(
        &self,
        start: &Coordinate,
        ends: &[Coordinate],
        mode: TransportMode,
    ) -> FxHashMap<CoordKey, Option<f64>> {
        if ends.is_empty() {
            return FxHashMap::default();
        }

        match self {
            DurationSource::Table(client) => {
                match client.fetch_row(start, ends, mode.osrm_profile()).await {
                    Ok(row) => ends.iter().map(|end| end.key()).zip(row).collect(),
                    Err(error) => {
                        warn!("DurationSource: table lookup failed: {}", error);
                        ends.iter().map(|end| (end.key(), None)).collect()
                    }
                }
            }
            DurationSource::AsTheCrowFlies { speed_kmh } => ends
                .iter()
                .map(|end| {
                    let seconds = start.haversine_distance(end) / (speed_kmh / 3.6);
                    (end.key(), Some(seconds))
                })
                .collect(),
            DurationSource::Fixed(durations) => ends
                .iter()
                .map(|end| (end.key(), durations.get(start, end)))
                .collect(),
        }
    }
}

/// Fixed per-pair durations in seconds. Pairs not present are reported as
/// unroutable.
#[derive(Debug, Clone, Default)]
pub struct FixedDurations {
    durations: FxHashMap<(CoordKey, CoordKey), f64>,
}

impl FixedDurations {
    pub fn insert(&mut self, from: &Coordinate, to: &Coordinate, seconds: f64) {
        self.durations.insert((from.key(), to.key()), seconds);
    }

    pub fn insert_symmetric(&mut self, a: &Coordinate, b: &Coordinate, seconds: f64) {
        self.insert(a, b, seconds);
        self.insert(b, a, seconds);
    }

    fn get(&self, from: &Coordinate, to: &Coordinate) -> Option<f64> {
        self.durations.get(&(from.key(), to.key())).copied()
    }
}
