use fxhash::FxHashMap;
use peregrine_durations::{
    cache::DurationCache,
    coordinate::{CoordKey, Coordinate},
    estimate::estimate_duration,
    source::DurationSource,
    transport_mode::TransportMode,
};
use tracing::warn;

use crate::problem::duration_matrix::DurationMatrix;

/// Layered duration lookups: cache first, then one batched source call
/// for the misses, then crow-flies estimates for whatever the source
/// could not route. Everything freshly learned is written back to the
/// cache, estimates included.
pub struct DurationResolver<C> {
    source: DurationSource,
    cache: C,
}

impl<C: DurationCache> DurationResolver<C> {
    pub fn new(source: DurationSource, cache: C) -> Self {
        Self { source, cache }
    }

    /// Durations in seconds from `start` to every distinct coordinate in
    /// `ends`, keyed by coordinate identity. Never fails: unroutable pairs
    /// get estimated instead.
    pub async fn resolve_from_start(
        &self,
        start: &Coordinate,
        ends: &[Coordinate],
        mode: TransportMode,
    ) -> FxHashMap<CoordKey, f64> {
        let mut resolved = FxHashMap::default();
        let mut misses: Vec<Coordinate> = Vec::new();

        for end in ends {
            let key = end.key();
            if resolved.contains_key(&key) || misses.iter().any(|miss| miss.key() == key) {
                continue;
            }

            match self.cached(start, end, mode) {
                Some(seconds) => {
                    resolved.insert(key, seconds);
                }
                None => misses.push(*end),
            }
        }

        if misses.is_empty() {
            return resolved;
        }

        let fetched = self.source.fetch_from_start(start, &misses, mode).await;

        for miss in &misses {
            let seconds = match fetched.get(&miss.key()) {
                Some(Some(seconds)) => *seconds,
                _ => estimate_duration(start, miss, mode),
            };

            self.store(start, miss, seconds, mode);
            resolved.insert(miss.key(), seconds);
        }

        resolved
    }

    /// Single-pair lookup through the same cache, source and estimate
    /// layers as [`Self::resolve_from_start`].
    pub async fn resolve_one(&self, from: &Coordinate, to: &Coordinate, mode: TransportMode) -> f64 {
        if let Some(seconds) = self.cached(from, to, mode) {
            return seconds;
        }

        let fetched = self
            .source
            .fetch_from_start(from, std::slice::from_ref(to), mode)
            .await;

        let seconds = match fetched.get(&to.key()) {
            Some(Some(seconds)) => *seconds,
            _ => estimate_duration(from, to, mode),
        };

        self.store(from, to, seconds, mode);

        seconds
    }

    /// Full pairwise matrix over `coordinates`, one batched resolution per
    /// origin. The diagonal is zero and negative durations are clamped out.
    pub async fn duration_matrix(
        &self,
        coordinates: &[Coordinate],
        mode: TransportMode,
    ) -> DurationMatrix {
        let n = coordinates.len();
        let mut durations = vec![0.0; n * n];

        for (i, from) in coordinates.iter().enumerate() {
            let ends: Vec<Coordinate> = coordinates
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, to)| *to)
                .collect();

            let resolved = self.resolve_from_start(from, &ends, mode).await;

            for (j, to) in coordinates.iter().enumerate() {
                if j != i {
                    durations[i * n + j] = resolved[&to.key()].max(0.0);
                }
            }
        }

        DurationMatrix::from_flat(durations, n)
    }

    /// Usable cached duration, if any. Non-positive entries are stale
    /// markers and count as misses, and a failing cache only costs us a
    /// lookup, never the optimization.
    fn cached(&self, from: &Coordinate, to: &Coordinate, mode: TransportMode) -> Option<f64> {
        match self.cache.get(from, to, mode) {
            Ok(Some(seconds)) if seconds > 0.0 => Some(seconds),
            Ok(_) => None,
            Err(error) => {
                warn!("DurationResolver: cache read failed: {}", error);
                None
            }
        }
    }

    fn store(&self, from: &Coordinate, to: &Coordinate, seconds: f64, mode: TransportMode) {
        if let Err(error) = self.cache.put(from, to, seconds, mode) {
            warn!("DurationResolver: cache write failed: {}", error);
        }
    }
}
