use std::sync::Arc;

use fxhash::FxHashMap;
use parking_lot::RwLock;

use crate::{
    coordinate::{CoordKey, Coordinate},
    transport_mode::TransportMode,
};

/// Directional cache key: `A -> B` and `B -> A` are independent entries,
/// since real-world travel times are often asymmetric.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DurationKey {
    from: CoordKey,
    to: CoordKey,
    mode: TransportMode,
}

impl DurationKey {
    pub fn new(from: &Coordinate, to: &Coordinate, mode: TransportMode) -> Self {
        Self {
            from: from.key(),
            to: to.key(),
            mode,
        }
    }
}

/// Storage boundary for observed travel durations in seconds.
///
/// Implementations may be backed by anything that survives across runs.
/// Callers treat a non-positive stored value as a miss, and read or write
/// failures are logged by callers and never abort an optimization.
pub trait DurationCache {
    fn get(
        &self,
        from: &Coordinate,
        to: &Coordinate,
        mode: TransportMode,
    ) -> Result<Option<f64>, anyhow::Error>;

    fn put(
        &self,
        from: &Coordinate,
        to: &Coordinate,
        seconds: f64,
        mode: TransportMode,
    ) -> Result<(), anyhow::Error>;
}

impl<C: DurationCache + ?Sized> DurationCache for Arc<C> {
    fn get(
        &self,
        from: &Coordinate,
        to: &Coordinate,
        mode: TransportMode,
    ) -> Result<Option<f64>, anyhow::Error> {
        (**self).get(from, to, mode)
    }

    fn put(
        &self,
        from: &Coordinate,
        to: &Coordinate,
        seconds: f64,
        mode: TransportMode,
    ) -> Result<(), anyhow::Error> {
        (**self).put(from, to, seconds, mode)
    }
}

/// In-memory duration store, safe under concurrent readers and writers
/// with last-write-wins semantics. Unbounded; eviction belongs to
/// longer-lived storage layers.
#[derive(Default)]
pub struct InMemoryDurationCache {
    entries: RwLock<FxHashMap<DurationKey, f64>>,
}

impl InMemoryDurationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl DurationCache for InMemoryDurationCache {
    fn get(
        &self,
        from: &Coordinate,
        to: &Coordinate,
        mode: TransportMode,
    ) -> Result<Option<f64>, anyhow::Error> {
        let entries = self.entries.read();

        Ok(entries.get(&DurationKey::new(from, to, mode)).copied())
    }

    fn put(
        &self,
        from: &Coordinate,
        to: &Coordinate,
        seconds: f64,
        mode: TransportMode,
    ) -> Result<(), anyhow::Error> {
        let mut entries = self.entries.write();
        entries.insert(DurationKey::new(from, to, mode), seconds);

        Ok(())
    }
}
