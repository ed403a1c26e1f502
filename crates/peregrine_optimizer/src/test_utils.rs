use anyhow::anyhow;
use peregrine_durations::{
    cache::DurationCache, coordinate::Coordinate, transport_mode::TransportMode,
};

/// Cache whose reads and writes always fail, for exercising degraded
/// operation.
pub(crate) struct FailingCache;

impl DurationCache for FailingCache {
    fn get(
        &self,
        _from: &Coordinate,
        _to: &Coordinate,
        _mode: TransportMode,
    ) -> Result<Option<f64>, anyhow::Error> {
        Err(anyhow!("cache backend offline"))
    }

    fn put(
        &self,
        _from: &Coordinate,
        _to: &Coordinate,
        _seconds: f64,
        _mode: TransportMode,
    ) -> Result<(), anyhow::Error> {
        Err(anyhow!("cache backend offline"))
    }
}

pub(crate) fn geneva() -> Coordinate {
    Coordinate::new(46.2044, 6.1432)
}

pub(crate) fn zurich() -> Coordinate {
    Coordinate::new(47.3769, 8.5417)
}
