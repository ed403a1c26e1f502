use peregrine_durations::{cache::DurationCache, transport_mode::TransportMode};
use tracing::{Level, debug, instrument};

use crate::solver::{
    progressive::ProgressiveOptimizer,
    route::{self, OrderedRoute},
};

impl<C: DurationCache> ProgressiveOptimizer<C> {
    /// Repairs a route after stops were inserted into it.
    ///
    /// `added_indexes` are positions into `route.ordered_locations`. For
    /// each interior added stop the two segments touching it are
    /// re-resolved, but only where they carry `invalid_sentinel`; every
    /// other segment keeps its stored duration. Added stops at the very
    /// start or end of the route have no two surrounding segments and are
    /// skipped. The total is summed afresh once all indexes are processed.
    #[instrument(skip_all, level = Level::DEBUG)]
    pub async fn recompute(
        &self,
        mut route: OrderedRoute,
        added_indexes: &[usize],
        mode: TransportMode,
        invalid_sentinel: f64,
        mut on_progress: impl FnMut(f32),
    ) -> OrderedRoute {
        debug!(
            "ProgressiveOptimizer: recomputing {} added stops",
            added_indexes.len()
        );

        let last = route.ordered_locations.len().saturating_sub(1);

        for (processed, &index) in added_indexes.iter().enumerate() {
            if index > 0 && index < last {
                for segment in [index - 1, index] {
                    if route.segment_durations[segment] == invalid_sentinel {
                        let from = route.ordered_locations[segment].coordinate;
                        let to = route.ordered_locations[segment + 1].coordinate;

                        route.segment_durations[segment] = self
                            .resolver()
                            .resolve_one(&from, &to, mode)
                            .await
                            .max(0.0);
                    }
                }
            }

            on_progress((processed + 1) as f32 / added_indexes.len() as f32);
        }

        route.total_duration = route::total_or_unreachable(route.segment_durations.iter().sum());
        on_progress(1.0);

        route
    }
}
