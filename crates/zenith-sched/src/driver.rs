use std::time::{Duration, Instant};

use zenith_body::StarSystem;
use zenith_cache::ElevationCache;

use crate::priority_order;

/// What a precompute pass accomplished.
#[derive(Clone, Copy, Debug)]
pub struct PrecalcReport {
    /// Bodies whose result is now cached (instant for already-cached ones).
    pub computed: usize,
    /// Solid-surface bodies in the system.
    pub total: usize,
    pub elapsed: Duration,
}

impl PrecalcReport {
    /// Share of solid-surface bodies now cached, 0-100.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        (100.0 * self.computed as f64 / self.total as f64) as u32
    }
}

/// Walk solid-surface bodies in priority order, computing each highest point
/// until the wall-clock budget is exhausted. `None` runs to completion.
///
/// The budget is advisory and checked only between bodies: a scan in
/// progress always runs to completion. Already-cached bodies return
/// instantly, so repeated sessions make incremental progress until the whole
/// system is cached.
pub fn precalculate(
    system: &StarSystem,
    cache: &mut ElevationCache,
    budget: Option<Duration>,
) -> PrecalcReport {
    let order: Vec<usize> = priority_order(system)
        .into_iter()
        .filter(|&index| system.body(index).solid_surface())
        .collect();
    match budget {
        Some(limit) => log::info!(
            "pre-calculating maximum elevations for up to {} ms ({} total bodies)",
            limit.as_millis(),
            order.len()
        ),
        None => log::info!(
            "pre-calculating maximum elevations for all {} bodies",
            order.len()
        ),
    }

    let started = Instant::now();
    let mut computed = 0;
    for &index in &order {
        cache.max_elevation(system.body(index));
        computed += 1;
        if budget.is_some_and(|limit| started.elapsed() > limit) {
            break;
        }
    }

    let report = PrecalcReport {
        computed,
        total: order.len(),
        elapsed: started.elapsed(),
    };
    log::info!(
        "elapsed time {} ms, {}% of bodies have been calculated",
        report.elapsed.as_millis(),
        report.percent()
    );
    report
}
