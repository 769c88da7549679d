//! Coarse-to-fine search for the highest point on a body's surface.
#![forbid(unsafe_code)]

use zenith_body::{SurfacePoint, Terrain};

/// Revision of the scanning logic. Persisted caches carry this stamp and are
/// discarded wholesale when it no longer matches, so bump it whenever a
/// change here would alter the search output.
pub const SCAN_REV: u64 = 1;

/// Tuning knobs for a whole-surface scan.
#[derive(Clone, Copy, Debug)]
pub struct ScanParams {
    /// Approximate sample count of the initial whole-sphere grid.
    pub initial_samples: usize,
    /// How many of the best coarse candidates survive into refinement.
    /// Halved (integer division, floor 1) each subsequent round.
    pub keep: usize,
    /// Stop refining once the latitude increment is this small, in degrees.
    pub smallest_increment: f64,
    /// Hard cap on refinement rounds. The 0.125 shrink factor converges in
    /// well under this from any realistic grid spacing.
    pub max_rounds: u32,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            initial_samples: 50_000,
            keep: 100,
            smallest_increment: 0.001,
            max_rounds: 16,
        }
    }
}

/// Cost accounting for one scan.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanMetrics {
    /// Terrain queries issued, coarse grid included.
    pub samples: u64,
    /// Refinement rounds that expanded a sub-grid.
    pub rounds: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct ScanOutcome {
    pub highest: SurfacePoint,
    pub metrics: ScanMetrics,
}

/// Quasi-uniform grid over the whole sphere, both poles pinned.
///
/// Latitude steps by `180 / sqrt(n)`; the longitude step at each latitude is
/// widened by `1 / cos(latitude)` so the sample density per unit area stays
/// roughly constant toward the poles. Every interior sample has |lat| < 90;
/// the exact poles are emitted as two fixed extra samples.
pub fn coarse_grid(terrain: &dyn Terrain, target_samples: usize) -> Vec<SurfacePoint> {
    let lat_step = 180.0 / (target_samples.max(1) as f64).sqrt();
    let mut samples = Vec::with_capacity(target_samples + target_samples / 16 + 2);
    samples.push(SurfacePoint::at(terrain, 90.0, 0.0));
    let mut latitude = lat_step - 90.0;
    while latitude < 90.0 - lat_step {
        let lon_step = lat_step / latitude.to_radians().cos();
        let mut longitude = -180.0;
        while longitude < 180.0 {
            samples.push(SurfacePoint::at(terrain, latitude, longitude));
            longitude += lon_step;
        }
        latitude += lat_step;
    }
    samples.push(SurfacePoint::at(terrain, -90.0, 0.0));
    samples
}

fn sort_by_altitude(points: &mut [SurfacePoint]) {
    points.sort_unstable_by(|a, b| b.altitude.total_cmp(&a.altitude));
}

/// Narrow a candidate set down to the single highest discoverable point.
///
/// Each round keeps the best `keep` candidates, samples a shrinking sub-grid
/// around each, and continues with the union until the increment reaches
/// `smallest_increment`. Retained candidates are carried into the next
/// round's pool, which keeps the per-round best monotonically non-decreasing
/// and lets a pole candidate survive without ever spawning a sub-grid there
/// (the longitude step is undefined at |lat| = 90).
///
/// Ties at equal altitude resolve to whichever point the sort places first;
/// that choice is deterministic for a given input but otherwise unspecified.
///
/// Returns `None` only for an empty candidate set.
pub fn refine(
    terrain: &dyn Terrain,
    mut increment: f64,
    mut candidates: Vec<SurfacePoint>,
    params: &ScanParams,
    metrics: &mut ScanMetrics,
) -> Option<SurfacePoint> {
    let mut keep = params.keep.max(1);
    let mut rounds = 0u32;
    loop {
        sort_by_altitude(&mut candidates);
        candidates.truncate(keep);
        if increment <= params.smallest_increment || rounds >= params.max_rounds {
            metrics.rounds = rounds;
            return candidates.first().copied();
        }
        rounds += 1;

        let small = 0.125 * increment;
        let mut next = Vec::with_capacity(candidates.len() * 112);
        next.extend_from_slice(&candidates);
        for candidate in &candidates {
            if candidate.latitude.abs() >= 90.0 {
                continue;
            }
            let lon_increment = increment / candidate.latitude.to_radians().cos();
            let small_lon = 0.1 * lon_increment;
            let mut latitude = candidate.latitude - 0.5 * increment;
            while latitude <= candidate.latitude + 0.5 * increment {
                let mut longitude = candidate.longitude - 0.5 * lon_increment;
                while longitude <= candidate.longitude + 0.5 * lon_increment {
                    next.push(SurfacePoint::at(terrain, latitude, longitude));
                    metrics.samples += 1;
                    longitude += small_lon;
                }
                latitude += small;
            }
        }

        candidates = next;
        increment = small;
        keep = (keep / 2).max(1);
    }
}

/// Full scan: coarse grid, then iterative refinement down to the smallest
/// increment. This is the expensive operation the elevation cache memoizes.
pub fn scan(terrain: &dyn Terrain, params: &ScanParams) -> ScanOutcome {
    let mut metrics = ScanMetrics::default();
    let grid = coarse_grid(terrain, params.initial_samples);
    metrics.samples = grid.len() as u64;
    let increment = 180.0 / (params.initial_samples.max(1) as f64).sqrt();
    let highest = refine(terrain, increment, grid, params, &mut metrics)
        .unwrap_or(SurfacePoint::new(90.0, 0.0, f64::NAN));
    ScanOutcome { highest, metrics }
}
