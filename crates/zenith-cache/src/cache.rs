use std::time::Instant;

use hashbrown::HashMap;
use zenith_body::{Body, SurfacePoint};
use zenith_scan::{ScanParams, scan};

/// In-memory map from body name to its highest surface point.
///
/// Constructed empty at session start, filled either by the persistence
/// codec or by scanning on first query. Entries are never recomputed or
/// individually removed; the only bulk operation is `clear`, used when a
/// persisted store fails version validation.
pub struct ElevationCache {
    entries: HashMap<String, SurfacePoint>,
    params: ScanParams,
}

impl ElevationCache {
    pub fn new(params: ScanParams) -> Self {
        Self {
            entries: HashMap::new(),
            params,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&SurfacePoint> {
        self.entries.get(name)
    }

    pub fn insert(&mut self, name: String, point: SurfacePoint) {
        self.entries.insert(name, point);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SurfacePoint)> {
        self.entries.iter().map(|(name, point)| (name.as_str(), point))
    }

    /// Altitude of the highest point on the body, scanning at most once per
    /// cache lifetime. Bodies without a solid surface yield NaN and never
    /// touch the cache.
    pub fn max_elevation(&mut self, body: &Body) -> f64 {
        if !body.solid_surface() {
            return f64::NAN;
        }
        if let Some(point) = self.entries.get(&body.name) {
            return point.altitude;
        }
        let Some(terrain) = body.terrain.as_deref() else {
            return f64::NAN;
        };
        let started = Instant::now();
        let outcome = scan(terrain, &self.params);
        let highest = outcome.highest;
        log::info!(
            "scanned highest elevation on {} in {} ms ({} samples): {:.0} m at latitude={}, longitude={}",
            body.name,
            started.elapsed().as_millis(),
            outcome.metrics.samples,
            highest.altitude,
            highest.latitude,
            highest.longitude
        );
        self.entries.insert(body.name.clone(), highest);
        highest.altitude
    }
}

impl Default for ElevationCache {
    fn default() -> Self {
        Self::new(ScanParams::default())
    }
}
