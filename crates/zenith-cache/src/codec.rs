use zenith_body::SurfacePoint;

use crate::{ElevationCache, SaveStore};

/// Store key carrying the scan-logic revision the entries were computed by.
pub const SCAN_REV_KEY: &str = "scan-rev";
/// Prefix of per-body entries; the remainder of the key is the body name.
pub const ELEVATION_PREFIX: &str = "elevation:";

/// Populate the cache from a persisted store.
///
/// A missing or mismatched revision stamp invalidates the whole store: the
/// cache is left empty and every entry is ignored, to be recomputed on
/// demand. A single malformed entry is logged and skipped without aborting
/// the rest of the load.
pub fn load_cache(cache: &mut ElevationCache, store: &SaveStore, current_rev: u64) {
    cache.clear();
    match store.get(SCAN_REV_KEY).map(str::parse::<u64>) {
        None => {
            log::info!("no previously cached elevation data found");
            return;
        }
        Some(Err(e)) => {
            log::warn!("unreadable scan rev stamp ({e}); ignoring cached elevation data");
            return;
        }
        Some(Ok(rev)) if rev != current_rev => {
            log::info!("ignoring cached elevation data with scan rev {rev} (current = {current_rev})");
            return;
        }
        Some(Ok(_)) => {}
    }
    for (key, value) in store.iter() {
        let Some(name) = key.strip_prefix(ELEVATION_PREFIX) else {
            continue;
        };
        match value.parse::<SurfacePoint>() {
            Ok(point) => {
                log::debug!("read max elevation of {name}: {}", point.altitude);
                cache.insert(name.to_string(), point);
            }
            Err(e) => log::warn!("skipping malformed elevation entry for {name}: {e}"),
        }
    }
    log::info!("loaded {} cached elevations (scan rev {current_rev})", cache.len());
}

/// Write the cache into a store: the revision stamp first, then one entry
/// per body in alphabetical name order for stable diffs.
///
/// An empty cache writes nothing at all, leaving whatever the store already
/// holds untouched.
pub fn save_cache(cache: &ElevationCache, store: &mut SaveStore, current_rev: u64) {
    if cache.is_empty() {
        return;
    }
    store.set(SCAN_REV_KEY, current_rev.to_string());
    let mut names: Vec<&str> = cache.iter().map(|(name, _)| name).collect();
    names.sort_unstable();
    for name in names {
        if let Some(point) = cache.get(name) {
            log::debug!("write max elevation of {name}: {}", point.altitude);
            store.set(format!("{ELEVATION_PREFIX}{name}"), point.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cached(entries: &[(&str, SurfacePoint)]) -> ElevationCache {
        let mut cache = ElevationCache::default();
        for (name, point) in entries {
            cache.insert(name.to_string(), *point);
        }
        cache
    }

    #[test]
    fn save_then_load_round_trips() {
        let cache = cached(&[
            ("Gaia", SurfacePoint::new(12.5, -33.0, 8848.25)),
            ("Ares", SurfacePoint::new(-2.0, 110.5, 21229.0)),
        ]);
        let mut store = SaveStore::new();
        save_cache(&cache, &mut store, 7);

        let mut reloaded = ElevationCache::default();
        load_cache(&mut reloaded, &store, 7);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(
            reloaded.get("Gaia"),
            Some(&SurfacePoint::new(12.5, -33.0, 8848.25))
        );
        assert_eq!(
            reloaded.get("Ares"),
            Some(&SurfacePoint::new(-2.0, 110.5, 21229.0))
        );
    }

    #[test]
    fn mismatched_rev_invalidates_everything() {
        let cache = cached(&[("Gaia", SurfacePoint::new(1.0, 2.0, 3.0))]);
        let mut store = SaveStore::new();
        save_cache(&cache, &mut store, 7);

        let mut reloaded = cached(&[("Stale", SurfacePoint::new(0.0, 0.0, 0.0))]);
        load_cache(&mut reloaded, &store, 8);
        assert!(reloaded.is_empty());
    }

    #[test]
    fn missing_stamp_loads_nothing() {
        let mut store = SaveStore::new();
        store.set("elevation:Gaia", "3.0, 1.0, 2.0");
        let mut cache = ElevationCache::default();
        load_cache(&mut cache, &store, 7);
        assert!(cache.is_empty());
    }

    #[test]
    fn malformed_entry_is_skipped_not_fatal() {
        let mut store = SaveStore::new();
        store.set(SCAN_REV_KEY, "7");
        store.set("elevation:Torn", "only, two");
        store.set("elevation:Gaia", "8848.25, 12.5, -33.0");
        store.set("unrelated", "ignored");
        let mut cache = ElevationCache::default();
        load_cache(&mut cache, &store, 7);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("Gaia").is_some());
    }

    #[test]
    fn empty_cache_saves_nothing() {
        let cache = ElevationCache::default();
        let mut store = SaveStore::new();
        save_cache(&cache, &mut store, 7);
        assert!(store.is_empty());
    }

    #[test]
    fn stamp_leads_and_bodies_are_alphabetical() {
        let cache = cached(&[
            ("Zephyr", SurfacePoint::new(0.0, 0.0, 1.0)),
            ("Ash", SurfacePoint::new(0.0, 0.0, 2.0)),
        ]);
        let mut store = SaveStore::new();
        save_cache(&cache, &mut store, 7);
        let keys: Vec<&str> = store.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["scan-rev", "elevation:Ash", "elevation:Zephyr"]);
    }
}
