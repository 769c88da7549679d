use std::fs;
use std::io;
use std::path::Path;

use crate::ElevationCache;

/// Render the human-inspectable export: a comment header, then one block per
/// cached body in alphabetical name order.
pub fn render_dump(cache: &ElevationCache, file_name: &str) -> String {
    let mut names: Vec<&str> = cache.iter().map(|(name, _)| name).collect();
    names.sort_unstable();

    let mut out = String::with_capacity(256 + names.len() * 128);
    out.push_str(&format!("// {file_name}\n"));
    out.push_str("// This file is auto-generated and will be overwritten. Do not hand-edit.\n");
    out.push_str("//\n");
    out.push_str("// Highest points of celestial bodies, as calculated by zenith\n");
    out.push_str("//\n");
    out.push_str(&format!("// {} bodies present in file\n", names.len()));
    for name in names {
        let Some(point) = cache.get(name) else {
            continue;
        };
        out.push('\n');
        out.push_str("MAX_ELEVATION\n{\n");
        out.push_str(&format!("    name = {name}\n"));
        out.push_str(&format!("    elevation = {}\n", point.altitude));
        out.push_str(&format!("    latitude = {}\n", point.latitude));
        out.push_str(&format!("    longitude = {}\n", point.longitude));
        out.push_str("}\n");
    }
    out
}

/// Write the dump to disk, returning how many bodies it contains.
pub fn write_dump(cache: &ElevationCache, path: &Path) -> io::Result<usize> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("zenith-dump.cfg");
    fs::write(path, render_dump(cache, file_name))?;
    Ok(cache.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zenith_body::SurfacePoint;

    #[test]
    fn blocks_are_alphabetical_and_complete() {
        let mut cache = ElevationCache::default();
        cache.insert("Rime".to_string(), SurfacePoint::new(5.5, -20.0, 3200.0));
        cache.insert("Ash".to_string(), SurfacePoint::new(-45.0, 170.25, 999.5));
        let text = render_dump(&cache, "out.cfg");

        assert!(text.starts_with("// out.cfg\n"));
        assert!(text.contains("// 2 bodies present in file"));
        let ash = text.find("name = Ash").unwrap();
        let rime = text.find("name = Rime").unwrap();
        assert!(ash < rime);
        assert!(text.contains("    elevation = 999.5\n"));
        assert!(text.contains("    latitude = -45\n"));
        assert!(text.contains("    longitude = 170.25\n"));
        assert_eq!(text.matches("MAX_ELEVATION").count(), 2);
    }

    #[test]
    fn empty_cache_dumps_only_the_header() {
        let text = render_dump(&ElevationCache::default(), "out.cfg");
        assert!(text.contains("// 0 bodies present in file"));
        assert!(!text.contains("MAX_ELEVATION"));
    }
}
