//! Per-body elevation results: in-memory cache, versioned persistence, and
//! the human-inspectable dump export.
#![forbid(unsafe_code)]

mod cache;
mod codec;
mod dump;
mod store;

pub use cache::ElevationCache;
pub use codec::{ELEVATION_PREFIX, SCAN_REV_KEY, load_cache, save_cache};
pub use dump::{render_dump, write_dump};
pub use store::SaveStore;
