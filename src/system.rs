//! Star-system definitions: TOML config and noise-driven terrain.

use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use serde::Deserialize;
use zenith_body::{Body, StarSystem, Terrain};

static DEFAULT_SYSTEM: &str = include_str!("../assets/demo-system.toml");

#[derive(Deserialize)]
struct SystemConfig {
    #[serde(default)]
    body: Vec<BodyConfig>,
}

#[derive(Deserialize)]
struct BodyConfig {
    name: String,
    /// Name of the body this one orbits; omit for the central body.
    #[serde(default)]
    parent: Option<String>,
    /// Semi-major axis of the body's own orbit, in meters.
    #[serde(default)]
    sma: f64,
    #[serde(default)]
    home: bool,
    /// Terrain parameters; a body without this section has no solid surface.
    #[serde(default)]
    surface: Option<TerrainConfig>,
}

#[derive(Clone, Copy, Deserialize)]
struct TerrainConfig {
    seed: i32,
    #[serde(default = "default_frequency")]
    frequency: f32,
    /// Peak-to-trough scale of the broad noise layer, in meters.
    #[serde(default = "default_amplitude")]
    amplitude: f64,
    /// Fraction of the amplitude contributed by a finer detail layer.
    #[serde(default = "default_detail")]
    detail: f64,
}

fn default_frequency() -> f32 {
    1.6
}
fn default_amplitude() -> f64 {
    4_000.0
}
fn default_detail() -> f64 {
    0.2
}

/// Deterministic synthetic terrain: two octaves of OpenSimplex2 sampled on
/// the unit sphere, so there is no seam at the antimeridian and the poles
/// are well-defined.
struct NoiseTerrain {
    broad: FastNoiseLite,
    fine: FastNoiseLite,
    amplitude: f64,
    detail: f64,
}

impl NoiseTerrain {
    fn new(config: &TerrainConfig) -> Self {
        let mut broad = FastNoiseLite::with_seed(config.seed);
        broad.set_noise_type(Some(NoiseType::OpenSimplex2));
        broad.set_frequency(Some(config.frequency));
        let mut fine = FastNoiseLite::with_seed(config.seed ^ 0x5f37_59df);
        fine.set_noise_type(Some(NoiseType::OpenSimplex2));
        fine.set_frequency(Some(config.frequency * 6.0));
        Self {
            broad,
            fine,
            amplitude: config.amplitude,
            detail: config.detail,
        }
    }
}

impl Terrain for NoiseTerrain {
    fn altitude(&self, latitude: f64, longitude: f64) -> f64 {
        let lat = latitude.to_radians();
        let lon = longitude.to_radians();
        let x = (lat.cos() * lon.cos()) as f32;
        let y = (lat.cos() * lon.sin()) as f32;
        let z = lat.sin() as f32;
        let broad = self.broad.get_noise_3d(x, y, z) as f64;
        let fine = self.fine.get_noise_3d(x, y, z) as f64;
        self.amplitude * (broad + self.detail * fine)
    }
}

/// Load a star system from a TOML file, or the built-in demo system.
pub fn load_system(path: Option<&Path>) -> Result<StarSystem, Box<dyn Error>> {
    let text = match path {
        Some(path) => fs::read_to_string(path)?,
        None => DEFAULT_SYSTEM.to_string(),
    };
    let config: SystemConfig = toml::from_str(&text)?;
    build_system(&config)
}

fn build_system(config: &SystemConfig) -> Result<StarSystem, Box<dyn Error>> {
    let mut bodies = Vec::with_capacity(config.body.len());
    for (index, body) in config.body.iter().enumerate() {
        let parent = match body.parent.as_deref() {
            None => index,
            Some(parent_name) => config
                .body
                .iter()
                .position(|candidate| candidate.name == parent_name)
                .ok_or_else(|| {
                    format!("body {} orbits unknown body {parent_name}", body.name)
                })?,
        };
        let terrain = body
            .surface
            .as_ref()
            .map(|t| Arc::new(NoiseTerrain::new(t)) as Arc<dyn Terrain + Send + Sync>);
        bodies.push(Body {
            name: body.name.clone(),
            parent,
            sma: body.sma,
            is_home: body.home,
            has_surface: body.surface.is_some(),
            terrain,
        });
    }
    Ok(StarSystem::new(bodies))
}
