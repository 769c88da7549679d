//! Celestial body metadata, surface coordinates, and terrain capabilities.
#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Maximum parent-link hops before the hierarchy walk gives up. Real systems
/// never get anywhere near this; it guards against cyclic parent graphs.
const MAX_HIERARCHY_DEPTH: u32 = 100;

/// A coordinate on the surface of a body, with the altitude sampled there.
///
/// Latitude and longitude are in degrees, nominally in `[-90, 90]` and
/// `[-180, 180]`. Immutable once constructed; refinement always keeps the
/// better of two points, never averages them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfacePoint {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl SurfacePoint {
    #[inline]
    pub const fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Sample the terrain at the given coordinates.
    #[inline]
    pub fn at(terrain: &dyn Terrain, latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: terrain.altitude(latitude, longitude),
        }
    }
}

/// Renders the persisted text form: `<altitude>, <latitude>, <longitude>`.
///
/// Rust's shortest round-trip float formatting keeps `parse(to_string())`
/// exact, so no precision is pinned here.
impl fmt::Display for SurfacePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.altitude, self.latitude, self.longitude)
    }
}

impl FromStr for SurfacePoint {
    type Err = ParsePointError;

    fn from_str(text: &str) -> Result<Self, ParsePointError> {
        let parts: Vec<&str> = text.split(',').collect();
        if parts.len() != 3 {
            return Err(ParsePointError::FieldCount(parts.len()));
        }
        let altitude: f64 = parts[0].trim().parse()?;
        let latitude: f64 = parts[1].trim().parse()?;
        let longitude: f64 = parts[2].trim().parse()?;
        Ok(Self {
            latitude,
            longitude,
            altitude,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParsePointError {
    /// Wrong number of comma-separated fields (expected 3).
    FieldCount(usize),
    Number(std::num::ParseFloatError),
}

impl fmt::Display for ParsePointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsePointError::FieldCount(n) => {
                write!(f, "expected 3 comma-separated fields, got {n}")
            }
            ParsePointError::Number(e) => write!(f, "bad number: {e}"),
        }
    }
}

impl std::error::Error for ParsePointError {}

impl From<std::num::ParseFloatError> for ParsePointError {
    fn from(e: std::num::ParseFloatError) -> Self {
        ParsePointError::Number(e)
    }
}

/// The expensive, opaque height function of a body.
///
/// Implementations must tolerate coordinates slightly outside the nominal
/// ranges: refinement sub-grids can overshoot past the poles and across the
/// antimeridian by a fraction of a degree.
pub trait Terrain {
    /// Altitude at the given latitude/longitude, in degrees.
    fn altitude(&self, latitude: f64, longitude: f64) -> f64;
}

impl<F> Terrain for F
where
    F: Fn(f64, f64) -> f64,
{
    #[inline]
    fn altitude(&self, latitude: f64, longitude: f64) -> f64 {
        self(latitude, longitude)
    }
}

pub type SharedTerrain = Arc<dyn Terrain + Send + Sync>;

/// A celestial body as seen by the scanner: an identity, an optional solid
/// surface, and the orbital metadata used for scheduling priority.
#[derive(Clone)]
pub struct Body {
    /// Opaque identity; keys every per-body cache.
    pub name: String,
    /// Index of the body this one orbits. A root body references itself.
    pub parent: usize,
    /// Semi-major axis of the body's own orbit. Zero for a root body.
    pub sma: f64,
    pub is_home: bool,
    pub has_surface: bool,
    pub terrain: Option<SharedTerrain>,
}

impl Body {
    /// True when the body both claims a surface and can actually be sampled.
    #[inline]
    pub fn solid_surface(&self) -> bool {
        self.has_surface && self.terrain.is_some()
    }
}

/// The set of bodies in a system, with hierarchy queries over parent links.
pub struct StarSystem {
    bodies: Vec<Body>,
    home: Option<usize>,
}

impl StarSystem {
    pub fn new(mut bodies: Vec<Body>) -> Self {
        let len = bodies.len();
        for (index, body) in bodies.iter_mut().enumerate() {
            if body.parent >= len {
                log::warn!(
                    "body {} has out-of-range parent index {}; treating as root",
                    body.name,
                    body.parent
                );
                body.parent = index;
            }
        }
        let home = bodies.iter().position(|b| b.is_home);
        Self { bodies, home }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    #[inline]
    pub fn body(&self, index: usize) -> &Body {
        &self.bodies[index]
    }

    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Index of the home body, if the system designates one.
    #[inline]
    pub fn home(&self) -> Option<usize> {
        self.home
    }

    /// Orbital hierarchy level: 0 for a root body, 1 for its planets, 2 for
    /// their moons, and so on. The walk is depth-capped; on overflow it logs
    /// and reports the level reached rather than looping forever.
    pub fn hierarchy_level(&self, index: usize) -> u32 {
        let mut level = 0;
        let mut current = index;
        while self.bodies[current].parent != current {
            level += 1;
            if level > MAX_HIERARCHY_DEPTH {
                log::error!(
                    "hierarchy overflow for {} (parent {})",
                    self.bodies[index].name,
                    self.bodies[self.bodies[current].parent].name
                );
                break;
            }
            current = self.bodies[current].parent;
        }
        level
    }

    /// True when the body directly orbits the home body.
    pub fn is_home_moon(&self, index: usize) -> bool {
        self.home
            .is_some_and(|home| index != home && self.bodies[index].parent == home)
    }

    /// True when the body orbits the same parent as the home body, excluding
    /// the home body itself and the central body.
    pub fn is_home_sibling(&self, index: usize) -> bool {
        let Some(home) = self.home else {
            return false;
        };
        if index == home {
            return false;
        }
        let body = &self.bodies[index];
        if body.parent == index {
            return false;
        }
        body.parent == self.bodies[home].parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flat(_latitude: f64, _longitude: f64) -> f64 {
        0.0
    }

    fn body(name: &str, parent: usize, sma: f64, is_home: bool) -> Body {
        Body {
            name: name.to_string(),
            parent,
            sma,
            is_home,
            has_surface: true,
            terrain: Some(Arc::new(flat) as SharedTerrain),
        }
    }

    fn small_system() -> StarSystem {
        StarSystem::new(vec![
            body("Aster", 0, 0.0, false),
            body("Gaia", 0, 150.0, true),
            body("Luna", 1, 0.4, false),
            body("Ares", 0, 228.0, false),
            body("Phox", 3, 0.1, false),
        ])
    }

    #[test]
    fn point_text_round_trips() {
        let cases = [
            SurfacePoint::new(-0.1, -179.25, -432.5),
            SurfacePoint::new(90.0, 0.0, 6761.3),
            SurfacePoint::new(-90.0, 0.0, 0.015625),
        ];
        for point in cases {
            let parsed: SurfacePoint = point.to_string().parse().unwrap();
            assert_eq!(parsed, point);
        }
    }

    #[test]
    fn parse_trims_field_whitespace() {
        let parsed: SurfacePoint = " 1250.5 ,  -3.25,7 ".parse().unwrap();
        assert_eq!(parsed, SurfacePoint::new(-3.25, 7.0, 1250.5));
    }

    #[test]
    fn parse_rejects_wrong_field_count() {
        assert_eq!(
            "1.0, 2.0".parse::<SurfacePoint>(),
            Err(ParsePointError::FieldCount(2))
        );
        assert!(matches!(
            "1.0, 2.0, 3.0, 4.0".parse::<SurfacePoint>(),
            Err(ParsePointError::FieldCount(4))
        ));
    }

    #[test]
    fn parse_rejects_bad_numbers() {
        assert!(matches!(
            "up, 2.0, 3.0".parse::<SurfacePoint>(),
            Err(ParsePointError::Number(_))
        ));
    }

    #[test]
    fn hierarchy_levels() {
        let system = small_system();
        assert_eq!(system.hierarchy_level(0), 0);
        assert_eq!(system.hierarchy_level(1), 1);
        assert_eq!(system.hierarchy_level(2), 2);
        assert_eq!(system.hierarchy_level(4), 2);
    }

    #[test]
    fn hierarchy_walk_survives_a_cycle() {
        let system = StarSystem::new(vec![body("Ouro", 1, 1.0, false), body("Boros", 0, 1.0, false)]);
        // Neither body is its own parent, so the walk can only stop at the cap.
        assert_eq!(system.hierarchy_level(0), MAX_HIERARCHY_DEPTH + 1);
    }

    #[test]
    fn out_of_range_parent_becomes_root() {
        let system = StarSystem::new(vec![body("Stray", 7, 1.0, false)]);
        assert_eq!(system.hierarchy_level(0), 0);
    }

    #[test]
    fn home_moons_and_siblings() {
        let system = small_system();
        assert_eq!(system.home(), Some(1));
        assert!(system.is_home_moon(2));
        assert!(!system.is_home_moon(1));
        assert!(!system.is_home_moon(4));
        assert!(system.is_home_sibling(3));
        assert!(!system.is_home_sibling(1)); // the home body itself
        assert!(!system.is_home_sibling(0)); // the central body
        assert!(!system.is_home_sibling(4)); // a moon of a sibling
    }

    #[test]
    fn solid_surface_needs_flag_and_terrain() {
        let mut stripped = body("Wisp", 0, 1.0, false);
        stripped.terrain = None;
        assert!(!stripped.solid_surface());
        let mut gassy = body("Veil", 0, 1.0, false);
        gassy.has_surface = false;
        assert!(!gassy.solid_surface());
        assert!(body("Rock", 0, 1.0, false).solid_surface());
    }

    proptest! {
        #[test]
        fn any_point_round_trips(
            latitude in -90.0f64..=90.0,
            longitude in -180.0f64..=180.0,
            altitude in -12_000.0f64..=12_000.0,
        ) {
            let point = SurfacePoint::new(latitude, longitude, altitude);
            let parsed: SurfacePoint = point.to_string().parse().unwrap();
            prop_assert_eq!(parsed, point);
        }
    }
}
