use std::cmp::Ordering;

use zenith_body::StarSystem;

type BodyComparison = fn(&StarSystem, usize, usize) -> Ordering;

/// Comparisons used to prioritize bodies, in descending order of importance.
/// Each entry only breaks ties the previous entries left unresolved.
const COMPARISONS: &[BodyComparison] = &[
    by_home,
    by_home_moon,
    by_home_sibling,
    by_hierarchy_level,
    by_parent_sma,
    by_own_sma,
    by_name,
];

/// Total priority order over bodies: the home body and its neighborhood
/// first. Used only to decide computation order, never correctness.
pub fn compare_priority(system: &StarSystem, a: usize, b: usize) -> Ordering {
    for compare in COMPARISONS {
        let ordering = compare(system, a, b);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// All body indices, fully sorted into computation priority order.
pub fn priority_order(system: &StarSystem) -> Vec<usize> {
    let mut order: Vec<usize> = (0..system.len()).collect();
    order.sort_by(|&a, &b| compare_priority(system, a, b));
    order
}

/// The home body itself outranks everything.
fn by_home(system: &StarSystem, a: usize, b: usize) -> Ordering {
    system.body(b).is_home.cmp(&system.body(a).is_home)
}

/// Direct moons of the home body next.
fn by_home_moon(system: &StarSystem, a: usize, b: usize) -> Ordering {
    system.is_home_moon(b).cmp(&system.is_home_moon(a))
}

/// Then bodies orbiting the same parent as the home body. Only matters when
/// the home body is itself a moon, or for picking planets over distant moons.
fn by_home_sibling(system: &StarSystem, a: usize, b: usize) -> Ordering {
    system.is_home_sibling(b).cmp(&system.is_home_sibling(a))
}

/// Planets before moons, moons before moons-of-moons.
fn by_hierarchy_level(system: &StarSystem, a: usize, b: usize) -> Ordering {
    system.hierarchy_level(a).cmp(&system.hierarchy_level(b))
}

/// Moons of inner planets before moons of outer ones.
fn by_parent_sma(system: &StarSystem, a: usize, b: usize) -> Ordering {
    let parent_a = system.body(system.body(a).parent);
    let parent_b = system.body(system.body(b).parent);
    parent_a.sma.total_cmp(&parent_b.sma)
}

/// Smaller orbits before bigger ones.
fn by_own_sma(system: &StarSystem, a: usize, b: usize) -> Ordering {
    system.body(a).sma.total_cmp(&system.body(b).sma)
}

fn by_name(system: &StarSystem, a: usize, b: usize) -> Ordering {
    system.body(a).name.cmp(&system.body(b).name)
}
