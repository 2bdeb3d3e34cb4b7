//! Settlement placement: a marked spatial point process over an
//! elevation field.
//!
//! Capitals are a homogeneous Poisson process thinned by the field value
//! (elevation read as a retention probability), and cities are a Thomas
//! cluster process around the surviving capitals, thinned the same way.
//! The field is read, never mutated.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, Poisson};
use serde::Serialize;

use crate::field::{ElevationField, Field};

/// Expected number of capital candidates over the whole domain.
const CAPITAL_INTENSITY: f64 = 30.0;
/// Mean number of cities per surviving capital.
const CITIES_PER_CAPITAL: f64 = 10.0;
/// Standard deviation of the Gaussian scatter of cities around a capital,
/// in field cells.
const CITY_SPREAD: f64 = 50.0;

/// Capital and city coordinates in the elevation field's index space.
///
/// Coordinates are real-valued (sub-cell precision) and kept in
/// generation order. Zero capitals is a valid outcome and implies zero
/// cities.
#[derive(Clone, Debug, Serialize)]
pub struct SettlementSet {
    pub capitals: Vec<(f64, f64)>,
    pub cities: Vec<(f64, f64)>,
}

/// Place capitals and cities on an elevation field.
///
/// Deterministic for a fixed (field, seed) pair. A field with no mainland
/// yields near-zero retention everywhere and an (almost) empty set; that
/// is expected, not an error.
pub fn place_settlements(elevation: &ElevationField, seed: u64) -> SettlementSet {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let width = elevation.width() as f64;
    let height = elevation.height() as f64;

    let candidates = poisson_candidates(&mut rng, width, height);
    let capitals = thin_by_field(elevation.field(), &candidates, &mut rng);
    let children = thomas_children(&mut rng, &capitals, width, height);
    let cities = thin_by_field(elevation.field(), &children, &mut rng);

    SettlementSet { capitals, cities }
}

/// Homogeneous Poisson point process over the domain: the count is a
/// Poisson draw, positions are independently uniform.
fn poisson_candidates(rng: &mut ChaCha8Rng, width: f64, height: f64) -> Vec<(f64, f64)> {
    let poisson = Poisson::new(CAPITAL_INTENSITY).unwrap();
    let count: f64 = poisson.sample(rng);
    let count = count as usize;
    (0..count)
        .map(|_| (rng.gen::<f64>() * width, rng.gen::<f64>() * height))
        .collect()
}

/// Thin a point set with retention probability given by the field.
///
/// The bilinear interpolation can overshoot near sharp thresholds, so the
/// probability is clipped to [0, 1] before the Bernoulli draw. A point is
/// retained iff `u <= p`.
fn thin_by_field(field: &Field, points: &[(f64, f64)], rng: &mut ChaCha8Rng) -> Vec<(f64, f64)> {
    points
        .iter()
        .filter(|&&(x, y)| {
            let p = field.sample_bilinear(x, y).clamp(0.0, 1.0);
            rng.gen::<f64>() <= p
        })
        .copied()
        .collect()
}

/// Thomas cluster process: each parent spawns a Poisson-distributed number
/// of children, Gaussian-scattered around it. Children landing outside the
/// domain are discarded.
fn thomas_children(
    rng: &mut ChaCha8Rng,
    parents: &[(f64, f64)],
    width: f64,
    height: f64,
) -> Vec<(f64, f64)> {
    let count_dist = Poisson::new(CITIES_PER_CAPITAL).unwrap();
    let offset_dist = Normal::new(0.0, CITY_SPREAD).unwrap();

    let mut children = Vec::new();
    for &(px, py) in parents {
        let count: f64 = count_dist.sample(rng);
        let count = count as usize;
        for _ in 0..count {
            let x = px + offset_dist.sample(rng);
            let y = py + offset_dist.sample(rng);
            if (0.0..=width).contains(&x) && (0.0..=height).contains(&y) {
                children.push((x, y));
            }
        }
    }
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MapConfig, NoiseSpec};
    use crate::field::Field;
    use crate::pipeline;

    fn uniform_elevation(size: usize, value: f64) -> ElevationField {
        ElevationField::new(Field::new_with(size, size, value), 0.0)
    }

    #[test]
    fn test_deterministic_per_seed() {
        let elevation = uniform_elevation(200, 0.8);
        let a = place_settlements(&elevation, 77);
        let b = place_settlements(&elevation, 77);
        assert_eq!(a.capitals, b.capitals);
        assert_eq!(a.cities, b.cities);

        let c = place_settlements(&elevation, 78);
        assert_ne!(a.capitals, c.capitals);
    }

    #[test]
    fn test_full_retention_on_unit_field() {
        // p = 1 everywhere, so thinning keeps every candidate.
        let elevation = uniform_elevation(300, 1.0);
        let set = place_settlements(&elevation, 5);
        assert!(!set.capitals.is_empty());
        assert!(!set.cities.is_empty());
    }

    #[test]
    fn test_zero_field_yields_empty_set() {
        let elevation = uniform_elevation(200, 0.0);
        let set = place_settlements(&elevation, 5);
        assert!(set.capitals.is_empty());
        assert!(set.cities.is_empty());
    }

    #[test]
    fn test_all_settlements_inside_domain() {
        let elevation = uniform_elevation(150, 1.0);
        for seed in 0..10 {
            let set = place_settlements(&elevation, seed);
            for &(x, y) in set.capitals.iter().chain(&set.cities) {
                assert!((0.0..=150.0).contains(&x));
                assert!((0.0..=150.0).contains(&y));
            }
        }
    }

    #[test]
    fn test_drowned_map_yields_empty_settlements() {
        // Threshold 1.0 drowns the whole map; retention is zero everywhere.
        let mut config = MapConfig::new(
            NoiseSpec::Spectral {
                amplitude: 1.0,
                spectral_index: -3.0,
            },
            50,
        );
        config.threshold = 1.0;
        let elevation = pipeline::build_elevation_field(&config, 2).unwrap();
        let set = place_settlements(&elevation, 2);
        assert!(set.capitals.is_empty());
        assert!(set.cities.is_empty());
    }

    #[test]
    fn test_settlements_prefer_mainland() {
        // Left half sea, right half mainland at p = 1.
        let size = 400;
        let field = Field::from_fn_par(size, size, |x, _| if x < size / 2 { 0.0 } else { 1.0 });
        let elevation = ElevationField::new(field, 0.5);
        let set = place_settlements(&elevation, 123);
        let mid = size as f64 / 2.0;
        // Thinning on a hard step can only keep points whose interpolated
        // probability is positive, i.e. at or right of the boundary cells.
        for &(x, _) in &set.capitals {
            assert!(x >= mid - 1.0);
        }
    }
}
