//! Seed management for map generation.
//!
//! Each subsystem gets its own seed derived from a master seed, so terrain
//! synthesis and settlement placement never share random state and can be
//! varied independently.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeds for the generation subsystems.
#[derive(Clone, Copy, Debug)]
pub struct MapSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Noise field synthesis
    pub terrain: u64,
    /// Settlement point processes
    pub settlements: u64,
}

impl MapSeeds {
    /// Create seeds from a master seed, deriving all sub-seeds deterministically.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            terrain: derive_seed(master, "terrain"),
            settlements: derive_seed(master, "settlements"),
        }
    }
}

/// Derive a sub-seed from a master seed and a subsystem name.
/// Hashing ensures different subsystems get different but deterministic seeds.
fn derive_seed(master: u64, system: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    system.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_derivation() {
        let seeds1 = MapSeeds::from_master(12345);
        let seeds2 = MapSeeds::from_master(12345);

        assert_eq!(seeds1.terrain, seeds2.terrain);
        assert_eq!(seeds1.settlements, seeds2.settlements);
    }

    #[test]
    fn test_subsystems_get_different_seeds() {
        let seeds = MapSeeds::from_master(12345);
        assert_ne!(seeds.terrain, seeds.settlements);
    }

    #[test]
    fn test_masters_differ() {
        assert_ne!(
            MapSeeds::from_master(1).terrain,
            MapSeeds::from_master(2).terrain
        );
    }
}
