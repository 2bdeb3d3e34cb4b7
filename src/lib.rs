//! Island map generation library
//!
//! Synthesizes a deterministic-per-seed 2D terrain field from one of five
//! stochastic noise models, post-processes it into a bounded elevation
//! grid with a sea level, and derives capitals and cities from a marked
//! spatial point process conditioned on the terrain.

pub mod config;
pub mod error;
pub mod export;
pub mod field;
pub mod map;
pub mod pipeline;
pub mod seeds;
pub mod settlements;
pub mod synthesis;

pub use config::{MapConfig, NoiseSpec, OctaveParams};
pub use error::GenError;
pub use field::{ElevationField, Field};
pub use map::IslandMap;
pub use seeds::MapSeeds;
pub use settlements::SettlementSet;
