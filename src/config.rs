//! Ecosystem configuration and builder
//!
//! This module provides configuration types for deterministic ecosystem setup.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{EcosystemError, Result};

/// Configuration for a deterministic woodland ecosystem
///
/// The same configuration together with the same viewport dimensions will
/// always produce the identical initial world: terrain states, region sites,
/// animal population, and forest props.
///
/// # Serialization
///
/// Only the configuration is serialized (a handful of scalars), never the
/// simulation state. A world is rebuilt from its configuration when needed.
///
/// # Example
///
/// ```rust
/// use woodland_ecosystem::*;
///
/// let config = EcosystemConfigBuilder::new()
///     .seed(42)
///     .region_count(25)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: EcosystemConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config.seed, restored.seed);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EcosystemConfig {
    /// Random seed for world setup and terrain perturbation
    ///
    /// Drives site placement, initial terrain states, animal creation, and
    /// the per-step boundary perturbation draws.
    pub seed: u32,

    /// Random seed for the continuous noise field (separate from `seed`)
    ///
    /// This allows the same world layout with different drift, wander, and
    /// vibration patterns.
    pub noise_seed: u32,

    /// Number of drifting Voronoi region sites (default: 25)
    pub region_count: usize,

    /// Number of animals in the fixed population (default: 80)
    pub animal_count: usize,

    /// How many frame ticks between terrain automaton steps (default: 10)
    ///
    /// The border-probability oscillator still advances every tick; the two
    /// cadences are deliberately independent.
    pub terrain_cadence: u64,

    /// Offset each cell's terrain color by its region owner (default: true)
    ///
    /// When enabled the renderer shifts the palette index by `owner % 3`,
    /// making region boundaries visible as color seams.
    pub region_offset: bool,

    /// Initial value of the border-probability drift scalar (default: 0.3)
    pub initial_drift: f32,
}

impl Default for EcosystemConfig {
    fn default() -> Self {
        EcosystemConfigBuilder::new().build().unwrap()
    }
}

/// Builder for creating [`EcosystemConfig`] with validation
///
/// # Example
///
/// ```rust
/// use woodland_ecosystem::*;
///
/// // Use defaults
/// let config = EcosystemConfigBuilder::new().build().unwrap();
///
/// // Customize
/// let config = EcosystemConfigBuilder::new()
///     .seed(12345)
///     .animal_count(40)
///     .unwrap()
///     .noise_seed(67890)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct EcosystemConfigBuilder {
    seed: Option<u32>,
    noise_seed: Option<u32>,
    region_count: usize,
    animal_count: usize,
    terrain_cadence: u64,
    region_offset: bool,
    initial_drift: f32,
}

impl EcosystemConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - noise_seed: Same as seed
    /// - region_count: 25
    /// - animal_count: 80
    /// - terrain_cadence: 10
    /// - region_offset: true
    /// - initial_drift: 0.3
    pub fn new() -> Self {
        Self {
            seed: None,
            noise_seed: None,
            region_count: 25,
            animal_count: 80,
            terrain_cadence: 10,
            region_offset: true,
            initial_drift: 0.3,
        }
    }

    /// Set the random seed for world setup
    ///
    /// Using the same seed with the same other parameters and viewport will
    /// produce an identical world every time.
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set a separate seed for the continuous noise field
    ///
    /// If not set, the noise seed will match the world seed.
    pub fn noise_seed(mut self, seed: u32) -> Self {
        self.noise_seed = Some(seed);
        self
    }

    /// Set the number of Voronoi region sites
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the count is zero.
    pub fn region_count(mut self, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(EcosystemError::InvalidConfig(
                "region count must be at least 1".to_string(),
            ));
        }
        self.region_count = count;
        Ok(self)
    }

    /// Set the animal population size
    ///
    /// Flocking is a brute-force pairwise pass, so very large populations
    /// will not hold a real-time frame budget.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the count exceeds 10,000.
    pub fn animal_count(mut self, count: usize) -> Result<Self> {
        if count > 10_000 {
            return Err(EcosystemError::InvalidConfig(format!(
                "animal count must be <= 10000 (got {})",
                count
            )));
        }
        self.animal_count = count;
        Ok(self)
    }

    /// Set how many ticks pass between terrain automaton steps
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the cadence is zero.
    pub fn terrain_cadence(mut self, cadence: u64) -> Result<Self> {
        if cadence == 0 {
            return Err(EcosystemError::InvalidConfig(
                "terrain cadence must be at least 1".to_string(),
            ));
        }
        self.terrain_cadence = cadence;
        Ok(self)
    }

    /// Enable or disable the per-region terrain color offset
    pub fn region_offset(mut self, enabled: bool) -> Self {
        self.region_offset = enabled;
        self
    }

    /// Set the initial border-probability drift scalar
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the value is outside `[0, 1]`.
    pub fn initial_drift(mut self, drift: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&drift) {
            return Err(EcosystemError::InvalidConfig(format!(
                "initial drift must be in [0, 1] (got {})",
                drift
            )));
        }
        self.initial_drift = drift;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<EcosystemConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);
        let noise_seed = self.noise_seed.unwrap_or(seed);

        Ok(EcosystemConfig {
            seed,
            noise_seed,
            region_count: self.region_count,
            animal_count: self.animal_count,
            terrain_cadence: self.terrain_cadence,
            region_offset: self.region_offset,
            initial_drift: self.initial_drift,
        })
    }
}

impl Default for EcosystemConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
