//! The ecosystem container
//!
//! Owns every piece of simulation state and drives one frame at a time. The
//! host (window, canvas, frame scheduler) calls [`Ecosystem::advance_frame`]
//! once per display frame with the elapsed time, then consumes
//! [`Ecosystem::render`]. All calls are synchronous on one logical thread.

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::animals::Population;
use crate::config::EcosystemConfig;
use crate::error::{EcosystemError, Result};
use crate::noise::NoiseField;
use crate::oscillator::BorderOscillator;
use crate::props::{generate_props, ForestProp};
use crate::regions::VoronoiRegions;
use crate::render::{render_frame, DrawCommand};
use crate::terrain::TerrainAutomaton;

#[cfg(feature = "spatial-index")]
use crate::spatial::SiteIndex;

/// Minimum terrain cell size in pixels
///
/// Keeps the grid from collapsing on small viewports.
const MIN_CELL_SIZE: u32 = 8;

/// Target number of cells along the shorter viewport edge
const CELLS_PER_SHORT_EDGE: u32 = 80;

/// Derive the terrain cell size from viewport dimensions
#[inline]
fn cell_size_for(width: u32, height: u32) -> u32 {
    (width.min(height) / CELLS_PER_SHORT_EDGE).max(MIN_CELL_SIZE)
}

/// A complete woodland ecosystem
///
/// Holds the terrain automaton, the drifting Voronoi regions, the animal
/// population, the forest props, and the noise/RNG sources that drive them.
/// The same configuration and viewport always produce the identical world.
///
/// # Example
///
/// ```
/// use woodland_ecosystem::*;
///
/// let config = EcosystemConfigBuilder::new().seed(42).build().unwrap();
/// let mut eco = Ecosystem::new(config, 1280, 720).unwrap();
///
/// // One display frame: advance, then render
/// eco.advance_frame(16.0);
/// let commands = eco.render();
/// assert!(!commands.is_empty());
/// ```
pub struct Ecosystem {
    config: EcosystemConfig,
    width: u32,
    height: u32,
    cell_size: u32,
    terrain: TerrainAutomaton,
    regions: VoronoiRegions,
    population: Population,
    props: Vec<ForestProp>,
    oscillator: BorderOscillator,
    noise: NoiseField,
    rng: ChaCha8Rng,
    tick: u64,

    #[cfg(feature = "spatial-index")]
    site_index: SiteIndex,
}

impl Ecosystem {
    /// Build a world for the given viewport
    ///
    /// # Errors
    ///
    /// Returns `InvalidViewport` if either dimension is too small to hold a
    /// single terrain cell.
    pub fn new(config: EcosystemConfig, width: u32, height: u32) -> Result<Self> {
        let cell_size = cell_size_for(width, height);
        let cols = (width / cell_size) as usize;
        let rows = (height / cell_size) as usize;
        if cols == 0 || rows == 0 {
            return Err(EcosystemError::InvalidViewport { width, height });
        }

        let bounds = Vec2::new(width as f32, height as f32);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed as u64);
        let noise = NoiseField::new(config.noise_seed);

        // Setup order is part of the determinism contract: regions, terrain,
        // animals, props all pull from the one seeded RNG stream
        let mut regions = VoronoiRegions::new(config.region_count, cols, rows, bounds, &mut rng);
        let terrain = TerrainAutomaton::new(cols, rows, &mut rng);
        let population = Population::new(config.animal_count, bounds, &mut rng);
        let props = generate_props(bounds, &mut rng);

        regions.assign_owners(cell_size as f32);

        #[cfg(feature = "spatial-index")]
        let site_index = {
            let positions: Vec<Vec2> = regions.sites().iter().map(|s| s.position).collect();
            SiteIndex::new(&positions)
        };

        log::debug!(
            "ecosystem ready: {}x{} cells of {}px, {} sites, {} animals, {} props",
            cols,
            rows,
            cell_size,
            config.region_count,
            population.len(),
            props.len()
        );

        Ok(Self {
            config,
            width,
            height,
            cell_size,
            terrain,
            regions,
            population,
            props,
            oscillator: BorderOscillator::new(config.initial_drift),
            noise,
            rng,
            tick: 0,

            #[cfg(feature = "spatial-index")]
            site_index,
        })
    }

    /// Advance the world by one frame tick
    ///
    /// `time_ms` is the host's elapsed time in milliseconds. The terrain
    /// automaton steps only every `terrain_cadence` ticks; region drift,
    /// the animal update, and the border oscillator run every tick. The
    /// oscillator advances last, after the frame has read its value.
    pub fn advance_frame(&mut self, time_ms: f64) {
        self.tick += 1;
        let bounds = Vec2::new(self.width as f32, self.height as f32);

        if self.tick % self.config.terrain_cadence == 0 {
            let border_prob = self.oscillator.border_prob();
            log::trace!("terrain step at tick {} (border prob {:.3})", self.tick, border_prob);
            self.terrain
                .step(border_prob, self.regions.owners(), &mut self.rng);
        }

        self.regions.drift(time_ms, bounds, &self.noise);
        self.regions.assign_owners(self.cell_size as f32);

        #[cfg(feature = "spatial-index")]
        {
            // Drift moved the sites, so the index is stale
            let positions: Vec<Vec2> = self.regions.sites().iter().map(|s| s.position).collect();
            self.site_index = SiteIndex::new(&positions);
        }

        self.population.update(bounds, self.tick, &self.noise);
        self.oscillator.advance(time_ms, &self.noise);
    }

    /// Render the current state as an ordered draw-command list
    ///
    /// Pure read: callable any number of times between frames with
    /// identical results.
    pub fn render(&self) -> Vec<DrawCommand> {
        render_frame(self)
    }

    /// Rebuild the world for a new viewport size
    ///
    /// Grids, owner map, sites, and props are rebuilt atomically for the
    /// new dimensions; the animal population is kept and wrapped into the
    /// new bounds. Nothing is mutated if the viewport is invalid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidViewport` like [`Ecosystem::new`].
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let cell_size = cell_size_for(width, height);
        let cols = (width / cell_size) as usize;
        let rows = (height / cell_size) as usize;
        if cols == 0 || rows == 0 {
            return Err(EcosystemError::InvalidViewport { width, height });
        }

        let bounds = Vec2::new(width as f32, height as f32);

        self.width = width;
        self.height = height;
        self.cell_size = cell_size;
        self.regions =
            VoronoiRegions::new(self.config.region_count, cols, rows, bounds, &mut self.rng);
        self.terrain = TerrainAutomaton::new(cols, rows, &mut self.rng);
        self.props = generate_props(bounds, &mut self.rng);
        self.population.wrap_into(bounds);
        self.regions.assign_owners(cell_size as f32);

        #[cfg(feature = "spatial-index")]
        {
            let positions: Vec<Vec2> = self.regions.sites().iter().map(|s| s.position).collect();
            self.site_index = SiteIndex::new(&positions);
        }

        log::debug!(
            "ecosystem resized: {}x{} cells of {}px, {} props",
            cols,
            rows,
            cell_size,
            self.props.len()
        );

        Ok(())
    }

    /// Region owning an arbitrary pixel position
    ///
    /// Uses the KD-tree site index when the `spatial-index` feature is
    /// enabled, a linear scan otherwise.
    pub fn region_at(&self, position: Vec2) -> usize {
        #[cfg(feature = "spatial-index")]
        {
            self.site_index.find_nearest(position)
        }
        #[cfg(not(feature = "spatial-index"))]
        {
            self.regions.nearest_site(position)
        }
    }

    /// Configuration this world was built from
    #[inline]
    pub fn config(&self) -> &EcosystemConfig {
        &self.config
    }

    /// Viewport width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Viewport height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Terrain cell size in pixels
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size as f32
    }

    /// Frame ticks advanced so far
    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The terrain automaton
    #[inline]
    pub fn terrain(&self) -> &TerrainAutomaton {
        &self.terrain
    }

    /// The region layer
    #[inline]
    pub fn regions(&self) -> &VoronoiRegions {
        &self.regions
    }

    /// The animal population
    #[inline]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// The forest props
    #[inline]
    pub fn props(&self) -> &[ForestProp] {
        &self.props
    }

    /// The shared noise field
    #[inline]
    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Current border probability fed to the terrain automaton
    #[inline]
    pub fn border_prob(&self) -> f32 {
        self.oscillator.border_prob()
    }
}
