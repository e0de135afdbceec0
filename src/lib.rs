//! Generative woodland ecosystem animation
//!
//! A standalone library simulating an ambient woodland scene: a terrain
//! cellular automaton colored by drifting Voronoi regions, a flocking
//! population of deer, rabbits, and squirrels, and static forest props,
//! rendered as an ordered draw-command list any host surface can replay
//! (pixel buffer, canvas, GPU quad batcher, etc.)
//!
//! # Quick Start
//!
//! ```rust
//! use woodland_ecosystem::*;
//!
//! // Build a deterministic world for a 1280x720 viewport
//! let config = EcosystemConfigBuilder::new()
//!     .seed(42)
//!     .animal_count(80).unwrap()
//!     .build().unwrap();
//!
//! let mut eco = Ecosystem::new(config, 1280, 720).unwrap();
//!
//! // Per display frame: advance with the elapsed time, then draw
//! eco.advance_frame(16.7);
//! for command in eco.render() {
//!     match command {
//!         DrawCommand::Clear { .. } => { /* wash the surface */ }
//!         DrawCommand::Rect { .. } => { /* fill a rectangle */ }
//!         DrawCommand::Ellipse { .. } => { /* fill a rotated ellipse */ }
//!     }
//! }
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): KD-tree position-to-region lookups for
//!   [`Ecosystem::region_at`]
//! - `serde`: serialization support for [`EcosystemConfig`]

// Modules
pub mod error;
pub mod config;
pub mod noise;
pub mod terrain;
pub mod oscillator;
pub mod regions;
pub mod animals;
pub mod props;
pub mod render;
pub mod ecosystem;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{EcosystemError, Result};
pub use config::{EcosystemConfig, EcosystemConfigBuilder};
pub use noise::{NoiseConfig, NoiseField};
pub use terrain::TerrainAutomaton;
pub use oscillator::BorderOscillator;
pub use regions::{Site, VoronoiRegions};
pub use animals::{Animal, Population, Species, SpeciesProfile};
pub use props::{generate_props, CrownDetail, ForestProp, TreeKind};
pub use render::palette::{Rgba, BACKGROUND, TERRAIN_PALETTE};
pub use render::{render_frame, DrawCommand};
pub use ecosystem::Ecosystem;

#[cfg(feature = "spatial-index")]
pub use spatial::SiteIndex;

// Re-export glam::Vec2 for convenience
pub use glam::Vec2;
