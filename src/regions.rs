//! Drifting Voronoi regions
//!
//! A small fixed set of sites wanders slowly across the viewport; every
//! terrain cell is owned by its nearest site. Ownership colors the terrain
//! and marks the boundaries where the automaton scrambles cells.

use glam::Vec2;
use rand::Rng;

use crate::noise::NoiseField;
use crate::render::palette::Rgba;

/// Interpolation factor pulling every site toward the viewport center
const CENTER_PULL: f32 = 0.0001;

/// Noise jitter magnitude on the x axis
const JITTER_X: f32 = 0.1;

/// Noise jitter magnitude on the y axis
const JITTER_Y: f32 = 0.2;

/// Milliseconds per unit of drift-noise time
const DRIFT_TIME_SCALE: f64 = 2000.0;

/// A Voronoi site: a drifting point with a display color
#[derive(Debug, Clone, Copy)]
pub struct Site {
    /// Position in pixel space
    pub position: Vec2,
    /// Region color (greens and earth tones)
    pub color: Rgba,
}

/// The region layer: drifting sites plus the cell-owner map
///
/// The owner map is row-major (`index = y * cols + x`), matching the terrain
/// grid, and is fully recomputed by [`assign_owners`](Self::assign_owners)
/// rather than maintained incrementally. Sites are never added or removed
/// after construction; the whole layer is rebuilt on viewport resize.
#[derive(Debug, Clone)]
pub struct VoronoiRegions {
    sites: Vec<Site>,
    owners: Vec<usize>,
    cols: usize,
    rows: usize,
}

impl VoronoiRegions {
    /// Create `site_count` sites uniformly at random within `bounds`
    pub fn new<R: Rng>(site_count: usize, cols: usize, rows: usize, bounds: Vec2, rng: &mut R) -> Self {
        let sites = (0..site_count)
            .map(|_| Site {
                position: Vec2::new(rng.gen_range(0.0..bounds.x), rng.gen_range(0.0..bounds.y)),
                color: [
                    rng.gen_range(50..150),
                    rng.gen_range(80..200),
                    rng.gen_range(20..80),
                    255,
                ],
            })
            .collect();

        Self {
            sites,
            owners: vec![0; cols * rows],
            cols,
            rows,
        }
    }

    /// All sites, index-stable for the lifetime of the layer
    #[inline]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Row-major cell-owner map; every value is a valid site index
    #[inline]
    pub fn owners(&self) -> &[usize] {
        &self.owners
    }

    /// Owner of a single grid cell
    #[inline]
    pub fn owner(&self, x: usize, y: usize) -> usize {
        self.owners[y * self.cols + x]
    }

    /// Nudge every site: a tiny pull toward the bounds center plus a
    /// noise-driven jitter, clamped back into bounds
    ///
    /// Each site samples the noise field at its own fixed offset so the
    /// sites wander independently.
    pub fn drift(&mut self, time_ms: f64, bounds: Vec2, noise: &NoiseField) {
        let t = (time_ms / DRIFT_TIME_SCALE) as f32;
        let center = bounds / 2.0;

        for (i, site) in self.sites.iter_mut().enumerate() {
            let offset = i as f32;

            let x = site.position.x + (center.x - site.position.x) * CENTER_PULL;
            site.position.x =
                (x + JITTER_X * (noise.sample1(offset * 1000.0 + t) - 0.5)).clamp(0.0, bounds.x);

            let y = site.position.y + (center.y - site.position.y) * CENTER_PULL;
            site.position.y =
                (y + JITTER_Y * (noise.sample1(offset * 2000.0 + t) - 0.5)).clamp(0.0, bounds.y);
        }
    }

    /// Recompute the owner of every grid cell
    ///
    /// Each cell is compared against all sites by squared Euclidean distance
    /// from its center in pixel space. Iteration is site-index ascending and
    /// a strict `<` keeps the first site on ties, so the result is
    /// deterministic for a fixed site configuration.
    pub fn assign_owners(&mut self, cell_size: f32) {
        for y in 0..self.rows {
            for x in 0..self.cols {
                let center = Vec2::new(
                    (x as f32 + 0.5) * cell_size,
                    (y as f32 + 0.5) * cell_size,
                );
                self.owners[y * self.cols + x] = self.nearest_site(center);
            }
        }
    }

    /// Index of the nearest site to an arbitrary pixel position
    ///
    /// Linear scan over the sites; see [`crate::spatial::SiteIndex`] for the
    /// indexed variant used by [`crate::Ecosystem::region_at`].
    pub fn nearest_site(&self, position: Vec2) -> usize {
        let mut closest = 0;
        let mut min_dist = f32::INFINITY;
        for (i, site) in self.sites.iter().enumerate() {
            let dist = site.position.distance_squared(position);
            if dist < min_dist {
                min_dist = dist;
                closest = i;
            }
        }
        closest
    }
}
