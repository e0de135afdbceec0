//! Terrain cellular automaton
//!
//! A toroidal grid of discrete terrain states. Each step, every cell counts
//! how many cells in its 5x5 neighborhood already hold its successor state
//! and either advances (fast or slow), decays, or stays put. Cells on region
//! boundaries are additionally scrambled with a probability supplied by the
//! border oscillator, which keeps the seams between Voronoi regions alive.

use rand::Rng;

/// Number of discrete terrain states
pub const STATE_COUNT: usize = 10;

/// Successor count at which a cell advances one state
pub const GROWTH_THRESHOLD: usize = 5;

/// Successor count at which a cell skips ahead two states
///
/// Checked before [`GROWTH_THRESHOLD`]: when both are satisfied the fast
/// transition wins.
pub const SURGE_THRESHOLD: usize = 7;

/// Successor count at or below which a cell falls back one state
pub const DECAY_THRESHOLD: usize = 1;

/// Neighborhood scan radius (2 gives the 5x5 toroidal window)
pub const SCAN_RANGE: i32 = 2;

/// Double-buffered toroidal grid of terrain states
///
/// Cells are stored row-major (`index = y * cols + x`) and every value is
/// kept in `[0, STATE_COUNT)` at all times.
#[derive(Debug, Clone)]
pub struct TerrainAutomaton {
    cols: usize,
    rows: usize,
    current: Vec<u8>,
    next: Vec<u8>,
}

impl TerrainAutomaton {
    /// Create a grid with uniformly random initial states
    pub fn new<R: Rng>(cols: usize, rows: usize, rng: &mut R) -> Self {
        let current = (0..cols * rows)
            .map(|_| rng.gen_range(0..STATE_COUNT) as u8)
            .collect();
        Self {
            cols,
            rows,
            current,
            next: vec![0; cols * rows],
        }
    }

    /// Grid width in cells
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Grid height in cells
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// State of a single cell
    #[inline]
    pub fn state(&self, x: usize, y: usize) -> u8 {
        self.current[y * self.cols + x]
    }

    /// All current states, row-major
    #[inline]
    pub fn states(&self) -> &[u8] {
        &self.current
    }

    /// Advance the automaton one generation
    ///
    /// `border_prob` is the per-cell probability of scrambling the 2x2 block
    /// ending at the cell where region owners differ. `owners` is the
    /// row-major cell-owner map from [`crate::regions::VoronoiRegions`] and
    /// must match this grid's dimensions.
    ///
    /// The walk is column-major (x outer, y inner) and boundary scrambles
    /// write directly into the next buffer, so a scramble may overwrite the
    /// rule result of an already-visited cell. That interleaving is part of
    /// the automaton's look and is kept deliberately.
    pub fn step<R: Rng>(&mut self, border_prob: f32, owners: &[usize], rng: &mut R) {
        debug_assert_eq!(owners.len(), self.cols * self.rows);

        let cols = self.cols;
        let rows = self.rows;

        for x in 0..cols {
            for y in 0..rows {
                let state = self.current[y * cols + x];

                // Scramble cells where the 2x2 block ending here crosses a
                // region boundary
                if rng.gen::<f32>() < border_prob {
                    for m in 0..2 {
                        for q in 0..2 {
                            if x < m || y < q {
                                continue;
                            }
                            if owners[y * cols + x] != owners[(y - q) * cols + (x - m)] {
                                let scrambled =
                                    (rng.gen_range(0..STATE_COUNT) + 1) % STATE_COUNT;
                                self.next[(y - q) * cols + (x - m)] = scrambled as u8;
                            }
                        }
                    }
                }

                // Count neighbors already holding this cell's successor state
                let successor = (state + 1) % STATE_COUNT as u8;
                let mut count = 0;
                for dx in -SCAN_RANGE..=SCAN_RANGE {
                    for dy in -SCAN_RANGE..=SCAN_RANGE {
                        let nx = (x as i32 + dx).rem_euclid(cols as i32) as usize;
                        let ny = (y as i32 + dy).rem_euclid(rows as i32) as usize;
                        if self.current[ny * cols + nx] == successor {
                            count += 1;
                        }
                    }
                }

                // First match wins; the surge check precedes the growth check
                // so that a crowded neighborhood takes the double jump
                self.next[y * cols + x] = if count >= SURGE_THRESHOLD {
                    (state + 2) % STATE_COUNT as u8
                } else if count >= GROWTH_THRESHOLD {
                    successor
                } else if count <= DECAY_THRESHOLD {
                    (state + STATE_COUNT as u8 - 1) % STATE_COUNT as u8
                } else {
                    state
                };
            }
        }

        std::mem::swap(&mut self.current, &mut self.next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn uniform_owners(cols: usize, rows: usize) -> Vec<usize> {
        vec![0; cols * rows]
    }

    /// Every state stays in [0, STATE_COUNT) across many generations
    #[test]
    fn test_states_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut terrain = TerrainAutomaton::new(20, 15, &mut rng);
        let owners = uniform_owners(20, 15);

        assert!(terrain.states().iter().all(|&s| (s as usize) < STATE_COUNT));

        for _ in 0..50 {
            terrain.step(0.8, &owners, &mut rng);
            assert!(terrain.states().iter().all(|&s| (s as usize) < STATE_COUNT));
        }
    }

    /// With a crowded successor neighborhood the surge rule wins over growth
    #[test]
    fn test_surge_takes_precedence_over_growth() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut terrain = TerrainAutomaton::new(7, 7, &mut rng);

        // Cell (3,3) holds state 0; exactly 7 cells in its 5x5 window hold
        // the successor state 1, satisfying both thresholds at once
        terrain.current.fill(3);
        terrain.current[3 * 7 + 3] = 0;
        for &(x, y) in &[(1, 1), (2, 1), (3, 1), (4, 1), (5, 1), (1, 2), (2, 2)] {
            terrain.current[y * 7 + x] = 1;
        }

        let owners = uniform_owners(7, 7);
        terrain.step(0.0, &owners, &mut rng);

        assert_eq!(terrain.state(3, 3), 2, "surge must advance two states");
    }

    /// Exactly the growth threshold advances a single state
    #[test]
    fn test_growth_rule() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut terrain = TerrainAutomaton::new(7, 7, &mut rng);

        terrain.current.fill(3);
        terrain.current[3 * 7 + 3] = 0;
        for &(x, y) in &[(1, 1), (2, 1), (3, 1), (4, 1), (5, 1)] {
            terrain.current[y * 7 + x] = 1;
        }

        let owners = uniform_owners(7, 7);
        terrain.step(0.0, &owners, &mut rng);

        assert_eq!(terrain.state(3, 3), 1);
    }

    /// A starved cell decays one state, wrapping below zero
    #[test]
    fn test_decay_rule_wraps() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut terrain = TerrainAutomaton::new(7, 7, &mut rng);

        // No cell holds the successor of state 0, so the count is 0
        terrain.current.fill(0);

        let owners = uniform_owners(7, 7);
        terrain.step(0.0, &owners, &mut rng);

        assert!(terrain
            .states()
            .iter()
            .all(|&s| s == (STATE_COUNT as u8) - 1));
    }

    /// A mid-range successor count leaves the cell unchanged
    #[test]
    fn test_stable_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut terrain = TerrainAutomaton::new(7, 7, &mut rng);

        terrain.current.fill(3);
        terrain.current[3 * 7 + 3] = 0;
        for &(x, y) in &[(1, 1), (2, 1), (3, 1)] {
            terrain.current[y * 7 + x] = 1;
        }

        let owners = uniform_owners(7, 7);
        terrain.step(0.0, &owners, &mut rng);

        assert_eq!(terrain.state(3, 3), 0, "count of 3 is in the stable band");
    }

    /// The neighborhood wraps toroidally across both edges
    #[test]
    fn test_toroidal_neighborhood() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut terrain = TerrainAutomaton::new(8, 8, &mut rng);

        // Corner cell (0,0) at state 0; successors placed only on the far
        // edges, reachable solely through the wrap
        terrain.current.fill(3);
        terrain.current[0] = 0;
        for &(x, y) in &[(6, 0), (7, 0), (6, 7), (7, 7), (0, 6)] {
            terrain.current[y * 8 + x] = 1;
        }

        let owners = uniform_owners(8, 8);
        terrain.step(0.0, &owners, &mut rng);

        assert_eq!(terrain.state(0, 0), 1, "wrapped neighbors must be counted");
    }

    /// Zero border probability never scrambles, even across owners
    #[test]
    fn test_no_scramble_at_zero_probability() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut terrain = TerrainAutomaton::new(6, 6, &mut rng);
        terrain.current.fill(3);

        // Checkerboard owners: every 2x2 block crosses a boundary
        let owners: Vec<usize> = (0..36).map(|i| (i % 6 + i / 6) % 2).collect();

        terrain.step(0.0, &owners, &mut rng);

        // All counts are 0 (no successors present), so pure decay everywhere
        assert!(terrain.states().iter().all(|&s| s == 2));
    }

    /// Determinism: same seed and inputs give the same generation
    #[test]
    fn test_step_determinism() {
        let owners: Vec<usize> = (0..20 * 15).map(|i| i % 5).collect();

        let mut rng_a = ChaCha8Rng::seed_from_u64(42);
        let mut terrain_a = TerrainAutomaton::new(20, 15, &mut rng_a);
        let mut rng_b = ChaCha8Rng::seed_from_u64(42);
        let mut terrain_b = TerrainAutomaton::new(20, 15, &mut rng_b);

        for _ in 0..10 {
            terrain_a.step(0.5, &owners, &mut rng_a);
            terrain_b.step(0.5, &owners, &mut rng_b);
        }

        assert_eq!(terrain_a.states(), terrain_b.states());
    }
}
