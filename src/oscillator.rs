//! Border-probability oscillator
//!
//! A slow, bounded random walk over `[0, 1]` that controls how often the
//! terrain automaton scrambles cells on region boundaries. Two noise streams
//! are pinched toward opposite extremes, averaged, and pinched again toward
//! the midpoint; the deviation from 0.5 becomes the per-tick hop.

use crate::noise::NoiseField;

/// Milliseconds per unit of oscillator time
const TIME_SCALE: f64 = 5000.0;

/// Smoothing/reflection transform that biases `v` toward `x`
///
/// `pinch(v, x) = 2·(max(v,x)−x)² − 2·(x−min(v,x))² + x`. Values above the
/// pivot are squared away from it, values below are reflected; the pivot
/// itself is a fixed point: `pinch(x, x) = x`.
#[inline]
pub fn pinch(v: f32, x: f32) -> f32 {
    let a = v.max(x) - x;
    let b = x - v.min(x);
    2.0 * a * a - 2.0 * b * b + x
}

/// Blend two pinched noise streams and re-center the result around 0.5
fn noise_hopper(noise: &NoiseField, x: f32) -> f32 {
    let high = pinch(noise.sample1(x), 1.0);
    let low = pinch(noise.sample2(0.0, x), 0.0);
    pinch((high + low) / 2.0, 0.5)
}

/// Signed hop for one tick, in roughly [-0.5, 0.5]
fn delta_hop(noise: &NoiseField, t: f32) -> f32 {
    noise_hopper(noise, t) - 0.5
}

/// Drifting scalar that feeds the terrain automaton's border probability
///
/// Advanced once per frame tick, after the frame's simulation work has read
/// the current value.
#[derive(Debug, Clone, Copy)]
pub struct BorderOscillator {
    drift: f32,
}

impl BorderOscillator {
    /// Create an oscillator at the given starting value, clamped to `[0, 1]`
    pub fn new(initial: f32) -> Self {
        Self {
            drift: initial.clamp(0.0, 1.0),
        }
    }

    /// Current drift scalar in `[0, 1]`
    #[inline]
    pub fn value(&self) -> f32 {
        self.drift
    }

    /// Border probability handed to the terrain automaton
    ///
    /// Remaps the drift scalar from `[0, 1]` onto `[1/6, 1]`, so boundary
    /// scrambling never fully stops.
    #[inline]
    pub fn border_prob(&self) -> f32 {
        (self.drift + 0.2) / 1.2
    }

    /// Hop the scalar once for the given elapsed time
    pub fn advance(&mut self, time_ms: f64, noise: &NoiseField) {
        let t = (time_ms / TIME_SCALE) as f32;
        self.drift = (self.drift + delta_hop(noise, t)).clamp(0.0, 1.0);
    }
}
