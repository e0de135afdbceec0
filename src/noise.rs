//! Seeded continuous noise field
//!
//! Every organic-looking motion in the ecosystem (region drift, animal
//! wander, border-probability hops, terrain vibration) samples this field.
//! The core is seeded 3D Perlin noise with the standard Ken Perlin
//! permutation table; lower-dimensional samples fix the unused axes at zero.
//! Output is folded into `[0, 1]` with a few fractal octaves, matching the
//! smooth, bounded feel of sketch-style `noise()` functions.

/// Configuration for fractal noise sampling
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseConfig {
    /// Number of octaves accumulated per sample
    pub octaves: usize,
    /// Amplitude decay per octave
    pub falloff: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 4,
            falloff: 0.5,
        }
    }
}

// Standard 256-element permutation table from Ken Perlin's reference
// implementation. Must remain unchanged for deterministic sampling.
const PERM: [u32; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// Hash a lattice corner, mixing the seed into the table lookup
#[inline]
fn corner_hash(x: i32, y: i32, z: i32, seed: u32) -> u32 {
    let seed_hash = (seed.wrapping_mul(1103515245).wrapping_add(12345)) >> 16;
    let ix = ((x as u32) ^ seed_hash) & 255;
    let iy = ((y as u32) ^ (seed_hash >> 8)) & 255;
    let iz = ((z as u32) ^ (seed_hash >> 16)) & 255;
    let a = PERM[ix as usize];
    let b = PERM[((a + iy) & 255) as usize];
    PERM[((b + iz) & 255) as usize]
}

/// Dot product with one of the 12 cube-edge gradient directions
#[inline]
fn grad(hash: u32, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        z
    } else {
        x
    };
    let su = if (h & 1) == 0 { -u } else { u };
    let sv = if (h & 2) == 0 { -v } else { v };
    su + sv
}

/// Quintic fade curve 6t^5 - 15t^4 + 10t^3 (C2-continuous at 0 and 1)
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Single-octave 3D Perlin sample in [-1, 1]
fn perlin(x: f32, y: f32, z: f32, seed: u32) -> f32 {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let z0 = z.floor() as i32;

    // Relative position within the containing lattice cube
    let xf = x - x.floor();
    let yf = y - y.floor();
    let zf = z - z.floor();

    let u = fade(xf);
    let v = fade(yf);
    let w = fade(zf);

    // Gradient contributions from the eight cube corners
    let g000 = grad(corner_hash(x0, y0, z0, seed), xf, yf, zf);
    let g100 = grad(corner_hash(x0 + 1, y0, z0, seed), xf - 1.0, yf, zf);
    let g010 = grad(corner_hash(x0, y0 + 1, z0, seed), xf, yf - 1.0, zf);
    let g110 = grad(corner_hash(x0 + 1, y0 + 1, z0, seed), xf - 1.0, yf - 1.0, zf);
    let g001 = grad(corner_hash(x0, y0, z0 + 1, seed), xf, yf, zf - 1.0);
    let g101 = grad(corner_hash(x0 + 1, y0, z0 + 1, seed), xf - 1.0, yf, zf - 1.0);
    let g011 = grad(corner_hash(x0, y0 + 1, z0 + 1, seed), xf, yf - 1.0, zf - 1.0);
    let g111 = grad(
        corner_hash(x0 + 1, y0 + 1, z0 + 1, seed),
        xf - 1.0,
        yf - 1.0,
        zf - 1.0,
    );

    // Trilinear interpolation of the corner gradients
    let x00 = lerp(g000, g100, u);
    let x10 = lerp(g010, g110, u);
    let x01 = lerp(g001, g101, u);
    let x11 = lerp(g011, g111, u);
    let y0v = lerp(x00, x10, v);
    let y1v = lerp(x01, x11, v);

    lerp(y0v, y1v, w)
}

/// Seeded continuous noise over one to three dimensions
///
/// Deterministic per seed: the same field sampled at the same coordinates
/// always returns the same value. Output is normalized to `[0, 1]`.
///
/// # Example
///
/// ```rust
/// use woodland_ecosystem::NoiseField;
///
/// let noise = NoiseField::new(42);
/// let a = noise.sample2(0.3, 0.7);
/// let b = noise.sample2(0.3, 0.7);
/// assert_eq!(a, b);
/// assert!((0.0..=1.0).contains(&a));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NoiseField {
    seed: u32,
    config: NoiseConfig,
}

impl NoiseField {
    /// Create a field with the given seed and default octave settings
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            config: NoiseConfig::default(),
        }
    }

    /// Create a field with custom octave settings
    pub fn with_config(seed: u32, config: NoiseConfig) -> Self {
        Self { seed, config }
    }

    /// Sample along a single axis
    #[inline]
    pub fn sample1(&self, x: f32) -> f32 {
        self.sample3(x, 0.0, 0.0)
    }

    /// Sample in the plane
    #[inline]
    pub fn sample2(&self, x: f32, y: f32) -> f32 {
        self.sample3(x, y, 0.0)
    }

    /// Sample in three dimensions (the third axis usually carries time)
    pub fn sample3(&self, x: f32, y: f32, z: f32) -> f32 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_value = 0.0;

        // Accumulate octaves: each adds finer detail at lower amplitude
        for _ in 0..self.config.octaves {
            total += perlin(x * frequency, y * frequency, z * frequency, self.seed) * amplitude;
            max_value += amplitude;
            amplitude *= self.config.falloff;
            frequency *= 2.0;
        }

        // Fold the [-1, 1] accumulation into [0, 1]
        ((total / max_value) + 1.0) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Same seed and coordinates must always produce the same value
    #[test]
    fn test_determinism() {
        let noise = NoiseField::new(42);

        assert_eq!(noise.sample1(1.7), noise.sample1(1.7));
        assert_eq!(noise.sample2(0.5, 0.7), noise.sample2(0.5, 0.7));
        assert_eq!(noise.sample3(0.5, 0.7, 0.3), noise.sample3(0.5, 0.7, 0.3));
    }

    /// Output stays in [0, 1] across a spread of coordinates
    #[test]
    fn test_range() {
        let noise = NoiseField::new(12345);

        for i in 0..200 {
            let t = i as f32 * 0.37;
            let value = noise.sample3(t, t * 0.5 - 11.0, t * 1.9);
            assert!(
                (0.0..=1.0).contains(&value),
                "value {} at t={} is outside [0, 1]",
                value,
                t
            );
        }
    }

    /// Different seeds should decorrelate the field
    #[test]
    fn test_different_seeds() {
        let a = NoiseField::new(42);
        let b = NoiseField::new(999);

        assert_ne!(a.sample3(0.5, 0.5, 0.5), b.sample3(0.5, 0.5, 0.5));
    }

    /// 1D and 2D samples are distinct slices of the field
    #[test]
    fn test_dimension_slices() {
        let noise = NoiseField::new(7);

        // sample2(0, x) is the hop oscillator's second stream; it must not
        // collapse onto sample1(x)
        assert_ne!(noise.sample1(3.2), noise.sample2(0.0, 3.2));
    }

    /// Nearby samples vary smoothly, distant samples decorrelate
    #[test]
    fn test_continuity() {
        let noise = NoiseField::new(42);

        let base = noise.sample2(10.0, 10.0);
        let near = noise.sample2(10.001, 10.0);
        assert!((base - near).abs() < 0.01, "field should be continuous");
    }

    /// Raw single-octave core stays within [-1, 1]
    #[test]
    fn test_perlin_core_range() {
        for i in 0..100 {
            let t = i as f32 * 0.61;
            let value = perlin(t, -t, t * 2.3, 42);
            assert!((-1.0..=1.0).contains(&value), "raw sample {} out of range", value);
        }
    }
}
