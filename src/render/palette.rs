//! Color types and the terrain palette

use crate::terrain::STATE_COUNT;

/// RGBA color with 8-bit channels
pub type Rgba = [u8; 4];

/// Translucent background wash painted at the start of every frame
///
/// A dark green land tone; the low alpha leaves a faint trail of the
/// previous frame, which calms the terrain flicker.
pub const BACKGROUND: Rgba = [45, 80, 22, 40];

/// Translucent colors for the ten terrain states
///
/// Grassland, plains, and plateau tones. The palette order is part of the
/// renderer contract: palette index = `(state + owner % 3) % 10` when the
/// region offset is enabled, else the state itself.
pub const TERRAIN_PALETTE: [Rgba; STATE_COUNT] = [
    [34, 139, 34, 180],   // Forest green: dense grassland
    [107, 142, 35, 160],  // Olive drab: mountain grassland
    [154, 205, 50, 140],  // Yellow green: plains
    [124, 252, 0, 150],   // Lawn green: fresh meadows
    [50, 205, 50, 170],   // Lime green: fertile plains
    [85, 107, 47, 190],   // Dark olive: plateau vegetation
    [143, 188, 143, 160], // Dark sea green: hill grassland
    [60, 179, 113, 150],  // Medium sea green: valley grass
    [46, 125, 50, 180],   // Dark green: dense forest edge
    [139, 195, 74, 140],  // Light green: open grassland
];

/// Palette index for a terrain cell, optionally shifted by its region owner
#[inline]
pub fn terrain_palette_index(state: u8, owner: usize, region_offset: bool) -> usize {
    let shift = if region_offset { owner % 3 } else { 0 };
    (state as usize + shift) % STATE_COUNT
}

/// Darken a color by per-channel amounts, leaving alpha untouched
#[inline]
pub fn darken(color: Rgba, amounts: [u8; 3]) -> Rgba {
    [
        color[0].saturating_sub(amounts[0]),
        color[1].saturating_sub(amounts[1]),
        color[2].saturating_sub(amounts[2]),
        color[3],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_index_without_offset() {
        assert_eq!(terrain_palette_index(0, 17, false), 0);
        assert_eq!(terrain_palette_index(9, 17, false), 9);
    }

    #[test]
    fn test_palette_index_with_offset() {
        // owner % 3 shifts the state index, wrapping at the palette size
        assert_eq!(terrain_palette_index(9, 1, true), 0);
        assert_eq!(terrain_palette_index(3, 5, true), 5);
        assert_eq!(terrain_palette_index(3, 6, true), 3);
    }

    #[test]
    fn test_palette_index_in_bounds() {
        for state in 0..STATE_COUNT as u8 {
            for owner in 0..30 {
                let index = terrain_palette_index(state, owner, true);
                assert!(index < STATE_COUNT);
            }
        }
    }

    #[test]
    fn test_darken_saturates() {
        let color = [10, 200, 30, 180];
        let darker = darken(color, [20, 15, 10]);
        assert_eq!(darker, [0, 185, 20, 180]);
    }
}
