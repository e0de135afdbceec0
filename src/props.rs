//! Static forest props
//!
//! Decorative oaks and pines scattered across the viewport. Props are
//! generated once per setup or resize and are immutable afterwards; the
//! renderer only reads them. Detail placement (oak shade spots, pine needle
//! clusters) is sampled here, at generation time, so rendering a frame
//! never touches the RNG.

use glam::Vec2;
use rand::Rng;

use crate::render::palette::Rgba;

/// One prop per this many square pixels of viewport
const PROP_DENSITY: f32 = 6000.0;

/// Tree kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeKind {
    /// Broad trunk, round layered crown with shade spots
    Oak,
    /// Narrow trunk, stacked tapering layers with needle clusters
    Pine,
}

/// A pre-sampled crown detail: shade spot (oak) or needle cluster (pine)
#[derive(Debug, Clone, Copy)]
pub struct CrownDetail {
    /// Offset from the prop position
    pub offset: Vec2,
    /// Ellipse diameters
    pub size: Vec2,
}

/// A static decorative tree
#[derive(Debug, Clone)]
pub struct ForestProp {
    /// Tree kind
    pub kind: TreeKind,
    /// Base position in pixel space
    pub position: Vec2,
    /// Trunk width in pixels
    pub trunk_width: f32,
    /// Trunk height in pixels
    pub trunk_height: f32,
    /// Diameter of the widest crown layer
    pub crown_size: f32,
    /// Number of crown layers
    pub layers: u32,
    /// Trunk color
    pub trunk_color: Rgba,
    /// Crown color
    pub crown_color: Rgba,
    /// Pre-sampled crown details, drawn in a darker crown tone
    pub details: Vec<CrownDetail>,
}

/// Scatter trees over the viewport, one per ~6000 square pixels
///
/// Each prop is an oak with probability 0.5, else a pine. Counts, sizes,
/// and colors follow fixed woodland ranges; everything visual is decided
/// here so the prop is immutable afterwards.
pub fn generate_props<R: Rng>(bounds: Vec2, rng: &mut R) -> Vec<ForestProp> {
    let count = ((bounds.x * bounds.y) / PROP_DENSITY) as usize;

    (0..count)
        .map(|_| {
            let position = Vec2::new(rng.gen_range(0.0..bounds.x), rng.gen_range(0.0..bounds.y));
            if rng.gen::<f32>() < 0.5 {
                oak(position, rng)
            } else {
                pine(position, rng)
            }
        })
        .collect()
}

fn oak<R: Rng>(position: Vec2, rng: &mut R) -> ForestProp {
    let trunk_height = rng.gen_range(40.0..60.0);
    let crown_size = rng.gen_range(40.0..70.0);

    // Four shade spots in the corners of the lowest crown layer
    let crown_center_y = -trunk_height * 0.6;
    let details = (0..4)
        .map(|spot| {
            let dx = if spot % 2 == 0 { -0.2 } else { 0.2 } * crown_size;
            let dy = if spot < 2 { -0.2 } else { 0.2 } * crown_size;
            CrownDetail {
                offset: Vec2::new(dx, crown_center_y + dy),
                size: Vec2::splat(12.0),
            }
        })
        .collect();

    ForestProp {
        kind: TreeKind::Oak,
        position,
        trunk_width: rng.gen_range(8.0..15.0),
        trunk_height,
        crown_size,
        layers: 3,
        trunk_color: [
            rng.gen_range(70..90),
            rng.gen_range(45..65),
            rng.gen_range(25..35),
            255,
        ],
        crown_color: [
            rng.gen_range(25..45),
            rng.gen_range(70..120),
            rng.gen_range(15..35),
            255,
        ],
        details,
    }
}

fn pine<R: Rng>(position: Vec2, rng: &mut R) -> ForestProp {
    let trunk_height = rng.gen_range(30.0..50.0);
    let crown_size = rng.gen_range(25.0..45.0);
    let layers = rng.gen_range(4..7);

    // Six needle clusters scattered over random layers
    let details = (0..6)
        .map(|_| {
            let layer = rng.gen_range(0..layers);
            let layer_y = -trunk_height * 0.3 - layer as f32 * trunk_height * 0.15;
            CrownDetail {
                offset: Vec2::new(
                    rng.gen_range(-crown_size * 0.4..crown_size * 0.4),
                    layer_y + rng.gen_range(-10.0..10.0),
                ),
                size: Vec2::new(rng.gen_range(3.0..6.0), rng.gen_range(3.0..6.0)),
            }
        })
        .collect();

    ForestProp {
        kind: TreeKind::Pine,
        position,
        trunk_width: rng.gen_range(6.0..12.0),
        trunk_height,
        crown_size,
        layers,
        trunk_color: [
            rng.gen_range(80..100),
            rng.gen_range(50..70),
            rng.gen_range(30..40),
            255,
        ],
        crown_color: [
            rng.gen_range(15..35),
            rng.gen_range(60..100),
            rng.gen_range(20..40),
            255,
        ],
        details,
    }
}
