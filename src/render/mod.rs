//! Frame rendering
//!
//! Turns the current ecosystem state into an ordered list of draw commands
//! for the host surface. Rendering is a pure read: it mutates nothing and
//! draws from no RNG, so calling it twice between frames yields the same
//! command list. The per-cell "vibration" offsets come from the noise field
//! keyed on the tick counter and are purely visual.

pub mod palette;

use glam::Vec2;

use crate::animals::{Animal, Species};
use crate::ecosystem::Ecosystem;
use crate::props::{ForestProp, TreeKind};
use crate::render::palette::{darken, terrain_palette_index, Rgba, BACKGROUND, TERRAIN_PALETTE};

/// A single drawing command for the host surface
///
/// Commands are emitted back-to-front: background wash, terrain cells,
/// forest props, animals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Wash the whole surface with a (possibly translucent) color
    Clear {
        /// Wash color
        color: Rgba,
    },
    /// Axis-aligned filled rectangle
    Rect {
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Width
        width: f32,
        /// Height
        height: f32,
        /// Fill color
        color: Rgba,
    },
    /// Filled ellipse, rotated around its center
    Ellipse {
        /// Center x
        cx: f32,
        /// Center y
        cy: f32,
        /// Semi-axis along the rotated x direction
        rx: f32,
        /// Semi-axis along the rotated y direction
        ry: f32,
        /// Rotation in radians
        rotation: f32,
        /// Fill color
        color: Rgba,
    },
}

/// Render one frame of the ecosystem
pub fn render_frame(eco: &Ecosystem) -> Vec<DrawCommand> {
    let cell_count = eco.terrain().cols() * eco.terrain().rows();
    let mut commands = Vec::with_capacity(1 + cell_count + eco.props().len() * 8 + eco.population().len() * 8);

    commands.push(DrawCommand::Clear { color: BACKGROUND });
    paint_terrain(eco, &mut commands);
    for prop in eco.props() {
        paint_prop(prop, &mut commands);
    }
    for animal in eco.population().animals() {
        paint_animal(animal, &mut commands);
    }

    commands
}

/// One rect per terrain cell, palette-colored and gently vibrated
fn paint_terrain(eco: &Ecosystem, out: &mut Vec<DrawCommand>) {
    let terrain = eco.terrain();
    let noise = eco.noise();
    let cell_size = eco.cell_size();
    let region_offset = eco.config().region_offset;
    let t = eco.tick() as f32 * 0.005;

    for x in 0..terrain.cols() {
        for y in 0..terrain.rows() {
            let index =
                terrain_palette_index(terrain.state(x, y), eco.regions().owner(x, y), region_offset);

            // Sub-pixel vibration, visual only
            let fx = x as f32;
            let fy = y as f32;
            let vx = noise.sample3(fx * 0.05, fy * 0.05, t) * 0.5 - 0.25;
            let vy = noise.sample3(fx * 0.05 + 100.0, fy * 0.05 + 100.0, t) * 0.5 - 0.25;

            out.push(DrawCommand::Rect {
                x: fx * cell_size + vx,
                y: fy * cell_size + vy,
                width: cell_size,
                height: cell_size,
                color: TERRAIN_PALETTE[index],
            });
        }
    }
}

/// Trunk, layered crown, and the pre-sampled crown details
fn paint_prop(prop: &ForestProp, out: &mut Vec<DrawCommand>) {
    let p = prop.position;

    out.push(DrawCommand::Rect {
        x: p.x - prop.trunk_width / 2.0,
        y: p.y - prop.trunk_height / 2.0,
        width: prop.trunk_width,
        height: prop.trunk_height,
        color: prop.trunk_color,
    });

    match prop.kind {
        TreeKind::Oak => {
            // Stacked shrinking layers above the trunk for a full crown
            for layer in 0..prop.layers {
                let offset = layer as f32 * 8.0;
                let size = prop.crown_size - offset;
                out.push(DrawCommand::Ellipse {
                    cx: p.x,
                    cy: p.y - prop.trunk_height * 0.6 - offset,
                    rx: size / 2.0,
                    ry: size * 0.9 / 2.0,
                    rotation: 0.0,
                    color: prop.crown_color,
                });
            }
            paint_details(prop, darken(prop.crown_color, [20, 15, 10]), out);
        }
        TreeKind::Pine => {
            // Tapering layers from the trunk upward
            for layer in 0..prop.layers {
                let layer_y = p.y - prop.trunk_height * 0.3 - layer as f32 * prop.trunk_height * 0.15;
                let size = prop.crown_size - layer as f32 * 5.0;
                out.push(DrawCommand::Ellipse {
                    cx: p.x,
                    cy: layer_y,
                    rx: size / 2.0,
                    ry: size * 0.6 / 2.0,
                    rotation: 0.0,
                    color: prop.crown_color,
                });
            }
            paint_details(prop, darken(prop.crown_color, [15, 10, 5]), out);
        }
    }
}

fn paint_details(prop: &ForestProp, color: Rgba, out: &mut Vec<DrawCommand>) {
    for detail in &prop.details {
        out.push(DrawCommand::Ellipse {
            cx: prop.position.x + detail.offset.x,
            cy: prop.position.y + detail.offset.y,
            rx: detail.size.x / 2.0,
            ry: detail.size.y / 2.0,
            rotation: 0.0,
            color,
        });
    }
}

/// Species-specific ellipse composition, rotated toward the heading
fn paint_animal(animal: &Animal, out: &mut Vec<DrawCommand>) {
    let heading = animal.velocity.y.atan2(animal.velocity.x);
    let rot = Vec2::from_angle(heading);
    let s = animal.size;

    let mut part = |lx: f32, ly: f32, w: f32, h: f32, color: Rgba| {
        let center = animal.position + rot.rotate(Vec2::new(lx, ly));
        out.push(DrawCommand::Ellipse {
            cx: center.x,
            cy: center.y,
            rx: w / 2.0,
            ry: h / 2.0,
            rotation: heading,
            color,
        });
    };

    match animal.species {
        Species::Deer => {
            let antler: Rgba = [101, 67, 33, 255];
            // Oval body with a head bump at the front
            part(0.0, 0.0, s * 2.2, s * 1.4, animal.color);
            part(s * 1.1, 0.0, s * 0.8, s * 0.7, animal.color);
            // Antler branches and points
            part(s * 1.4, -s * 0.5, s * 0.5, s * 0.3, antler);
            part(s * 1.4, s * 0.5, s * 0.5, s * 0.3, antler);
            part(s * 1.6, -s * 0.7, s * 0.25, s * 0.15, antler);
            part(s * 1.6, s * 0.7, s * 0.25, s * 0.15, antler);
            part(s * 1.3, -s * 0.8, s * 0.2, s * 0.12, antler);
            part(s * 1.3, s * 0.8, s * 0.2, s * 0.12, antler);
        }
        Species::Rabbit => {
            let ear: Rgba = [160, 82, 45, 200];
            part(0.0, 0.0, s * 1.8, s * 1.2, animal.color);
            part(s * 0.9, 0.0, s * 0.7, s * 0.6, animal.color);
            // Long ears and a cotton tail
            part(s * 1.2, -s * 0.5, s * 0.25, s * 0.8, ear);
            part(s * 1.2, s * 0.5, s * 0.25, s * 0.8, ear);
            part(-s * 0.9, 0.0, s * 0.4, s * 0.4, [255, 255, 255, 255]);
        }
        Species::Squirrel => {
            part(0.0, 0.0, s * 1.5, s * 1.0, animal.color);
            part(s * 0.75, 0.0, s * 0.6, s * 0.5, animal.color);
            // Bushy tail at the back
            part(-s * 0.8, 0.0, s * 1.0, s * 1.8, [85, 60, 25, 180]);
            part(s * 0.9, -s * 0.3, s * 0.2, s * 0.3, animal.color);
            part(s * 0.9, s * 0.3, s * 0.2, s * 0.3, animal.color);
        }
    }

    // Eye dot
    part(s * 0.5, 0.0, s * 0.1, s * 0.1, [0, 0, 0, 255]);
}
