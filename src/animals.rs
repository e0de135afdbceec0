//! Flocking land animals
//!
//! A fixed population of deer, rabbits, and squirrels steered by the classic
//! separation/alignment/cohesion forces plus a noise-driven wander. The
//! update is a brute-force O(n^2) pairwise pass; at the default population of
//! 80 that is well inside a frame budget, and it keeps the motion exactly
//! reproducible for a fixed seed.

use glam::Vec2;
use rand::Rng;

use crate::noise::NoiseField;
use crate::render::palette::Rgba;

/// Magnitude cap on the separation steering force
const SEPARATION_LIMIT: f32 = 0.5;

/// Magnitude cap on the alignment and cohesion steering forces
const STEER_LIMIT: f32 = 0.3;

/// Coordinate scale for wander-noise sampling
const WANDER_SCALE: f32 = 0.008;

/// Animal species, each with its own movement character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Large, slow, strongly cohesive herd animal
    Deer,
    /// Mid-sized, skittish, loosely aligned
    Rabbit,
    /// Small, fast, most numerous
    Squirrel,
}

/// Per-species movement and appearance parameters
#[derive(Debug, Clone, Copy)]
pub struct SpeciesProfile {
    /// Max-speed range an individual is drawn from
    pub speed: (f32, f32),
    /// Body-size range an individual is drawn from
    pub size: (f32, f32),
    /// Base body color
    pub color: Rgba,
    /// Radius within which any animal repels this one
    pub separation_radius: f32,
    /// Radius within which same-species animals align and cohere
    pub neighbor_radius: f32,
    /// Force multipliers: separation, alignment, cohesion, wander
    pub forces: [f32; 4],
}

const DEER: SpeciesProfile = SpeciesProfile {
    speed: (0.8, 1.8),
    size: (12.0, 16.0),
    color: [139, 69, 19, 255],
    separation_radius: 35.0,
    neighbor_radius: 60.0,
    forces: [1.8, 1.2, 1.5, 0.4],
};

const RABBIT: SpeciesProfile = SpeciesProfile {
    speed: (1.0, 2.2),
    size: (8.0, 11.0),
    color: [160, 82, 45, 255],
    separation_radius: 20.0,
    neighbor_radius: 40.0,
    forces: [2.2, 0.8, 1.8, 0.7],
};

const SQUIRREL: SpeciesProfile = SpeciesProfile {
    speed: (1.2, 2.5),
    size: (6.0, 9.0),
    color: [101, 67, 33, 255],
    separation_radius: 15.0,
    neighbor_radius: 30.0,
    forces: [2.5, 1.0, 2.0, 0.9],
};

impl Species {
    /// Pick a species from a uniform draw in `[0, 1)`
    ///
    /// Cumulative thresholds: deer below 0.25, rabbit below 0.45, squirrel
    /// for the remaining 55%.
    pub fn from_draw(r: f32) -> Species {
        if r < 0.25 {
            Species::Deer
        } else if r < 0.45 {
            Species::Rabbit
        } else {
            Species::Squirrel
        }
    }

    /// Movement and appearance parameters for this species
    pub fn profile(self) -> &'static SpeciesProfile {
        match self {
            Species::Deer => &DEER,
            Species::Rabbit => &RABBIT,
            Species::Squirrel => &SQUIRREL,
        }
    }
}

/// A single animal in the population
#[derive(Debug, Clone, Copy)]
pub struct Animal {
    /// Position in pixel space, always within the world bounds
    pub position: Vec2,
    /// Velocity, never longer than `max_speed`
    pub velocity: Vec2,
    /// Accumulated steering force, zeroed after each update
    acceleration: Vec2,
    /// Individual top speed, drawn from the species range
    pub max_speed: f32,
    /// Individual body size, drawn from the species range
    pub size: f32,
    /// Body color
    pub color: Rgba,
    /// Species tag
    pub species: Species,
}

/// The fixed animal population
///
/// Created once at setup; individuals are mutated every tick but never
/// added or removed, so indices are stable for the world's lifetime.
#[derive(Debug, Clone)]
pub struct Population {
    animals: Vec<Animal>,
}

impl Population {
    /// Create `count` animals at random positions within `bounds`
    pub fn new<R: Rng>(count: usize, bounds: Vec2, rng: &mut R) -> Self {
        let animals = (0..count)
            .map(|_| {
                let species = Species::from_draw(rng.gen::<f32>());
                let profile = species.profile();
                Animal {
                    position: Vec2::new(
                        rng.gen_range(0.0..bounds.x),
                        rng.gen_range(0.0..bounds.y),
                    ),
                    velocity: Vec2::new(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0)),
                    acceleration: Vec2::ZERO,
                    max_speed: rng.gen_range(profile.speed.0..profile.speed.1),
                    size: rng.gen_range(profile.size.0..profile.size.1),
                    color: profile.color,
                    species,
                }
            })
            .collect();
        Self { animals }
    }

    /// All animals, index-stable
    #[inline]
    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    /// Number of animals (fixed after construction)
    #[inline]
    pub fn len(&self) -> usize {
        self.animals.len()
    }

    /// Whether the population is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    /// Advance every animal one tick
    ///
    /// Animals are updated in index order and each one reads the already
    /// updated state of lower-indexed animals, the same sequential scheme
    /// the motion was tuned under.
    pub fn update(&mut self, bounds: Vec2, tick: u64, noise: &NoiseField) {
        let t = tick as f32;

        for i in 0..self.animals.len() {
            let (separation, alignment, cohesion) = flocking_forces(&self.animals, i);

            let animal = &self.animals[i];
            let forces = animal.species.profile().forces;
            let wander = Vec2::new(
                noise.sample3(
                    animal.position.x * WANDER_SCALE,
                    animal.position.y * WANDER_SCALE,
                    t * WANDER_SCALE,
                ) - 0.5,
                noise.sample2(animal.position.y * WANDER_SCALE, t * WANDER_SCALE) - 0.5,
            );

            let steering = separation * forces[0]
                + alignment * forces[1]
                + cohesion * forces[2]
                + wander * forces[3];

            let animal = &mut self.animals[i];
            animal.acceleration += steering;
            animal.velocity =
                (animal.velocity + animal.acceleration).clamp_length_max(animal.max_speed);
            animal.position += animal.velocity;
            animal.acceleration = Vec2::ZERO;

            // Toroidal world: leave one edge, enter the opposite
            animal.position.x = animal.position.x.rem_euclid(bounds.x);
            animal.position.y = animal.position.y.rem_euclid(bounds.y);
        }
    }

    /// Wrap every animal into new bounds (used after a viewport resize)
    pub fn wrap_into(&mut self, bounds: Vec2) {
        for animal in &mut self.animals {
            animal.position.x = animal.position.x.rem_euclid(bounds.x);
            animal.position.y = animal.position.y.rem_euclid(bounds.y);
        }
    }
}

/// Compute the three steering forces for one animal against the whole flock
///
/// Separation considers every other animal within the species' separation
/// radius, weighted by inverse distance. Alignment and cohesion consider
/// only same-species animals within the neighbor radius. Each force is the
/// standard steer: desired direction scaled to max speed, minus the current
/// velocity, magnitude-limited.
fn flocking_forces(animals: &[Animal], index: usize) -> (Vec2, Vec2, Vec2) {
    let animal = &animals[index];
    let profile = animal.species.profile();

    let mut separation = Vec2::ZERO;
    let mut alignment = Vec2::ZERO;
    let mut cohesion = Vec2::ZERO;
    let mut sep_count = 0;
    let mut flock_count = 0;

    for (i, other) in animals.iter().enumerate() {
        if i == index {
            continue;
        }

        let distance = animal.position.distance(other.position);

        // Coincident animals contribute no usable direction
        if distance > f32::EPSILON && distance < profile.separation_radius {
            let away = (animal.position - other.position).normalize() / distance;
            separation += away;
            sep_count += 1;
        }

        if distance < profile.neighbor_radius && other.species == animal.species {
            alignment += other.velocity;
            cohesion += other.position;
            flock_count += 1;
        }
    }

    if sep_count > 0 {
        separation /= sep_count as f32;
        separation = separation.normalize_or_zero() * animal.max_speed - animal.velocity;
        separation = separation.clamp_length_max(SEPARATION_LIMIT);
    }

    if flock_count > 0 {
        alignment /= flock_count as f32;
        alignment = alignment.normalize_or_zero() * animal.max_speed - animal.velocity;
        alignment = alignment.clamp_length_max(STEER_LIMIT);

        let centroid = cohesion / flock_count as f32;
        let desired = (centroid - animal.position).normalize_or_zero() * animal.max_speed;
        cohesion = (desired - animal.velocity).clamp_length_max(STEER_LIMIT);
    }

    (separation, alignment, cohesion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn still_animal(species: Species, position: Vec2) -> Animal {
        let profile = species.profile();
        Animal {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            max_speed: profile.speed.0,
            size: profile.size.0,
            color: profile.color,
            species,
        }
    }

    /// The cumulative draw thresholds select the documented species
    #[test]
    fn test_species_from_draw() {
        assert_eq!(Species::from_draw(0.10), Species::Deer);
        assert_eq!(Species::from_draw(0.30), Species::Rabbit);
        assert_eq!(Species::from_draw(0.80), Species::Squirrel);
    }

    /// Individuals are created inside bounds with in-range stats
    #[test]
    fn test_new_population() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let bounds = Vec2::new(640.0, 480.0);
        let population = Population::new(80, bounds, &mut rng);

        assert_eq!(population.len(), 80);
        for animal in population.animals() {
            let profile = animal.species.profile();
            assert!(animal.position.x >= 0.0 && animal.position.x < bounds.x);
            assert!(animal.position.y >= 0.0 && animal.position.y < bounds.y);
            assert!(animal.max_speed >= profile.speed.0 && animal.max_speed < profile.speed.1);
            assert!(animal.size >= profile.size.0 && animal.size < profile.size.1);
            assert!(animal.velocity.x.abs() <= 2.0 && animal.velocity.y.abs() <= 2.0);
        }
    }

    /// Speed never exceeds the individual max after any update
    #[test]
    fn test_speed_capped() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let bounds = Vec2::new(640.0, 480.0);
        let noise = NoiseField::new(42);
        let mut population = Population::new(80, bounds, &mut rng);

        for tick in 1..=50 {
            population.update(bounds, tick, &noise);
            for animal in population.animals() {
                assert!(
                    animal.velocity.length() <= animal.max_speed + 1e-4,
                    "animal exceeded its max speed"
                );
            }
        }
    }

    /// Positions stay in [0, bound) across updates, including wrap-around
    #[test]
    fn test_toroidal_wrap() {
        let bounds = Vec2::new(100.0, 100.0);
        let noise = NoiseField::new(1);

        // One animal parked just past the upper edge, drifting outward
        let mut animal = still_animal(Species::Deer, Vec2::new(99.9, 50.0));
        animal.velocity = Vec2::new(1.0, 0.0);
        let mut population = Population { animals: vec![animal] };

        population.update(bounds, 1, &noise);

        let position = population.animals()[0].position;
        assert!(position.x >= 0.0 && position.x < bounds.x);
        assert!(position.y >= 0.0 && position.y < bounds.y);
        // Re-entered on the left edge rather than clamping
        assert!(position.x < 10.0);
    }

    /// An isolated pair pushes apart: separation forces oppose along the
    /// joining line
    #[test]
    fn test_separation_antisymmetry() {
        // Two deer 20px apart on the x axis, inside the 35px separation
        // radius, nothing else nearby
        let animals = vec![
            still_animal(Species::Deer, Vec2::new(100.0, 100.0)),
            still_animal(Species::Deer, Vec2::new(120.0, 100.0)),
        ];

        let (sep_a, _, _) = flocking_forces(&animals, 0);
        let (sep_b, _, _) = flocking_forces(&animals, 1);

        assert!(sep_a.x < 0.0, "left animal must be pushed further left");
        assert!(sep_b.x > 0.0, "right animal must be pushed further right");
        assert!(
            (sep_a.x + sep_b.x).abs() < 1e-5,
            "separation must be antisymmetric along the joining line"
        );
    }

    /// Separation ignores animals outside the species radius
    #[test]
    fn test_separation_radius_respected() {
        let animals = vec![
            still_animal(Species::Squirrel, Vec2::new(100.0, 100.0)),
            still_animal(Species::Squirrel, Vec2::new(160.0, 100.0)),
        ];

        // 60px apart, far outside the squirrel separation radius of 15
        let (separation, _, _) = flocking_forces(&animals, 0);
        assert_eq!(separation, Vec2::ZERO);
    }

    /// Alignment and cohesion only bind same-species neighbors
    #[test]
    fn test_cross_species_ignored_for_flocking() {
        let animals = vec![
            still_animal(Species::Deer, Vec2::new(100.0, 100.0)),
            still_animal(Species::Rabbit, Vec2::new(110.0, 100.0)),
        ];

        let (separation, alignment, cohesion) = flocking_forces(&animals, 0);
        // The rabbit still repels (separation sees everyone) ...
        assert!(separation.length() > 0.0);
        // ... but contributes nothing to alignment or cohesion
        assert_eq!(alignment, Vec2::ZERO);
        assert_eq!(cohesion, Vec2::ZERO);
    }

    /// Cohesion steers an outlier toward its flock
    #[test]
    fn test_cohesion_pulls_inward() {
        // Three rabbits: two clustered right of one outlier, within the
        // 40px rabbit neighbor radius but outside the 20px separation radius
        let animals = vec![
            still_animal(Species::Rabbit, Vec2::new(100.0, 100.0)),
            still_animal(Species::Rabbit, Vec2::new(130.0, 90.0)),
            still_animal(Species::Rabbit, Vec2::new(130.0, 110.0)),
        ];

        let (_, _, cohesion) = flocking_forces(&animals, 0);
        assert!(cohesion.x > 0.0, "outlier must be pulled toward the pair");
    }

    /// Update is deterministic for a fixed seed and noise field
    #[test]
    fn test_update_determinism() {
        let bounds = Vec2::new(640.0, 480.0);
        let noise = NoiseField::new(42);

        let mut rng_a = ChaCha8Rng::seed_from_u64(9);
        let mut pop_a = Population::new(40, bounds, &mut rng_a);
        let mut rng_b = ChaCha8Rng::seed_from_u64(9);
        let mut pop_b = Population::new(40, bounds, &mut rng_b);

        for tick in 1..=20 {
            pop_a.update(bounds, tick, &noise);
            pop_b.update(bounds, tick, &noise);
        }

        for (a, b) in pop_a.animals().iter().zip(pop_b.animals()) {
            assert_eq!(a.position, b.position);
            assert_eq!(a.velocity, b.velocity);
        }
    }
}
