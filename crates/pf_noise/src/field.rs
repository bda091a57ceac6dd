use noise::{NoiseFn, OpenSimplex};
use pf_core::NoiseSource;

/// Seed used when the host does not configure one.
pub const DEFAULT_SEED: u32 = 0;

/// Seeded 3D OpenSimplex noise, clamped to [-1.0, 1.0].
///
/// The permutation table is built once in [`SimplexField::new`]; sampling
/// only reads it, so a field can be shared freely across a session.
#[derive(Clone)]
pub struct SimplexField {
    noise: OpenSimplex,
    seed: u32,
}

impl SimplexField {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: OpenSimplex::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for SimplexField {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl NoiseSource for SimplexField {
    fn sample3(&self, x: f32, y: f32, z: f32) -> f32 {
        let value = self.noise.get([x as f64, y as f64, z as f64]);
        (value as f32).clamp(-1.0, 1.0)
    }

    fn name(&self) -> &'static str {
        "OpenSimplex"
    }
}

/// A field that returns the same value everywhere.
///
/// Produces a perfectly flat (uniformly displaced) planet; mostly useful to
/// check the shaping and displacement math in isolation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantField(pub f32);

impl NoiseSource for ConstantField {
    fn sample3(&self, _x: f32, _y: f32, _z: f32) -> f32 {
        self.0
    }

    fn name(&self) -> &'static str {
        "Constant"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> impl Iterator<Item = (f32, f32, f32)> {
        (0..12).flat_map(|i| {
            (0..12).flat_map(move |j| {
                (0..6).map(move |k| {
                    (
                        i as f32 * 0.37 - 2.0,
                        j as f32 * 0.53 - 3.0,
                        k as f32 * 1.71 - 5.0,
                    )
                })
            })
        })
    }

    #[test]
    fn samples_stay_in_unit_range() {
        let field = SimplexField::new(42);
        for (x, y, z) in grid() {
            let value = field.sample3(x, y, z);
            assert!((-1.0..=1.0).contains(&value), "Value {} out of range", value);
        }
    }

    #[test]
    fn same_seed_same_values() {
        let a = SimplexField::new(7);
        let b = SimplexField::new(7);
        for (x, y, z) in grid() {
            assert_eq!(a.sample3(x, y, z).to_bits(), b.sample3(x, y, z).to_bits());
        }
    }

    #[test]
    fn different_seeds_differ_somewhere() {
        let a = SimplexField::new(1);
        let b = SimplexField::new(2);
        assert!(grid().any(|(x, y, z)| a.sample3(x, y, z) != b.sample3(x, y, z)));
    }

    #[test]
    fn small_steps_give_small_changes() {
        let field = SimplexField::default();
        let delta = 1e-4;
        for (x, y, z) in grid() {
            let here = field.sample3(x, y, z);
            let there = field.sample3(x + delta, y, z - delta);
            assert!(
                (here - there).abs() < 0.01,
                "Jump of {} at ({}, {}, {})",
                (here - there).abs(),
                x,
                y,
                z
            );
        }
    }

    #[test]
    fn field_is_not_flat() {
        let field = SimplexField::default();
        let first = field.sample3(0.1, 0.2, 0.3);
        assert!(grid().any(|(x, y, z)| (field.sample3(x, y, z) - first).abs() > 0.1));
    }

    #[test]
    fn constant_field_ignores_position() {
        let field = ConstantField(0.2);
        assert_eq!(field.sample3(0.0, 0.0, 1.0), 0.2);
        assert_eq!(field.sample3(-40.0, 3.5, 1e6), 0.2);
    }
}
