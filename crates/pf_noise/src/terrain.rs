use bevy::math::Vec3;
use pf_core::{GenerationParameters, NoiseSource, PlanetError};

use crate::field::SimplexField;

/// Turns a direction on the unit sphere into a terrain elevation.
///
/// Elevation is an fBm sum of the wrapped noise field followed by two shaping
/// rules: low terrain is halved into gentle lowlands and high terrain is
/// clamped flat at the plateau height.
#[derive(Clone, Default)]
pub struct TerrainSynthesizer<N = SimplexField> {
    noise: N,
}

impl<N: NoiseSource> TerrainSynthesizer<N> {
    pub fn new(noise: N) -> Self {
        Self { noise }
    }

    pub fn noise(&self) -> &N {
        &self.noise
    }

    /// Checked elevation for a single direction.
    ///
    /// `direction` must be non-zero; it is normalized before sampling.
    pub fn evaluate(
        &self,
        direction: Vec3,
        params: &GenerationParameters,
    ) -> Result<f32, PlanetError> {
        params.validate()?;
        let length = direction.length();
        if !length.is_finite() || length == 0.0 {
            return Err(PlanetError::ZeroLengthDirection);
        }
        Ok(self.sample_elevation(direction / length, params))
    }

    /// Elevation for a unit direction without any checks.
    ///
    /// Callers validate `params` once and pass unit-length directions; batch
    /// builders use this to avoid re-validating per vertex.
    pub fn sample_elevation(&self, direction: Vec3, params: &GenerationParameters) -> f32 {
        shape(self.fractal_sum(direction, params), params)
    }

    /// Raw fBm sum before shaping.
    pub fn fractal_sum(&self, direction: Vec3, params: &GenerationParameters) -> f32 {
        let mut value = 0.0;
        let mut amplitude = params.amplitude;
        let mut frequency = params.frequency;

        for _ in 0..params.octaves {
            let p = direction * frequency;
            value += amplitude * self.noise.sample3(p.x, p.y, p.z);
            amplitude *= params.persistence;
            frequency *= 2.0;
        }

        value
    }
}

/// Apply the lowland and plateau rules to an accumulated noise value.
///
/// The flatland rule is checked first and wins, which matters when
/// `flatland_threshold > plateau_height`.
pub fn shape(noise: f32, params: &GenerationParameters) -> f32 {
    if noise < params.flatland_threshold {
        noise * 0.5
    } else if noise > params.plateau_height {
        params.plateau_height
    } else {
        noise
    }
}
