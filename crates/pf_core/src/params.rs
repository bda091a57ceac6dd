use serde::{Deserialize, Serialize};

use crate::error::{require_finite, require_positive, PlanetError};

/// Largest UV sphere segment count in either direction. Keeps
/// `(segments + 1)^2` vertex indices well inside `u32`.
pub const MAX_UV_SEGMENTS: u32 = 2048;

/// Deepest icosphere subdivision (20 * 4^7 triangles).
pub const MAX_ICO_SUBDIVISIONS: u32 = 7;

/// Terrain generation parameters.
///
/// A snapshot value: the host owns the mutable "current settings" and hands a
/// copy to every synthesis call. Nothing in the core mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParameters {
    /// Displacement gain. Vertices move by `noise_strength / 10` per unit of elevation.
    pub noise_strength: f32,
    /// Sampling frequency of the first octave.
    pub frequency: f32,
    /// Amplitude of the first octave.
    pub amplitude: f32,
    /// Number of fBm octaves.
    pub octaves: u32,
    /// Per-octave amplitude decay.
    pub persistence: f32,
    /// Accumulated noise below this is halved into lowlands.
    pub flatland_threshold: f32,
    /// Accumulated noise above this is clamped flat.
    pub plateau_height: f32,
    /// Uniform scale the host applies to the finished mesh.
    pub planet_scale: f32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            noise_strength: 0.05,
            frequency: 1.5,
            amplitude: 5.0,
            octaves: 5,
            persistence: 0.5,
            flatland_threshold: 0.1,
            plateau_height: 1.5,
            planet_scale: 1.0,
        }
    }
}

impl GenerationParameters {
    /// Reject parameter sets that would produce NaN or degenerate geometry.
    ///
    /// `flatland_threshold > plateau_height` is accepted: the flatland rule
    /// simply takes precedence for values between the two.
    pub fn validate(&self) -> Result<(), PlanetError> {
        if self.octaves == 0 {
            return Err(PlanetError::NoOctaves);
        }
        require_positive("amplitude", self.amplitude)?;
        require_positive("frequency", self.frequency)?;
        require_positive("noise_strength", self.noise_strength)?;
        require_positive("planet_scale", self.planet_scale)?;
        require_finite("persistence", self.persistence)?;
        if self.persistence <= 0.0 || self.persistence > 1.0 {
            return Err(PlanetError::PersistenceOutOfRange(self.persistence));
        }
        require_finite("flatland_threshold", self.flatland_threshold)?;
        require_finite("plateau_height", self.plateau_height)?;
        Ok(())
    }

    /// Radial scale applied to a base vertex whose clamped elevation is `elevation`.
    pub fn displacement_scale(&self, elevation: f32) -> f32 {
        1.0 + (self.noise_strength / 10.0) * elevation
    }
}

/// Spectral class of the host star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StarType {
    #[default]
    G,
    K,
    M,
}

impl StarType {
    /// All star types in UI order.
    pub fn all() -> &'static [StarType] {
        &[Self::G, Self::K, Self::M]
    }

    /// Display name for UI.
    pub fn name(&self) -> &'static str {
        match self {
            Self::G => "G-type",
            Self::K => "K-type",
            Self::M => "M-type",
        }
    }

    /// Tint color (RGB, 0-1) for this star.
    pub fn tint(&self) -> [f32; 3] {
        match self {
            Self::G => [1.0, 1.0, 0.0],   // #ffff00
            Self::K => [1.0, 0.647, 0.0], // #ffa500
            Self::M => [1.0, 0.0, 0.0],   // #ff0000
        }
    }
}

/// Which gas the third atmosphere fraction stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThirdGas {
    #[default]
    Hydrogen,
    Nitrogen,
}

impl ThirdGas {
    pub fn all() -> &'static [ThirdGas] {
        &[Self::Hydrogen, Self::Nitrogen]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Hydrogen => "Hydrogen",
            Self::Nitrogen => "Nitrogen",
        }
    }

    /// Color the shading stage mixes in for this gas.
    pub fn color(&self) -> [f32; 3] {
        match self {
            Self::Hydrogen => [0.8, 0.8, 1.0],
            Self::Nitrogen => [0.6, 0.7, 1.0],
        }
    }
}

/// Atmosphere appearance. Consumed by the shading stage only, never by mesh synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereParameters {
    pub carbon: f32,
    pub oxygen: f32,
    /// Fraction of the third gas. The three fractions need not sum to 1.
    pub third_gas: f32,
    pub third_gas_kind: ThirdGas,
    pub star_type: StarType,
    pub fog_thickness: f32,
    pub visible: bool,
}

impl Default for AtmosphereParameters {
    fn default() -> Self {
        Self {
            carbon: 0.5,
            oxygen: 0.3,
            third_gas: 0.2,
            third_gas_kind: ThirdGas::Hydrogen,
            star_type: StarType::G,
            fog_thickness: 1.0,
            visible: true,
        }
    }
}

impl AtmosphereParameters {
    pub fn validate(&self) -> Result<(), PlanetError> {
        for (name, value) in [
            ("carbon", self.carbon),
            ("oxygen", self.oxygen),
            (self.third_gas_kind.name(), self.third_gas),
        ] {
            require_finite(name, value)?;
            if !(0.0..=1.0).contains(&value) {
                return Err(PlanetError::FractionOutOfRange { name, value });
            }
        }
        require_positive("fog_thickness", self.fog_thickness)
    }

    /// The uniform bundle handed to the shading stage.
    ///
    /// Values pass through unchanged. The star tint is included but the
    /// shading stage does not blend it into the base color.
    pub fn uniforms(&self) -> AtmosphereUniforms {
        AtmosphereUniforms {
            star_tint: self.star_type.tint(),
            carbon: self.carbon,
            oxygen: self.oxygen,
            third_gas: self.third_gas,
            third_gas_color: self.third_gas_kind.color(),
            fog_thickness: self.fog_thickness,
        }
    }
}

/// Plain-data shading inputs for the atmosphere shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereUniforms {
    pub star_tint: [f32; 3],
    pub carbon: f32,
    pub oxygen: f32,
    pub third_gas: f32,
    pub third_gas_color: [f32; 3],
    pub fog_thickness: f32,
}

/// Presentation-only settings that never touch geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneParameters {
    /// Spin of planet and atmosphere, radians per 60 Hz frame.
    pub rotation_speed: f32,
    /// Uniform scale of the water shell.
    pub water_scale: f32,
}

impl Default for SceneParameters {
    fn default() -> Self {
        Self {
            rotation_speed: 0.01,
            water_scale: 0.5,
        }
    }
}

impl SceneParameters {
    pub fn validate(&self) -> Result<(), PlanetError> {
        require_finite("rotation_speed", self.rotation_speed)?;
        require_positive("water_scale", self.water_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GenerationParameters::default().validate().is_ok());
        assert!(AtmosphereParameters::default().validate().is_ok());
        assert!(SceneParameters::default().validate().is_ok());
    }

    #[test]
    fn zero_octaves_rejected() {
        let params = GenerationParameters { octaves: 0, ..Default::default() };
        assert_eq!(params.validate(), Err(PlanetError::NoOctaves));
    }

    #[test]
    fn non_positive_amplitude_and_frequency_rejected() {
        let params = GenerationParameters { amplitude: 0.0, ..Default::default() };
        assert!(matches!(
            params.validate(),
            Err(PlanetError::NonPositive { name: "amplitude", .. })
        ));

        let params = GenerationParameters { frequency: -1.5, ..Default::default() };
        assert!(matches!(
            params.validate(),
            Err(PlanetError::NonPositive { name: "frequency", .. })
        ));
    }

    #[test]
    fn persistence_must_be_in_unit_interval() {
        let params = GenerationParameters { persistence: 0.0, ..Default::default() };
        assert_eq!(params.validate(), Err(PlanetError::PersistenceOutOfRange(0.0)));

        let params = GenerationParameters { persistence: 1.0, ..Default::default() };
        assert!(params.validate().is_ok());

        let params = GenerationParameters { persistence: 1.01, ..Default::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn inverted_thresholds_are_not_an_error() {
        let params = GenerationParameters {
            flatland_threshold: 2.0,
            plateau_height: 0.5,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn displacement_scale_matches_strength() {
        let params = GenerationParameters::default();
        assert!((params.displacement_scale(1.0) - 1.005).abs() < 1e-6);
        assert_eq!(params.displacement_scale(0.0), 1.0);
    }

    #[test]
    fn atmosphere_fraction_bounds() {
        let atmosphere = AtmosphereParameters { oxygen: 1.2, ..Default::default() };
        assert!(matches!(
            atmosphere.validate(),
            Err(PlanetError::FractionOutOfRange { name: "oxygen", .. })
        ));

        let atmosphere = AtmosphereParameters {
            carbon: 1.0,
            oxygen: 1.0,
            third_gas: 1.0,
            ..Default::default()
        };
        assert!(atmosphere.validate().is_ok(), "fractions need not sum to 1");
    }

    #[test]
    fn fog_thickness_must_be_positive() {
        let atmosphere = AtmosphereParameters { fog_thickness: 0.0, ..Default::default() };
        assert!(atmosphere.validate().is_err());
    }

    #[test]
    fn uniforms_pass_values_through() {
        let atmosphere = AtmosphereParameters {
            carbon: 0.1,
            oxygen: 0.7,
            third_gas: 0.4,
            third_gas_kind: ThirdGas::Nitrogen,
            star_type: StarType::K,
            fog_thickness: 2.5,
            visible: false,
        };
        let uniforms = atmosphere.uniforms();
        assert_eq!(uniforms.carbon, 0.1);
        assert_eq!(uniforms.oxygen, 0.7);
        assert_eq!(uniforms.third_gas, 0.4);
        assert_eq!(uniforms.third_gas_color, ThirdGas::Nitrogen.color());
        assert_eq!(uniforms.star_tint, StarType::K.tint());
        assert_eq!(uniforms.fog_thickness, 2.5);
    }

    #[test]
    fn star_tints_are_distinct() {
        assert_ne!(StarType::G.tint(), StarType::K.tint());
        assert_ne!(StarType::K.tint(), StarType::M.tint());
        assert_eq!(StarType::M.tint(), [1.0, 0.0, 0.0]);
    }
}
