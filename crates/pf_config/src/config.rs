use pf_core::{
    AtmosphereParameters, GenerationParameters, PlanetError, SceneParameters, MAX_ICO_SUBDIVISIONS,
    MAX_UV_SEGMENTS,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Config file read when no override is given.
pub const DEFAULT_CONFIG_PATH: &str = "assets/planet.ron";

/// Environment variable that overrides the config path.
pub const CONFIG_ENV_VAR: &str = "PLANETFORGE_CONFIG";

/// Which template sphere to displace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SphereConfig {
    Uv {
        width_segments: u32,
        height_segments: u32,
    },
    Ico {
        subdivisions: u32,
    },
}

impl SphereConfig {
    /// Reject resolutions the index buffer cannot address.
    pub fn validate(&self) -> Result<(), PlanetError> {
        match *self {
            Self::Uv {
                width_segments,
                height_segments,
            } => {
                require_at_most("width_segments", width_segments, MAX_UV_SEGMENTS)?;
                require_at_most("height_segments", height_segments, MAX_UV_SEGMENTS)
            }
            Self::Ico { subdivisions } => {
                require_at_most("subdivisions", subdivisions, MAX_ICO_SUBDIVISIONS)
            }
        }
    }
}

fn require_at_most(name: &'static str, value: u32, max: u32) -> Result<(), PlanetError> {
    if value > max {
        return Err(PlanetError::SphereTooDense { name, value, max });
    }
    Ok(())
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self::Uv {
            width_segments: 128,
            height_segments: 128,
        }
    }
}

/// Startup configuration. Every field has a default, so a file only needs
/// the values it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetConfig {
    /// Noise seed for the whole session.
    pub seed: u32,
    pub sphere: SphereConfig,
    pub generation: GenerationParameters,
    pub atmosphere: AtmosphereParameters,
    pub scene: SceneParameters,
}

impl PlanetConfig {
    /// Parse and validate a config from RON text.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: PlanetConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PlanetError> {
        self.sphere.validate()?;
        self.generation.validate()?;
        self.atmosphere.validate()?;
        self.scene.validate()
    }
}

/// Resolve the config path, honoring [`CONFIG_ENV_VAR`].
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load a config from a RON file.
pub fn load_config(path: &Path) -> Result<PlanetConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    PlanetConfig::from_ron(&contents)
}

/// Load a config, treating a missing file as "use the defaults".
///
/// Any other failure is returned so the caller can report it.
pub fn load_or_default(path: &Path) -> Result<PlanetConfig, ConfigError> {
    if !path.exists() {
        return Ok(PlanetConfig::default());
    }
    load_config(path)
}
