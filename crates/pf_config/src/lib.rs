pub mod config;
pub mod error;

pub use config::{
    config_path, load_config, load_or_default, PlanetConfig, SphereConfig, CONFIG_ENV_VAR,
    DEFAULT_CONFIG_PATH,
};
pub use error::ConfigError;
