use pf_core::PlanetError;

/// Errors that can occur when loading the startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// The file parsed but holds parameters synthesis would reject.
    #[error("invalid parameters in config: {0}")]
    Invalid(#[from] PlanetError),
}
