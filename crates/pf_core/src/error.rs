/// Errors raised when planet synthesis is asked to work on invalid input.
///
/// Every variant is a precondition violation: synthesis is pure and
/// deterministic, so there is nothing to retry and no partial result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanetError {
    /// A base-sphere vertex has zero (or non-finite) length and cannot be
    /// projected onto the unit sphere.
    #[error("base sphere vertex {index} has zero or non-finite length")]
    ZeroLengthVertex { index: usize },

    /// A single sample direction has zero (or non-finite) length.
    #[error("sample direction has zero or non-finite length")]
    ZeroLengthDirection,

    /// A fractal sum needs at least one octave.
    #[error("octave count must be at least 1")]
    NoOctaves,

    /// A parameter that scales geometry must be strictly positive.
    #[error("{name} must be greater than zero, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    /// Persistence is an amplitude decay factor and must lie in (0, 1].
    #[error("persistence must be in (0, 1], got {0}")]
    PersistenceOutOfRange(f32),

    /// A parameter is NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },

    /// A gas fraction of the atmosphere lies outside [0, 1].
    #[error("{name} fraction must be in [0, 1], got {value}")]
    FractionOutOfRange { name: &'static str, value: f32 },

    /// The base sphere has no vertices.
    #[error("base sphere has no vertices")]
    EmptySphere,

    /// The index buffer does not describe whole triangles.
    #[error("index count {0} is not a multiple of 3")]
    PartialTriangle(usize),

    /// A triangle refers to a vertex that does not exist.
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// A base sphere resolution exceeds what the index buffer can address.
    #[error("{name} is {value}, at most {max} is supported")]
    SphereTooDense { name: &'static str, value: u32, max: u32 },
}

/// Check that `value` is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f32) -> Result<(), PlanetError> {
    require_finite(name, value)?;
    if value <= 0.0 {
        return Err(PlanetError::NonPositive { name, value });
    }
    Ok(())
}

/// Check that `value` is neither NaN nor infinite.
pub(crate) fn require_finite(name: &'static str, value: f32) -> Result<(), PlanetError> {
    if !value.is_finite() {
        return Err(PlanetError::NotFinite { name, value });
    }
    Ok(())
}
