/// A coherent 3D noise field.
///
/// Implementations must be pure functions of the input coordinates: no state
/// may change between calls, so the same point always yields the same value.
/// Output is conventionally in [-1.0, 1.0] and varies continuously.
pub trait NoiseSource: Send + Sync {
    /// Sample the field at a point in 3D space.
    fn sample3(&self, x: f32, y: f32, z: f32) -> f32;

    /// Returns the name of this noise source for debugging.
    fn name(&self) -> &'static str {
        "NoiseSource"
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for &N {
    fn sample3(&self, x: f32, y: f32, z: f32) -> f32 {
        (**self).sample3(x, y, z)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
