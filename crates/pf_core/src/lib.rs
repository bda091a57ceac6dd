pub mod biome;
pub mod error;
pub mod noise;
pub mod params;

pub use biome::Biome;
pub use error::PlanetError;
pub use noise::NoiseSource;
pub use params::{
    AtmosphereParameters, AtmosphereUniforms, GenerationParameters, SceneParameters, StarType,
    ThirdGas, MAX_ICO_SUBDIVISIONS, MAX_UV_SEGMENTS,
};
