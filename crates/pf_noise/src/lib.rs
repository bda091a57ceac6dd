use bevy::prelude::*;

pub mod field;
pub mod terrain;

pub use field::{ConstantField, SimplexField, DEFAULT_SEED};
pub use terrain::{shape, TerrainSynthesizer};

/// Noise plugin for PlanetForge.
/// Seeds the session's noise field once; every rebuild samples the same field.
pub struct PfNoisePlugin {
    pub seed: u32,
}

impl Default for PfNoisePlugin {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED }
    }
}

impl Plugin for PfNoisePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(TerrainField(TerrainSynthesizer::new(SimplexField::new(self.seed))));
    }
}

/// The session-wide terrain synthesizer.
#[derive(Resource, Clone)]
pub struct TerrainField(pub TerrainSynthesizer<SimplexField>);
