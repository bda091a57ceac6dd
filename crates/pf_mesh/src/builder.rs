use bevy::math::Vec3;
use pf_core::{Biome, GenerationParameters, NoiseSource, PlanetError};
use pf_noise::TerrainSynthesizer;

use crate::mesh::PlanetMesh;
use crate::normals::smooth_normals;
use crate::sphere::BaseSphere;

/// Displaces a base sphere into a planet.
///
/// Holds only a borrow of the terrain synthesizer; every call to
/// [`build`](Self::build) is a full, independent rebuild.
pub struct PlanetMeshBuilder<'a, N: NoiseSource> {
    terrain: &'a TerrainSynthesizer<N>,
}

impl<'a, N: NoiseSource> PlanetMeshBuilder<'a, N> {
    pub fn new(terrain: &'a TerrainSynthesizer<N>) -> Self {
        Self { terrain }
    }

    /// Build a complete planet mesh or fail without producing anything.
    ///
    /// Vertices are displaced radially by `1 + noise_strength / 10 * elevation`.
    /// Biomes are classified afterwards from the displaced radius, not from
    /// the shaped elevation, then normals are recomputed over the template's
    /// triangles.
    pub fn build(
        &self,
        base: &BaseSphere,
        params: &GenerationParameters,
    ) -> Result<PlanetMesh, PlanetError> {
        params.validate()?;

        let count = base.vertex_count();
        let mut positions = Vec::with_capacity(count);
        let mut elevations = Vec::with_capacity(count);

        for (index, &position) in base.positions().iter().enumerate() {
            let length = position.length();
            if !length.is_finite() || length == 0.0 {
                return Err(PlanetError::ZeroLengthVertex { index });
            }

            let elevation = self.terrain.sample_elevation(position / length, params);
            positions.push(position * params.displacement_scale(elevation));
            elevations.push(elevation);
        }

        let biomes: Vec<Biome> = positions
            .iter()
            .map(|p: &Vec3| Biome::from_elevation(p.length() - 1.0))
            .collect();
        let colors = biomes.iter().map(Biome::color).collect();
        let normals = smooth_normals(&positions, base.indices());

        Ok(PlanetMesh {
            positions,
            normals,
            colors,
            biomes,
            elevations,
            indices: base.shared_indices(),
        })
    }
}
