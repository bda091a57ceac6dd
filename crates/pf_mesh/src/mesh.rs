use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use pf_core::Biome;
use std::sync::Arc;

/// A displaced, colored planet surface ready for upload.
///
/// All per-vertex vectors share one indexing; the triangle list is the base
/// sphere's, shared rather than copied.
#[derive(Clone, Debug)]
pub struct PlanetMesh {
    pub(crate) positions: Vec<Vec3>,
    pub(crate) normals: Vec<Vec3>,
    pub(crate) colors: Vec<[f32; 4]>,
    pub(crate) biomes: Vec<Biome>,
    /// Shaped elevation each vertex was displaced by.
    pub(crate) elevations: Vec<f32>,
    pub(crate) indices: Arc<[u32]>,
}

impl PlanetMesh {
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    pub fn biomes(&self) -> &[Biome] {
        &self.biomes
    }

    pub fn elevations(&self) -> &[f32] {
        &self.elevations
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Count of vertices per biome, in [`Biome::all`] order.
    pub fn biome_histogram(&self) -> [usize; 5] {
        let mut counts = [0; 5];
        for biome in &self.biomes {
            counts[*biome as usize] += 1;
        }
        counts
    }

    /// Convert into a triangle-list bevy mesh with positions, normals,
    /// vertex colors and U32 indices.
    pub fn to_bevy_mesh(&self) -> Mesh {
        let positions: Vec<[f32; 3]> = self.positions.iter().map(|p| p.to_array()).collect();
        let normals: Vec<[f32; 3]> = self.normals.iter().map(|n| n.to_array()).collect();

        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, self.colors.clone())
        .with_inserted_indices(Indices::U32(self.indices.to_vec()))
    }
}

/// The cheap rescale path: set the planet transform's uniform scale without
/// touching the mesh. Setting (rather than multiplying) keeps repeated calls
/// from drifting.
pub fn apply_planet_scale(transform: &mut Transform, planet_scale: f32) {
    transform.scale = Vec3::splat(planet_scale);
}
