use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::prelude::*;
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::render::render_resource::{
    AsBindGroup, Face, RenderPipelineDescriptor, ShaderRef, ShaderType,
    SpecializedMeshPipelineError,
};
use pf_core::AtmosphereParameters;

const SHADER_PATH: &str = "shaders/atmosphere.wgsl";

/// Translucent shell around the planet, drawn from the inside (back faces only).
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct AtmosphereMaterial {
    #[uniform(0)]
    pub uniform: AtmosphereUniform,
}

/// GPU layout of the atmosphere inputs. Colors and positions are padded to
/// `vec4` to keep the uniform layout simple.
#[derive(ShaderType, Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereUniform {
    pub star_color: Vec4,
    pub third_gas_color: Vec4,
    pub light_position: Vec4,
    pub carbon: f32,
    pub oxygen: f32,
    pub third_gas: f32,
    pub fog_thickness: f32,
}

impl AtmosphereMaterial {
    pub fn new(params: &AtmosphereParameters, light_position: Vec3) -> Self {
        let mut material = Self {
            uniform: AtmosphereUniform {
                star_color: Vec4::ONE,
                third_gas_color: Vec4::ONE,
                light_position: light_position.extend(1.0),
                carbon: 0.0,
                oxygen: 0.0,
                third_gas: 0.0,
                fog_thickness: 1.0,
            },
        };
        material.apply(params);
        material
    }

    /// Copy the current atmosphere settings into the uniform, leaving the
    /// light where it is.
    pub fn apply(&mut self, params: &AtmosphereParameters) {
        let uniforms = params.uniforms();
        self.uniform.star_color = Vec3::from_array(uniforms.star_tint).extend(1.0);
        self.uniform.third_gas_color = Vec3::from_array(uniforms.third_gas_color).extend(1.0);
        self.uniform.carbon = uniforms.carbon;
        self.uniform.oxygen = uniforms.oxygen;
        self.uniform.third_gas = uniforms.third_gas;
        self.uniform.fog_thickness = uniforms.fog_thickness;
    }
}

impl Material for AtmosphereMaterial {
    fn fragment_shader() -> ShaderRef {
        SHADER_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        _layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        descriptor.primitive.cull_mode = Some(Face::Front);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::{StarType, ThirdGas};

    #[test]
    fn settings_reach_the_uniform_unchanged() {
        let params = AtmosphereParameters {
            carbon: 0.25,
            oxygen: 0.6,
            third_gas: 0.9,
            third_gas_kind: ThirdGas::Nitrogen,
            star_type: StarType::M,
            fog_thickness: 1.7,
            visible: true,
        };
        let material = AtmosphereMaterial::new(&params, Vec3::splat(10.0));

        assert_eq!(material.uniform.carbon, 0.25);
        assert_eq!(material.uniform.oxygen, 0.6);
        assert_eq!(material.uniform.third_gas, 0.9);
        assert_eq!(material.uniform.fog_thickness, 1.7);
        assert_eq!(material.uniform.star_color, Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(
            material.uniform.third_gas_color.truncate(),
            Vec3::from_array(ThirdGas::Nitrogen.color())
        );
        assert_eq!(material.uniform.light_position, Vec4::new(10.0, 10.0, 10.0, 1.0));
    }

    #[test]
    fn apply_keeps_the_light() {
        let mut material =
            AtmosphereMaterial::new(&AtmosphereParameters::default(), Vec3::new(1.0, 2.0, 3.0));
        let params = AtmosphereParameters { star_type: StarType::K, ..Default::default() };
        material.apply(&params);
        assert_eq!(material.uniform.light_position, Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(material.uniform.star_color.truncate(), Vec3::from_array(StarType::K.tint()));
    }
}
