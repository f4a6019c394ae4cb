use bevy::mesh::MeshVertexBufferLayoutRef;
use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::prelude::*;
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, ShaderType, SpecializedMeshPipelineError,
};
use bevy::shader::ShaderRef;
use bevy_grass::ATTRIBUTE_BLADE_INSTANCE;
use meadowsim::displacement::BladeUniforms;

const SHADER_PATH: &str = "shaders/grass_blade.wgsl";

/// Mirror of `BladeUniforms` laid out for the shader
#[derive(Clone, Copy, Debug, Default, ShaderType)]
pub struct GrassUniforms {
    pub time: f32,
    pub turbulence_amplitude: f32,
    pub turbulence_frequency: f32,
    pub damping: f32,
    pub wind_strength: f32,
    pub glow_threshold: f32,
    pub glow_boost: f32,
    pub blade_height: f32,
    pub plane_extent: Vec2,
    pub scroll_offset_norm: f32,
}

impl From<BladeUniforms> for GrassUniforms {
    fn from(u: BladeUniforms) -> Self {
        Self {
            time: u.time,
            turbulence_amplitude: u.turbulence_amplitude,
            turbulence_frequency: u.turbulence_frequency,
            damping: u.damping,
            wind_strength: u.wind_strength,
            glow_threshold: u.glow_threshold,
            glow_boost: u.glow_boost,
            blade_height: u.blade_height,
            plane_extent: u.plane_extent,
            scroll_offset_norm: u.scroll_offset_norm,
        }
    }
}

/// Blade material: the vertex shader bends every blade with the wind field
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct GrassMaterial {
    #[uniform(0)]
    pub uniforms: GrassUniforms,
    /// `Rg32Float`, read with `textureLoad` and filtered in the shader
    #[texture(1, sample_type = "float", filterable = false)]
    pub wind_field: Handle<Image>,
}

impl Material for GrassMaterial {
    fn vertex_shader() -> ShaderRef {
        SHADER_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        SHADER_PATH.into()
    }

    fn specialize(
        _pipeline: &MaterialPipeline,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            ATTRIBUTE_BLADE_INSTANCE.at_shader_location(1),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        // Blades are single quads seen from both sides
        descriptor.primitive.cull_mode = None;
        Ok(())
    }
}
