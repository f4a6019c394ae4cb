use bevy::prelude::*;

#[derive(Component)]
pub struct GrassCamera;

/// The merged blade mesh
#[derive(Component)]
pub struct GrassBlades;

#[derive(Component)]
pub struct Ground;

/// A decorative model riding the conveyor
#[derive(Component, Debug, Clone, Copy)]
pub struct Prop {
    /// World z at zero scroll
    pub base_z: f32,
}

/// Prop whose model is still loading
#[derive(Component)]
pub struct PropPending {
    pub model: String,
    pub gltf: Handle<bevy::gltf::Gltf>,
}
