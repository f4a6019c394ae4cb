use crate::grass::material::GrassMaterial;
use bevy::prelude::*;
use bevy_grass::BladeShape;
use meadowsim::blade::BladeField;
use meadowsim::conveyor::ConveyorMapper;
use meadowsim::pointer::{GroundPlane, PointerTracker};
use meadowsim::VectorFieldSolver;

/// Everything that decides the blade layout. A change rebuilds the mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeLayoutKey {
    pub count: usize,
    pub loops: f32,
    pub seed: u64,
    pub shape: BladeShape,
}

/// Wind simulation state of the grass scene
#[derive(Resource)]
pub struct WindSim {
    pub solver: VectorFieldSolver,
    pub tracker: PointerTracker,
    pub conveyor: ConveyorMapper,
    pub blades: BladeField,
    pub ground: GroundPlane,
    pub layout: BladeLayoutKey,
    /// Field texture the blade shader reads
    pub field_image: Handle<Image>,
    pub material: Handle<GrassMaterial>,
}

/// Shared look of every prop mesh
#[derive(Resource)]
pub struct PropMaterial(pub Handle<StandardMaterial>);
