pub(crate) mod components;
mod logic;
pub(crate) mod resources;
mod systems;

pub(crate) use logic::OrbitState;

use crate::core::camera::resources::DebugCamera;
use crate::core::camera::systems::*;
use crate::core::state::AppState;
use bevy::prelude::*;
use bevy::transform::TransformSystems;

pub(crate) struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugCamera>().add_systems(
            PostUpdate,
            (orbit_control, reset_orbit, apply_orbit)
                .chain()
                .before(TransformSystems::Propagate)
                .run_if(in_state(AppState::Running)),
        );
    }
}
