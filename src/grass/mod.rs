pub mod components;
mod logic;
pub mod material;
mod props;
pub mod resources;
mod systems;

use crate::core::page::PageSet;
use crate::core::page::systems::grass_running;
use crate::core::state::AppState;
use crate::grass::material::GrassMaterial;
use crate::grass::props::*;
use crate::grass::resources::WindSim;
use crate::grass::systems::*;
use bevy::prelude::*;

/// Per-frame work of the grass scene, in order
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrassSet;

pub struct GrassPlugin;

impl Plugin for GrassPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<GrassMaterial>::default())
            .configure_sets(
                Update,
                GrassSet
                    .after(PageSet)
                    .run_if(in_state(AppState::Running).and(resource_exists::<WindSim>)),
            )
            .add_systems(OnEnter(AppState::Running), (spawn_grass_scene, spawn_props))
            .add_systems(
                Update,
                (
                    track_pointer,
                    handle_grass_transitions,
                    apply_grass_settings,
                    resize_ground,
                    follow_conveyor,
                    move_props,
                    (step_wind, upload_wind_field, update_grass_material).run_if(grass_running),
                )
                    .chain()
                    .in_set(GrassSet),
            )
            .add_systems(
                Update,
                (watch_props, restyle_props).run_if(in_state(AppState::Running)),
            );
    }
}
