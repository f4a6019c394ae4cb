pub mod components;
mod logic;
pub mod resources;
mod systems;

use crate::core::page::PageSet;
use crate::core::page::systems::hero_running;
use crate::core::state::AppState;
use crate::mountain::resources::Vignette;
use crate::mountain::systems::*;
use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MountainSet;

pub struct MountainPlugin;

impl Plugin for MountainPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            MountainSet
                .after(PageSet)
                .run_if(in_state(AppState::Running).and(resource_exists::<Vignette>)),
        )
        .add_systems(OnEnter(AppState::Running), spawn_mountain_scene)
        .add_systems(
            Update,
            (
                track_parallax_pointer,
                follow_hero_scroll,
                apply_mountain_settings,
                (tick_hero, animate_camera, animate_snow)
                    .chain()
                    .run_if(hero_running),
            )
                .chain()
                .in_set(MountainSet),
        )
        .add_systems(
            Update,
            (update_screen_light, restyle_mountain).run_if(in_state(AppState::Running)),
        );
    }
}
