pub(crate) mod components;
pub(crate) mod events;
mod logic;
pub(crate) mod resources;
pub(crate) mod systems;

use crate::core::page::events::SceneTransition;
use crate::core::page::resources::SceneLifecycles;
use crate::core::page::systems::*;
use crate::core::state::AppState;
use bevy::prelude::*;

/// Runs before any scene system in the frame
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct PageSet;

pub(crate) struct PagePlugin;

impl Plugin for PagePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SceneTransition>()
            .init_resource::<SceneLifecycles>()
            .add_systems(Startup, setup_page)
            .add_systems(
                Update,
                (
                    sync_page_viewport,
                    scroll_page,
                    update_section_cameras,
                    update_scene_lifecycles,
                )
                    .chain()
                    .in_set(PageSet)
                    .run_if(in_state(AppState::Running)),
            );
    }
}
