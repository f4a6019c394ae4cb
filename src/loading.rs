use crate::core::state::AppState;
use bevy::prelude::*;
use bevy_asset_loader::prelude::*;

pub struct LoadingPlugin;

/// Loads the mountain vignette assets. A failed load still enters
/// `Running`; the vignette then runs without the missing pieces.
impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.add_loading_state(
            LoadingState::new(AppState::Loading)
                .continue_to_state(AppState::Running)
                .on_failure_continue_to_state(AppState::Running)
                .load_collection::<MountainAssets>(),
        );
    }
}

#[derive(AssetCollection, Resource)]
pub struct MountainAssets {
    #[asset(path = "mountain/mountain_export.glb#Scene0")]
    pub mountain: Handle<Scene>,
    #[asset(path = "mountain/mountain_texture.png")]
    pub mountain_texture: Handle<Image>,
    /// Still of the showreel shown on the screen and used for its light
    #[asset(path = "mountain/showreel_frame.png")]
    pub screen_frame: Handle<Image>,
}
