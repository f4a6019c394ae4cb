mod core;
mod grass;
mod helpers;
mod loading;
mod mountain;
mod settings;
mod ui;

use crate::core::camera::CameraPlugin;
use crate::core::page::PagePlugin;
use crate::core::state::AppState;
use crate::grass::GrassPlugin;
use crate::loading::LoadingPlugin;
use crate::mountain::MountainPlugin;
use crate::settings::Settings;
use crate::ui::DebugPanelPlugin;
use bevy::app::App;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
#[cfg(debug_assertions)]
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::prelude::*;

/// The whole page: mountain hero on top, wind-blown meadow below
pub struct MeadowPlugin;

impl Plugin for MeadowPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .insert_resource(Settings::load())
            .add_plugins(FrameTimeDiagnosticsPlugin::default())
            .add_plugins((
                LoadingPlugin,
                PagePlugin,
                CameraPlugin,
                GrassPlugin,
                MountainPlugin,
                DebugPanelPlugin,
            ));

        #[cfg(debug_assertions)]
        {
            app.add_plugins(LogDiagnosticsPlugin::default());
        }
    }
}
