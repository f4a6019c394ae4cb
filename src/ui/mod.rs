mod systems;

use crate::ui::systems::*;
use bevy::prelude::*;
use bevy_egui::{EguiGlobalSettings, EguiPlugin, EguiPrimaryContextPass};

/// egui side panel for live tuning
pub struct DebugPanelPlugin;

impl Plugin for DebugPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .insert_resource(EguiGlobalSettings {
                auto_create_primary_context: false,
                ..default()
            })
            .init_resource::<DebugPanel>()
            .add_systems(Startup, spawn_ui_camera)
            .add_systems(Update, toggle_panel)
            .add_systems(EguiPrimaryContextPass, render_debug_panel);
    }
}
