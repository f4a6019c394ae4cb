// disable console on windows for release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use bevy::DefaultPlugins;
use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use meadow::MeadowPlugin;

fn main() {
    App::new()
        .insert_resource(ClearColor(Color::srgb_u8(0x11, 0x11, 0x11)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Meadow".into(),
                resolution: WindowResolution::new(1500, 900),
                present_mode: PresentMode::AutoVsync,
                resize_constraints: WindowResizeConstraints {
                    min_width: 480.0,
                    min_height: 320.0,
                    ..default()
                },
                ..default()
            }),
            ..default()
        }))
        .add_plugins(MeadowPlugin)
        .run();
}
