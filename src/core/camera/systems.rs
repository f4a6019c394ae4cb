use crate::core::camera::components::OrbitCamera;
use crate::core::camera::logic::OrbitState;
use crate::core::camera::resources::DebugCamera;
use crate::settings::Settings;
use bevy::input::mouse::{AccumulatedMouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

/// Right-drag orbits, Shift+wheel zooms
pub fn orbit_control(
    debug: Res<DebugCamera>,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mouse_input: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    if !debug.enabled {
        mouse_wheel.clear();
        return;
    }

    let shift = keyboard_input.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    let mut lines = 0.0;
    for ev in mouse_wheel.read() {
        if shift {
            lines += match ev.unit {
                MouseScrollUnit::Line => ev.y,
                MouseScrollUnit::Pixel => ev.y / 40.0,
            };
        }
    }

    let drag = if mouse_input.pressed(MouseButton::Right) {
        mouse_motion.delta
    } else {
        Vec2::ZERO
    };

    if drag == Vec2::ZERO && lines == 0.0 {
        return;
    }

    for mut camera in &mut cameras {
        camera.orbit.rotate(drag);
        camera.orbit.zoom(lines);
    }
}

/// Put the camera back on its configured pose when the debug orbit is off
pub fn reset_orbit(
    debug: Res<DebugCamera>,
    settings: Res<Settings>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    if debug.enabled || !(debug.is_changed() || settings.is_changed()) {
        return;
    }
    let orbit = OrbitState::from_look(settings.camera.position(), settings.camera.look_at());
    for mut camera in &mut cameras {
        if camera.orbit != orbit {
            camera.orbit = orbit;
        }
    }
}

pub fn apply_orbit(mut cameras: Query<(&OrbitCamera, &mut Transform), Changed<OrbitCamera>>) {
    for (camera, mut transform) in &mut cameras {
        transform.translation = camera.orbit.position();
        transform.rotation = camera.orbit.rotation();
    }
}
