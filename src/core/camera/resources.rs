use bevy::prelude::*;

/// Free orbit control of the grass camera, toggled from the debug panel
#[derive(Resource, Debug, Default)]
pub struct DebugCamera {
    pub enabled: bool,
}
