use bevy::prelude::*;

#[derive(Component)]
pub struct MountainCamera;

/// Root of the loaded mountain scene
#[derive(Component)]
pub struct MountainModel;

#[derive(Component)]
pub struct ScreenLight;

/// One snow flake, indexes into the snow field
#[derive(Component)]
pub struct Snowflake(pub usize);
