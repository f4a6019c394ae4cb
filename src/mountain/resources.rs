use bevy::prelude::*;
use meadowsim::parallax::Parallax;
use meadowsim::snow::SnowField;

/// Animated state of the mountain vignette
#[derive(Resource)]
pub struct Vignette {
    pub parallax: Parallax,
    pub snow: SnowField,
}

#[derive(Resource)]
pub struct MountainMaterial(pub Handle<StandardMaterial>);
