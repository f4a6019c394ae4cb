use crate::core::camera::logic::OrbitState;
use bevy::prelude::*;

/// Camera placed by an orbit around a target
#[derive(Component, Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub orbit: OrbitState,
}
