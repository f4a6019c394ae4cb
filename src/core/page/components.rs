use bevy::prelude::*;
use meadowsim::page::Section;

/// Camera that renders one page section into that section's rectangle
#[derive(Component, Debug, Clone, Copy)]
pub struct SectionCamera(pub Section);
