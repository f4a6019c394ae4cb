use bevy::prelude::*;
use meadowsim::lifecycle::SceneLifecycle;
use meadowsim::page::{PageLayout, Section};

/// The virtual page the window scrolls through
#[derive(Resource, Debug, Clone, Default)]
pub struct Page {
    pub layout: PageLayout,
}

/// Start/stop state and clock of each scene
#[derive(Resource, Debug, Default)]
pub struct SceneLifecycles {
    pub hero: SceneLifecycle,
    pub grass: SceneLifecycle,
}

impl SceneLifecycles {
    pub fn get_mut(&mut self, section: Section) -> &mut SceneLifecycle {
        match section {
            Section::Hero => &mut self.hero,
            Section::Grass => &mut self.grass,
        }
    }
}
