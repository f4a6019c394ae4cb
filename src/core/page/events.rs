use bevy::prelude::*;
use meadowsim::lifecycle::Transition;
use meadowsim::page::Section;

#[derive(Message, Debug, Clone, Copy)]
pub struct SceneTransition {
    pub section: Section,
    pub transition: Transition,
}
