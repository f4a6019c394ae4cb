use bevy::math::Vec2;
use meadowsim::config::MountainConfig;
use meadowsim::parallax::ParallaxParams;

/// Cursor over the whole window to NDC, y up
pub fn window_ndc(position: Vec2, window_size: Vec2) -> Vec2 {
    let size = window_size.max(Vec2::ONE);
    Vec2::new(position.x / size.x * 2.0 - 1.0, 1.0 - position.y / size.y * 2.0)
}

pub fn parallax_params(config: &MountainConfig) -> ParallaxParams {
    ParallaxParams {
        mouse_influence: config.mouse_influence,
        scroll_influence: config.scroll_influence,
    }
}
