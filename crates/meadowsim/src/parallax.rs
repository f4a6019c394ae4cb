// Mountain camera parallax from pointer and scroll

use crate::tools::power2_out;
use glam::{Vec2, Vec3};

/// Length of the ease towards a new target, seconds
pub const PARALLAX_DURATION: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxParams {
    pub mouse_influence: f32,
    pub scroll_influence: f32,
}

impl Default for ParallaxParams {
    fn default() -> Self {
        Self {
            mouse_influence: 0.03,
            scroll_influence: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tween {
    from: Vec3,
    to: Vec3,
    elapsed: f32,
}

/// Camera position that eases towards `base + pointer + scroll` offsets.
/// Every retarget restarts the ease from the current position.
#[derive(Debug, Clone, PartialEq)]
pub struct Parallax {
    base: Vec3,
    params: ParallaxParams,
    mouse: Vec2,
    hero_progress: f32,
    position: Vec3,
    tween: Option<Tween>,
}

impl Parallax {
    pub fn new(base: Vec3, params: ParallaxParams) -> Self {
        Self {
            base,
            params,
            mouse: Vec2::ZERO,
            hero_progress: 0.0,
            position: base,
            tween: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn params(&self) -> ParallaxParams {
        self.params
    }

    pub fn set_params(&mut self, params: ParallaxParams) {
        if params != self.params {
            self.params = params;
            self.retarget();
        }
    }

    /// Pointer over the window in NDC (x right, y up)
    pub fn set_mouse(&mut self, ndc: Vec2) {
        self.mouse = ndc;
        self.retarget();
    }

    /// Hero scroll progress in [0, 1]
    pub fn set_hero_progress(&mut self, progress: f32) {
        self.hero_progress = progress.clamp(0.0, 1.0);
        self.retarget();
    }

    pub fn target(&self) -> Vec3 {
        let influence = self.params.mouse_influence;
        Vec3::new(
            self.base.x + self.mouse.x * influence,
            self.base.y + self.mouse.y * influence - self.params.scroll_influence * self.hero_progress,
            self.base.z,
        )
    }

    /// Advance the ease, returns the new position
    pub fn update(&mut self, dt: f32) -> Vec3 {
        if let Some(tween) = &mut self.tween {
            tween.elapsed += dt.max(0.0);
            let t = tween.elapsed / PARALLAX_DURATION;
            if t >= 1.0 {
                self.position = tween.to;
                self.tween = None;
            } else {
                self.position = tween.from.lerp(tween.to, power2_out(t));
            }
        }
        self.position
    }

    fn retarget(&mut self) {
        let to = self.target();
        if to == self.position && self.tween.is_none() {
            return;
        }
        self.tween = Some(Tween {
            from: self.position,
            to,
            elapsed: 0.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Vec3 = Vec3::new(0.0, 0.0, 0.65);

    #[test]
    fn test_target_combines_mouse_and_scroll() {
        let mut parallax = Parallax::new(BASE, ParallaxParams::default());
        parallax.set_mouse(Vec2::new(1.0, -1.0));
        parallax.set_hero_progress(0.5);

        let target = parallax.target();

        assert!((target.x - 0.03).abs() < 1e-6);
        assert!((target.y - (-0.03 - 0.1)).abs() < 1e-6);
        assert_eq!(target.z, 0.65);
    }

    #[test]
    fn test_reaches_target_after_duration() {
        let mut parallax = Parallax::new(BASE, ParallaxParams::default());
        parallax.set_mouse(Vec2::new(1.0, 0.0));

        let halfway = parallax.update(PARALLAX_DURATION * 0.5);
        assert!(halfway.x > 0.015 && halfway.x < 0.03, "x was {}", halfway.x);

        let end = parallax.update(PARALLAX_DURATION);
        assert_eq!(end, parallax.target());
    }

    #[test]
    fn test_retarget_starts_from_current_position() {
        let mut parallax = Parallax::new(BASE, ParallaxParams::default());
        parallax.set_mouse(Vec2::new(1.0, 0.0));
        let mid = parallax.update(0.1);

        parallax.set_mouse(Vec2::new(-1.0, 0.0));
        let next = parallax.update(0.0);

        assert_eq!(next, mid);
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut parallax = Parallax::new(BASE, ParallaxParams::default());
        parallax.set_hero_progress(4.0);
        assert!((parallax.target().y - -0.2).abs() < 1e-6);
    }
}
