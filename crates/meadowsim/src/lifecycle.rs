// Per-scene start/stop driven by section visibility

use crate::page::ScreenRect;

/// Fraction of the viewport height cut from the bottom of the visibility test
pub const BOTTOM_ROOT_MARGIN: f32 = 0.2;
/// Smallest frame delta fed to a running scene, seconds
pub const MIN_FRAME_DT: f32 = 0.00016;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started,
    Stopped,
}

/// Whether a section overlaps the viewport shrunk by the bottom root margin
pub fn is_section_visible(section: ScreenRect, viewport_height: f32) -> bool {
    let bottom_limit = viewport_height * (1.0 - BOTTOM_ROOT_MARGIN);
    section.height > 0.0 && section.top < bottom_limit && section.bottom() > 0.0
}

/// Running flag plus the scene clock. Time only advances while running.
#[derive(Debug, Clone, Default)]
pub struct SceneLifecycle {
    running: bool,
    time: f32,
    dt: f32,
}

impl SceneLifecycle {
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Scene time in seconds, frozen while stopped
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Delta of the last tick, 0 until the first tick after a start
    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn start(&mut self) -> Option<Transition> {
        if self.running {
            return None;
        }
        self.running = true;
        self.dt = 0.0;
        Some(Transition::Started)
    }

    pub fn stop(&mut self) -> Option<Transition> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Transition::Stopped)
    }

    /// Start or stop from the latest visibility; reports only real changes
    pub fn update_visibility(&mut self, visible: bool) -> Option<Transition> {
        if visible { self.start() } else { self.stop() }
    }

    /// Advance the clock by one frame. Returns the clamped delta, or `None`
    /// when stopped.
    pub fn tick(&mut self, raw_dt: f32) -> Option<f32> {
        if !self.running {
            return None;
        }
        let dt = if raw_dt.is_finite() { raw_dt.max(MIN_FRAME_DT) } else { MIN_FRAME_DT };
        self.time += dt;
        self.dt = dt;
        Some(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn section(top: f32, height: f32) -> ScreenRect {
        ScreenRect {
            left: 0.0,
            top,
            width: 800.0,
            height,
        }
    }

    #[rstest]
    #[case(0.0, 1000.0, true)]
    #[case(-900.0, 1000.0, true)]
    #[case(-1000.0, 1000.0, false)]
    #[case(700.0, 1000.0, true)]
    #[case(850.0, 1000.0, false)]
    #[case(1000.0, 1000.0, false)]
    #[case(0.0, 0.0, false)]
    fn test_visibility_with_bottom_margin(
        #[case] top: f32,
        #[case] height: f32,
        #[case] expected: bool,
    ) {
        assert_eq!(is_section_visible(section(top, height), 1000.0), expected);
    }

    #[test]
    fn test_transitions_fire_once() {
        let mut scene = SceneLifecycle::default();

        assert_eq!(scene.update_visibility(true), Some(Transition::Started));
        assert_eq!(scene.update_visibility(true), None);
        assert_eq!(scene.update_visibility(false), Some(Transition::Stopped));
        assert_eq!(scene.update_visibility(false), None);
    }

    #[test]
    fn test_clock_frozen_while_stopped() {
        let mut scene = SceneLifecycle::default();
        assert_eq!(scene.tick(0.5), None);
        assert_eq!(scene.time(), 0.0);

        scene.start();
        scene.tick(0.5);
        scene.stop();
        scene.tick(10.0);
        scene.start();
        scene.tick(0.25);

        assert!((scene.time() - 0.75).abs() < 1e-6);
        assert_eq!(scene.dt(), 0.25);
    }

    #[rstest]
    #[case(0.0, MIN_FRAME_DT)]
    #[case(-1.0, MIN_FRAME_DT)]
    #[case(f32::NAN, MIN_FRAME_DT)]
    #[case(0.016, 0.016)]
    fn test_tick_clamps_delta(#[case] raw: f32, #[case] expected: f32) {
        let mut scene = SceneLifecycle::default();
        scene.start();
        assert_eq!(scene.tick(raw), Some(expected));
    }
}
