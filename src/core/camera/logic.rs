use bevy::math::{EulerRot, Quat, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

const ROTATE_SPEED: f32 = 0.005;
const ZOOM_STEP: f32 = 0.1;
pub const MIN_RADIUS: f32 = 1.0;
pub const MAX_RADIUS: f32 = 200.0;
/// Keeps the camera above the ground
const MAX_PITCH: f32 = -0.05;

/// Orbit around a target. Yaw turns around world Y, pitch tilts down from
/// the horizon; pitch -90° looks straight down with -Z at the top of the
/// screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub yaw: f32,
    pub pitch: f32,
    pub radius: f32,
    pub target: Vec3,
}

impl OrbitState {
    pub fn from_look(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let radius = offset.length().clamp(MIN_RADIUS, MAX_RADIUS);
        let dir = offset.try_normalize().unwrap_or(Vec3::Y);
        Self {
            yaw: dir.x.atan2(dir.z),
            pitch: (-dir.y).clamp(-1.0, 1.0).asin().clamp(-FRAC_PI_2, MAX_PITCH),
            radius,
            target,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn position(&self) -> Vec3 {
        self.target + self.rotation() * Vec3::Z * self.radius
    }

    /// Apply a mouse drag in pixels
    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ROTATE_SPEED;
        self.pitch = (self.pitch - delta.y * ROTATE_SPEED).clamp(-FRAC_PI_2, MAX_PITCH);
    }

    /// Wheel lines, positive moves closer
    pub fn zoom(&mut self, lines: f32) {
        self.radius = (self.radius * (1.0 - lines * ZOOM_STEP)).clamp(MIN_RADIUS, MAX_RADIUS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_top_down_view() {
        let orbit = OrbitState::from_look(Vec3::new(0.0, 20.0, 0.0), Vec3::ZERO);

        assert!((orbit.pitch + FRAC_PI_2).abs() < 1e-5);
        assert!(close(orbit.position(), Vec3::new(0.0, 20.0, 0.0)));
        assert!(close(orbit.rotation() * Vec3::NEG_Z, Vec3::NEG_Y));
        assert!(close(orbit.rotation() * Vec3::Y, Vec3::NEG_Z));
    }

    #[rstest]
    #[case(Vec3::new(0.0, 5.0, 10.0))]
    #[case(Vec3::new(-8.0, 3.0, 2.0))]
    #[case(Vec3::new(4.0, 12.0, -6.0))]
    fn test_from_look_reproduces_position(#[case] position: Vec3) {
        let target = Vec3::new(1.0, 0.0, -1.0);
        let orbit = OrbitState::from_look(position, target);
        assert!(close(orbit.position(), position), "got {:?}", orbit.position());
    }

    #[test]
    fn test_rotation_keeps_radius() {
        let mut orbit = OrbitState::from_look(Vec3::new(0.0, 10.0, 10.0), Vec3::ZERO);
        let radius = orbit.position().length();

        orbit.rotate(Vec2::new(120.0, -40.0));

        assert!((orbit.position().length() - radius).abs() < 1e-3);
    }

    #[rstest]
    #[case(Vec2::new(0.0, 10_000.0))]
    #[case(Vec2::new(0.0, -10_000.0))]
    fn test_pitch_is_clamped(#[case] drag: Vec2) {
        let mut orbit = OrbitState::from_look(Vec3::new(0.0, 10.0, 10.0), Vec3::ZERO);
        orbit.rotate(drag);
        assert!(orbit.pitch >= -FRAC_PI_2 && orbit.pitch <= MAX_PITCH);
        assert!(orbit.position().y > 0.0);
    }

    #[rstest]
    #[case(1.0, 18.0)]
    #[case(-1.0, 22.0)]
    #[case(100.0, MIN_RADIUS)]
    #[case(-1000.0, MAX_RADIUS)]
    fn test_zoom(#[case] lines: f32, #[case] expected: f32) {
        let mut orbit = OrbitState::from_look(Vec3::new(0.0, 20.0, 0.0), Vec3::ZERO);
        orbit.zoom(lines);
        assert!((orbit.radius - expected).abs() < 1e-4, "radius was {}", orbit.radius);
    }
}
