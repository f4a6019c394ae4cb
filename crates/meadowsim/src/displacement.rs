// Per-vertex blade displacement and shading.
//
// This is the reference for assets/shaders/grass_blade.wgsl. Keep the two in
// step when either changes.

use crate::blade::{BladeInstance, wrap_z};
use crate::field::VelocityField;
use crate::tools::smoothstep;
use glam::{Quat, Vec2, Vec3};
use std::f32::consts::TAU;

/// Scalar inputs of the blade law, one set per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeUniforms {
    /// Scene time in seconds
    pub time: f32,
    pub turbulence_amplitude: f32,
    pub turbulence_frequency: f32,
    /// Baseline sway length at the tip
    pub damping: f32,
    pub wind_strength: f32,
    pub glow_threshold: f32,
    pub glow_boost: f32,
    /// Blade height in local units, used to normalize heightFactor
    pub blade_height: f32,
    /// World size of the ground plane (x, z)
    pub plane_extent: Vec2,
    /// Conveyor offset, 1.0 = one plane length
    pub scroll_offset_norm: f32,
}

impl BladeUniforms {
    /// Conveyor offset in world z units
    pub fn scroll_offset_z(&self) -> f32 {
        self.scroll_offset_norm * self.plane_extent.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplacedVertex {
    /// Final world position
    pub position: Vec3,
    /// World position with no sway, wind or turbulence applied
    pub rest: Vec3,
    pub glow: f32,
    pub height_factor: f32,
}

/// World XZ of a blade root after the conveyor wrap
pub fn blade_root(blade: &BladeInstance, uniforms: &BladeUniforms) -> Vec2 {
    Vec2::new(
        blade.base.x * uniforms.plane_extent.x,
        wrap_z(blade.base.y, uniforms.scroll_offset_norm) * uniforms.plane_extent.y,
    )
}

/// Field UV under a world XZ position, clamped to the domain
pub fn field_uv(world_xz: Vec2, plane_extent: Vec2) -> Vec2 {
    (world_xz / plane_extent.max(Vec2::splat(1e-5)) + 0.5).clamp(Vec2::ZERO, Vec2::ONE)
}

/// Displace one vertex of a blade.
///
/// `local` is the vertex in blade space: x across the blade, y up from the
/// root. Sway is applied in blade space before the blade's rotation; wind and
/// turbulence are applied in world space so the trail follows the pointer.
pub fn displace_vertex(
    blade: &BladeInstance,
    local: Vec3,
    uniforms: &BladeUniforms,
    wind_field: &VelocityField,
) -> DisplacedVertex {
    let height_factor = local.y / uniforms.blade_height.max(1e-5);
    let rotation = Quat::from_rotation_y(blade.rotation);
    let root = blade_root(blade, uniforms);
    let root3 = Vec3::new(root.x, 0.0, root.y);

    let rest = root3 + rotation * local;

    // Baseline sway in a per-blade direction
    let bend_angle = blade.seed * TAU;
    let bend = Vec2::new(bend_angle.cos(), bend_angle.sin()) * (uniforms.damping * height_factor);
    let swayed = local + Vec3::new(bend.x, 0.0, bend.y);
    let mut position = root3 + rotation * swayed;

    // Wind is sampled at the wrapped visible root, not the unwrapped layout
    // position, so the whole blade leans together
    let wind = wind_field.sample(field_uv(root, uniforms.plane_extent));
    let wind_offset = wind * (uniforms.wind_strength * height_factor);
    position.x += wind_offset.x;
    position.z += wind_offset.y;

    let glow = smoothstep(uniforms.glow_threshold, uniforms.glow_threshold * 3.0, wind.length())
        * uniforms.glow_boost
        * height_factor;

    // Scroll-coherent ambient sway. Starts from the wrapped root so the scroll
    // offset is subtracted exactly once.
    let f = uniforms.turbulence_frequency;
    let t = uniforms.time;
    let turbulence = (root.x * f + t).sin()
        * ((root.y - uniforms.scroll_offset_z()) * f + t).sin()
        * uniforms.turbulence_amplitude
        * height_factor;
    position.x += turbulence;
    position.z += turbulence;

    DisplacedVertex {
        position,
        rest,
        glow,
        height_factor,
    }
}

/// Blade colour: black root fading to a per-blade grey tip, plus glow
pub fn blade_color(seed: f32, height_factor: f32, glow: f32) -> Vec3 {
    let grey = seed * 0.3 + 0.1;
    let top = Vec3::splat(grey + 0.1);
    let base = Vec3::ZERO.lerp(top, height_factor);
    base + Vec3::splat(0.5) * glow
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn uniforms() -> BladeUniforms {
        BladeUniforms {
            time: 1.3,
            turbulence_amplitude: 0.4,
            turbulence_frequency: 0.2,
            damping: 0.3,
            wind_strength: 1.2,
            glow_threshold: 0.05,
            glow_boost: 0.2,
            blade_height: 0.85,
            plane_extent: Vec2::new(40.0, 30.0),
            scroll_offset_norm: 0.25,
        }
    }

    fn blade() -> BladeInstance {
        BladeInstance {
            base: Vec2::new(0.1, 0.2),
            rotation: 0.7,
            seed: 0.35,
        }
    }

    fn windy_field() -> VelocityField {
        let mut field = VelocityField::zeroed(8).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                field.set(x, y, Vec2::new(2.0, -1.0));
            }
        }
        field
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(0.1, 0.0)]
    #[case(-0.1, 0.0)]
    fn test_root_stays_planted(#[case] x: f32, #[case] z: f32) {
        let field = windy_field();
        let local = Vec3::new(x, 0.0, z);

        let out = displace_vertex(&blade(), local, &uniforms(), &field);

        assert_eq!(out.height_factor, 0.0);
        assert_eq!(out.glow, 0.0);
        assert!((out.position - out.rest).length() < 1e-6);
    }

    #[test]
    fn test_root_stays_planted_for_extreme_params() {
        let field = windy_field();
        let u = BladeUniforms {
            damping: 50.0,
            wind_strength: 100.0,
            turbulence_amplitude: 30.0,
            ..uniforms()
        };

        let out = displace_vertex(&blade(), Vec3::ZERO, &u, &field);

        assert!((out.position - out.rest).length() < 1e-6);
    }

    #[test]
    fn test_wind_moves_tip_along_field() {
        let field = windy_field();
        let calm = VelocityField::zeroed(8).unwrap();
        let tip = Vec3::new(0.0, 0.85, 0.0);

        let windy = displace_vertex(&blade(), tip, &uniforms(), &field);
        let still = displace_vertex(&blade(), tip, &uniforms(), &calm);
        let delta = windy.position - still.position;

        // wind * strength * heightFactor(1.0)
        assert!((delta.x - 2.4).abs() < 1e-4, "dx was {}", delta.x);
        assert!((delta.z - -1.2).abs() < 1e-4, "dz was {}", delta.z);
        assert!((delta.y).abs() < 1e-6);
    }

    #[test]
    fn test_glow_saturates_above_three_thresholds() {
        let field = windy_field();
        let tip = Vec3::new(0.0, 0.85, 0.0);

        let out = displace_vertex(&blade(), tip, &uniforms(), &field);

        assert!((out.glow - 0.2).abs() < 1e-5, "glow was {}", out.glow);
    }

    #[test]
    fn test_sway_follows_seed_direction() {
        let calm = VelocityField::zeroed(8).unwrap();
        let u = BladeUniforms {
            turbulence_amplitude: 0.0,
            scroll_offset_norm: 0.0,
            ..uniforms()
        };
        let blade = BladeInstance {
            base: Vec2::ZERO,
            rotation: 0.0,
            seed: 0.0,
        };

        let out = displace_vertex(&blade, Vec3::new(0.0, 0.85, 0.0), &u, &calm);

        // seed 0 bends along +x by damping at the tip
        assert!((out.position.x - 0.3).abs() < 1e-5, "x was {}", out.position.x);
        assert!(out.position.z.abs() < 1e-5);
    }

    #[test]
    fn test_field_uv_clamps() {
        let extent = Vec2::new(10.0, 10.0);
        assert_eq!(field_uv(Vec2::new(0.0, 0.0), extent), Vec2::splat(0.5));
        assert_eq!(field_uv(Vec2::new(100.0, -100.0), extent), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_blade_color_root_is_black_without_glow() {
        assert_eq!(blade_color(0.8, 0.0, 0.0), Vec3::ZERO);
    }

    #[test]
    fn test_blade_color_tip_shade() {
        let c = blade_color(1.0, 1.0, 0.0);
        assert!((c.x - 0.5).abs() < 1e-6);
    }
}
