// Per-cell wind field update shared by every backend

use super::params::{Brush, SolverParams};
use crate::field::VelocityField;
use glam::Vec2;

/// Smallest brush radius, keeps the gaussian finite
pub const MIN_INJECTION_RADIUS: f32 = 1e-5;

/// Compute the next value of one cell from the previous field.
///
/// Reads only `read`, so cells can be evaluated in any order or in parallel.
///
/// # Arguments
/// * `read` - Field from the previous step
/// * `x`, `y` - Cell to update
/// * `params` - Solver knobs, decay and diffusion clamped here at the point of use.
///   `injection_strength` is used as is, the optional max is not applied.
/// * `brush` - Pointer injection, `None` when inactive
/// * `dt` - Seconds since the previous step, only scales advection
///
/// # Returns
/// New velocity for the cell
pub fn update_cell(
    read: &VelocityField,
    x: usize,
    y: usize,
    params: &SolverParams,
    brush: Option<&Brush>,
    dt: f32,
) -> Vec2 {
    let uv = read.cell_uv(x, y);
    let texel = read.texel();

    // Semi-Lagrangian: pull the value from where this cell's wind came from
    let vel_prev = read.sample(uv);
    let advected = read.sample(uv - params.advection.max(0.0) * dt * vel_prev);

    // 5-tap blur of the advected value and its N/E/S/W neighbours
    let sum = advected
        + read.sample(uv + Vec2::new(texel.x, 0.0))
        + read.sample(uv - Vec2::new(texel.x, 0.0))
        + read.sample(uv + Vec2::new(0.0, texel.y))
        + read.sample(uv - Vec2::new(0.0, texel.y));
    let blurred = sum / 5.0;
    let mut vel = advected.lerp(blurred, params.diffusion.clamp(0.0, 1.0));

    vel *= params.decay.clamp(0.0, 1.0);

    if let Some(brush) = brush {
        vel += brush.direction * params.injection_strength * gaussian_weight(uv, brush.uv, params.injection_radius);
    }

    vel
}

/// `exp(-0.5 * d² / r²)` for the distance between two UV points
pub fn gaussian_weight(uv: Vec2, centre: Vec2, radius: f32) -> f32 {
    let r = radius.max(MIN_INJECTION_RADIUS);
    let d2 = uv.distance_squared(centre);
    (-0.5 * d2 / (r * r)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_params() -> SolverParams {
        SolverParams {
            decay: 1.0,
            diffusion: 0.0,
            advection: 0.0,
            injection_radius: 0.1,
            injection_strength: 1.0,
            injection_strength_max: None,
        }
    }

    #[test]
    fn test_gaussian_weight_is_one_at_centre() {
        assert_eq!(gaussian_weight(Vec2::splat(0.3), Vec2::splat(0.3), 0.05), 1.0);
    }

    #[test]
    fn test_gaussian_weight_at_one_radius() {
        let w = gaussian_weight(Vec2::new(0.6, 0.5), Vec2::new(0.5, 0.5), 0.1);
        assert!((w - (-0.5f32).exp()).abs() < 1e-5, "w was {}", w);
    }

    #[test]
    fn test_zero_radius_does_not_produce_nan() {
        let w = gaussian_weight(Vec2::new(0.6, 0.5), Vec2::new(0.5, 0.5), 0.0);
        assert!(w.is_finite());
        assert_eq!(w, 0.0);
    }

    #[test]
    fn test_identity_params_keep_cell() {
        let mut field = VelocityField::zeroed(8).unwrap();
        field.set(3, 4, Vec2::new(0.7, -0.2));

        let next = update_cell(&field, 3, 4, &still_params(), None, 0.016);

        assert!((next - Vec2::new(0.7, -0.2)).length() < 1e-6);
    }

    #[test]
    fn test_full_diffusion_averages_neighbours() {
        let mut field = VelocityField::zeroed(8).unwrap();
        field.set(4, 4, Vec2::new(5.0, 0.0));
        let params = SolverParams {
            diffusion: 1.0,
            ..still_params()
        };

        let centre = update_cell(&field, 4, 4, &params, None, 0.016);
        let neighbour = update_cell(&field, 5, 4, &params, None, 0.016);

        assert!((centre.x - 1.0).abs() < 1e-5, "centre was {}", centre.x);
        assert!((neighbour.x - 1.0).abs() < 1e-5, "neighbour was {}", neighbour.x);
    }

    #[test]
    fn test_advection_pulls_from_upwind_cell() {
        let mut field = VelocityField::zeroed(8).unwrap();
        // Wind at (4,4) blowing +x by exactly one texel per step
        let texel = field.texel().x;
        field.set(4, 4, Vec2::new(texel, 0.0));
        field.set(3, 4, Vec2::new(0.0, 9.0));
        let params = SolverParams {
            advection: 1.0,
            ..still_params()
        };

        let next = update_cell(&field, 4, 4, &params, None, 1.0);

        assert!((next - Vec2::new(0.0, 9.0)).length() < 1e-5, "got {:?}", next);
    }

    #[test]
    fn test_strength_scales_injection_past_max() {
        let field = VelocityField::zeroed(8).unwrap();
        let brush = Brush::new(field.cell_uv(4, 4), Vec2::X);
        let weak = SolverParams {
            injection_strength_max: Some(1.0),
            ..still_params()
        };
        let strong = SolverParams {
            injection_strength: 3.0,
            ..weak
        };

        let a = update_cell(&field, 4, 4, &weak, Some(&brush), 0.016);
        let b = update_cell(&field, 4, 4, &strong, Some(&brush), 0.016);

        assert!((b.x - 3.0 * a.x).abs() < 1e-5, "{} vs {}", b.x, a.x);
    }

    #[test]
    fn test_brush_direction_scales_injection() {
        let field = VelocityField::zeroed(8).unwrap();
        let brush = Brush::new(field.cell_uv(2, 2), Vec2::new(0.0, -2.0));

        let next = update_cell(&field, 2, 2, &still_params(), Some(&brush), 0.016);

        assert!((next - Vec2::new(0.0, -2.0)).length() < 1e-6);
    }
}
