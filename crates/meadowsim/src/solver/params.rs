use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tunable knobs of the wind field update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    /// Per-step multiplier, 0..1. Applied once per `step` regardless of dt.
    pub decay: f32,
    /// Blend towards the 5-tap blur, 0 = none, 1 = full blur
    pub diffusion: f32,
    /// How far the field follows its own velocity per second
    pub advection: f32,
    /// Gaussian brush radius in UV units
    pub injection_radius: f32,
    pub injection_strength: f32,
    /// Upper bound for tools that edit `injection_strength`. The solver
    /// carries it but never clamps with it.
    pub injection_strength_max: Option<f32>,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            decay: 0.98,
            diffusion: 0.25,
            advection: 1.0,
            injection_radius: 0.02,
            injection_strength: 1.0,
            injection_strength_max: None,
        }
    }
}

impl SolverParams {
    pub fn apply(&mut self, update: SolverParamsUpdate) {
        if let Some(decay) = update.decay {
            self.decay = decay;
        }
        if let Some(diffusion) = update.diffusion {
            self.diffusion = diffusion;
        }
        if let Some(advection) = update.advection {
            self.advection = advection;
        }
        if let Some(radius) = update.injection_radius {
            self.injection_radius = radius;
        }
        if let Some(strength) = update.injection_strength {
            self.injection_strength = strength;
        }
        if let Some(max) = update.injection_strength_max {
            self.injection_strength_max = max;
        }
    }
}

/// Partial parameter change, `None` fields keep their current value
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SolverParamsUpdate {
    pub decay: Option<f32>,
    pub diffusion: Option<f32>,
    pub advection: Option<f32>,
    pub injection_radius: Option<f32>,
    pub injection_strength: Option<f32>,
    pub injection_strength_max: Option<Option<f32>>,
}

/// Pointer-derived injection for a single step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    /// Position in field UV space, 0..1 on both axes
    pub uv: Vec2,
    /// World-space XZ pointer displacement since the previous sample
    pub direction: Vec2,
}

impl Brush {
    pub fn new(uv: Vec2, direction: Vec2) -> Self {
        Self { uv, direction }
    }

    /// Build a brush from a UV that may carry the "inactive" sentinel
    /// (any negative coordinate).
    pub fn from_sentinel(uv: Vec2, direction: Vec2) -> Option<Self> {
        if uv.x < 0.0 || uv.y < 0.0 {
            None
        } else {
            Some(Self::new(uv, direction))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let mut params = SolverParams::default();
        params.apply(SolverParamsUpdate {
            decay: Some(0.9),
            ..Default::default()
        });

        assert_eq!(params.decay, 0.9);
        assert_eq!(params.diffusion, SolverParams::default().diffusion);
        assert_eq!(params.advection, SolverParams::default().advection);
    }

    #[test]
    fn test_update_sets_and_clears_strength_max() {
        let mut params = SolverParams::default();
        params.apply(SolverParamsUpdate {
            injection_strength: Some(3.0),
            injection_strength_max: Some(Some(1.0)),
            ..Default::default()
        });
        assert_eq!(params.injection_strength, 3.0);
        assert_eq!(params.injection_strength_max, Some(1.0));

        params.apply(SolverParamsUpdate {
            injection_strength_max: Some(None),
            ..Default::default()
        });
        assert_eq!(params.injection_strength_max, None);
        assert_eq!(params.injection_strength, 3.0);
    }

    #[rstest]
    #[case(Vec2::new(-1.0, -1.0), false)]
    #[case(Vec2::new(-1.0, 0.5), false)]
    #[case(Vec2::new(0.0, 0.0), true)]
    #[case(Vec2::new(0.5, 1.0), true)]
    fn test_brush_sentinel(#[case] uv: Vec2, #[case] active: bool) {
        assert_eq!(Brush::from_sentinel(uv, Vec2::X).is_some(), active);
    }
}
