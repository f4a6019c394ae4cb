// Per-blade static attributes and the scroll conveyor wrap

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// One grass blade, fixed for the lifetime of a field build
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeInstance {
    /// Normalized ground position. x in [-0.5, 0.5), z may extend past 0.5
    /// when the layout spans several conveyor loops.
    pub base: Vec2,
    /// Rotation around the vertical axis, radians
    pub rotation: f32,
    /// Stable random value in [0, 1) driving bend direction and shade
    pub seed: f32,
}

impl BladeInstance {
    /// Packed as `[x, z, rotation, seed]`, the layout of the mesh attribute
    pub fn to_array(&self) -> [f32; 4] {
        [self.base.x, self.base.y, self.rotation, self.seed]
    }
}

/// Wrap a normalized z into [-0.5, 0.5) after moving it by the conveyor offset
pub fn wrap_z(base_z: f32, offset_norm: f32) -> f32 {
    (base_z - offset_norm + 0.5).rem_euclid(1.0) - 0.5
}

/// The flat attribute buffer of every blade plus the current scroll offset
#[derive(Debug, Clone, Default)]
pub struct BladeField {
    instances: Vec<BladeInstance>,
    offset_norm: f32,
}

impl BladeField {
    /// Generate `count` blades with a layout function called once per index
    pub fn build(count: usize, layout: impl FnMut(usize) -> BladeInstance) -> Self {
        let instances = (0..count).map(layout).collect();
        Self {
            instances,
            offset_norm: 0.0,
        }
    }

    pub fn instances(&self) -> &[BladeInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn offset_norm(&self) -> f32 {
        self.offset_norm
    }

    /// Move the conveyor. Blades are not reallocated, only the wrap changes.
    pub fn update_scroll(&mut self, offset_norm: f32) {
        self.offset_norm = offset_norm;
    }

    /// Normalized visible z of one blade, in [-0.5, 0.5)
    pub fn visible_z_norm(&self, index: usize) -> Option<f32> {
        self.instances
            .get(index)
            .map(|blade| wrap_z(blade.base.y, self.offset_norm))
    }

    /// World XZ of one blade after the conveyor wrap
    pub fn visible_position(&self, index: usize, extent: Vec2) -> Option<Vec2> {
        self.instances.get(index).map(|blade| {
            Vec2::new(
                blade.base.x * extent.x,
                wrap_z(blade.base.y, self.offset_norm) * extent.y,
            )
        })
    }
}

/// Random scatter over one plane in x and `1 + loops` planes in z.
///
/// Deterministic for a given `seed`, so a rebuild with the same settings
/// gives the same meadow.
pub fn scatter_layout(loops: f32, seed: u64) -> impl FnMut(usize) -> BladeInstance {
    let mut rng = StdRng::seed_from_u64(seed);
    let z_spread = 1.0 + loops.max(0.0);
    move |_| BladeInstance {
        base: Vec2::new(
            rng.random::<f32>() - 0.5,
            rng.random::<f32>() * z_spread - 0.5,
        ),
        rotation: rng.random::<f32>() * TAU,
        seed: rng.random::<f32>(),
    }
}
