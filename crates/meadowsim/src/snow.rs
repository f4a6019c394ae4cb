// Falling snow in a small box around the mountain vignette

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SNOW_AREA: Vec3 = Vec3::splat(0.5);
const JITTER: f32 = 0.0005;
const FALL_SCALE: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flake {
    pub position: Vec3,
    /// Base fall speed, box units per second before scaling
    pub speed: f32,
}

#[derive(Debug, Clone)]
pub struct SnowField {
    flakes: Vec<Flake>,
    area: Vec3,
}

impl SnowField {
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let area = SNOW_AREA;
        let flakes = (0..count)
            .map(|_| Flake {
                position: Vec3::new(
                    (rng.random::<f32>() - 0.5) * area.x,
                    rng.random::<f32>() * area.y,
                    (rng.random::<f32>() - 0.5) * area.z,
                ),
                speed: 0.05 + rng.random::<f32>() * 5.0,
            })
            .collect();
        Self { flakes, area }
    }

    pub fn flakes(&self) -> &[Flake] {
        &self.flakes
    }

    pub fn area(&self) -> Vec3 {
        self.area
    }

    /// Move every flake down and sideways by one frame
    ///
    /// `time` drives the sideways jitter, `speed_scale` is the user fall
    /// speed multiplier.
    pub fn update(&mut self, dt: f32, time: f32, speed_scale: f32) {
        let half = self.area * 0.5;
        for (i, flake) in self.flakes.iter_mut().enumerate() {
            let fi = i as f32;
            let p = &mut flake.position;
            p.x += (fi * 12.9898 + time * 0.5).sin() * JITTER;
            p.y -= flake.speed * dt * FALL_SCALE * speed_scale;
            p.z += (fi * 78.233 + time * 0.3).cos() * JITTER;
            if p.y < -half.y {
                p.y = half.y;
            }
            p.x = p.x.clamp(-half.x, half.x);
            p.z = p.z.clamp(-half.z, half.z);
        }
    }
}
