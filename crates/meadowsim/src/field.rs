// Square grid of 2D wind velocities, sampled like a clamped float texture

use crate::error::{MeadowError, Result};
use glam::Vec2;

/// Largest grid edge the solver accepts
pub const MAX_RESOLUTION: usize = 4096;

/// A square grid of (x, z) wind velocities stored row-major.
///
/// Row `y` maps to the V axis of field UV space and column `x` to U, so the
/// cell centre of `(x, y)` sits at `((x + 0.5) / R, (y + 0.5) / R)`.
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityField {
    resolution: usize,
    cells: Vec<Vec2>,
}

impl VelocityField {
    /// Allocate a zeroed field.
    ///
    /// # Errors
    /// `InvalidResolution` for 0 or anything above [`MAX_RESOLUTION`],
    /// `Allocation` when the cell buffer cannot be reserved.
    pub fn zeroed(resolution: usize) -> Result<Self> {
        if resolution == 0 || resolution > MAX_RESOLUTION {
            return Err(MeadowError::InvalidResolution {
                got: resolution,
                max: MAX_RESOLUTION,
            });
        }

        let len = resolution * resolution;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| MeadowError::Allocation { resolution })?;
        cells.resize(len, Vec2::ZERO);

        Ok(Self { resolution, cells })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn cells(&self) -> &[Vec2] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Vec2] {
        &mut self.cells
    }

    /// Velocity stored at a cell. Out-of-range indices clamp to the edge.
    pub fn get(&self, x: usize, y: usize) -> Vec2 {
        let last = self.resolution - 1;
        self.cells[y.min(last) * self.resolution + x.min(last)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: Vec2) {
        let index = y * self.resolution + x;
        self.cells[index] = value;
    }

    /// UV of a cell centre
    pub fn cell_uv(&self, x: usize, y: usize) -> Vec2 {
        let r = self.resolution as f32;
        Vec2::new((x as f32 + 0.5) / r, (y as f32 + 0.5) / r)
    }

    /// Size of one cell in UV units
    pub fn texel(&self) -> Vec2 {
        Vec2::splat(1.0 / self.resolution as f32)
    }

    /// Bilinear sample at a UV position with clamp-to-edge addressing.
    ///
    /// Matches linear filtering of a float texture: cell centres reproduce the
    /// stored value exactly, positions outside [0, 1] read the border cells.
    pub fn sample(&self, uv: Vec2) -> Vec2 {
        let r = self.resolution as f32;
        let last = (self.resolution - 1) as f32;

        // Texel space, where cell centres sit on integers
        let fx = (uv.x * r - 0.5).clamp(0.0, last);
        let fy = (uv.y * r - 0.5).clamp(0.0, last);

        let x0 = fx.floor() as usize;
        let y0 = fy.floor() as usize;
        let x1 = (x0 + 1).min(self.resolution - 1);
        let y1 = (y0 + 1).min(self.resolution - 1);

        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let v00 = self.get(x0, y0);
        let v10 = self.get(x1, y0);
        let v01 = self.get(x0, y1);
        let v11 = self.get(x1, y1);

        let v0 = v00.lerp(v10, tx);
        let v1 = v01.lerp(v11, tx);
        v0.lerp(v1, ty)
    }

    /// Largest vector magnitude in the grid
    pub fn max_magnitude(&self) -> f32 {
        self.cells
            .iter()
            .map(|v| v.length())
            .fold(0.0, f32::max)
    }

    pub fn fill_zero(&mut self) {
        self.cells.fill(Vec2::ZERO);
    }
}
