//! Double-buffered wind trail solver.
//!
//! Each [`VectorFieldSolver::step`] advects the field along itself, blends it
//! with a 5-tap blur, multiplies by `decay` and adds a gaussian splat of the
//! pointer motion. The update reads one buffer and writes the other, then the
//! two swap roles.

pub mod kernel;
pub mod params;

pub use kernel::{gaussian_weight, update_cell};
pub use params::{Brush, SolverParams, SolverParamsUpdate};

use crate::error::Result;
use crate::field::VelocityField;

pub const DEFAULT_RESOLUTION: usize = 64;

#[derive(Debug, Clone)]
pub struct VectorFieldSolver {
    read: VelocityField,
    write: VelocityField,
    params: SolverParams,
    steps: u64,
}

impl VectorFieldSolver {
    /// Allocate both buffers at `resolution`² cells, zeroed.
    pub fn new(resolution: usize, params: SolverParams) -> Result<Self> {
        let read = VelocityField::zeroed(resolution)?;
        let write = VelocityField::zeroed(resolution)?;
        Ok(Self {
            read,
            write,
            params,
            steps: 0,
        })
    }

    pub fn resolution(&self) -> usize {
        self.read.resolution()
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    /// Change any subset of parameters; used from the next step on
    pub fn set_params(&mut self, update: SolverParamsUpdate) {
        self.params.apply(update);
    }

    /// Number of completed steps since construction or the last clear
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// The field consumers sample. Unchanged until the next `step`.
    pub fn current_field(&self) -> &VelocityField {
        &self.read
    }

    /// Advance the field by one frame and swap buffers
    pub fn step(&mut self, brush: Option<Brush>, dt: f32) {
        let resolution = self.read.resolution();
        let read = &self.read;
        let params = &self.params;
        let brush = brush.as_ref();

        for (index, cell) in self.write.cells_mut().iter_mut().enumerate() {
            let x = index % resolution;
            let y = index / resolution;
            *cell = update_cell(read, x, y, params, brush, dt);
        }

        std::mem::swap(&mut self.read, &mut self.write);
        self.steps += 1;
    }

    /// Zero both buffers, keeping the allocation
    pub fn clear(&mut self) {
        self.read.fill_zero();
        self.write.fill_zero();
        self.steps = 0;
    }
}
