pub mod blade;
pub mod config;
pub mod conveyor;
pub mod displacement;
pub mod error;
pub mod field;
pub mod lifecycle;
pub mod page;
pub mod parallax;
pub mod pointer;
pub mod snow;
pub mod solver;
pub mod tools;
pub mod video_light;

pub use config::MeadowConfig;
pub use error::{MeadowError, Result};
pub use field::VelocityField;
pub use solver::{Brush, SolverParams, SolverParamsUpdate, VectorFieldSolver};
