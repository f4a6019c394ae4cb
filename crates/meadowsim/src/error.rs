//! Error types for meadowsim.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeadowError {
    #[error("field resolution must be between 1 and {max}, got {got}")]
    InvalidResolution { got: usize, max: usize },

    #[error("could not allocate a {resolution}x{resolution} velocity field")]
    Allocation { resolution: usize },

    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, MeadowError>;
