use bevy::prelude::*;
use meadowsim::config::CONFIG_FILE;
use meadowsim::{MeadowConfig, MeadowError};
use std::ops::{Deref, DerefMut};

/// Live tunables. Loaded once at startup and edited by the debug panel.
#[derive(Resource, Debug, Clone, Default)]
pub struct Settings(pub MeadowConfig);

impl Settings {
    /// Read `meadow_config.toml` from the working directory, falling back to
    /// defaults when it is missing or broken.
    pub fn load() -> Self {
        match MeadowConfig::load_from_file(CONFIG_FILE) {
            Ok(config) => {
                info!("Loaded {}", CONFIG_FILE);
                Self(config)
            }
            Err(MeadowError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No {} found, using defaults", CONFIG_FILE);
                Self::default()
            }
            Err(e) => {
                warn!("Ignoring {}: {}", CONFIG_FILE, e);
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        match self.0.save_to_file(CONFIG_FILE) {
            Ok(()) => info!("Saved {}", CONFIG_FILE),
            Err(e) => error!("Failed to save {}: {}", CONFIG_FILE, e),
        }
    }
}

impl Deref for Settings {
    type Target = MeadowConfig;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Settings {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
