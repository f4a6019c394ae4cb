use crate::error::Result;
use crate::solver::{DEFAULT_RESOLUTION, SolverParams};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE: &str = "meadow_config.toml";

/// Every tunable of the meadow app. Sections missing from the file keep
/// their defaults, as do missing keys inside a section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeadowConfig {
    pub wind: WindConfig,
    pub grass: GrassConfig,
    pub conveyor: ConveyorConfig,
    pub camera: CameraConfig,
    pub mountain: MountainConfig,
    pub page: PageConfig,
    pub props: Vec<PropSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    pub resolution: usize,
    pub decay: f32,
    pub diffusion: f32,
    pub advection: f32,
    pub injection_radius: f32,
    pub injection_strength: f32,
    /// Upper end of the debug panel's strength slider; the solver ignores it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injection_strength_max: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassConfig {
    pub plane_size: f32,
    pub count: usize,
    pub blade_width: f32,
    pub blade_height: f32,
    pub blade_segments: u32,
    /// Tip width as a fraction of the base width
    pub taper: f32,
    pub turbulence_amplitude: f32,
    pub turbulence_frequency: f32,
    pub damping: f32,
    pub wind_strength: f32,
    pub glow_threshold: f32,
    pub glow_boost: f32,
    /// Layout seed. A fresh random meadow is grown when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConveyorConfig {
    pub loops: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view, degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub look_at: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountainConfig {
    pub mouse_influence: f32,
    pub scroll_influence: f32,
    pub bloom_intensity: f32,
    pub snow_speed: f32,
    pub snow_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Viewport heights
    pub hero_height: f32,
    /// Viewport heights
    pub grass_height: f32,
    /// Pixels scrolled per mouse wheel line
    pub wheel_line_pixels: f32,
}

/// A decorative model placed on the ground and carried by the conveyor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropSpec {
    /// Asset path of the glTF scene
    pub model: String,
    #[serde(default)]
    pub instances: Vec<PropInstance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropInstance {
    pub location: [f32; 3],
    /// Euler XYZ, degrees
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for WindConfig {
    fn default() -> Self {
        let params = SolverParams::default();
        Self {
            resolution: DEFAULT_RESOLUTION,
            decay: params.decay,
            diffusion: params.diffusion,
            advection: params.advection,
            injection_radius: params.injection_radius,
            injection_strength: params.injection_strength,
            injection_strength_max: params.injection_strength_max,
        }
    }
}

impl WindConfig {
    pub fn solver_params(&self) -> SolverParams {
        SolverParams {
            decay: self.decay,
            diffusion: self.diffusion,
            advection: self.advection,
            injection_radius: self.injection_radius,
            injection_strength: self.injection_strength,
            injection_strength_max: self.injection_strength_max,
        }
    }
}

impl Default for GrassConfig {
    fn default() -> Self {
        Self {
            plane_size: 30.0,
            count: 50_000,
            blade_width: 0.2,
            blade_height: 0.85,
            blade_segments: 1,
            taper: 0.1,
            turbulence_amplitude: 0.4,
            turbulence_frequency: 0.2,
            damping: 0.3,
            wind_strength: 1.2,
            glow_threshold: 0.05,
            glow_boost: 0.2,
            seed: None,
        }
    }
}

impl GrassConfig {
    /// Ground extent for a window aspect ratio. The plane is stretched along
    /// x so it always fills the view.
    pub fn plane_extent(&self, aspect: f32) -> Vec2 {
        let aspect = if aspect.is_finite() { aspect.clamp(0.1, 4.0) } else { 1.0 };
        Vec2::new(self.plane_size * aspect, self.plane_size)
    }
}

impl Default for ConveyorConfig {
    fn default() -> Self {
        Self { loops: 1.0 }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 20.0, 0.0],
            look_at: [0.0, 0.0, 0.0],
        }
    }
}

impl CameraConfig {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn look_at(&self) -> Vec3 {
        Vec3::from_array(self.look_at)
    }
}

impl Default for MountainConfig {
    fn default() -> Self {
        Self {
            mouse_influence: 0.03,
            scroll_influence: 0.2,
            bloom_intensity: 0.2,
            snow_speed: 1.0,
            snow_count: 500,
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            hero_height: 1.0,
            grass_height: 3.0,
            wheel_line_pixels: 40.0,
        }
    }
}

impl Default for PropInstance {
    fn default() -> Self {
        Self {
            location: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl MeadowConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
