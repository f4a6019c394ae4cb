use crate::core::camera::resources::DebugCamera;
use crate::settings::Settings;
use bevy::camera::visibility::RenderLayers;
use bevy::camera::{CameraOutputMode, ClearColorConfig};
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::render::render_resource::BlendState;
use bevy_egui::{EguiContexts, PrimaryEguiContext, egui};
use meadowsim::MeadowConfig;
use meadowsim::conveyor::{MAX_LOOPS, MIN_LOOPS};

const MIN_STRENGTH: f32 = 0.1;
const MAX_STRENGTH: f32 = 5.0;

#[derive(Resource)]
pub struct DebugPanel {
    pub open: bool,
}

impl Default for DebugPanel {
    fn default() -> Self {
        Self {
            open: cfg!(debug_assertions),
        }
    }
}

/// Overlay camera that only draws egui, blended over both scenes
pub fn spawn_ui_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Camera {
            order: 10,
            clear_color: ClearColorConfig::Custom(Color::NONE),
            output_mode: CameraOutputMode::Write {
                blend_state: Some(BlendState::ALPHA_BLENDING),
                clear_color: ClearColorConfig::None,
            },
            ..default()
        },
        RenderLayers::none(),
        PrimaryEguiContext,
    ));
}

pub fn toggle_panel(keys: Res<ButtonInput<KeyCode>>, mut panel: ResMut<DebugPanel>) {
    if keys.just_pressed(KeyCode::F1) {
        panel.open = !panel.open;
    }
}

pub fn render_debug_panel(
    mut contexts: EguiContexts,
    panel: Res<DebugPanel>,
    diagnostics: Res<DiagnosticsStore>,
    mut settings: ResMut<Settings>,
    mut debug_camera: ResMut<DebugCamera>,
) {
    if !panel.open {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    // Edit a copy so untouched frames do not flag the settings as changed
    let mut config = settings.0.clone();
    let mut orbit = debug_camera.enabled;
    let mut save = false;

    egui::SidePanel::right("debug_panel")
        .default_width(300.0)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let fps = diagnostics
                    .get(&FrameTimeDiagnosticsPlugin::FPS)
                    .and_then(|fps| fps.smoothed());
                match fps {
                    Some(fps) => ui.label(format!("{:.0} fps", fps)),
                    None => ui.label("-- fps"),
                };
                ui.add_space(10.0);

                egui::CollapsingHeader::new("Mountain")
                    .default_open(true)
                    .show(ui, |ui| render_mountain_folder(ui, &mut config));

                egui::CollapsingHeader::new("Grass")
                    .default_open(true)
                    .show(ui, |ui| render_grass_folder(ui, &mut config, &mut orbit));

                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        save = true;
                    }
                    if ui.button("Reset").clicked() {
                        let props = std::mem::take(&mut config.props);
                        config = MeadowConfig {
                            props,
                            ..Default::default()
                        };
                    }
                });
                ui.label("F1 hides this panel");
            });
        });

    if config != settings.0 {
        settings.0 = config;
    }
    if orbit != debug_camera.enabled {
        debug_camera.enabled = orbit;
    }
    if save {
        settings.save();
    }
}

fn render_mountain_folder(ui: &mut egui::Ui, config: &mut MeadowConfig) {
    let mountain = &mut config.mountain;

    ui.label("Mouse Influence");
    ui.add(egui::Slider::new(&mut mountain.mouse_influence, 0.0..=0.12).step_by(0.005));

    ui.label("Scroll Influence");
    ui.add(egui::Slider::new(&mut mountain.scroll_influence, 0.0..=0.5).step_by(0.01));

    ui.label("Bloom Intensity");
    ui.add(egui::Slider::new(&mut mountain.bloom_intensity, 0.0..=1.0).step_by(0.01));

    ui.label("Snow Fall Speed");
    ui.add(egui::Slider::new(&mut mountain.snow_speed, 0.2..=2.0).step_by(0.05));
}

fn render_grass_folder(ui: &mut egui::Ui, config: &mut MeadowConfig, orbit: &mut bool) {
    let grass = &mut config.grass;

    ui.heading("Blades");
    ui.label("Turbulence Amplitude");
    ui.add(egui::Slider::new(&mut grass.turbulence_amplitude, 0.0..=2.0).step_by(0.01));

    ui.label("Turbulence Frequency");
    ui.add(egui::Slider::new(&mut grass.turbulence_frequency, 0.0..=5.0).step_by(0.01));

    ui.label("Damping");
    ui.add(egui::Slider::new(&mut grass.damping, 0.0..=2.0).step_by(0.01));

    ui.label("Wind Strength");
    ui.add(egui::Slider::new(&mut grass.wind_strength, 0.0..=5.0).step_by(0.01));

    ui.label("Glow Threshold");
    ui.add(egui::Slider::new(&mut grass.glow_threshold, 0.0..=10.0).step_by(0.01));

    ui.label("Glow Boost");
    ui.add(egui::Slider::new(&mut grass.glow_boost, 0.0..=2.0).step_by(0.01));

    ui.add_space(10.0);
    let wind = &mut config.wind;

    ui.heading("Wind Field");
    ui.label("Decay");
    ui.add(egui::Slider::new(&mut wind.decay, 0.9..=0.999).step_by(0.001));

    ui.label("Diffusion");
    ui.add(egui::Slider::new(&mut wind.diffusion, 0.0..=1.0).step_by(0.01));

    ui.label("Advection");
    ui.add(egui::Slider::new(&mut wind.advection, 0.0..=3.0).step_by(0.01));

    ui.label("Brush Radius");
    ui.add(egui::Slider::new(&mut wind.injection_radius, 0.005..=0.2).step_by(0.001));

    ui.label("Brush Strength");
    let strength_max = strength_slider_max(wind.injection_strength_max);
    ui.add(egui::Slider::new(&mut wind.injection_strength, MIN_STRENGTH..=strength_max).step_by(0.01));

    ui.add_space(10.0);
    ui.heading("Scroll");
    ui.label("Loops");
    ui.add(egui::Slider::new(&mut config.conveyor.loops, MIN_LOOPS..=MAX_LOOPS).step_by(0.5));

    ui.add_space(10.0);
    ui.checkbox(orbit, "Orbit camera (right drag, Shift + wheel)");
}

/// Upper end of the brush strength slider, narrowed by a configured max
fn strength_slider_max(configured: Option<f32>) -> f32 {
    configured
        .filter(|max| max.is_finite())
        .map_or(MAX_STRENGTH, |max| max.clamp(MIN_STRENGTH, MAX_STRENGTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, MAX_STRENGTH)]
    #[case(Some(1.0), 1.0)]
    #[case(Some(20.0), MAX_STRENGTH)]
    #[case(Some(0.0), MIN_STRENGTH)]
    #[case(Some(f32::NAN), MAX_STRENGTH)]
    fn test_strength_slider_max(#[case] configured: Option<f32>, #[case] expected: f32) {
        assert_eq!(strength_slider_max(configured), expected);
    }
}
