use crate::core::page::components::SectionCamera;
use crate::core::page::events::SceneTransition;
use crate::core::page::logic::{physical_viewport, wheel_scroll_pixels};
use crate::core::page::resources::{Page, SceneLifecycles};
use crate::settings::Settings;
use bevy::camera::{ClearColorConfig, Viewport};
use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use meadowsim::lifecycle::is_section_visible;
use meadowsim::page::{PageLayout, Section};

pub fn setup_page(mut commands: Commands, settings: Res<Settings>) {
    let page = &settings.page;
    commands.insert_resource(Page {
        layout: PageLayout::new(page.hero_height, page.grass_height),
    });
}

pub fn sync_page_viewport(window: Single<&Window, With<PrimaryWindow>>, mut page: ResMut<Page>) {
    let size = Vec2::new(window.width(), window.height());
    if page.layout.viewport() != size {
        page.layout.set_viewport(size);
    }
}

/// Wheel and keyboard scrolling. Shift+wheel is left to the debug camera.
pub fn scroll_page(
    mut wheel: MessageReader<MouseWheel>,
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    mut page: ResMut<Page>,
) {
    let shift = keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    let line = settings.page.wheel_line_pixels;
    let mut delta = 0.0;

    for ev in wheel.read() {
        if !shift {
            delta += wheel_scroll_pixels(ev.unit, ev.y, line);
        }
    }

    let viewport = page.layout.viewport().y;
    if keys.just_pressed(KeyCode::PageDown) || keys.just_pressed(KeyCode::Space) {
        delta += viewport * 0.9;
    }
    if keys.just_pressed(KeyCode::PageUp) {
        delta -= viewport * 0.9;
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        delta += line * 2.0;
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        delta -= line * 2.0;
    }

    if keys.just_pressed(KeyCode::Home) {
        page.layout.set_scroll(0.0);
    } else if keys.just_pressed(KeyCode::End) {
        let end = page.layout.scrollable();
        page.layout.set_scroll(end);
    } else if delta != 0.0 {
        page.layout.scroll_by(delta);
    }
}

/// Fit every section camera to its on-screen rectangle. The first active
/// camera clears the window, later ones draw on top of it.
pub fn update_section_cameras(
    window: Single<&Window, With<PrimaryWindow>>,
    page: Res<Page>,
    mut cameras: Query<(&SectionCamera, &mut Camera)>,
) {
    let scale = window.scale_factor();
    let physical = window.physical_size();

    let mut ordered: Vec<_> = cameras.iter_mut().collect();
    ordered.sort_by_key(|(_, camera)| camera.order);

    let mut cleared = false;
    for (section, mut camera) in ordered {
        let viewport = page
            .layout
            .visible_rect(section.0)
            .and_then(|rect| physical_viewport(rect, scale, physical));

        match viewport {
            Some((physical_position, physical_size)) => {
                camera.is_active = true;
                camera.viewport = Some(Viewport {
                    physical_position,
                    physical_size,
                    ..default()
                });
                camera.clear_color = if cleared {
                    ClearColorConfig::None
                } else {
                    ClearColorConfig::Default
                };
                cleared = true;
            }
            None => camera.is_active = false,
        }
    }
}

pub fn update_scene_lifecycles(
    page: Res<Page>,
    mut lifecycles: ResMut<SceneLifecycles>,
    mut transitions: MessageWriter<SceneTransition>,
) {
    let viewport_height = page.layout.viewport().y;
    for section in [Section::Hero, Section::Grass] {
        let visible = is_section_visible(page.layout.section_rect(section), viewport_height);
        if let Some(transition) = lifecycles.get_mut(section).update_visibility(visible) {
            info!("{:?} scene {:?}", section, transition);
            transitions.write(SceneTransition { section, transition });
        }
    }
}

pub fn hero_running(lifecycles: Res<SceneLifecycles>) -> bool {
    lifecycles.hero.is_running()
}

pub fn grass_running(lifecycles: Res<SceneLifecycles>) -> bool {
    lifecycles.grass.is_running()
}
