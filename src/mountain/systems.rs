use crate::core::page::components::SectionCamera;
use crate::core::page::resources::{Page, SceneLifecycles};
use crate::helpers::mesh::gradient_quad;
use crate::loading::MountainAssets;
use crate::mountain::components::*;
use crate::mountain::logic::{parallax_params, window_ndc};
use crate::mountain::resources::{MountainMaterial, Vignette};
use crate::settings::Settings;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::light::NotShadowCaster;
use bevy::post_process::bloom::Bloom;
use bevy::prelude::*;
use bevy::render::render_resource::TextureFormat;
use bevy::render::view::Hdr;
use bevy::window::{CursorMoved, PrimaryWindow};
use meadowsim::page::Section;
use meadowsim::parallax::Parallax;
use meadowsim::snow::SnowField;
use meadowsim::video_light::average_frame_color;

/// The vignette lives far from the grass so neither camera sees the other
pub const MOUNTAIN_ORIGIN: Vec3 = Vec3::new(10_000.0, 0.0, 0.0);
const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 0.65);
const CAMERA_FOV_DEGREES: f32 = 30.0;

const SCREEN_SIZE: Vec2 = Vec2::new(0.192, 0.108);
const SCREEN_LIGHT_INTENSITY: f32 = 12_000.0;

const BACKDROP_DISTANCE: f32 = 1_000.0;
const BACKDROP_TOP: Color = Color::BLACK;
const BACKDROP_BOTTOM: Color = Color::srgb_u8(0x77, 0x77, 0x77);

const MOUNTAIN_COLOR: Color = Color::srgb_u8(0x22, 0x22, 0x22);
const FLAKE_RADIUS: f32 = 0.002;
const FLAKE_ALPHA: f32 = 0.3;

pub fn spawn_mountain_scene(
    mut commands: Commands,
    settings: Res<Settings>,
    assets: Option<Res<MountainAssets>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mountain = &settings.mountain;
    let parallax = Parallax::new(CAMERA_OFFSET, parallax_params(mountain));

    let backdrop_height = 2.0 * BACKDROP_DISTANCE * (CAMERA_FOV_DEGREES.to_radians() * 0.5).tan() * 1.2;
    let backdrop = commands
        .spawn((
            Mesh3d(meshes.add(gradient_quad(BACKDROP_TOP.into(), BACKDROP_BOTTOM.into()))),
            MeshMaterial3d(materials.add(StandardMaterial {
                unlit: true,
                ..default()
            })),
            Transform::from_xyz(0.0, 0.0, -BACKDROP_DISTANCE)
                .with_scale(Vec3::new(backdrop_height * 4.0, backdrop_height, 1.0)),
            NotShadowCaster,
        ))
        .id();

    commands
        .spawn((
            Camera3d::default(),
            Camera {
                order: 0,
                is_active: false,
                ..default()
            },
            Hdr,
            Tonemapping::AcesFitted,
            Bloom {
                intensity: mountain.bloom_intensity,
                ..Bloom::NATURAL
            },
            Projection::Perspective(PerspectiveProjection {
                fov: CAMERA_FOV_DEGREES.to_radians(),
                near: 0.1,
                far: 2_000.0,
                ..default()
            }),
            Transform::from_translation(MOUNTAIN_ORIGIN + parallax.position()).looking_at(MOUNTAIN_ORIGIN, Vec3::Y),
            SectionCamera(Section::Hero),
            MountainCamera,
        ))
        .add_child(backdrop);

    let screen_material = match &assets {
        Some(assets) => StandardMaterial {
            base_color_texture: Some(assets.screen_frame.clone()),
            unlit: true,
            ..default()
        },
        None => StandardMaterial {
            unlit: true,
            ..default()
        },
    };
    commands
        .spawn((
            Mesh3d(meshes.add(Rectangle::from_size(SCREEN_SIZE))),
            MeshMaterial3d(materials.add(screen_material)),
            Transform::from_translation(MOUNTAIN_ORIGIN),
            NotShadowCaster,
        ))
        .with_child((
            SpotLight {
                intensity: SCREEN_LIGHT_INTENSITY,
                range: 5.0,
                outer_angle: 1.2,
                inner_angle: 0.6,
                shadows_enabled: true,
                ..default()
            },
            // Points down -Z, back onto the mountain and away from the viewer
            Transform::default(),
            ScreenLight,
        ));

    match &assets {
        Some(assets) => {
            commands.insert_resource(MountainMaterial(materials.add(StandardMaterial {
                base_color: MOUNTAIN_COLOR,
                perceptual_roughness: 0.5,
                metallic: 0.85,
                metallic_roughness_texture: Some(assets.mountain_texture.clone()),
                double_sided: true,
                cull_mode: None,
                ..default()
            })));
            commands.spawn((
                SceneRoot(assets.mountain.clone()),
                Transform::from_translation(MOUNTAIN_ORIGIN),
                MountainModel,
            ));
        }
        None => warn!("Mountain assets missing, the vignette runs without its model"),
    }

    let snow = SnowField::new(mountain.snow_count, rand::random());
    let flake_mesh = meshes.add(Sphere::new(FLAKE_RADIUS).mesh().uv(8, 6));
    let flake_material = materials.add(StandardMaterial {
        base_color: Color::WHITE.with_alpha(FLAKE_ALPHA),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    commands
        .spawn((Transform::from_translation(MOUNTAIN_ORIGIN), Visibility::default()))
        .with_children(|parent| {
            for (i, flake) in snow.flakes().iter().enumerate() {
                parent.spawn((
                    Mesh3d(flake_mesh.clone()),
                    MeshMaterial3d(flake_material.clone()),
                    Transform::from_translation(flake.position),
                    NotShadowCaster,
                    Snowflake(i),
                ));
            }
        });

    info!("Mountain vignette ready with {} snow flakes", snow.flakes().len());
    commands.insert_resource(Vignette { parallax, snow });
}

/// Any cursor motion over the window steers the parallax
pub fn track_parallax_pointer(
    mut cursor_moved: MessageReader<CursorMoved>,
    window: Single<&Window, With<PrimaryWindow>>,
    mut vignette: ResMut<Vignette>,
) {
    let Some(ev) = cursor_moved.read().last() else {
        return;
    };
    let size = Vec2::new(window.width(), window.height());
    vignette.parallax.set_mouse(window_ndc(ev.position, size));
}

pub fn follow_hero_scroll(page: Res<Page>, mut vignette: ResMut<Vignette>) {
    if page.is_changed() {
        vignette.parallax.set_hero_progress(page.layout.hero_progress());
    }
}

pub fn apply_mountain_settings(
    settings: Res<Settings>,
    mut vignette: ResMut<Vignette>,
    mut cameras: Query<&mut Bloom, With<MountainCamera>>,
) {
    if !settings.is_changed() {
        return;
    }
    vignette.parallax.set_params(parallax_params(&settings.mountain));
    for mut bloom in &mut cameras {
        if bloom.intensity != settings.mountain.bloom_intensity {
            bloom.intensity = settings.mountain.bloom_intensity;
        }
    }
}

pub fn tick_hero(time: Res<Time>, mut lifecycles: ResMut<SceneLifecycles>) {
    lifecycles.hero.tick(time.delta_secs());
}

pub fn animate_camera(
    lifecycles: Res<SceneLifecycles>,
    mut vignette: ResMut<Vignette>,
    mut cameras: Query<&mut Transform, With<MountainCamera>>,
) {
    let offset = vignette.parallax.update(lifecycles.hero.dt());
    for mut transform in &mut cameras {
        *transform = Transform::from_translation(MOUNTAIN_ORIGIN + offset).looking_at(MOUNTAIN_ORIGIN, Vec3::Y);
    }
}

pub fn animate_snow(
    settings: Res<Settings>,
    lifecycles: Res<SceneLifecycles>,
    mut vignette: ResMut<Vignette>,
    mut flakes: Query<(&Snowflake, &mut Transform)>,
) {
    let hero = &lifecycles.hero;
    vignette.snow.update(hero.dt(), hero.time(), settings.mountain.snow_speed);

    let positions = vignette.snow.flakes();
    for (flake, mut transform) in &mut flakes {
        if let Some(f) = positions.get(flake.0) {
            transform.translation = f.position;
        }
    }
}

/// Colour the screen light with the average colour of the showreel still.
/// Runs only when that image loads or changes, the light does not animate.
pub fn update_screen_light(
    mut events: MessageReader<AssetEvent<Image>>,
    assets: Option<Res<MountainAssets>>,
    images: Res<Assets<Image>>,
    mut lights: Query<&mut SpotLight, With<ScreenLight>>,
) {
    let Some(assets) = assets else {
        events.clear();
        return;
    };
    let frame_id = assets.screen_frame.id();
    let changed = events.read().any(|ev| match ev {
        AssetEvent::LoadedWithDependencies { id } | AssetEvent::Modified { id } => *id == frame_id,
        _ => false,
    });
    if !changed && !assets.is_added() {
        return;
    }

    let Some(image) = images.get(frame_id) else {
        return;
    };
    if !matches!(
        image.texture_descriptor.format,
        TextureFormat::Rgba8UnormSrgb | TextureFormat::Rgba8Unorm
    ) {
        warn!("Screen frame is {:?}, expected RGBA8", image.texture_descriptor.format);
        return;
    }
    let Some(color) = image
        .data
        .as_deref()
        .and_then(|data| average_frame_color(data, image.width(), image.height()))
    else {
        return;
    };

    for mut light in &mut lights {
        light.color = Color::linear_rgb(color.x, color.y, color.z);
    }
    debug!("Screen light colour {:?}", color);
}

/// Swap the materials of the loaded mountain for the vignette's own
pub fn restyle_mountain(
    mountain_material: Option<Res<MountainMaterial>>,
    mut meshes: Query<(Entity, &mut MeshMaterial3d<StandardMaterial>), Added<MeshMaterial3d<StandardMaterial>>>,
    parents: Query<&ChildOf>,
    models: Query<(), With<MountainModel>>,
) {
    let Some(mountain_material) = mountain_material else {
        return;
    };
    for (entity, mut material) in &mut meshes {
        if parents.iter_ancestors(entity).any(|ancestor| models.contains(ancestor)) {
            material.0 = mountain_material.0.clone();
        }
    }
}
