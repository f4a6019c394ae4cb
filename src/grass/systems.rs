use crate::core::camera::OrbitState;
use crate::core::camera::components::OrbitCamera;
use crate::core::page::components::SectionCamera;
use crate::core::page::events::SceneTransition;
use crate::core::page::resources::{Page, SceneLifecycles};
use crate::grass::components::{GrassBlades, GrassCamera, Ground};
use crate::grass::logic::*;
use crate::grass::material::GrassMaterial;
use crate::grass::resources::{BladeLayoutKey, WindSim};
use crate::settings::Settings;
use bevy::asset::RenderAssetUsages;
use bevy::camera::visibility::NoFrustumCulling;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::light::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::render::view::Hdr;
use bevy::window::{CursorLeft, CursorMoved, PrimaryWindow, WindowFocused};
use bevy_grass::BladeMeshBuilder;
use meadowsim::blade::{BladeField, scatter_layout};
use meadowsim::config::{CameraConfig, MeadowConfig};
use meadowsim::conveyor::ConveyorMapper;
use meadowsim::lifecycle::Transition;
use meadowsim::page::Section;
use meadowsim::pointer::{Activation, CameraRay, GroundPlane, PointerEvent, PointerTracker};
use meadowsim::solver::SolverParamsUpdate;
use meadowsim::{VectorFieldSolver, VelocityField};

const GROUND_COLOR: Color = Color::srgb_u8(0x11, 0x11, 0x11);

pub fn spawn_grass_scene(
    mut commands: Commands,
    settings: Res<Settings>,
    window: Single<&Window, With<PrimaryWindow>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut images: ResMut<Assets<Image>>,
    mut grass_materials: ResMut<Assets<GrassMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let solver = match VectorFieldSolver::new(settings.wind.resolution, settings.wind.solver_params()) {
        Ok(solver) => solver,
        Err(e) => {
            error!("Grass scene disabled: {}", e);
            return;
        }
    };

    let extent = settings.grass.plane_extent(window.width() / window.height());
    let conveyor = ConveyorMapper::progress(settings.conveyor.loops);
    let layout = BladeLayoutKey {
        count: settings.grass.count,
        loops: conveyor.loops().unwrap_or(settings.conveyor.loops),
        seed: settings.grass.seed.unwrap_or_else(rand::random),
        shape: blade_shape(&settings.grass),
    };
    let blades = build_blades(&layout);

    let field_image = images.add(field_image(solver.current_field()));
    let material = grass_materials.add(GrassMaterial {
        uniforms: blade_uniforms(&settings.grass, extent, 0.0, 0.0).into(),
        wind_field: field_image.clone(),
    });

    commands.spawn((
        Mesh3d(meshes.add(blade_mesh(&blades, &layout))),
        MeshMaterial3d(material.clone()),
        Transform::IDENTITY,
        NoFrustumCulling,
        NotShadowCaster,
        NotShadowReceiver,
        GrassBlades,
    ));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(1.0, 1.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: GROUND_COLOR,
            unlit: true,
            ..default()
        })),
        Transform::from_scale(Vec3::new(extent.x, 1.0, extent.y)),
        NotShadowCaster,
        Ground,
    ));

    let orbit = OrbitState::from_look(settings.camera.position(), settings.camera.look_at());
    commands.spawn((
        Camera3d::default(),
        Camera {
            order: 1,
            is_active: false,
            ..default()
        },
        Hdr,
        Tonemapping::None,
        grass_projection(&settings.camera),
        Transform::from_translation(orbit.position()).with_rotation(orbit.rotation()),
        OrbitCamera { orbit },
        SectionCamera(Section::Grass),
        GrassCamera,
    ));

    info!(
        "Grass scene ready: {} blades, {}x{} wind field, seed {}",
        blades.len(),
        solver.resolution(),
        solver.resolution(),
        layout.seed
    );

    commands.insert_resource(WindSim {
        solver,
        tracker: PointerTracker::new(Activation::Hover),
        conveyor,
        blades,
        ground: GroundPlane::new(extent),
        layout,
        field_image,
        material,
    });
}

/// Turn window input into tracker events for the grass viewport
pub fn track_pointer(
    mut cursor_moved: MessageReader<CursorMoved>,
    mut cursor_left: MessageReader<CursorLeft>,
    mut focus: MessageReader<WindowFocused>,
    mut touches: MessageReader<TouchInput>,
    page: Res<Page>,
    mut sim: ResMut<WindSim>,
) {
    let viewport = page.layout.visible_rect(Section::Grass);

    let mut touched = false;
    for ev in touches.read() {
        touched = true;
        if ev.phase == TouchPhase::Started {
            sim.tracker.set_activation(Activation::Touch);
        }
        if let Some(event) = touch_event(ev.phase, ev.position, viewport) {
            sim.tracker.handle(event);
        }
    }
    for ev in cursor_moved.read() {
        if !touched && sim.tracker.activation() == Activation::Touch {
            sim.tracker.set_activation(Activation::Hover);
        }
        sim.tracker.handle(cursor_event(ev.position, viewport));
    }
    if cursor_left.read().count() > 0 {
        sim.tracker.handle(PointerEvent::Left);
    }
    if focus.read().any(|ev| !ev.focused) {
        sim.tracker.handle(PointerEvent::FocusLost);
    }
}

pub fn handle_grass_transitions(mut transitions: MessageReader<SceneTransition>, mut sim: ResMut<WindSim>) {
    for ev in transitions.read() {
        if ev.section == Section::Grass && ev.transition == Transition::Stopped {
            sim.tracker.handle(PointerEvent::Left);
        }
    }
}

/// Push edited settings into the solver, the camera and the blade layout
pub fn apply_grass_settings(
    settings: Res<Settings>,
    mut sim: ResMut<WindSim>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut blades: Query<&mut Mesh3d, With<GrassBlades>>,
    mut cameras: Query<&mut Projection, With<GrassCamera>>,
) {
    if !settings.is_changed() {
        return;
    }

    sim.solver.set_params(wind_update(&settings));

    for mut projection in &mut cameras {
        *projection = grass_projection(&settings.camera);
    }

    sim.conveyor.set_loops(settings.conveyor.loops);
    let layout = BladeLayoutKey {
        count: settings.grass.count,
        loops: sim.conveyor.loops().unwrap_or(settings.conveyor.loops),
        seed: settings.grass.seed.unwrap_or(sim.layout.seed),
        shape: blade_shape(&settings.grass),
    };
    if layout == sim.layout {
        return;
    }

    let field = build_blades(&layout);
    let mesh = meshes.add(blade_mesh(&field, &layout));
    for mut mesh3d in &mut blades {
        mesh3d.0 = mesh.clone();
    }
    info!("Rebuilt {} blades over {} loops", field.len(), layout.loops);

    let offset = sim.conveyor.offset_norm();
    sim.blades = field;
    sim.blades.update_scroll(offset);
    sim.layout = layout;
}

/// Stretch the ground with the window aspect
pub fn resize_ground(
    window: Single<&Window, With<PrimaryWindow>>,
    settings: Res<Settings>,
    mut sim: ResMut<WindSim>,
    mut ground: Query<&mut Transform, With<Ground>>,
) {
    let extent = settings.grass.plane_extent(window.width() / window.height());
    if extent == sim.ground.extent {
        return;
    }
    sim.ground = GroundPlane::new(extent);
    for mut transform in &mut ground {
        transform.scale = Vec3::new(extent.x, 1.0, extent.y);
    }
}

pub fn follow_conveyor(page: Res<Page>, mut sim: ResMut<WindSim>) {
    let offset = sim.conveyor.map_scroll(page.layout.scroll(), page.layout.scrollable());
    if offset != sim.blades.offset_norm() {
        sim.blades.update_scroll(offset);
    }
}

pub fn step_wind(
    time: Res<Time>,
    mut lifecycles: ResMut<SceneLifecycles>,
    mut sim: ResMut<WindSim>,
    cameras: Query<(&Camera, &GlobalTransform), With<GrassCamera>>,
) {
    let Some(dt) = lifecycles.grass.tick(time.delta_secs()) else {
        return;
    };

    let sim = &mut *sim;
    let brush = match cameras.single() {
        Ok((camera, global)) => {
            let ray = CameraRay::new(Mat4::from(global.affine()), camera.clip_from_view());
            sim.tracker.sample(&ray, &sim.ground)
        }
        Err(_) => None,
    };

    sim.solver.step(brush, dt);
}

pub fn upload_wind_field(sim: Res<WindSim>, mut images: ResMut<Assets<Image>>) {
    let Some(image) = images.get_mut(&sim.field_image) else {
        return;
    };
    image.data = Some(field_bytes(sim.solver.current_field()));
}

pub fn update_grass_material(
    settings: Res<Settings>,
    lifecycles: Res<SceneLifecycles>,
    sim: Res<WindSim>,
    mut materials: ResMut<Assets<GrassMaterial>>,
) {
    let Some(material) = materials.get_mut(&sim.material) else {
        return;
    };
    material.uniforms = blade_uniforms(
        &settings.grass,
        sim.ground.extent,
        sim.blades.offset_norm(),
        lifecycles.grass.time(),
    )
    .into();
}

fn wind_update(config: &MeadowConfig) -> SolverParamsUpdate {
    let wind = &config.wind;
    SolverParamsUpdate {
        decay: Some(wind.decay),
        diffusion: Some(wind.diffusion),
        advection: Some(wind.advection),
        injection_radius: Some(wind.injection_radius),
        injection_strength: Some(wind.injection_strength),
        injection_strength_max: Some(wind.injection_strength_max),
    }
}

fn grass_projection(camera: &CameraConfig) -> Projection {
    Projection::Perspective(PerspectiveProjection {
        fov: camera.fov.to_radians(),
        near: camera.near,
        far: camera.far,
        ..default()
    })
}

fn build_blades(layout: &BladeLayoutKey) -> BladeField {
    BladeField::build(layout.count, scatter_layout(layout.loops, layout.seed))
}

fn blade_mesh(field: &BladeField, layout: &BladeLayoutKey) -> Mesh {
    BladeMeshBuilder::new(layout.shape)
        .with_instances(field.instances().iter().map(|blade| blade.to_array()))
        .build()
}

fn field_image(field: &VelocityField) -> Image {
    let size = field.resolution() as u32;
    Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        field_bytes(field),
        TextureFormat::Rg32Float,
        RenderAssetUsages::default(),
    )
}
