use crate::grass::components::{Prop, PropPending};
use crate::grass::logic::prop_rotation;
use crate::grass::resources::{PropMaterial, WindSim};
use crate::settings::Settings;
use bevy::asset::LoadState;
use bevy::prelude::*;

const PROP_COLOR: Color = Color::srgb_u8(0xbb, 0xbb, 0xbb);

/// Soft key light over the far side of the ground
const PROP_LIGHT_POSITION: Vec3 = Vec3::new(0.0, 30.0, -20.0);

pub fn spawn_props(
    mut commands: Commands,
    settings: Res<Settings>,
    asset_server: Res<AssetServer>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(PropMaterial(materials.add(StandardMaterial {
        base_color: PROP_COLOR,
        perceptual_roughness: 1.0,
        ..default()
    })));

    if settings.props.is_empty() {
        return;
    }

    commands.spawn((
        PointLight {
            intensity: 4_000_000.0,
            range: 120.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(PROP_LIGHT_POSITION),
    ));

    for spec in &settings.props {
        let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(spec.model.clone()));
        for instance in &spec.instances {
            let location = Vec3::from_array(instance.location);
            let rotation = prop_rotation(instance);
            commands.spawn((
                SceneRoot(scene.clone()),
                Transform::from_translation(location)
                    .with_rotation(Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z))
                    .with_scale(Vec3::from_array(instance.scale)),
                Prop { base_z: location.z },
                PropPending {
                    model: spec.model.clone(),
                    gltf: asset_server.load(spec.model.clone()),
                },
            ));
        }
        info!("Placing {} x {}", spec.instances.len(), spec.model);
    }
}

/// Drop props whose model failed to load
pub fn watch_props(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    pending: Query<(Entity, &PropPending)>,
) {
    for (entity, prop) in &pending {
        match asset_server.load_state(&prop.gltf) {
            LoadState::Loaded => {
                commands.entity(entity).remove::<PropPending>();
            }
            LoadState::Failed(e) => {
                warn!("Prop model {} failed to load: {}", prop.model, e);
                commands.entity(entity).despawn();
            }
            _ => {}
        }
    }
}

/// Props ride the conveyor without wrapping
pub fn move_props(sim: Res<WindSim>, mut props: Query<(&Prop, &mut Transform)>) {
    let extent_z = sim.ground.extent.y;
    for (prop, mut transform) in &mut props {
        let z = sim.conveyor.prop_z(prop.base_z, extent_z);
        if transform.translation.z != z {
            transform.translation.z = z;
        }
    }
}

/// Give every mesh spawned under a prop the shared prop material
pub fn restyle_props(
    prop_material: Option<Res<PropMaterial>>,
    mut meshes: Query<(Entity, &mut MeshMaterial3d<StandardMaterial>), Added<MeshMaterial3d<StandardMaterial>>>,
    parents: Query<&ChildOf>,
    props: Query<(), With<Prop>>,
) {
    let Some(prop_material) = prop_material else {
        return;
    };
    for (entity, mut material) in &mut meshes {
        if parents.iter_ancestors(entity).any(|ancestor| props.contains(ancestor)) {
            material.0 = prop_material.0.clone();
        }
    }
}
