use bevy::math::primitives::Cuboid;
use bevy::pbr::{MeshMaterial3d, StandardMaterial};
use bevy::prelude::*;

use crate::config::ViewerConfig;
use crate::trail::{spawn_trail, PlaySpace, TrailAnchors};

/// Demo saber driven through figure-eight swings so the trail has something
/// to chase.
#[derive(Component)]
pub struct Saber;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_scene)
            .add_systems(Update, (swing_saber, drift_play_space));
    }
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<ViewerConfig>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 1.6, 3.5).looking_at(Vec3::new(0.0, 1.2, 0.0), Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..Default::default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.9, 0.4, 0.0)),
    ));

    let play_space = commands
        .spawn((PlaySpace, Transform::IDENTITY, Visibility::default()))
        .id();

    let saber = commands
        .spawn((
            Saber,
            Transform::from_xyz(0.0, 1.2, 0.0),
            Visibility::default(),
            ChildOf(play_space),
        ))
        .id();

    let blade_mesh = meshes.add(Mesh::from(Cuboid::new(0.02, 1.0, 0.02)));
    let blade_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.85, 0.9, 1.0),
        emissive: LinearRgba::new(0.4, 0.5, 1.0, 1.0),
        ..Default::default()
    });
    commands.spawn((
        Mesh3d(blade_mesh),
        MeshMaterial3d(blade_material),
        Transform::from_xyz(0.0, 0.55, 0.0),
        ChildOf(saber),
    ));

    // The ribbon spans the blade: one anchor near the hilt, one at the tip.
    let start = commands
        .spawn((Transform::from_xyz(0.0, 0.1, 0.0), ChildOf(saber)))
        .id();
    let end = commands
        .spawn((Transform::from_xyz(0.0, 1.05, 0.0), ChildOf(saber)))
        .id();

    let spec = &config.trail;
    let reference = spec.relative_mode.then_some(play_space);
    spawn_trail(
        &mut commands,
        &mut meshes,
        &mut materials,
        spec,
        TrailAnchors { start, end },
        reference,
    );
}

fn swing_saber(time: Res<Time>, mut sabers: Query<&mut Transform, With<Saber>>) {
    let t = time.elapsed_secs();
    for mut transform in &mut sabers {
        let yaw = (t * 1.7).sin() * 1.2;
        let pitch = (t * 2.3).cos() * 0.6;
        transform.rotation = Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0);
    }
}

/// Slowly slides the play space sideways so relative mode has a moving frame
/// to cancel. A no-op unless the config asks for relative mode.
fn drift_play_space(
    time: Res<Time>,
    config: Res<ViewerConfig>,
    mut spaces: Query<&mut Transform, With<PlaySpace>>,
) {
    if !config.trail.relative_mode {
        return;
    }
    let t = time.elapsed_secs();
    for mut transform in &mut spaces {
        transform.translation.x = (t * 0.25).sin() * 1.5;
    }
}
