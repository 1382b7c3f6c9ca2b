use bevy::pbr::{MeshMaterial3d, NotShadowCaster, StandardMaterial};
use bevy::prelude::*;
use bevy::render::{
    mesh::{Indices, MeshAabb},
    render_resource::PrimitiveTopology,
};
use bevy::transform::TransformSystem;
use tracing::{debug, warn};

use trailcore::{RibbonGeometry, Sample, TrailRibbon, TrailSpec};

/// Ticks skipped after spawn before the ribbon becomes visible. Tracking
/// devices report garbage poses for the first few frames.
const WARMUP_TICKS: u32 = 4;

/// Minimum seconds between samples when `cap_fps` is set.
const CAP_INTERVAL: f32 = 1.0 / 90.0;

/// The two scene entities whose world positions feed the ribbon each tick.
#[derive(Debug, Clone, Copy)]
pub struct TrailAnchors {
    pub start: Entity,
    pub end: Entity,
}

/// Root of a movable reference frame. In relative mode the trail follows this
/// entity instead of smearing across world space when it translates.
#[derive(Component)]
pub struct PlaySpace;

/// Runtime tint override. Inserting or mutating this retints both the vertex
/// colors and the trail's own material instance.
#[derive(Component, Debug, Clone, Copy)]
pub struct TrailColor(pub Color);

/// One live trail: the generator plus everything the ticking system needs to
/// reach its scene inputs and its mesh output.
#[derive(Component)]
pub struct SaberTrail {
    ribbon: TrailRibbon,
    anchors: TrailAnchors,
    reference: Option<Entity>,
    mesh: Handle<Mesh>,
    mesh_entity: Entity,
    relative_mode: bool,
    cap_fps: bool,
    warmup_remaining: u32,
    cap_accumulator: f32,
    frames_processed: u64,
}

impl SaberTrail {
    pub fn ribbon(&self) -> &TrailRibbon {
        &self.ribbon
    }

    pub fn mesh(&self) -> &Handle<Mesh> {
        &self.mesh
    }

    pub fn mesh_entity(&self) -> Entity {
        self.mesh_entity
    }

    /// Ticks that actually sampled and rebuilt geometry (warm-up and
    /// fps-capped frames excluded).
    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }
}

pub struct TrailPlugin;

impl Plugin for TrailPlugin {
    fn build(&self, app: &mut App) {
        // After transform propagation so anchor GlobalTransforms reflect this
        // frame's motion, matching what the player saw the saber do.
        app.add_systems(
            PostUpdate,
            (apply_trail_colors, tick_trails)
                .chain()
                .after(TransformSystem::TransformPropagate),
        );
    }
}

/// Spawn a trail reading from `anchors`, returning the trail entity.
///
/// A rejected spec logs a warning and spawns nothing; the scene keeps running
/// without the cosmetic rather than crashing.
pub fn spawn_trail(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    spec: &TrailSpec,
    anchors: TrailAnchors,
    reference: Option<Entity>,
) -> Option<Entity> {
    let ribbon = match TrailRibbon::new(spec) {
        Ok(ribbon) => ribbon,
        Err(err) => {
            warn!(error = %err, "trail config rejected, no trail spawned");
            return None;
        }
    };

    let mesh = meshes.add(ribbon_mesh(ribbon.geometry()));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        double_sided: true,
        cull_mode: None,
        ..Default::default()
    });

    // Vertex positions are written in world space, so the mesh entity stays
    // at the identity and is not parented to the saber.
    let root = commands
        .spawn((Transform::IDENTITY, Visibility::default()))
        .id();
    let mesh_entity = commands
        .spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material),
            Transform::IDENTITY,
            Visibility::Hidden,
            NotShadowCaster,
            ChildOf(root),
        ))
        .id();

    commands.entity(root).insert(SaberTrail {
        relative_mode: spec.relative_mode,
        cap_fps: spec.cap_fps,
        ribbon,
        anchors,
        reference,
        mesh,
        mesh_entity,
        warmup_remaining: WARMUP_TICKS,
        cap_accumulator: 0.0,
        frames_processed: 0,
    });
    debug!(?anchors, "trail spawned");
    Some(root)
}

/// Despawn a trail and its mesh child. The `Mesh` asset is released when the
/// last strong handle drops with the `SaberTrail` component.
pub fn despawn_trail(commands: &mut Commands, trail: Entity) {
    commands.entity(trail).despawn();
}

fn ribbon_mesh(geometry: &RibbonGeometry) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, Default::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, geometry.positions().to_vec());
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, geometry.uvs().to_vec());
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, geometry.colors().to_vec());
    mesh.insert_indices(Indices::U32(geometry.indices().to_vec()));
    mesh
}

pub fn tick_trails(
    mut commands: Commands,
    time: Res<Time>,
    mut meshes: ResMut<Assets<Mesh>>,
    transforms: Query<&GlobalTransform>,
    mut trails: Query<&mut SaberTrail>,
    mut visibilities: Query<&mut Visibility>,
) {
    for mut trail in &mut trails {
        if trail.cap_fps {
            trail.cap_accumulator += time.delta_secs();
            if trail.cap_accumulator < CAP_INTERVAL {
                continue;
            }
            trail.cap_accumulator = 0.0;
        }

        let Ok(start) = transforms.get(trail.anchors.start) else {
            continue;
        };
        let Ok(end) = transforms.get(trail.anchors.end) else {
            continue;
        };
        let origin = if trail.relative_mode {
            trail
                .reference
                .and_then(|entity| transforms.get(entity).ok())
                .map(|frame| frame.translation())
                .unwrap_or(Vec3::ZERO)
        } else {
            Vec3::ZERO
        };

        let sample = Sample::new(start.translation(), end.translation());
        let stored = sample.offset_by(-origin);
        let width = start.translation().distance(end.translation());

        if trail.warmup_remaining > 0 {
            trail.warmup_remaining -= 1;
            if trail.warmup_remaining == 0 {
                trail.ribbon.prime(stored);
                if let Ok(mut visibility) = visibilities.get_mut(trail.mesh_entity) {
                    *visibility = Visibility::Inherited;
                }
            }
            continue;
        }

        trail.ribbon.tick(stored, width, origin);
        trail.frames_processed += 1;

        if let Some(mesh) = meshes.get_mut(&trail.mesh) {
            let geometry = trail.ribbon.geometry();
            mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, geometry.positions().to_vec());
            mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, geometry.uvs().to_vec());
            mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, geometry.colors().to_vec());
            // Culling bounds track the rewritten positions; render-world
            // extraction does not recompute them for us.
            if let Some(aabb) = mesh.compute_aabb() {
                commands.entity(trail.mesh_entity).insert(aabb);
            }
        }
    }
}

pub fn apply_trail_colors(
    mut materials: ResMut<Assets<StandardMaterial>>,
    material_handles: Query<&MeshMaterial3d<StandardMaterial>>,
    mut trails: Query<(&mut SaberTrail, &TrailColor), Changed<TrailColor>>,
) {
    for (mut trail, color) in &mut trails {
        let linear = color.0.to_linear();
        trail
            .ribbon
            .set_color(Vec4::from_array(linear.to_f32_array()));
        if let Ok(handle) = material_handles.get(trail.mesh_entity) {
            if let Some(material) = materials.get_mut(&handle.0) {
                material.base_color = color.0;
            }
        }
    }
}
