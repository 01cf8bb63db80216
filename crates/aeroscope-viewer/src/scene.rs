//! Mirrors the composer's scene description into Bevy entities.
//!
//! The whole view is respawned when the composer's scene revision changes.
//! Hover and marker emphasis are applied in place every time the composer
//! changes.

use aeroscope_scene::geometry::hovered_material;
use aeroscope_scene::{HotspotTarget, Material, Primitive};
use bevy::prelude::*;

use crate::mesh::shape_mesh;
use crate::state::Composer;

/// Scene background.
const BACKGROUND: Color = Color::srgb(0.02, 0.03, 0.06);

/// Spawns and styles scene geometry.
pub struct SceneSyncPlugin;

impl Plugin for SceneSyncPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(BACKGROUND))
            .init_resource::<SpawnedRevision>()
            .add_systems(Startup, setup_lights)
            .add_systems(Update, (sync_scene, style_scene).chain());
    }
}

/// One primitive of the current scene.
#[derive(Component)]
pub struct SceneEntity {
    /// Index into the scene's primitive list.
    index: usize,
    /// Material as built, before hover styling.
    base: Material,
    /// Transform as built, before emphasis.
    base_transform: Transform,
}

/// Scene revision currently spawned.
#[derive(Resource, Default)]
struct SpawnedRevision(Option<u64>);

fn setup_lights(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            color: Color::WHITE,
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        PointLight {
            color: Color::srgb(0.6, 0.8, 1.0),
            intensity: 400_000.0,
            range: 100.0,
            ..default()
        },
        Transform::from_xyz(-10.0, 10.0, -10.0),
    ));
}

fn sync_scene(
    mut commands: Commands,
    composer: Res<Composer>,
    mut spawned: ResMut<SpawnedRevision>,
    existing: Query<Entity, With<SceneEntity>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let revision = composer.revision();
    if spawned.0 == Some(revision) {
        return;
    }

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let scene = composer.scene();
    for (index, primitive) in scene.primitives.iter().enumerate() {
        let mesh = meshes.add(shape_mesh(&primitive.shape, primitive.material.wireframe));
        let material = materials.add(standard_material(&primitive.material, is_mirrored(primitive)));
        let transform = Transform::from_matrix(Mat4::from(primitive.transform));
        commands.spawn((
            Name::new(primitive.name.clone()),
            SceneEntity {
                index,
                base: primitive.material,
                base_transform: transform,
            },
            Mesh3d(mesh),
            MeshMaterial3d(material),
            transform,
        ));
    }

    tracing::debug!(
        revision,
        mode = ?composer.mode(),
        primitives = scene.primitives.len(),
        "scene respawned"
    );
    spawned.0 = Some(revision);
}

/// Apply engine hover styling and marker emphasis.
fn style_scene(
    composer: Res<Composer>,
    spawned: Res<SpawnedRevision>,
    mut query: Query<(&SceneEntity, &MeshMaterial3d<StandardMaterial>, &mut Transform)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !composer.is_changed() && !spawned.is_changed() {
        return;
    }

    let scene = composer.scene();
    for (entity, material, mut transform) in &mut query {
        let Some(primitive) = scene.primitives.get(entity.index) else {
            continue;
        };

        match &primitive.owner {
            Some(HotspotTarget::Engine { label }) => {
                let hovered = composer.hovered_engine() == Some(label.as_str());
                let styled = if hovered {
                    hovered_material(&entity.base)
                } else {
                    entity.base
                };
                if let Some(mut target) = materials.get_mut(&material.0) {
                    apply_material(&mut target, &styled);
                }
            }
            Some(owner @ HotspotTarget::Marker { id }) => {
                let scale = composer.markers().emphasis(id).unwrap_or(1.0);
                let pivot = scene.pivot(owner).unwrap_or(Vec3::ZERO);
                *transform = emphasized(entity.base_transform, pivot, scale);
            }
            _ => {}
        }
    }
}

/// Scale `transform` by `scale` about `pivot`.
fn emphasized(transform: Transform, pivot: Vec3, scale: f32) -> Transform {
    Transform {
        translation: pivot + (transform.translation - pivot) * scale,
        scale: transform.scale * scale,
        ..transform
    }
}

fn is_mirrored(primitive: &Primitive) -> bool {
    primitive.transform.matrix3.determinant() < 0.0
}

fn to_color(rgb: aeroscope_scene::Rgb) -> Color {
    Color::srgb_u8(rgb.r, rgb.g, rgb.b)
}

/// Convert a core material. Mirrored primitives render both faces since
/// their winding is flipped.
fn standard_material(material: &Material, mirrored: bool) -> StandardMaterial {
    let mut standard = StandardMaterial {
        unlit: material.unlit || material.wireframe,
        double_sided: material.double_sided || mirrored,
        cull_mode: if material.double_sided || mirrored {
            None
        } else {
            Some(bevy::render::render_resource::Face::Back)
        },
        ..default()
    };
    apply_material(&mut standard, material);
    standard
}

fn apply_material(standard: &mut StandardMaterial, material: &Material) {
    standard.base_color = to_color(material.base_color);
    standard.metallic = material.metallic;
    standard.perceptual_roughness = material.roughness;
    standard.emissive = match material.emission {
        Some(emission) => to_color(emission.color).to_linear() * emission.intensity,
        None => LinearRgba::BLACK,
    };
}

#[cfg(test)]
mod tests {
    use aeroscope_scene::geometry::{NACELLE, glow_material};
    use aeroscope_scene::{PropulsionType, Rgb};

    use super::*;

    #[test]
    fn test_emphasis_scales_about_pivot() {
        let base = Transform::from_xyz(2.0, 0.0, 0.0);
        let pivot = Vec3::new(1.0, 0.0, 0.0);
        let scaled = emphasized(base, pivot, 1.1);
        assert!((scaled.translation.x - 2.1).abs() < 1e-6);
        assert!((scaled.scale - Vec3::splat(1.1)).length() < 1e-6);
        assert_eq!(emphasized(base, pivot, 1.0), base);
    }

    #[test]
    fn test_material_conversion() {
        let standard = standard_material(&NACELLE, false);
        assert_eq!(standard.base_color, Color::srgb_u8(0x37, 0x41, 0x51));
        assert_eq!(standard.emissive, LinearRgba::BLACK);
        assert!(!standard.double_sided);

        let glow = standard_material(&glow_material(PropulsionType::LiquidH2), true);
        assert_ne!(glow.emissive, LinearRgba::BLACK);
        assert!(glow.double_sided);
        assert_eq!(glow.cull_mode, None);
    }

    #[test]
    fn test_wireframe_is_unlit() {
        let standard = standard_material(&Material::standard(Rgb::WHITE, 0.0, 1.0).wireframe(), false);
        assert!(standard.unlit);
    }
}
