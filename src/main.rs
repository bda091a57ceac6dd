use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use pf_config::{config_path, load_or_default, PlanetConfig, SphereConfig};
use pf_core::{GenerationParameters, NoiseSource, PlanetError};
use pf_editor::{BuildReport, ControlSignal, GeneratorUiState, PendingChanges, PlanetSettings};
use pf_mesh::{apply_planet_scale, BaseSphere, PlanetMesh, PlanetMeshBuilder};
use pf_noise::{SimplexField, TerrainField, TerrainSynthesizer};
use std::path::PathBuf;
use std::time::Instant;

mod atmosphere;

use atmosphere::AtmosphereMaterial;

const LIGHT_POSITION: Vec3 = Vec3::new(10.0, 10.0, 10.0);
const ATMOSPHERE_RADIUS: f32 = 1.2;
const SHELL_SEGMENTS: u32 = 128;
const CAMERA_START_Z: f32 = 5.0;
const CAMERA_MIN_Z: f32 = 1.5;
const CAMERA_MAX_Z: f32 = 50.0;

fn main() {
    let path = config_path();
    let (config, config_error) = match load_or_default(&path) {
        Ok(config) => (config, None),
        Err(e) => (PlanetConfig::default(), Some(e.to_string())),
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "PlanetForge".into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ConfigStatus {
            path,
            error: config_error,
        })
        .insert_resource(PlanetSettings {
            generation: config.generation,
            atmosphere: config.atmosphere,
            scene: config.scene,
        })
        .insert_resource(BaseSphereTemplate(base_sphere(config.sphere)))
        .insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 80.0,
        })
        .add_plugins((
            pf_noise::PfNoisePlugin { seed: config.seed },
            pf_editor::PfEditorPlugin,
            MaterialPlugin::<AtmosphereMaterial>::default(),
        ))
        .add_systems(Startup, (log_config_status, setup_scene))
        .add_systems(Update, (
            rebuild_planet,
            apply_scale_change,
            apply_water_scale,
            update_atmosphere,
            rotate_planet,
            camera_zoom,
        ))
        .run();
}

/// Where the startup configuration came from, for logging once the log
/// plugin is up.
#[derive(Resource)]
struct ConfigStatus {
    path: PathBuf,
    error: Option<String>,
}

/// Fixed-topology sphere every rebuild displaces.
#[derive(Resource)]
struct BaseSphereTemplate(BaseSphere);

/// Marker component for the displaced planet surface.
#[derive(Component)]
struct Planet;

/// Marker component for the water shell.
#[derive(Component)]
struct Water;

/// Marker component for the atmosphere shell.
#[derive(Component)]
struct Atmosphere;

fn base_sphere(config: SphereConfig) -> BaseSphere {
    match config {
        SphereConfig::Uv {
            width_segments,
            height_segments,
        } => BaseSphere::uv(width_segments, height_segments),
        SphereConfig::Ico { subdivisions } => BaseSphere::icosphere(subdivisions),
    }
}

/// Synchronous full rebuild, timed for the status panel.
fn build_planet(
    terrain: &TerrainSynthesizer<SimplexField>,
    template: &BaseSphere,
    params: &GenerationParameters,
) -> Result<(PlanetMesh, BuildReport), PlanetError> {
    let started = Instant::now();
    let planet = PlanetMeshBuilder::new(terrain).build(template, params)?;
    let report = BuildReport {
        vertices: planet.vertex_count(),
        triangles: planet.triangle_count(),
        millis: started.elapsed().as_secs_f32() * 1000.0,
        biomes: planet.biome_histogram(),
    };
    Ok((planet, report))
}

fn log_config_status(status: Res<ConfigStatus>) {
    match &status.error {
        Some(e) => warn!(
            "Could not load {}: {}. Using built-in defaults.",
            status.path.display(),
            e
        ),
        None => info!("Loaded settings from {}", status.path.display()),
    }
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut atmosphere_materials: ResMut<Assets<AtmosphereMaterial>>,
    settings: Res<PlanetSettings>,
    template: Res<BaseSphereTemplate>,
    terrain: Res<TerrainField>,
    mut ui_state: ResMut<GeneratorUiState>,
) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 75f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, CAMERA_START_Z).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        PointLight {
            intensity: 50_000_000.0,
            range: 100.0,
            ..default()
        },
        Transform::from_translation(LIGHT_POSITION),
    ));

    // Planet surface; the first build runs here so the planet is there on frame one.
    let planet_mesh = match build_planet(&terrain.0, &template.0, &settings.generation) {
        Ok((planet, report)) => {
            let noise = terrain.0.noise();
            info!(
                "Built planet from {} noise (seed {}): {} vertices in {:.1} ms",
                noise.name(),
                noise.seed(),
                report.vertices,
                report.millis
            );
            ui_state.last_build = Some(report);
            ui_state.build_count += 1;
            planet.to_bevy_mesh()
        }
        Err(e) => {
            error!("Initial planet build failed: {}", e);
            ui_state.status_message = Some(format!("Build failed: {}", e));
            Sphere::new(1.0).mesh().uv(SHELL_SEGMENTS, SHELL_SEGMENTS)
        }
    };
    let scale = Vec3::splat(settings.generation.planet_scale);

    commands.spawn((
        Mesh3d(meshes.add(planet_mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE, // vertex colors carry the biomes
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::from_scale(scale),
        Planet,
    ));

    let water_color = Color::srgb_u8(0x00, 0xaa, 0xff);
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(1.0).mesh().uv(SHELL_SEGMENTS, SHELL_SEGMENTS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: water_color,
            perceptual_roughness: 0.1,
            metallic: 0.6,
            emissive: water_color.to_linear() * 0.1,
            ..default()
        })),
        Transform::from_scale(Vec3::splat(settings.scene.water_scale)),
        Water,
    ));

    commands.spawn((
        Mesh3d(meshes.add(
            Sphere::new(ATMOSPHERE_RADIUS)
                .mesh()
                .uv(SHELL_SEGMENTS, SHELL_SEGMENTS),
        )),
        MeshMaterial3d(atmosphere_materials.add(AtmosphereMaterial::new(
            &settings.atmosphere,
            LIGHT_POSITION,
        ))),
        Transform::from_scale(scale),
        atmosphere_visibility(settings.atmosphere.visible),
        Atmosphere,
    ));
}

fn atmosphere_visibility(visible: bool) -> Visibility {
    if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

/// Rebuild the planet mesh when shape parameters change.
///
/// Every signal of the frame collapses into one rebuild. The new mesh
/// replaces the asset in place; on failure the previous mesh stays.
fn rebuild_planet(
    mut signals: EventReader<ControlSignal>,
    settings: Res<PlanetSettings>,
    template: Res<BaseSphereTemplate>,
    terrain: Res<TerrainField>,
    planet_query: Query<&Mesh3d, With<Planet>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut ui_state: ResMut<GeneratorUiState>,
) {
    if !PendingChanges::from_signals(signals.read()).rebuild {
        return;
    }

    let Ok(handle) = planet_query.get_single() else { return };

    match build_planet(&terrain.0, &template.0, &settings.generation) {
        Ok((planet, report)) => {
            if let Some(mesh) = meshes.get_mut(&handle.0) {
                *mesh = planet.to_bevy_mesh();
            }
            info!(
                "Rebuilt planet: {} vertices in {:.1} ms",
                report.vertices, report.millis
            );
            ui_state.last_build = Some(report);
            ui_state.build_count += 1;
            ui_state.status_message = None;
        }
        Err(e) => {
            error!("Planet rebuild failed: {}", e);
            ui_state.status_message = Some(format!("Build failed: {}", e));
        }
    }
}

/// Cheap path for planet scale: transforms only, the mesh is untouched.
fn apply_scale_change(
    mut signals: EventReader<ControlSignal>,
    settings: Res<PlanetSettings>,
    mut query: Query<&mut Transform, Or<(With<Planet>, With<Atmosphere>)>>,
) {
    if !PendingChanges::from_signals(signals.read()).rescale {
        return;
    }

    for mut transform in &mut query {
        apply_planet_scale(&mut transform, settings.generation.planet_scale);
    }
}

fn apply_water_scale(
    mut signals: EventReader<ControlSignal>,
    settings: Res<PlanetSettings>,
    mut query: Query<&mut Transform, With<Water>>,
) {
    if !PendingChanges::from_signals(signals.read()).water {
        return;
    }

    for mut transform in &mut query {
        transform.scale = Vec3::splat(settings.scene.water_scale);
    }
}

fn update_atmosphere(
    mut signals: EventReader<ControlSignal>,
    settings: Res<PlanetSettings>,
    mut query: Query<(&MeshMaterial3d<AtmosphereMaterial>, &mut Visibility), With<Atmosphere>>,
    mut materials: ResMut<Assets<AtmosphereMaterial>>,
) {
    let pending = PendingChanges::from_signals(signals.read());
    if pending.star {
        info!("Star type: {}", settings.atmosphere.star_type.name());
    }
    if !pending.atmosphere && !pending.star {
        return;
    }

    for (handle, mut visibility) in &mut query {
        if let Some(material) = materials.get_mut(&handle.0) {
            material.apply(&settings.atmosphere);
        }
        *visibility = atmosphere_visibility(settings.atmosphere.visible);
    }
}

/// Spin planet and atmosphere; rotation speed is in radians per 60 Hz frame.
fn rotate_planet(
    time: Res<Time>,
    settings: Res<PlanetSettings>,
    mut query: Query<&mut Transform, Or<(With<Planet>, With<Atmosphere>)>>,
) {
    let angle = settings.scene.rotation_speed * time.delta_secs() * 60.0;
    for mut transform in &mut query {
        transform.rotate_y(angle);
    }
}

fn camera_zoom(
    mut scroll_events: EventReader<MouseWheel>,
    mut query: Query<&mut Transform, With<Camera3d>>,
    mut contexts: EguiContexts,
) {
    let over_ui = contexts.ctx_mut().is_pointer_over_area();

    let mut scroll_delta = 0.0;
    for event in scroll_events.read() {
        scroll_delta += match event.unit {
            MouseScrollUnit::Line => event.y * 0.5,
            MouseScrollUnit::Pixel => event.y * 0.01,
        };
    }

    if scroll_delta == 0.0 || over_ui {
        return;
    }

    for mut transform in &mut query {
        // Scroll up moves the camera toward the planet.
        transform.translation.z =
            (transform.translation.z - scroll_delta).clamp(CAMERA_MIN_Z, CAMERA_MAX_Z);
    }
}
