//! Elevation preview - unrolls the planet's terrain field into an
//! equirectangular map: raw elevation on the left, biomes on the right.
//!
//! Run with: cargo run -p pf_noise --example elevation_preview
//!
//! Up/Down changes noise strength, Left/Right spins the longitude.

use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use pf_core::{Biome, GenerationParameters};
use pf_noise::{SimplexField, TerrainSynthesizer, DEFAULT_SEED};
use std::f32::consts::PI;

const PREVIEW_WIDTH: u32 = 512;
const PREVIEW_HEIGHT: u32 = 256;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Elevation Preview".into(),
                resolution: (1040.0, 300.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(Preview {
            terrain: TerrainSynthesizer::new(SimplexField::new(DEFAULT_SEED)),
            params: GenerationParameters::default(),
            longitude: 0.0,
            dirty: true,
        })
        .add_systems(Startup, setup)
        .add_systems(Update, (handle_input, update_textures))
        .run();
}

#[derive(Resource)]
struct Preview {
    terrain: TerrainSynthesizer<SimplexField>,
    params: GenerationParameters,
    longitude: f32,
    dirty: bool,
}

#[derive(Component)]
struct ElevationTexture;

#[derive(Component)]
struct BiomeTexture;

fn setup(mut commands: Commands, mut images: ResMut<Assets<Image>>) {
    commands.spawn(Camera2d);

    commands.spawn((
        Sprite {
            image: images.add(create_preview_image()),
            ..default()
        },
        Transform::from_xyz(-260.0, 0.0, 0.0),
        ElevationTexture,
    ));

    commands.spawn((
        Sprite {
            image: images.add(create_preview_image()),
            ..default()
        },
        Transform::from_xyz(260.0, 0.0, 0.0),
        BiomeTexture,
    ));
}

fn create_preview_image() -> Image {
    let size = Extent3d {
        width: PREVIEW_WIDTH,
        height: PREVIEW_HEIGHT,
        depth_or_array_layers: 1,
    };

    Image::new(
        size,
        TextureDimension::D2,
        vec![0u8; (PREVIEW_WIDTH * PREVIEW_HEIGHT * 4) as usize],
        TextureFormat::Rgba8UnormSrgb,
        default(),
    )
}

fn handle_input(keyboard: Res<ButtonInput<KeyCode>>, mut preview: ResMut<Preview>) {
    if keyboard.just_pressed(KeyCode::ArrowUp) {
        preview.params.noise_strength = (preview.params.noise_strength + 0.01).min(0.2);
        preview.dirty = true;
    }
    if keyboard.just_pressed(KeyCode::ArrowDown) {
        preview.params.noise_strength = (preview.params.noise_strength - 0.01).max(0.01);
        preview.dirty = true;
    }
    if keyboard.pressed(KeyCode::ArrowLeft) {
        preview.longitude -= 0.05;
        preview.dirty = true;
    }
    if keyboard.pressed(KeyCode::ArrowRight) {
        preview.longitude += 0.05;
        preview.dirty = true;
    }
}

/// Unit direction for pixel (x, y) of the equirectangular map.
fn pixel_direction(x: u32, y: u32, longitude: f32) -> Vec3 {
    let phi = (x as f32 + 0.5) / PREVIEW_WIDTH as f32 * 2.0 * PI + longitude;
    let theta = (y as f32 + 0.5) / PREVIEW_HEIGHT as f32 * PI;
    Vec3::new(-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin())
}

fn update_textures(
    mut preview: ResMut<Preview>,
    mut images: ResMut<Assets<Image>>,
    elevation_query: Query<&Sprite, With<ElevationTexture>>,
    biome_query: Query<&Sprite, With<BiomeTexture>>,
) {
    if !preview.dirty {
        return;
    }
    preview.dirty = false;

    let params = preview.params;
    let mut elevation = Vec::with_capacity((PREVIEW_WIDTH * PREVIEW_HEIGHT) as usize);
    for y in 0..PREVIEW_HEIGHT {
        for x in 0..PREVIEW_WIDTH {
            let direction = pixel_direction(x, y, preview.longitude);
            elevation.push(preview.terrain.sample_elevation(direction, &params));
        }
    }

    // The fBm sum bottoms out at -amplitude * sum(persistence^i) and the
    // lowland rule halves it; the plateau caps the top.
    let octave_weight: f32 = (0..params.octaves)
        .map(|i| params.persistence.powi(i as i32))
        .sum();
    let low = -params.amplitude * octave_weight * 0.5;
    let span = (params.plateau_height - low).max(f32::EPSILON);

    if let Ok(sprite) = elevation_query.get_single() {
        if let Some(image) = images.get_mut(&sprite.image) {
            for (i, value) in elevation.iter().enumerate() {
                let gray = ((value - low) / span * 255.0).clamp(0.0, 255.0) as u8;
                image.data[i * 4..i * 4 + 4].copy_from_slice(&[gray, gray, gray, 255]);
            }
        }
    }

    if let Ok(sprite) = biome_query.get_single() {
        if let Some(image) = images.get_mut(&sprite.image) {
            for (i, value) in elevation.iter().enumerate() {
                let radial = params.displacement_scale(*value) - 1.0;
                let [r, g, b] = Biome::from_elevation(radial).rgb();
                image.data[i * 4..i * 4 + 4].copy_from_slice(&[r, g, b, 255]);
            }
        }
    }

    info!(
        "Preview updated: noise strength {:.2}, longitude {:.2}",
        params.noise_strength, preview.longitude
    );
}
