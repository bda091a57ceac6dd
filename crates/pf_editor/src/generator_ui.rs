use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use pf_core::{AtmosphereParameters, Biome, GenerationParameters, SceneParameters, StarType, ThirdGas};

use crate::settings::{ControlSignal, PlanetSettings};

/// Resource for tracking UI state in the generator panel.
#[derive(Resource, Default)]
pub struct GeneratorUiState {
    /// Outcome of the most recent rebuild, written by the host.
    pub last_build: Option<BuildReport>,
    /// Error to display, written by the host when a rebuild fails.
    pub status_message: Option<String>,
    /// Successful builds this session.
    pub build_count: u32,
}

/// Summary of a finished rebuild for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildReport {
    pub vertices: usize,
    pub triangles: usize,
    pub millis: f32,
    /// Vertices per biome, in [`Biome::all`] order.
    pub biomes: [usize; 5],
}

/// System to render the planet generator side panel.
///
/// Widgets edit a copy of the settings; the copy is written back and the
/// matching [`ControlSignal`]s are sent only when something changed.
pub fn generator_ui_system(
    mut contexts: EguiContexts,
    mut settings: ResMut<PlanetSettings>,
    ui_state: Res<GeneratorUiState>,
    mut signals: EventWriter<ControlSignal>,
) {
    let previous = *settings;
    let mut edited = previous;
    let mut force_rebuild = false;

    egui::SidePanel::left("generator_panel")
        .default_width(220.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Planet Generator");
            ui.separator();

            egui::CollapsingHeader::new("Terrain")
                .default_open(true)
                .show(ui, |ui| terrain_controls(ui, &mut edited.generation));
            ui.add_space(8.0);

            egui::CollapsingHeader::new("Scene")
                .default_open(true)
                .show(ui, |ui| {
                    scene_controls(ui, &mut edited.generation, &mut edited.scene)
                });
            ui.add_space(8.0);

            egui::CollapsingHeader::new("Atmosphere")
                .default_open(true)
                .show(ui, |ui| atmosphere_controls(ui, &mut edited.atmosphere));
            ui.add_space(16.0);

            ui.separator();
            if ui.button("Regenerate Planet").clicked() {
                force_rebuild = true;
            }

            if let Some(report) = &ui_state.last_build {
                ui.add_space(8.0);
                ui.label(format!(
                    "{} vertices, {} triangles",
                    report.vertices, report.triangles
                ));
                ui.label(format!(
                    "Build #{} took {:.1} ms",
                    ui_state.build_count, report.millis
                ));
                for (biome, count) in Biome::all().iter().zip(report.biomes) {
                    ui.label(format!("{:8} {}", biome.name(), count));
                }
            }

            // Status message
            if let Some(msg) = &ui_state.status_message {
                ui.add_space(8.0);
                ui.colored_label(egui::Color32::LIGHT_RED, msg);
            }
        });

    let mut changes = edited.changes_since(&previous);
    if !changes.is_empty() {
        *settings = edited;
    }
    if force_rebuild && !changes.contains(&ControlSignal::ParametersChanged) {
        changes.push(ControlSignal::ParametersChanged);
    }
    signals.send_batch(changes);
}

fn terrain_controls(ui: &mut egui::Ui, params: &mut GenerationParameters) {
    ui.add(egui::Slider::new(&mut params.noise_strength, 0.01..=0.1).text("Noise Strength"));
    ui.add(egui::Slider::new(&mut params.frequency, 0.5..=5.0).text("Frequency"));
    ui.add(egui::Slider::new(&mut params.amplitude, 1.0..=20.0).text("Amplitude"));
    ui.add(egui::Slider::new(&mut params.octaves, 1..=8).text("Octaves"));
    ui.add(egui::Slider::new(&mut params.persistence, 0.1..=1.0).text("Persistence"));
    ui.add(egui::Slider::new(&mut params.flatland_threshold, 0.0..=1.0).text("Flatland Threshold"));
    ui.add(egui::Slider::new(&mut params.plateau_height, 0.0..=3.0).text("Plateau Height"));
}

fn scene_controls(
    ui: &mut egui::Ui,
    generation: &mut GenerationParameters,
    scene: &mut SceneParameters,
) {
    ui.add(egui::Slider::new(&mut generation.planet_scale, 0.1..=2.0).text("Planet Scale"));
    ui.add(egui::Slider::new(&mut scene.rotation_speed, 0.001..=0.1).text("Rotation Speed"));
    ui.add(egui::Slider::new(&mut scene.water_scale, 0.1..=2.0).text("Water Scale"));
}

fn atmosphere_controls(ui: &mut egui::Ui, atmosphere: &mut AtmosphereParameters) {
    ui.checkbox(&mut atmosphere.visible, "Visible");
    ui.add(egui::Slider::new(&mut atmosphere.carbon, 0.0..=1.0).text("Carbon"));
    ui.add(egui::Slider::new(&mut atmosphere.oxygen, 0.0..=1.0).text("Oxygen"));

    egui::ComboBox::from_label("Third Gas")
        .selected_text(atmosphere.third_gas_kind.name())
        .show_ui(ui, |ui| {
            for gas in ThirdGas::all() {
                ui.selectable_value(&mut atmosphere.third_gas_kind, *gas, gas.name());
            }
        });
    let label = atmosphere.third_gas_kind.name();
    ui.add(egui::Slider::new(&mut atmosphere.third_gas, 0.0..=1.0).text(label));

    ui.add(egui::Slider::new(&mut atmosphere.fog_thickness, 0.1..=3.0).text("Fog Thickness"));

    egui::ComboBox::from_label("Star Type")
        .selected_text(atmosphere.star_type.name())
        .show_ui(ui, |ui| {
            for star in StarType::all() {
                ui.selectable_value(&mut atmosphere.star_type, *star, star.name());
            }
        });
}
