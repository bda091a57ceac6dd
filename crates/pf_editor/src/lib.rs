use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod generator_ui;
pub mod settings;

pub use generator_ui::{BuildReport, GeneratorUiState};
pub use settings::{ControlSignal, PendingChanges, PlanetSettings};

/// Editor plugin for PlanetForge.
/// Provides the egui control panel and the settings it edits.
pub struct PfEditorPlugin;

impl Plugin for PfEditorPlugin {
    fn build(&self, app: &mut App) {
        // Only add EguiPlugin if not already added
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin);
        }

        app.init_resource::<PlanetSettings>()
            .init_resource::<GeneratorUiState>()
            .add_event::<ControlSignal>()
            .add_systems(Update, generator_ui::generator_ui_system);
    }
}
