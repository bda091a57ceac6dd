use bevy::prelude::*;
use pf_core::{AtmosphereParameters, GenerationParameters, SceneParameters};

/// The host's mutable "current settings". Widgets edit this; synthesis only
/// ever sees copies of it.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlanetSettings {
    pub generation: GenerationParameters,
    pub atmosphere: AtmosphereParameters,
    pub scene: SceneParameters,
}

/// Signals the host reacts to after a settings edit.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlSignal {
    /// Shape or color inputs changed: rebuild the planet mesh.
    ParametersChanged,
    /// Only `planet_scale` changed: update transforms, no rebuild.
    ScaleChanged,
    /// Water shell scale changed.
    WaterScaleChanged,
    /// Gas fractions, fog or visibility changed.
    AtmosphereChanged,
    /// Star type changed: remap the tint.
    StarTypeChanged,
}

/// One frame's control signals folded into flags; repeats collapse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingChanges {
    pub rebuild: bool,
    pub rescale: bool,
    pub water: bool,
    pub atmosphere: bool,
    pub star: bool,
}

impl PendingChanges {
    pub fn from_signals<'a>(signals: impl IntoIterator<Item = &'a ControlSignal>) -> Self {
        let mut pending = Self::default();
        for signal in signals {
            match signal {
                ControlSignal::ParametersChanged => pending.rebuild = true,
                ControlSignal::ScaleChanged => pending.rescale = true,
                ControlSignal::WaterScaleChanged => pending.water = true,
                ControlSignal::AtmosphereChanged => pending.atmosphere = true,
                ControlSignal::StarTypeChanged => pending.star = true,
            }
        }
        pending
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl PlanetSettings {
    /// Signals implied by going from `previous` to `self`, in a fixed order.
    ///
    /// Rotation speed is read every frame and never signals.
    pub fn changes_since(&self, previous: &PlanetSettings) -> Vec<ControlSignal> {
        let mut signals = Vec::new();

        let shape = GenerationParameters {
            planet_scale: previous.generation.planet_scale,
            ..self.generation
        };
        if shape != previous.generation {
            signals.push(ControlSignal::ParametersChanged);
        }
        if self.generation.planet_scale != previous.generation.planet_scale {
            signals.push(ControlSignal::ScaleChanged);
        }
        if self.scene.water_scale != previous.scene.water_scale {
            signals.push(ControlSignal::WaterScaleChanged);
        }

        let gases = AtmosphereParameters {
            star_type: previous.atmosphere.star_type,
            ..self.atmosphere
        };
        if gases != previous.atmosphere {
            signals.push(ControlSignal::AtmosphereChanged);
        }
        if self.atmosphere.star_type != previous.atmosphere.star_type {
            signals.push(ControlSignal::StarTypeChanged);
        }

        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::{StarType, ThirdGas};

    #[test]
    fn no_edit_no_signal() {
        let settings = PlanetSettings::default();
        assert!(settings.changes_since(&settings).is_empty());
    }

    #[test]
    fn shape_edits_request_rebuild() {
        let before = PlanetSettings::default();
        let mut after = before;
        after.generation.octaves = 7;
        assert_eq!(after.changes_since(&before), vec![ControlSignal::ParametersChanged]);

        let mut after = before;
        after.generation.flatland_threshold = 0.4;
        assert_eq!(after.changes_since(&before), vec![ControlSignal::ParametersChanged]);
    }

    #[test]
    fn scale_edit_is_the_cheap_path() {
        let before = PlanetSettings::default();
        let mut after = before;
        after.generation.planet_scale = 1.8;
        assert_eq!(after.changes_since(&before), vec![ControlSignal::ScaleChanged]);
    }

    #[test]
    fn star_type_is_separate_from_gases() {
        let before = PlanetSettings::default();
        let mut after = before;
        after.atmosphere.star_type = StarType::K;
        assert_eq!(after.changes_since(&before), vec![ControlSignal::StarTypeChanged]);

        let mut after = before;
        after.atmosphere.third_gas_kind = ThirdGas::Nitrogen;
        after.atmosphere.visible = false;
        assert_eq!(after.changes_since(&before), vec![ControlSignal::AtmosphereChanged]);
    }

    #[test]
    fn combined_edit_reports_every_signal_once() {
        let before = PlanetSettings::default();
        let mut after = before;
        after.generation.amplitude = 9.0;
        after.generation.planet_scale = 0.5;
        after.scene.water_scale = 1.1;
        after.scene.rotation_speed = 0.05;
        after.atmosphere.carbon = 0.9;
        after.atmosphere.star_type = StarType::M;
        assert_eq!(
            after.changes_since(&before),
            vec![
                ControlSignal::ParametersChanged,
                ControlSignal::ScaleChanged,
                ControlSignal::WaterScaleChanged,
                ControlSignal::AtmosphereChanged,
                ControlSignal::StarTypeChanged,
            ]
        );
    }

    #[test]
    fn rotation_speed_is_silent() {
        let before = PlanetSettings::default();
        let mut after = before;
        after.scene.rotation_speed = 0.08;
        assert!(after.changes_since(&before).is_empty());
    }

    #[test]
    fn repeated_signals_fold_into_one_flag() {
        let signals = [
            ControlSignal::ParametersChanged,
            ControlSignal::ParametersChanged,
            ControlSignal::StarTypeChanged,
            ControlSignal::ParametersChanged,
        ];
        let pending = PendingChanges::from_signals(&signals);
        assert_eq!(
            pending,
            PendingChanges { rebuild: true, star: true, ..Default::default() }
        );
        let none: [ControlSignal; 0] = [];
        assert!(PendingChanges::from_signals(&none).is_empty());
    }
}
