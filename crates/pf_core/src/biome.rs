/// Upper elevation bound (exclusive) of the desert band.
pub const DESERT_MAX: f32 = 0.001;
/// Upper elevation bound (exclusive) of the plains band.
pub const PLAINS_MAX: f32 = 0.004;
/// Upper elevation bound (exclusive) of the forest band.
pub const FOREST_MAX: f32 = 0.015;
/// Upper elevation bound (exclusive) of the tundra band. Everything at or
/// above this is snow.
pub const TUNDRA_MAX: f32 = 0.02;

/// Surface biome bands, ordered from the mildest to the harshest.
///
/// Bands are selected purely from post-displacement elevation, so the derived
/// ordering doubles as a "harshness" ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Biome {
    #[default]
    Desert,
    Plains,
    Forest,
    Tundra,
    Snow,
}

impl Biome {
    /// All biomes in ascending elevation order.
    pub fn all() -> &'static [Biome] {
        &[
            Self::Desert,
            Self::Plains,
            Self::Forest,
            Self::Tundra,
            Self::Snow,
        ]
    }

    /// Classify an elevation (distance above the unit sphere) into a band.
    pub fn from_elevation(elevation: f32) -> Self {
        if elevation < DESERT_MAX {
            Self::Desert
        } else if elevation < PLAINS_MAX {
            Self::Plains
        } else if elevation < FOREST_MAX {
            Self::Forest
        } else if elevation < TUNDRA_MAX {
            Self::Tundra
        } else {
            Self::Snow
        }
    }

    /// Returns the RGB color for this biome.
    ///
    /// Plains and forest share one color.
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            Self::Desert => [237, 201, 175], // Sand
            Self::Plains => [34, 139, 34],   // Forest green
            Self::Forest => [34, 139, 34],   // Forest green
            Self::Tundra => [143, 151, 121], // Lichen grey
            Self::Snow => [255, 250, 250],   // Snow white
        }
    }

    /// Returns the color as normalized RGBA, the layout vertex color buffers use.
    pub fn color(&self) -> [f32; 4] {
        let [r, g, b] = self.rgb();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            1.0,
        ]
    }

    /// Display name for UI.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Desert => "Desert",
            Self::Plains => "Plains",
            Self::Forest => "Forest",
            Self::Tundra => "Tundra",
            Self::Snow => "Snow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_sea_level_is_desert() {
        assert_eq!(Biome::from_elevation(-1.25), Biome::Desert);
        assert_eq!(Biome::from_elevation(0.0005), Biome::Desert);
    }

    #[test]
    fn band_boundaries_are_exclusive_above() {
        assert_eq!(Biome::from_elevation(DESERT_MAX), Biome::Plains);
        assert_eq!(Biome::from_elevation(PLAINS_MAX), Biome::Forest);
        assert_eq!(Biome::from_elevation(FOREST_MAX), Biome::Tundra);
        assert_eq!(Biome::from_elevation(TUNDRA_MAX), Biome::Snow);
    }

    #[test]
    fn everything_high_is_snow() {
        assert_eq!(Biome::from_elevation(0.02), Biome::Snow);
        assert_eq!(Biome::from_elevation(0.5), Biome::Snow);
        assert_eq!(Biome::from_elevation(f32::MAX), Biome::Snow);
    }

    #[test]
    fn classification_never_gets_milder_with_height() {
        let mut previous = Biome::from_elevation(-0.01);
        for step in 0..400 {
            let elevation = -0.01 + step as f32 * 0.0001;
            let biome = Biome::from_elevation(elevation);
            assert!(biome >= previous, "{:?} after {:?} at {}", biome, previous, elevation);
            previous = biome;
        }
        assert_eq!(previous, Biome::Snow);
    }

    #[test]
    fn plains_and_forest_share_a_color() {
        assert_eq!(Biome::Plains.rgb(), Biome::Forest.rgb());
        assert_ne!(Biome::Desert.rgb(), Biome::Snow.rgb());
    }

    #[test]
    fn colors_are_opaque_and_normalized() {
        for biome in Biome::all() {
            let color = biome.color();
            assert_eq!(color[3], 1.0);
            assert!(color.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }
}
