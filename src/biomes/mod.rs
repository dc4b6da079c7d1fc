//! Color classification of eroded cells.
//!
//! Each cell falls into one of twelve ordered buckets: two water depths
//! checked first, then ten altitude bands from lowland green through gray rock
//! to snow and ice.

use serde::{Deserialize, Serialize};

/// Terrain bucket of a cell. `as_u8()` is stable and used for storage/export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    DeepWater = 0,
    ShallowWater = 1,
    Lowland = 2,
    Meadow = 3,
    Grassland = 4,
    Forest = 5,
    DeepForest = 6,
    Foothills = 7,
    Rock = 8,
    HighRock = 9,
    Snow = 10,
    Glacier = 11,
}

/// Upper altitude bound (exclusive) of each land bucket, lowest first.
/// Anything at or above the last bound is [`Biome::Glacier`].
pub const ALTITUDE_BANDS: [(f64, Biome); 9] = [
    (0.1, Biome::Lowland),
    (0.2, Biome::Meadow),
    (0.3, Biome::Grassland),
    (0.4, Biome::Forest),
    (0.5, Biome::DeepForest),
    (0.6, Biome::Foothills),
    (0.7, Biome::Rock),
    (0.8, Biome::HighRock),
    (0.9, Biome::Snow),
];

impl Biome {
    pub const ALL: [Biome; 12] = [
        Biome::DeepWater,
        Biome::ShallowWater,
        Biome::Lowland,
        Biome::Meadow,
        Biome::Grassland,
        Biome::Forest,
        Biome::DeepForest,
        Biome::Foothills,
        Biome::Rock,
        Biome::HighRock,
        Biome::Snow,
        Biome::Glacier,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Biome::DeepWater => "deep_water",
            Biome::ShallowWater => "shallow_water",
            Biome::Lowland => "lowland",
            Biome::Meadow => "meadow",
            Biome::Grassland => "grassland",
            Biome::Forest => "forest",
            Biome::DeepForest => "deep_forest",
            Biome::Foothills => "foothills",
            Biome::Rock => "rock",
            Biome::HighRock => "high_rock",
            Biome::Snow => "snow",
            Biome::Glacier => "glacier",
        }
    }

    pub fn is_water(self) -> bool {
        matches!(self, Biome::DeepWater | Biome::ShallowWater)
    }

    /// Linear RGB color in [0, 1].
    pub fn rgb(self) -> [f64; 3] {
        match self {
            Biome::DeepWater => [0.0, 0.0, 0.5],
            Biome::ShallowWater => [0.0, 0.0, 0.7],
            Biome::Lowland => [0.6, 0.9, 0.6],
            Biome::Meadow => [0.5, 0.8, 0.5],
            Biome::Grassland => [0.4, 0.7, 0.4],
            Biome::Forest => [0.3, 0.6, 0.3],
            Biome::DeepForest => [0.2, 0.5, 0.2],
            Biome::Foothills => [0.3, 0.3, 0.3],
            Biome::Rock => [0.5, 0.5, 0.5],
            Biome::HighRock => [0.7, 0.7, 0.7],
            Biome::Snow => [1.0, 1.0, 1.0],
            Biome::Glacier => [0.5, 0.8, 1.0],
        }
    }

    /// 8-bit RGB preview color.
    pub fn preview_rgb(self) -> [u8; 3] {
        self.rgb().map(|c| (c * 255.0).round() as u8)
    }
}

/// Classifies a cell by its final water depth and altitude.
///
/// Water at least `2 * water_level` deep is deep water, at least
/// `water_level` is shallow water; otherwise the first altitude band whose
/// bound exceeds `altitude` wins.
pub fn classify(altitude: f64, water: f64, water_level: f64) -> Biome {
    if water >= 2.0 * water_level {
        return Biome::DeepWater;
    }
    if water >= water_level {
        return Biome::ShallowWater;
    }
    ALTITUDE_BANDS
        .iter()
        .find(|(bound, _)| altitude < *bound)
        .map(|&(_, biome)| biome)
        .unwrap_or(Biome::Glacier)
}

/// Number of cells per biome, indexed by `Biome::as_u8()`.
pub fn histogram<I>(biomes: I) -> [usize; 12]
where
    I: IntoIterator<Item = Biome>,
{
    let mut counts = [0usize; 12];
    for b in biomes {
        counts[b.as_u8() as usize] += 1;
    }
    counts
}
