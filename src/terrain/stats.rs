//! Summary statistics over a slice of cells.

use serde::Serialize;

use super::cell::HexCell;
use crate::biomes::{histogram, Biome};

/// Aggregate values of a grid, used for logging and reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridStats {
    pub cells: usize,
    pub min_altitude: f64,
    pub max_altitude: f64,
    pub mean_altitude: f64,
    pub total_water: f64,
    pub total_sediment: f64,
    /// Cell count per biome, indexed by `Biome::as_u8()`.
    pub biomes: [usize; 12],
}

impl GridStats {
    pub fn of(cells: &[HexCell], water_level: f64) -> Self {
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        let mut altitude_sum = 0.0;
        let mut water = 0.0;
        let mut sediment = 0.0;

        for c in cells {
            min = min.min(c.altitude);
            max = max.max(c.altitude);
            altitude_sum += c.altitude;
            water += c.water;
            sediment += c.sediment;
        }

        let n = cells.len();
        if n == 0 {
            min = 0.0;
            max = 0.0;
        }

        Self {
            cells: n,
            min_altitude: min,
            max_altitude: max,
            mean_altitude: if n > 0 { altitude_sum / n as f64 } else { 0.0 },
            total_water: water,
            total_sediment: sediment,
            biomes: histogram(cells.iter().map(|c| c.biome(water_level))),
        }
    }

    /// Fraction of cells classified as water.
    pub fn water_fraction(&self) -> f64 {
        if self.cells == 0 {
            return 0.0;
        }
        let wet = self.biomes[Biome::DeepWater.as_u8() as usize]
            + self.biomes[Biome::ShallowWater.as_u8() as usize];
        wet as f64 / self.cells as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::OffsetCoord;

    #[test]
    fn test_stats() {
        let mut cells: Vec<HexCell> = (0..4).map(|i| HexCell::new(OffsetCoord::new(0, i))).collect();
        cells[0].altitude = -0.5;
        cells[1].altitude = 1.5;
        cells[2].water = 3.0;
        cells[3].sediment = 0.25;

        let stats = GridStats::of(&cells, 1.0);
        assert_eq!(stats.cells, 4);
        assert_eq!(stats.min_altitude, -0.5);
        assert_eq!(stats.max_altitude, 1.5);
        assert_eq!(stats.mean_altitude, 0.25);
        assert_eq!(stats.total_water, 3.0);
        assert_eq!(stats.total_sediment, 0.25);
        assert_eq!(stats.water_fraction(), 0.25);
    }

    #[test]
    fn test_empty_stats() {
        let stats = GridStats::of(&[], 1.0);
        assert_eq!(stats.cells, 0);
        assert_eq!(stats.min_altitude, 0.0);
        assert_eq!(stats.water_fraction(), 0.0);
    }
}
