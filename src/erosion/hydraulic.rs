//! Grid-based hydraulic erosion on a hex lattice.
//!
//! Each tick runs three passes over the grid:
//! 1. rain (every `rain_cycle` ticks),
//! 2. flow, which reads only pre-tick state and writes only the per-cell
//!    accumulators,
//! 3. update, which applies the accumulators cell by cell.
//!
//! Because no cell's water, altitude or sediment changes until every flow of
//! the tick is known, the result does not depend on traversal order.

use crate::erosion::{ErosionConfig, ErosionError};
use crate::geometry::GridShape;
use crate::terrain::{GridStats, HexCell};

/// Water added and removed over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WaterLedger {
    /// Total water added by rain.
    pub rained: f64,
    /// Total water lost to evaporation.
    pub evaporated: f64,
}

/// Steps erosion over a borrowed grid.
pub struct ErosionSimulator<'a> {
    cells: &'a mut [HexCell],
    shape: GridShape,
    config: &'a ErosionConfig,
    tick: u32,
    ledger: WaterLedger,
}

impl<'a> ErosionSimulator<'a> {
    /// Wraps `cells`, laid out with stride `width`.
    pub fn new(
        cells: &'a mut [HexCell],
        width: usize,
        config: &'a ErosionConfig,
    ) -> Result<Self, ErosionError> {
        config.validate()?;
        if width == 0 || cells.len() % width != 0 {
            return Err(ErosionError::GridShape {
                len: cells.len(),
                width,
            });
        }
        let shape = GridShape::new(cells.len() / width, width);
        Ok(Self {
            cells,
            shape,
            config,
            tick: 0,
            ledger: WaterLedger::default(),
        })
    }

    /// Number of ticks run so far.
    pub fn tick_count(&self) -> u32 {
        self.tick
    }

    pub fn ledger(&self) -> WaterLedger {
        self.ledger
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Runs one full tick: rain if due, flow, update.
    pub fn tick(&mut self) {
        if self.tick % self.config.rain_cycle == 0 {
            self.rain();
        }
        self.compute_flow();
        self.apply();
        log::trace!("erosion tick {} done", self.tick);
        self.tick += 1;
    }

    /// Runs `iterations` ticks.
    pub fn run(&mut self, iterations: u32) {
        for _ in 0..iterations {
            self.tick();
        }
    }

    /// Adds `precipitation * retention` water to every cell.
    pub fn rain(&mut self) {
        let retention = self.config.retention;
        for c in self.cells.iter_mut() {
            let amount = c.precipitation * retention;
            c.water += amount;
            self.ledger.rained += amount;
        }
    }

    /// Flow pass: fills the accumulators from the current state.
    ///
    /// Every neighbor whose water surface sits lower receives up to a sixth of
    /// the cell's water. Water under capacity scours the ground; water over
    /// capacity drops part of its load. A cell that cannot drain anywhere
    /// settles a share of its sediment in place.
    pub fn compute_flow(&mut self) {
        let cc = self.config.carrying_capacity;
        let kd = self.config.deposition_rate;
        let ks = self.config.soil_softness;

        for i in 0..self.cells.len() {
            let (water, sediment, level) = {
                let c = &self.cells[i];
                (c.water, c.sediment, c.water_level())
            };
            let share = water / 6.0;
            let mut drained = false;

            for &n in self.shape.neighbors(i).as_slice() {
                let flow = share.min(level - self.cells[n].water_level());
                if flow <= 0.0 {
                    continue;
                }
                drained = true;

                let capacity = flow * cc;
                let carried = flow / water * sediment;
                let (moved, ground, left) = if carried > capacity {
                    let deposit = kd * (carried - capacity);
                    (capacity, deposit, capacity + deposit)
                } else {
                    let eroded = ks * (capacity - carried);
                    (carried + eroded, -eroded, carried)
                };

                let target = &mut self.cells[n];
                target.incoming_water += flow;
                target.sediment_delta += moved;

                let source = &mut self.cells[i];
                source.outgoing_water += flow;
                source.altitude_delta += ground;
                source.sediment_delta -= left;
            }

            if !drained && sediment > 0.0 {
                let settled = kd * sediment;
                let c = &mut self.cells[i];
                c.altitude_delta += settled;
                c.sediment_delta -= settled;
            }
        }
    }

    /// Update pass: applies the accumulators, evaporates, then balances
    /// suspended sediment against the ground.
    pub fn apply(&mut self) {
        let cc = self.config.carrying_capacity;
        let kd = self.config.deposition_rate;
        let ks = self.config.soil_softness;
        let evaporation = self.config.evaporation;

        for c in self.cells.iter_mut() {
            let water = (c.water + c.incoming_water - c.outgoing_water).max(0.0);
            self.ledger.evaporated += water * evaporation;
            c.water = water * (1.0 - evaporation);

            c.altitude += c.altitude_delta;
            c.sediment = (c.sediment + c.sediment_delta).max(0.0);
            c.clear_scratch();

            let deposition = kd * c.sediment;
            let sedimentation = ks * cc * c.water;
            c.altitude += deposition - sedimentation;
            c.sediment += sedimentation - deposition;
        }
    }

    /// Recolors every cell from its current state.
    pub fn classify(&mut self) {
        classify_colors(self.cells, self.config.water_level);
    }
}

/// Erodes `cells` (stride `width`) for `iterations` ticks, then recolors them.
///
/// With `iterations == 0` the grid is left untouched, colors included.
pub fn erode(
    cells: &mut [HexCell],
    width: usize,
    iterations: u32,
    config: &ErosionConfig,
) -> Result<WaterLedger, ErosionError> {
    let mut sim = ErosionSimulator::new(cells, width, config)?;
    if iterations == 0 {
        return Ok(WaterLedger::default());
    }

    let shape = sim.shape();
    log::debug!(
        "eroding {}x{} grid for {} ticks",
        shape.rows,
        shape.width,
        iterations
    );

    sim.run(iterations);
    sim.classify();

    let ledger = sim.ledger();
    if log::log_enabled!(log::Level::Debug) {
        let stats = GridStats::of(cells, config.water_level);
        log::debug!(
            "erosion done: rained {:.3}, evaporated {:.3}, standing {:.3}, altitude [{:.3}, {:.3}]",
            ledger.rained,
            ledger.evaporated,
            stats.total_water,
            stats.min_altitude,
            stats.max_altitude
        );
    }
    Ok(ledger)
}

/// Assigns every cell the color of its biome bucket.
pub fn classify_colors(cells: &mut [HexCell], water_level: f64) {
    for c in cells {
        c.classify(water_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::OffsetCoord;
    use crate::terrain::{generate_chunk, TerrainConfig};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn flat_grid(side: usize, altitude: f64) -> Vec<HexCell> {
        let shape = GridShape::square(side);
        (0..shape.len())
            .map(|i| {
                let mut c = HexCell::new(shape.offset_of(i));
                c.altitude = altitude;
                c
            })
            .collect()
    }

    fn random_grid(rng: &mut ChaCha8Rng, rows: usize, width: usize) -> Vec<HexCell> {
        let shape = GridShape::new(rows, width);
        (0..shape.len())
            .map(|i| {
                let mut c = HexCell::new(shape.offset_of(i));
                c.altitude = rng.gen_range(-0.5..1.5);
                c.precipitation = rng.gen_range(0.0..1.0);
                c.water = rng.gen_range(0.0..2.0);
                c.sediment = rng.gen_range(0.0..0.5);
                c
            })
            .collect()
    }

    fn sum_water(cells: &[HexCell]) -> f64 {
        cells.iter().map(|c| c.water).sum()
    }

    #[test]
    fn test_zero_iterations_is_identity() {
        let mut cells = flat_grid(3, 0.5);
        let before = cells.clone();
        erode(&mut cells, 3, 0, &ErosionConfig::default()).unwrap();
        assert_eq!(cells, before);
    }

    #[test]
    fn test_single_source_sends_a_sixth_to_each_neighbor() {
        let mut cells = flat_grid(3, 0.0);
        let centre = GridShape::square(3).index(OffsetCoord::new(1, 1));
        cells[centre].water = 1.0;

        let config = ErosionConfig {
            evaporation: 0.0,
            ..Default::default()
        };
        let mut sim = ErosionSimulator::new(&mut cells, 3, &config).unwrap();
        sim.compute_flow();
        let neighbors = sim.shape().neighbors(centre);
        assert_eq!(neighbors.len(), 6);

        for &n in neighbors.as_slice() {
            assert_eq!(sim.cells[n].incoming_water, 1.0 / 6.0);
            assert_eq!(sim.cells[n].outgoing_water, 0.0);
        }
        assert!((sim.cells[centre].outgoing_water - 1.0).abs() < 1e-12);

        sim.apply();
        for &n in neighbors.as_slice() {
            assert!((sim.cells[n].water - 1.0 / 6.0).abs() < 1e-12);
        }
        assert!(sim.cells[centre].water.abs() < 1e-12);
    }

    #[test]
    fn test_no_uphill_flow() {
        let mut cells = flat_grid(3, 1.0);
        let centre = GridShape::square(3).index(OffsetCoord::new(1, 1));
        cells[centre].altitude = 0.0;
        cells[centre].water = 0.5;

        let config = ErosionConfig::default();
        let mut sim = ErosionSimulator::new(&mut cells, 3, &config).unwrap();
        sim.compute_flow();
        assert_eq!(sim.cells[centre].outgoing_water, 0.0);
        assert!(sim.cells.iter().all(|c| c.incoming_water == 0.0));
    }

    #[test]
    fn test_sink_settles_sediment() {
        let mut cells = flat_grid(3, 1.0);
        let centre = GridShape::square(3).index(OffsetCoord::new(1, 1));
        cells[centre].altitude = 0.0;
        cells[centre].sediment = 0.4;

        let config = ErosionConfig::default();
        let mut sim = ErosionSimulator::new(&mut cells, 3, &config).unwrap();
        sim.compute_flow();
        let c = &sim.cells[centre];
        assert!((c.altitude_delta - 0.04).abs() < 1e-12);
        assert!((c.sediment_delta + 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_overloaded_flow_deposits_excess() {
        // Two cells side by side; the high one carries more sediment than
        // its outflow can hold.
        let mut cells = flat_grid(1, 0.0);
        cells.push(HexCell::new(OffsetCoord::new(0, 1)));
        cells[0].altitude = 1.0;
        cells[0].water = 0.6;
        cells[0].sediment = 0.6;

        let config = ErosionConfig::default();
        let mut sim = ErosionSimulator::new(&mut cells, 2, &config).unwrap();
        sim.compute_flow();

        let flow = 0.6 / 6.0;
        let capacity = flow * config.carrying_capacity;
        let carried = flow / 0.6 * 0.6;
        let deposit = config.deposition_rate * (carried - capacity);
        assert!((sim.cells[1].sediment_delta - capacity).abs() < 1e-12);
        assert!((sim.cells[0].altitude_delta - deposit).abs() < 1e-12);
        assert!((sim.cells[0].sediment_delta + capacity + deposit).abs() < 1e-12);
    }

    #[test]
    fn test_underloaded_flow_scours_ground() {
        let mut cells = flat_grid(1, 0.0);
        cells.push(HexCell::new(OffsetCoord::new(0, 1)));
        cells[0].altitude = 1.0;
        cells[0].water = 0.6;

        let config = ErosionConfig::default();
        let mut sim = ErosionSimulator::new(&mut cells, 2, &config).unwrap();
        sim.compute_flow();

        let eroded = config.soil_softness * 0.1 * config.carrying_capacity;
        assert!((sim.cells[0].altitude_delta + eroded).abs() < 1e-12);
        assert!((sim.cells[1].sediment_delta - eroded).abs() < 1e-12);
    }

    #[test]
    fn test_scratch_reset_after_tick() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut cells = random_grid(&mut rng, 8, 8);
        let config = ErosionConfig::default();
        let mut sim = ErosionSimulator::new(&mut cells, 8, &config).unwrap();
        for _ in 0..20 {
            sim.tick();
            assert!(sim.cells.iter().all(HexCell::scratch_is_clear));
        }
        assert_eq!(sim.tick_count(), 20);
    }

    #[test]
    fn test_non_negativity() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        for round in 0..5 {
            let rows = rng.gen_range(1..12);
            let width = rng.gen_range(1..12);
            let mut cells = random_grid(&mut rng, rows, width);
            let config = ErosionConfig {
                carrying_capacity: rng.gen_range(0.0..0.5),
                deposition_rate: rng.gen_range(0.0..=1.0),
                soil_softness: rng.gen_range(0.0..1.0),
                evaporation: rng.gen_range(0.0..=1.0),
                rain_cycle: rng.gen_range(1..20),
                ..Default::default()
            };
            let mut sim = ErosionSimulator::new(&mut cells, width, &config).unwrap();
            for _ in 0..60 {
                sim.tick();
                for c in sim.cells.iter() {
                    assert!(c.water >= 0.0, "round {}: water {}", round, c.water);
                    assert!(c.sediment >= 0.0, "round {}: sediment {}", round, c.sediment);
                    assert!(c.precipitation >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_water_mass_bookkeeping() {
        let config = ErosionConfig::default();
        let mut cells = generate_chunk((0, 0), 3, &TerrainConfig::default()).unwrap().into_cells();
        let initial = sum_water(&cells);

        let ledger = erode(&mut cells, 16, config.iterations, &config).unwrap();
        let expected = initial + ledger.rained - ledger.evaporated;
        let actual = sum_water(&cells);
        assert!(ledger.rained > 0.0);
        assert!(
            (expected - actual).abs() < 1e-6 * (1.0 + initial + ledger.rained),
            "expected {} got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_rain_cycle() {
        let mut cells = flat_grid(2, 0.5);
        for c in &mut cells {
            c.precipitation = 1.0;
        }
        let config = ErosionConfig {
            rain_cycle: 3,
            evaporation: 0.0,
            retention: 0.5,
            ..Default::default()
        };
        let mut sim = ErosionSimulator::new(&mut cells, 2, &config).unwrap();
        sim.run(7);
        // Rain on ticks 0, 3 and 6.
        assert!((sim.ledger().rained - 3.0 * 4.0 * 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_determinism() {
        let terrain = TerrainConfig::default();
        let config = ErosionConfig::default();
        let mut a = generate_chunk((2, 2), 8, &terrain).unwrap().into_cells();
        let mut b = a.clone();
        erode(&mut a, 16, 50, &config).unwrap();
        erode(&mut b, 16, 50, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_erosion_changes_terrain_and_colors() {
        let terrain = TerrainConfig::default();
        let config = ErosionConfig::default();
        let before = generate_chunk((0, 0), 42, &terrain).unwrap().into_cells();
        let mut after = before.clone();
        erode(&mut after, 16, config.iterations, &config).unwrap();

        assert!(before.iter().zip(&after).any(|(b, a)| b.altitude != a.altitude));
        for c in &after {
            assert_eq!(c.color, c.biome(config.water_level).rgb());
        }
    }

    #[test]
    fn test_rejects_bad_shape() {
        let mut cells = flat_grid(3, 0.0);
        let config = ErosionConfig::default();
        assert_eq!(
            erode(&mut cells, 4, 1, &config).unwrap_err(),
            ErosionError::GridShape { len: 9, width: 4 }
        );
        assert!(matches!(
            erode(&mut cells, 0, 1, &config),
            Err(ErosionError::GridShape { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_config() {
        let mut cells = flat_grid(2, 0.0);
        let config = ErosionConfig {
            evaporation: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            erode(&mut cells, 2, 1, &config),
            Err(ErosionError::InvalidConfiguration(_))
        ));
    }
}
