//! The orchestrator: builds the initial lattice, drives the deterministic
//! row-major sweep, and records snapshots + molar fractions as it goes.

use log::{debug, error, info};

use ca_core::species::{self, Code};
use ca_core::{CaError, EngineConfig, Grid, Ingredient, Parameters, ProgressEvent, ProgressSink, Result, Surface};

use crate::iteration_state::IterationState;
use crate::movement::MovementAnalyzer;
use crate::placement::{self, ncell};
use crate::reaction::ReactionProcessor;
use crate::rng::CaRng;
use crate::rotation::RotationManager;

/// A molar-fraction table: a header naming each column, followed by one row
/// per recorded iteration (including `t=0`).
#[derive(Debug, Clone)]
pub struct MolarFractionTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

/// Full output of a run: the grid at every iteration (including `t=0`) and
/// the accompanying molar-fraction series.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub history: Vec<Grid>,
    pub molar_fractions: MolarFractionTable,
}

pub struct CaEngine {
    height: usize,
    width: usize,
    iterations: usize,
    ingredients: Vec<Ingredient>,
    params: Parameters,
    surface: Surface,
    config: EngineConfig,
}

impl CaEngine {
    pub fn new(
        height: usize,
        width: usize,
        iterations: usize,
        ingredients: Vec<Ingredient>,
        params: Parameters,
        surface: Surface,
    ) -> Result<Self> {
        if ingredients.len() != params.species_count() {
            return Err(CaError::Validation(format!(
                "{} ingredients but parameters describe {} species",
                ingredients.len(),
                params.species_count()
            )));
        }
        Ok(Self {
            height,
            width,
            iterations,
            ingredients,
            params,
            surface,
            config: EngineConfig::default(),
        })
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn ncell(&self) -> usize {
        ncell(self.height, self.width)
    }

    /// Run the full simulation from a fresh random initial placement, seeded
    /// for reproducibility.
    pub fn run(&self, seed: u64, sink: &mut dyn ProgressSink) -> Result<RunResult> {
        let mut rng = CaRng::from_seed(seed);
        let grid = placement::place_initial_grid(
            self.height,
            self.width,
            &self.ingredients,
            &self.params,
            &mut rng,
        );
        self.run_from(grid, &mut rng, sink)
    }

    /// Run the sweep loop starting from an already-populated grid (used by
    /// tests that need a specific initial configuration).
    pub fn run_from(
        &self,
        mut grid: Grid,
        rng: &mut CaRng,
        sink: &mut dyn ProgressSink,
    ) -> Result<RunResult> {
        let rotation_mgr = RotationManager::new(&self.params);
        let reaction_processor = ReactionProcessor::new(&self.params);
        let movement_analyzer = MovementAnalyzer::new(&self.params);
        let mut state = IterationState::new();

        let mut history = Vec::with_capacity(self.iterations + 1);
        history.push(grid.clone());
        let mut molar_rows = Vec::with_capacity(self.iterations + 1);
        molar_rows.push(self.molar_fraction_row(0, &grid));

        let mut last_emitted_percent: i64 = -1;

        for n in 1..=self.iterations {
            state.clear_sweep();

            for coord in grid.iter_coords() {
                let code = grid.get(coord);
                if !species::is_occupied(code) {
                    continue;
                }

                if species::is_rotation(code) {
                    if let Some(new_code) =
                        rotation_mgr.attempt(&grid, self.surface, coord, code, rng)
                    {
                        grid.set(coord, new_code);
                        continue;
                    }
                } else if !state.is_reacted(coord) {
                    let outcome = reaction_processor
                        .process(&mut grid, self.surface, &mut state, coord, code, rng);
                    if outcome.blocks_movement() {
                        continue;
                    }
                }

                if !state.is_moved(coord)
                    && !state.is_reacted(coord)
                    && !species::is_intermediate(code)
                {
                    movement_analyzer.attempt(&mut grid, self.surface, &mut state, coord, code, rng);
                }
            }

            if let Some((a, b)) = state.first_asymmetric_pair() {
                let detail = format!("intermediate pairing {a:?} <-> {b:?} is one-sided");
                error!("invariant violated at iteration {n}, cell {a:?}: {detail}");
                return Err(CaError::InvariantViolation {
                    iteration: n,
                    row: a.0,
                    col: a.1,
                    detail,
                });
            }

            history.push(grid.clone());
            molar_rows.push(self.molar_fraction_row(n, &grid));

            let percent = (100 * n / self.iterations.max(1)) as i64;
            let should_tick = n == self.iterations
                || (n % self.config.progress_tick_stride == 0 && percent != last_emitted_percent);
            if should_tick {
                sink.emit(ProgressEvent::Tick {
                    iteration: n,
                    total: self.iterations,
                });
                last_emitted_percent = percent;
                debug!("iteration {n}/{} complete", self.iterations);
            }
        }

        sink.emit(ProgressEvent::ProcessingResults);
        info!("run complete: {} iterations over {}x{}", self.iterations, self.height, self.width);
        sink.emit(ProgressEvent::Completed);

        Ok(RunResult {
            history,
            molar_fractions: MolarFractionTable {
                header: self.molar_fraction_header(),
                rows: molar_rows,
            },
        })
    }

    fn molar_fraction_header(&self) -> Vec<String> {
        let mut header = vec!["iteration".to_string()];
        header.extend(self.ingredients.iter().map(|i| i.name.to_string()));
        header.push("intermediate".to_string());
        header
    }

    fn molar_fraction_row(&self, iteration: usize, grid: &Grid) -> Vec<f64> {
        let k = self.ingredients.len();
        let mut counts = vec![0u64; k];
        let mut intermediate_count = 0u64;

        for coord in grid.iter_coords() {
            let code: Code = grid.get(coord);
            if species::is_empty(code) {
                continue;
            } else if species::is_intermediate(code) {
                intermediate_count += 1;
            } else if species::is_rotation(code) {
                let (species_index, _) = species::rotation_parts(code);
                counts[species_index - 1] += 1;
            } else {
                counts[species::plain_species(code) - 1] += 1;
            }
        }

        let ncell = self.ncell() as f64;
        let mut row = Vec::with_capacity(k + 2);
        row.push(iteration as f64);
        row.extend(counts.iter().map(|&c| c as f64 / ncell));
        row.push(intermediate_count as f64 / ncell);
        row
    }
}
