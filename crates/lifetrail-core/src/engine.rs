//! Simulation engine - the controller a host loop drives once per frame

use rand::rngs::StdRng;
use rand::SeedableRng;

use lifetrail_logic::clock::{ClockState, SimulationClock, StepPreset};
use lifetrail_logic::error::{ConfigError, LifeError};
use lifetrail_logic::grid::ensure_shape;
use lifetrail_logic::overlay::{check_overlay, HistoryOverlay, LayerView, Overlay, OverlayKind};
use lifetrail_logic::rule::{step, Conway, Rule};
use lifetrail_logic::seed::{seed, seed_like};
use lifetrail_logic::{Cell, Grid};

use crate::config::SimConfig;

/// Owns the primary grid, its trail overlay, and the step clock.
pub struct SimulationEngine<R: Rule = Conway> {
    config: SimConfig,
    rule: R,
    /// Committed generation, read by the renderer
    primary: Grid<Cell>,
    overlay: Overlay,
    clock: SimulationClock,
    rng: StdRng,
    generation: u64,
}

impl SimulationEngine<Conway> {
    /// Create an engine with a freshly seeded world under the Conway rule.
    pub fn new(config: SimConfig) -> Result<Self, LifeError> {
        Self::with_rule(config, Conway)
    }
}

impl<R: Rule> SimulationEngine<R> {
    /// Create an engine with a freshly seeded world under `rule`.
    pub fn with_rule(config: SimConfig, rule: R) -> Result<Self, LifeError> {
        config.validate()?;
        let mut rng = rng_for(&config);
        let primary = seed(config.width, config.height, config.alive_probability, &mut rng)?;
        let overlay = Overlay::new(config.overlay, config.width, config.height)?;
        Self::assemble(config, rule, primary, overlay, rng)
    }

    /// Create an engine from an existing world and overlay.
    ///
    /// Both must match the configured dimensions.
    pub fn from_parts(
        config: SimConfig,
        rule: R,
        primary: Grid<Cell>,
        overlay: Overlay,
    ) -> Result<Self, LifeError> {
        config.validate()?;
        ensure_shape((config.width, config.height), primary.dimensions())?;
        let rng = rng_for(&config);
        Self::assemble(config, rule, primary, overlay, rng)
    }

    fn assemble(
        mut config: SimConfig,
        rule: R,
        primary: Grid<Cell>,
        overlay: Overlay,
        rng: StdRng,
    ) -> Result<Self, LifeError> {
        check_overlay(&primary, &overlay)?;
        config.overlay = overlay.kind();
        log::info!(
            "Engine created: {}x{} grid, {:?} overlay, {} alive, step {:.2}s",
            config.width,
            config.height,
            config.overlay,
            primary.population(),
            config.step_duration
        );
        Ok(Self {
            clock: SimulationClock::new(config.step_duration),
            config,
            rule,
            primary,
            overlay,
            rng,
            generation: 0,
        })
    }

    /// Feed one host frame. Returns `true` if a generation was committed.
    pub fn advance(&mut self, elapsed_seconds: f64) -> bool {
        match self.clock.tick(elapsed_seconds) {
            ClockState::Ready => {
                self.commit_generation();
                true
            }
            ClockState::Idle => false,
        }
    }

    /// Commit one generation now, bypassing the clock.
    pub fn step_now(&mut self) {
        self.commit_generation();
    }

    fn commit_generation(&mut self) {
        // Compute into a fresh grid so readers never see a partial step
        let next = step(&self.primary, &self.rule);
        self.overlay.observe(&self.primary, &next);
        self.primary = next;
        self.generation += 1;
        log::trace!(
            "Generation {}: {} alive",
            self.generation,
            self.primary.population()
        );
    }

    /// Reseed the world and blank every overlay layer.
    pub fn reset(&mut self) {
        self.primary = seed_like(&self.primary, self.config.alive_probability, &mut self.rng);
        self.overlay.reset();
        log::info!(
            "World reset: {} alive, {} generations discarded",
            self.primary.population(),
            self.generation
        );
        self.generation = 0;
    }

    /// Select the step duration. Zero or negative pauses the simulation.
    pub fn set_step_duration(&mut self, seconds: f64) -> Result<(), ConfigError> {
        self.clock.set_step_duration(seconds)?;
        log::debug!("Step duration set to {:.2}s", seconds);
        Ok(())
    }

    pub fn select_preset(&mut self, preset: StepPreset) {
        self.clock.select_preset(preset);
        log::debug!(
            "Step preset {} selected ({:.2}s)",
            preset.selector(),
            preset.seconds()
        );
    }

    /// Handle a selector key (`'1'..='5'`). Other keys are ignored.
    pub fn handle_selector(&mut self, key: char) -> Option<StepPreset> {
        let preset = StepPreset::from_selector(key)?;
        self.select_preset(preset);
        Some(preset)
    }

    pub fn pause(&mut self) {
        self.clock.pause();
        log::debug!("Simulation paused");
    }

    /// Committed primary grid.
    pub fn current_primary_grid(&self) -> &Grid<Cell> {
        &self.primary
    }

    /// Overlay layer `index`, newest first.
    pub fn current_history_layer(&self, index: usize) -> Option<LayerView<'_>> {
        self.overlay.layer(index)
    }

    pub fn history_layer_count(&self) -> usize {
        self.overlay.layer_count()
    }

    pub fn overlay_kind(&self) -> OverlayKind {
        self.overlay.kind()
    }

    /// Generations committed since construction or the last reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Alive cells in the committed grid.
    pub fn population(&self) -> usize {
        self.primary.population()
    }

    pub fn step_duration(&self) -> f64 {
        self.clock.step_duration()
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

fn rng_for(config: &SimConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
