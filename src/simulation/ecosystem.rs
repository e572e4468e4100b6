//! Generation orchestrator.
//!
//! The ecosystem owns the population and drives it through the generation
//! cycle:
//! - `Running`: every external tick steps the individuals that are still
//!   moving, in parallel with rayon
//! - `Evaluating`: the generation ended because nobody is moving or the move
//!   limit passed; waiting for [`Ecosystem::evaluate_and_evolve`]
//! - `Finished`: the configured number of generations has been simulated
//!
//! Scoring and replacement happen inside one `&mut self` call, so no
//! individual can be observed half-way through a generation change.

use rand::Rng;
use tracing::debug;

use super::arena::Arena;
use super::error::{ConfigError, SimulationError};
use super::evolution::EvolutionEngine;
use super::history::{FitnessHistory, GenerationStats};
use super::params::Params;
use super::population::Population;

/// Where the orchestrator is in the generation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Simulating; `tick` is the next tick to run.
    Running {
        /// Generation-relative tick counter.
        tick: usize,
    },
    /// The generation has terminated and awaits scoring.
    Evaluating {
        /// Ticks the generation ran for.
        ticks: usize,
    },
    /// No further generations will run.
    Finished,
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// The generation has ended and is ready for evaluation.
    pub terminated: bool,
    /// Tick counter after this tick.
    pub tick: usize,
    /// Individuals still moving.
    pub running: usize,
}

/// The simulation: arena, population, and the evolutionary loop around them.
#[derive(Debug, Clone)]
pub struct Ecosystem {
    params: Params,
    arena: Arena,
    population: Population,
    engine: EvolutionEngine,
    phase: Phase,
    generation: u32,
    history: FitnessHistory,
}

impl Ecosystem {
    /// Creates an ecosystem with a random first generation.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from the parameters or the arena.
    pub fn new<R: Rng + ?Sized>(
        params: Params,
        arena: Arena,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        arena.validate()?;

        let population = Population::random(
            params.population_size,
            params.chain_length,
            &arena.start_position(),
            params.individual_size,
            rng,
        )?;

        Ok(Self {
            engine: EvolutionEngine::new(&params),
            params,
            arena,
            population,
            phase: Phase::Running { tick: 0 },
            generation: 1,
            history: FitnessHistory::new(),
        })
    }

    /// Advances the current generation by one tick.
    ///
    /// When the generation terminates, individuals that are still moving are
    /// retired. Ticking a terminated generation reports it as terminated
    /// again without changing anything.
    pub fn tick(&mut self) -> Result<TickResult, SimulationError> {
        let tick = match self.phase {
            Phase::Finished => return Err(SimulationError::Finished(self.params.max_generations)),
            Phase::Evaluating { ticks } => {
                return Ok(TickResult {
                    terminated: true,
                    tick: ticks,
                    running: 0,
                });
            }
            Phase::Running { tick } => tick,
        };

        self.population.step(tick, &self.arena);

        let next = tick + 1;
        let terminated = self.population.running() == 0 || next > self.arena.move_limit;

        if terminated {
            self.population.retire(tick);
            self.phase = Phase::Evaluating { ticks: next };
        } else {
            self.phase = Phase::Running { tick: next };
        }

        Ok(TickResult {
            terminated,
            tick: next,
            running: self.population.running(),
        })
    }

    /// Scores the terminated generation and replaces it with offspring.
    ///
    /// # Errors
    ///
    /// [`SimulationError::GenerationRunning`] before the generation has
    /// terminated, [`SimulationError::Finished`] after the last generation.
    pub fn evaluate_and_evolve<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<GenerationStats, SimulationError> {
        let ticks = match self.phase {
            Phase::Evaluating { ticks } => ticks,
            Phase::Running { tick } => return Err(SimulationError::GenerationRunning(tick)),
            Phase::Finished => return Err(SimulationError::Finished(self.params.max_generations)),
        };

        self.population
            .calculate_fitness(&self.arena, self.params.alive_bonus);

        let stats = GenerationStats {
            generation: self.generation,
            avg_fitness: self.population.avg_fitness(),
            avg_distance: self.population.avg_distance(),
            avg_traveled: self.population.avg_traveled(),
            best_fitness: self
                .population
                .best()
                .map_or(0.0, |best| best.fitness()),
            winners: self.population.winners(),
            ticks,
        };
        debug!(?stats, "generation evaluated");
        self.history.record(stats.clone());

        self.population = self.engine.evolve(
            &self.population,
            &self.arena.start_position(),
            self.params.individual_size,
            rng,
        );

        self.generation += 1;
        self.phase = if self.generation > self.params.max_generations {
            Phase::Finished
        } else {
            Phase::Running { tick: 0 }
        };

        Ok(stats)
    }

    /// Runs one tick and evolves the population if the generation ended.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Option<GenerationStats>, SimulationError> {
        if self.tick()?.terminated {
            self.evaluate_and_evolve(rng).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Ticks until the current generation terminates, then evolves it.
    pub fn run_generation<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<GenerationStats, SimulationError> {
        while !self.tick()?.terminated {}
        self.evaluate_and_evolve(rng)
    }

    /// The current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// The arena the population runs in.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Run parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Current phase of the generation cycle.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 1-based index of the current generation.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Statistics of every evaluated generation.
    pub fn history(&self) -> &FitnessHistory {
        &self.history
    }

    /// Whether the last generation has been evaluated.
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }
}
