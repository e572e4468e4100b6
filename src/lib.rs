//! # Evo Maze - Evolving Paths Through Obstacle Arenas
//!
//! A population of point agents learns to cross a 2D arena and reach a goal
//! square. Each agent follows a fixed plan of per-tick accelerations, and a
//! generational genetic algorithm evolves those plans.
//!
//! ## Features
//!
//! - Per-tick physics with goal detection and wall collisions
//! - Distance-based fitness with an arrival-speed bonus
//! - Roulette-wheel selection, single-point crossover, and drift mutation
//! - Full generational replacement (no elitism)
//! - Parallel per-individual updates with rayon
//! - Built-in level catalogue and JSON configuration
//!
//! ## Core Modules
//!
//! - [`simulation::ecosystem`] - Generation orchestrator
//! - [`simulation::individual`] - Agent state, physics, and fitness
//! - [`simulation::evolution`] - Selection, crossover, and mutation
//! - [`simulation::dna`] - Gene chains
//! - [`simulation::arena`] - Bounds, goal, and obstacles

/// Core simulation logic and data structures.
pub mod simulation {
    /// Bounds, goal, obstacles, and move limit of a level.
    pub mod arena;
    /// Gene chains and the crossover and mutation operators.
    pub mod dna;
    /// Generation orchestrator and its state machine.
    pub mod ecosystem;
    /// Configuration and orchestration errors.
    pub mod error;
    /// Selection, breeding, and generation replacement.
    pub mod evolution;
    /// Geometric utility functions for overlap and distance calculations.
    pub mod geometric_utils;
    /// Per-generation statistics.
    pub mod history;
    /// Individual state, physics, and fitness.
    pub mod individual;
    /// Built-in levels.
    pub mod levels;
    /// Genetic algorithm parameters.
    pub mod params;
    /// Fixed-size collection of individuals.
    pub mod population;
}
