//! Error types for configuration and orchestration.

use thiserror::Error;

/// Errors raised while building a population, arena, or parameter set.
///
/// All of these are detected before the first tick runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The population must contain at least one pair of individuals.
    #[error("population size must be positive")]
    EmptyPopulation,
    /// Offspring are produced in pairs, so the population size must be even.
    #[error("population size {0} must be even")]
    OddPopulation(usize),
    /// Gene chains need at least one acceleration vector.
    #[error("gene chain length must be positive")]
    EmptyGeneChain,
    /// A generation needs at least one tick.
    #[error("move limit must be positive")]
    ZeroMoveLimit,
    /// Arena width and height must both be positive.
    #[error("arena dimensions {width}x{height} must be positive")]
    InvalidArena {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// A probability parameter fell outside [0, 1].
    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidRate {
        /// Name of the offending parameter.
        name: &'static str,
        /// Configured value.
        value: f64,
    },
    /// The run needs at least one generation.
    #[error("maximum generation count must be positive")]
    ZeroGenerations,
    /// Individuals need a positive bounding square.
    #[error("individual size must be positive, got {0}")]
    InvalidIndividualSize(f32),
    /// No built-in level has this number.
    #[error("unknown level {0}")]
    UnknownLevel(u32),
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid JSON for the expected shape.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised when the orchestrator is driven out of order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// The configured number of generations has been simulated.
    #[error("maximum generation count {0} reached")]
    Finished(u32),
    /// Evaluation was requested before the generation terminated.
    #[error("generation is still running at tick {0}")]
    GenerationRunning(usize),
}
