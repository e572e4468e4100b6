use serde::{Deserialize, Serialize};

use super::dna::DEFAULT_CHAIN_LENGTH;
use super::error::ConfigError;

/// Genetic algorithm parameters, fixed for the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Number of individuals per generation. Must be even.
    pub population_size: usize,
    /// Number of acceleration vectors in each gene chain.
    pub chain_length: usize,
    /// Probability that an offspring receives one mutation.
    pub mutation_rate: f64,
    /// Probability that a parent pair recombines instead of being copied.
    pub crossover_rate: f64,
    /// Generations to simulate before the run finishes.
    pub max_generations: u32,
    /// Side length of an individual's bounding square.
    pub individual_size: f32,
    /// Multiply the fitness of individuals that neither crashed nor won by 1.5.
    pub alive_bonus: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            population_size: 100,
            chain_length: DEFAULT_CHAIN_LENGTH,
            mutation_rate: 0.1,
            crossover_rate: 0.7,
            max_generations: 100,
            individual_size: 5.0,
            alive_bonus: false,
        }
    }
}

impl Params {
    /// Checks every parameter against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.population_size % 2 != 0 {
            return Err(ConfigError::OddPopulation(self.population_size));
        }
        if self.chain_length == 0 {
            return Err(ConfigError::EmptyGeneChain);
        }
        check_rate("mutation_rate", self.mutation_rate)?;
        check_rate("crossover_rate", self.crossover_rate)?;
        if self.max_generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if !(self.individual_size > 0.0) {
            return Err(ConfigError::InvalidIndividualSize(self.individual_size));
        }
        Ok(())
    }

    /// Loads parameters from a JSON file. Missing fields take their defaults.
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }

    /// Saves parameters to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name, value })
    }
}
