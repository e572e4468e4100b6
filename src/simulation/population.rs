//! Fixed-size collection of individuals with per-generation averages.

use ndarray::Array1;
use rand::Rng;
use rayon::prelude::*;

use super::arena::Arena;
use super::dna::GeneChain;
use super::error::ConfigError;
use super::individual::Individual;

/// One generation's individuals, in a fixed order.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
    avg_fitness: f64,
    avg_distance: f64,
    avg_traveled: f64,
}

impl Population {
    /// Creates a population with random gene chains.
    ///
    /// # Arguments
    ///
    /// * `size` - Number of individuals; must be even and positive
    /// * `chain_length` - Genes per individual; must be positive
    /// * `start` - Start position shared by every individual
    /// * `individual_size` - Side length of each bounding square
    /// * `rng` - Random number source
    pub fn random<R: Rng + ?Sized>(
        size: usize,
        chain_length: usize,
        start: &Array1<f32>,
        individual_size: f32,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        if chain_length == 0 {
            return Err(ConfigError::EmptyGeneChain);
        }
        let chains = (0..size)
            .map(|_| GeneChain::random(chain_length, rng))
            .collect();
        Self::from_chains(chains, start, individual_size)
    }

    /// Creates a population of fresh individuals from existing gene chains.
    pub fn from_chains(
        chains: Vec<GeneChain>,
        start: &Array1<f32>,
        individual_size: f32,
    ) -> Result<Self, ConfigError> {
        let population = Self::fresh(chains, start, individual_size);
        Self::from_individuals(population.individuals)
    }

    /// Builds fresh individuals without validation. Callers guarantee an
    /// even, non-empty set of non-empty chains.
    pub(crate) fn fresh(chains: Vec<GeneChain>, start: &Array1<f32>, individual_size: f32) -> Self {
        let individuals = chains
            .into_iter()
            .map(|genes| Individual::new(genes, start.clone(), individual_size))
            .collect();
        Self {
            individuals,
            avg_fitness: 0.0,
            avg_distance: 0.0,
            avg_traveled: 0.0,
        }
    }

    /// Wraps an existing set of individuals.
    pub fn from_individuals(individuals: Vec<Individual>) -> Result<Self, ConfigError> {
        if individuals.is_empty() {
            return Err(ConfigError::EmptyPopulation);
        }
        if individuals.len() % 2 != 0 {
            return Err(ConfigError::OddPopulation(individuals.len()));
        }
        if individuals.iter().any(|individual| individual.genes().is_empty()) {
            return Err(ConfigError::EmptyGeneChain);
        }
        Ok(Self {
            individuals,
            avg_fitness: 0.0,
            avg_distance: 0.0,
            avg_traveled: 0.0,
        })
    }

    /// Steps every running individual in parallel.
    pub fn step(&mut self, tick: usize, arena: &Arena) {
        self.individuals
            .par_iter_mut()
            .filter(|individual| individual.is_running())
            .for_each(|individual| individual.step(tick, arena));
    }

    /// Stops every individual that is still running.
    pub fn retire(&mut self, tick: usize) {
        for individual in &mut self.individuals {
            individual.retire(tick);
        }
    }

    /// Scores every individual in parallel and recomputes the averages.
    pub fn calculate_fitness(&mut self, arena: &Arena, alive_bonus: bool) {
        self.individuals.par_iter_mut().for_each(|individual| {
            individual.calculate_fitness(arena, alive_bonus);
        });

        let n = self.individuals.len() as f64;
        self.avg_fitness = self.individuals.iter().map(Individual::fitness).sum::<f64>() / n;
        self.avg_distance = self
            .individuals
            .iter()
            .map(Individual::distance_to_goal)
            .sum::<f64>()
            / n;
        self.avg_traveled = self
            .individuals
            .iter()
            .map(|individual| f64::from(individual.traveled()))
            .sum::<f64>()
            / n;
    }

    /// Number of individuals still running.
    pub fn running(&self) -> usize {
        self.individuals.iter().filter(|i| i.is_running()).count()
    }

    /// Number of individuals that reached the goal.
    pub fn winners(&self) -> usize {
        self.individuals.iter().filter(|i| i.won()).count()
    }

    /// The individual with the highest fitness from the last scoring.
    pub fn best(&self) -> Option<&Individual> {
        self.individuals
            .iter()
            .max_by(|a, b| a.fitness().total_cmp(&b.fitness()))
    }

    /// Fitness values in population order.
    pub fn fitness_values(&self) -> Vec<f64> {
        self.individuals.iter().map(Individual::fitness).collect()
    }

    /// All individuals in order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Always `false` for a constructed population.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Average fitness from the last scoring.
    pub fn avg_fitness(&self) -> f64 {
        self.avg_fitness
    }

    /// Average distance to the goal from the last scoring.
    pub fn avg_distance(&self) -> f64 {
        self.avg_distance
    }

    /// Average path length from the last scoring.
    pub fn avg_traveled(&self) -> f64 {
        self.avg_traveled
    }
}
