//! Generation replacement: roulette-wheel selection, pairwise crossover, and
//! mutation.
//!
//! The next population is built entirely from offspring. Nothing is carried
//! over unchanged, so the best individual of a generation survives only if
//! selection happens to pick it and crossover and mutation leave it intact.

use ndarray::Array1;
use rand::Rng;
use tracing::{debug, warn};

use super::dna::{self, GeneChain};
use super::params::Params;
use super::population::Population;

/// How often a parent pair with identical genomes is redrawn before it is
/// bred anyway.
pub const MAX_PARENT_REDRAWS: usize = 32;

/// Turns fitness values into selection probabilities that sum to one.
///
/// Non-finite values count as zero. When any value is negative, or the total
/// is not positive and finite, every value is shifted up by the minimum first.
/// If the shifted total is still zero every individual is equally likely.
pub fn selection_probabilities(fitness: &[f64]) -> Vec<f64> {
    if fitness.is_empty() {
        return Vec::new();
    }

    let non_finite = fitness.iter().filter(|f| !f.is_finite()).count();
    if non_finite > 0 {
        warn!(non_finite, "non-finite fitness treated as zero");
    }
    let fitness: Vec<f64> = fitness
        .iter()
        .map(|&f| if f.is_finite() { f } else { 0.0 })
        .collect();

    let total: f64 = fitness.iter().sum();
    let min = fitness.iter().copied().fold(f64::INFINITY, f64::min);

    if min >= 0.0 && total > 0.0 && total.is_finite() {
        return fitness.iter().map(|f| f / total).collect();
    }

    let shifted: Vec<f64> = fitness.iter().map(|f| f - min).collect();
    let shifted_total: f64 = shifted.iter().sum();
    if shifted_total > 0.0 && shifted_total.is_finite() {
        warn!(total, min, "fitness not strictly positive, shifting before selection");
        shifted.iter().map(|f| f / shifted_total).collect()
    } else {
        warn!(total, "fitness carries no signal, selecting uniformly");
        let uniform = 1.0 / fitness.len() as f64;
        vec![uniform; fitness.len()]
    }
}

/// Walks the cumulative distribution and returns the first index whose
/// running sum reaches `draw`.
///
/// Rounding can leave the final running sum just below one; draws past it
/// select the last index.
pub fn spin(probabilities: &[f64], draw: f64) -> usize {
    let mut cumulative = 0.0;
    for (index, probability) in probabilities.iter().enumerate() {
        cumulative += probability;
        if draw <= cumulative {
            return index;
        }
    }
    probabilities.len().saturating_sub(1)
}

/// Drives selection, crossover, and mutation with the configured rates.
#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    crossover_rate: f64,
    mutation_rate: f64,
}

impl EvolutionEngine {
    /// Creates an engine from the run parameters.
    pub fn new(params: &Params) -> Self {
        Self {
            crossover_rate: params.crossover_rate,
            mutation_rate: params.mutation_rate,
        }
    }

    /// Draws a breeding pool the size of the population.
    ///
    /// Each pick copies the chosen individual's gene chain, so later
    /// mutation of one copy never affects another.
    pub fn select<R: Rng + ?Sized>(&self, population: &Population, rng: &mut R) -> Vec<GeneChain> {
        let probabilities = selection_probabilities(&population.fitness_values());
        let individuals = population.individuals();

        (0..individuals.len())
            .map(|_| {
                let index = spin(&probabilities, rng.random::<f64>());
                individuals[index].genes().clone()
            })
            .collect()
    }

    /// Breeds offspring pairs until the new pool matches the old one in size.
    ///
    /// Parents are drawn uniformly from the pool. Identical genomes are
    /// redrawn up to [`MAX_PARENT_REDRAWS`] times; a pool that has collapsed
    /// to a single genome is bred as drawn.
    pub fn breed<R: Rng + ?Sized>(&self, pool: &[GeneChain], rng: &mut R) -> Vec<GeneChain> {
        let mut offspring = Vec::with_capacity(pool.len());
        if pool.is_empty() {
            return offspring;
        }

        while offspring.len() < pool.len() {
            let parent_a = &pool[rng.random_range(0..pool.len())];
            let mut parent_b = &pool[rng.random_range(0..pool.len())];

            let mut redraws = 0;
            while parent_a == parent_b && redraws < MAX_PARENT_REDRAWS {
                parent_b = &pool[rng.random_range(0..pool.len())];
                redraws += 1;
            }
            if parent_a == parent_b {
                debug!(redraws, "breeding identical parents");
            }

            let (child_a, child_b) = dna::crossover(parent_a, parent_b, self.crossover_rate, rng);
            offspring.push(child_a);
            if offspring.len() < pool.len() {
                offspring.push(child_b);
            }
        }

        offspring
    }

    /// Applies one mutation chance to every chain.
    ///
    /// # Returns
    ///
    /// The number of chains that were mutated.
    pub fn mutate<R: Rng + ?Sized>(&self, chains: &mut [GeneChain], rng: &mut R) -> usize {
        let mut mutated = 0;
        for chain in chains.iter_mut() {
            if dna::mutate(chain, self.mutation_rate, rng) {
                mutated += 1;
            }
        }
        mutated
    }

    /// Builds the next generation from a scored population.
    ///
    /// # Arguments
    ///
    /// * `population` - The generation that just finished, with fitness computed
    /// * `start` - Start position for every offspring
    /// * `individual_size` - Bounding square side for every offspring
    /// * `rng` - Random number source
    pub fn evolve<R: Rng + ?Sized>(
        &self,
        population: &Population,
        start: &Array1<f32>,
        individual_size: f32,
        rng: &mut R,
    ) -> Population {
        let pool = self.select(population, rng);
        let mut offspring = self.breed(&pool, rng);
        let mutated = self.mutate(&mut offspring, rng);
        debug!(offspring = offspring.len(), mutated, "bred next generation");
        Population::fresh(offspring, start, individual_size)
    }
}
