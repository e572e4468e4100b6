use serde::{Deserialize, Serialize};

/// Summary of one evaluated generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// 1-based index of the evaluated generation.
    pub generation: u32,
    /// Mean fitness.
    pub avg_fitness: f64,
    /// Mean distance to the goal center.
    pub avg_distance: f64,
    /// Mean path length.
    pub avg_traveled: f64,
    /// Highest fitness in the generation.
    pub best_fitness: f64,
    /// Individuals that reached the goal.
    pub winners: usize,
    /// Ticks the generation ran for.
    pub ticks: usize,
}

/// Statistics for every generation of a run, oldest first.
#[derive(Debug, Clone, Default)]
pub struct FitnessHistory {
    records: Vec<GenerationStats>,
}

impl FitnessHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a generation's statistics.
    pub fn record(&mut self, stats: GenerationStats) {
        self.records.push(stats);
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[GenerationStats] {
        &self.records
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&GenerationStats> {
        self.records.last()
    }

    /// Number of recorded generations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` before the first generation is recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Percentage change of average fitness from the previous generation.
    ///
    /// `None` with fewer than two records or when the previous average is zero.
    pub fn fitness_change_percent(&self) -> Option<f64> {
        let [.., previous, current] = self.records.as_slice() else {
            return None;
        };
        if previous.avg_fitness == 0.0 {
            return None;
        }
        Some((current.avg_fitness - previous.avg_fitness) / previous.avg_fitness.abs() * 100.0)
    }

    /// The generation with the highest average fitness.
    pub fn best_generation(&self) -> Option<&GenerationStats> {
        self.records
            .iter()
            .max_by(|a, b| a.avg_fitness.total_cmp(&b.avg_fitness))
    }

    /// Average fitness of every generation, oldest first.
    pub fn avg_fitness_series(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.avg_fitness).collect()
    }
}
