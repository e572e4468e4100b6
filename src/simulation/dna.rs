//! Gene chains and the genetic operators that act on them.
//!
//! A gene chain is an individual's complete movement plan: one acceleration
//! vector per tick, stored as the rows of an `L x 2` array.

use ndarray::{Array1, Array2, ArrayView1, s};
use rand::Rng;

/// Number of genes in a chain when the configuration does not say otherwise.
pub const DEFAULT_CHAIN_LENGTH: usize = 1000;

/// Factor applied to a single gene component by a mutation event.
pub const MUTATION_FACTOR: f32 = 1.01;

/// Which component of a gene a mutation scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    /// Horizontal acceleration.
    X,
    /// Vertical acceleration.
    Y,
}

impl Component {
    fn column(self) -> usize {
        match self {
            Component::X => 0,
            Component::Y => 1,
        }
    }
}

/// A fixed-length sequence of acceleration vectors.
///
/// Equality is element-wise over every gene, which is what duplicate-parent
/// detection during breeding relies on.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneChain {
    genes: Array2<f32>,
}

impl GeneChain {
    /// Creates a chain of unit vectors pointing at random whole-degree angles.
    pub fn random<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Self {
        let mut genes = Array2::zeros((length, 2));
        for mut gene in genes.rows_mut() {
            let angle = f32::from(rng.random_range(0..360_u16)).to_radians();
            gene[0] = angle.cos();
            gene[1] = angle.sin();
        }
        Self { genes }
    }

    /// Creates a chain from explicit `(x, y)` accelerations.
    pub fn from_vectors(vectors: &[(f32, f32)]) -> Self {
        let mut genes = Array2::zeros((vectors.len(), 2));
        for (mut gene, &(x, y)) in genes.rows_mut().into_iter().zip(vectors) {
            gene[0] = x;
            gene[1] = y;
        }
        Self { genes }
    }

    /// Creates a chain of zero vectors.
    pub fn zeros(length: usize) -> Self {
        Self {
            genes: Array2::zeros((length, 2)),
        }
    }

    /// Number of genes in the chain.
    pub fn len(&self) -> usize {
        self.genes.nrows()
    }

    /// Returns `true` if the chain holds no genes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the gene at `index`, if it exists.
    pub fn gene(&self, index: usize) -> Option<ArrayView1<'_, f32>> {
        (index < self.len()).then(|| self.genes.row(index))
    }

    /// Returns the underlying `L x 2` array.
    pub fn as_array(&self) -> &Array2<f32> {
        &self.genes
    }

    /// Acceleration applied on a given tick.
    ///
    /// Tick `t > 0` reads gene `t - 1` and tick 0 reads gene 0, so the first
    /// gene drives two consecutive ticks. Ticks past the end of the chain
    /// yield the zero vector.
    pub fn acceleration_at(&self, tick: usize) -> Array1<f32> {
        let index = tick.saturating_sub(1);
        match self.gene(index) {
            Some(gene) => gene.to_owned(),
            None => Array1::zeros(2),
        }
    }

    /// Overwrites every gene after `frame` with the zero vector.
    pub fn freeze_after(&mut self, frame: usize) {
        let start = frame.saturating_add(1).min(self.len());
        self.genes.slice_mut(s![start.., ..]).fill(0.0);
    }

    /// Multiplies one component of one gene by `factor`.
    ///
    /// Out-of-range indices are ignored.
    pub fn scale_component(&mut self, index: usize, component: Component, factor: f32) {
        if index < self.len() {
            self.genes[[index, component.column()]] *= factor;
        }
    }

    /// Single-point splice at `split`.
    ///
    /// The first child takes `other`'s genes before `split` and `self`'s from
    /// `split` on; the second child is the complementary assignment.
    pub fn splice(&self, other: &Self, split: usize) -> (Self, Self) {
        debug_assert_eq!(self.len(), other.len());
        let split = split.min(self.len()).min(other.len());

        let mut first = self.genes.clone();
        first
            .slice_mut(s![..split, ..])
            .assign(&other.genes.slice(s![..split, ..]));

        let mut second = other.genes.clone();
        second
            .slice_mut(s![..split, ..])
            .assign(&self.genes.slice(s![..split, ..]));

        (Self { genes: first }, Self { genes: second })
    }
}

/// Performs single-point crossover between two parent chains.
///
/// # Arguments
///
/// * `parent_a` - First parent; its suffix goes to the first child
/// * `parent_b` - Second parent; its prefix goes to the first child
/// * `crossover_rate` - Probability of recombining instead of copying
/// * `rng` - Random number source
///
/// # Returns
///
/// Two independently allocated offspring chains. Without recombination (or
/// when the chains are too short to split) they are copies of the parents.
pub fn crossover<R: Rng + ?Sized>(
    parent_a: &GeneChain,
    parent_b: &GeneChain,
    crossover_rate: f64,
    rng: &mut R,
) -> (GeneChain, GeneChain) {
    let length = parent_a.len().min(parent_b.len());
    if length >= 2 && rng.random::<f64>() < crossover_rate {
        let split = rng.random_range(1..length);
        parent_a.splice(parent_b, split)
    } else {
        (parent_a.clone(), parent_b.clone())
    }
}

/// Mutates a chain in place with multiplicative drift.
///
/// With probability `mutation_rate` one random gene has its x or y component
/// multiplied by [`MUTATION_FACTOR`].
///
/// # Returns
///
/// `true` if a gene was changed.
pub fn mutate<R: Rng + ?Sized>(chain: &mut GeneChain, mutation_rate: f64, rng: &mut R) -> bool {
    if chain.is_empty() || rng.random::<f64>() >= mutation_rate {
        return false;
    }

    let index = rng.random_range(0..chain.len());
    let component = if rng.random_bool(0.5) {
        Component::Y
    } else {
        Component::X
    };
    chain.scale_component(index, component, MUTATION_FACTOR);
    true
}
