//! Individual state, per-tick physics, and fitness scoring.

use geo::Rect;
use ndarray::Array1;
use tracing::debug;

use super::arena::Arena;
use super::dna::GeneChain;
use super::geometric_utils::{bounding_square, magnitude, point_distance, zero_vector};

/// Fitness multiplier for individuals that neither crashed nor won.
pub const ALIVE_BONUS: f64 = 1.5;

/// A point agent following the movement plan in its gene chain.
///
/// State is only changed by [`Individual::step`], [`Individual::retire`] and
/// [`Individual::calculate_fitness`]; everything else is read-only.
#[derive(Debug, Clone)]
pub struct Individual {
    pos: Array1<f32>,
    vel: Array1<f32>,
    acc: Array1<f32>,
    size: f32,
    is_alive: bool,
    won: bool,
    crashed: bool,
    frames_used: usize,
    traveled: f32,
    distance_to_goal: f64,
    fitness: f64,
    genes: GeneChain,
}

impl Individual {
    /// Creates a living individual at `start` with zeroed motion state.
    ///
    /// # Arguments
    ///
    /// * `genes` - Movement plan, owned by the new individual
    /// * `start` - Top-left corner of the bounding square
    /// * `size` - Side length of the bounding square
    pub fn new(genes: GeneChain, start: Array1<f32>, size: f32) -> Self {
        Self {
            pos: start,
            vel: zero_vector(),
            acc: zero_vector(),
            size,
            is_alive: true,
            won: false,
            crashed: false,
            frames_used: 0,
            traveled: 0.0,
            distance_to_goal: 0.0,
            fitness: 0.0,
            genes,
        }
    }

    /// Advances the individual by one tick.
    ///
    /// Integrates the tick's acceleration, then tests for the goal and for
    /// collisions against the current arena. Winners never move again and
    /// keep the frame they arrived on; other dead individuals only record
    /// the tick.
    pub fn step(&mut self, tick: usize, arena: &Arena) {
        if self.won {
            return;
        }
        if !self.is_alive {
            self.frames_used = tick;
            return;
        }

        self.acc = self.genes.acceleration_at(tick);
        self.vel += &self.acc;
        self.pos += &self.vel;
        self.traveled += magnitude(&self.vel);

        let bounds = self.bounds();

        if arena.reaches_goal(&bounds) {
            self.reach_goal(tick);
        }

        if arena.collides(&bounds) {
            self.is_alive = false;
            if !self.won {
                self.crashed = true;
            }
        }
    }

    fn reach_goal(&mut self, tick: usize) {
        self.won = true;
        self.is_alive = false;
        self.frames_used = tick;
        self.vel.fill(0.0);
        self.acc.fill(0.0);
        // Later genes would never run; clear them so offspring inherit a
        // plan that stops at the goal.
        self.genes.freeze_after(tick);
        debug!(tick, traveled = self.traveled, "individual reached the goal");
    }

    /// Stops an individual that was still moving when its generation ended.
    pub fn retire(&mut self, tick: usize) {
        if self.is_alive {
            self.is_alive = false;
            self.frames_used = tick;
        }
    }

    /// Scores the individual against the goal.
    ///
    /// # Arguments
    ///
    /// * `arena` - Supplies the goal, the width used for normalization, and
    ///   the move limit used for the arrival bonus
    /// * `alive_bonus` - Whether survivors get the [`ALIVE_BONUS`] multiplier
    ///
    /// # Returns
    ///
    /// The new fitness. Winners are multiplied by `2 * (move_limit / frames_used)`
    /// using integer division.
    pub fn calculate_fitness(&mut self, arena: &Arena, alive_bonus: bool) -> f64 {
        self.distance_to_goal = f64::from(point_distance(&self.pos, arena.goal_center()));
        self.fitness = 1.0 - self.distance_to_goal / f64::from(arena.width);

        if alive_bonus && self.survived() {
            self.fitness *= ALIVE_BONUS;
        }

        if self.won {
            let efficiency = arena.move_limit / self.frames_used.max(1);
            self.fitness *= 2.0 * efficiency as f64;
        }

        self.fitness
    }

    /// The individual's bounding square.
    pub fn bounds(&self) -> Rect<f32> {
        bounding_square(&self.pos, self.size)
    }

    /// Top-left corner of the bounding square.
    pub fn pos(&self) -> &Array1<f32> {
        &self.pos
    }

    /// Current velocity.
    pub fn vel(&self) -> &Array1<f32> {
        &self.vel
    }

    /// Acceleration applied on the last tick.
    pub fn acc(&self) -> &Array1<f32> {
        &self.acc
    }

    /// Side length of the bounding square.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Whether the individual is still moving.
    pub fn is_alive(&self) -> bool {
        self.is_alive
    }

    /// Whether the individual reached the goal.
    pub fn won(&self) -> bool {
        self.won
    }

    /// Whether the individual hit a wall or left the arena.
    pub fn crashed(&self) -> bool {
        self.crashed
    }

    /// Neither crashed nor won.
    pub fn survived(&self) -> bool {
        !self.crashed && !self.won
    }

    /// Still alive and not yet at the goal.
    pub fn is_running(&self) -> bool {
        self.is_alive && !self.won
    }

    /// Tick on which the individual won, died, or was last seen.
    pub fn frames_used(&self) -> usize {
        self.frames_used
    }

    /// Total path length.
    pub fn traveled(&self) -> f32 {
        self.traveled
    }

    /// Distance to the goal center at the last fitness calculation.
    pub fn distance_to_goal(&self) -> f64 {
        self.distance_to_goal
    }

    /// Fitness at the last fitness calculation.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// The movement plan.
    pub fn genes(&self) -> &GeneChain {
        &self.genes
    }
}
