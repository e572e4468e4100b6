//! The arena: world bounds, goal, obstacles, and the per-generation move limit.

use geo::{Point, Rect};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::geometric_utils::overlaps;

/// How far past the left and top edges an individual may drift before it is
/// considered out of bounds.
pub const BOUNDS_TOLERANCE: f32 = 5.0;

/// Horizontal distance of the start point from the left edge.
pub const START_OFFSET: f32 = 10.0;

/// Level configuration consumed by the simulation. Never mutated during a run.
///
/// Serializes to JSON so run reports can record the layout they ran on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// World width.
    pub width: f32,
    /// World height.
    pub height: f32,
    /// Rectangle individuals are trying to reach.
    pub goal: Rect<f32>,
    /// Walls that kill on contact.
    pub obstacles: Vec<Rect<f32>>,
    /// Maximum number of ticks per generation.
    pub move_limit: usize,
}

impl Arena {
    /// Creates a validated arena.
    pub fn new(
        width: f32,
        height: f32,
        goal: Rect<f32>,
        obstacles: Vec<Rect<f32>>,
        move_limit: usize,
    ) -> Result<Self, ConfigError> {
        let arena = Self {
            width,
            height,
            goal,
            obstacles,
            move_limit,
        };
        arena.validate()?;
        Ok(arena)
    }

    /// Rejects non-positive dimensions and a zero move limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::InvalidArena {
                width: self.width,
                height: self.height,
            });
        }
        if self.move_limit == 0 {
            return Err(ConfigError::ZeroMoveLimit);
        }
        Ok(())
    }

    /// Where every individual starts: near the left edge, vertically centered.
    pub fn start_position(&self) -> Array1<f32> {
        Array1::from_vec(vec![START_OFFSET, self.height / 2.0])
    }

    /// Point that distance-to-goal is measured against.
    pub fn goal_center(&self) -> Point<f32> {
        self.goal.center().into()
    }

    /// Whether a bounding box overlaps the goal.
    pub fn reaches_goal(&self, bounds: &Rect<f32>) -> bool {
        overlaps(bounds, &self.goal)
    }

    /// Whether a bounding box has left the world.
    pub fn out_of_bounds(&self, bounds: &Rect<f32>) -> bool {
        bounds.min().x < -BOUNDS_TOLERANCE
            || bounds.min().y < -BOUNDS_TOLERANCE
            || bounds.max().x > self.width
            || bounds.max().y > self.height
    }

    /// Whether a bounding box overlaps any obstacle.
    pub fn hits_obstacle(&self, bounds: &Rect<f32>) -> bool {
        self.obstacles.iter().any(|wall| overlaps(bounds, wall))
    }

    /// Out of bounds or inside a wall.
    pub fn collides(&self, bounds: &Rect<f32>) -> bool {
        self.out_of_bounds(bounds) || self.hits_obstacle(bounds)
    }
}
