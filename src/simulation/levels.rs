//! Built-in level catalogue.
//!
//! Every level shares a 1280x720 world with a 40x40 goal near the right edge;
//! levels differ in their walls and in how many ticks a generation may use.

use geo::Rect;

use super::arena::Arena;
use super::error::ConfigError;
use super::geometric_utils::rect;

/// World width shared by all built-in levels.
pub const WORLD_WIDTH: f32 = 1280.0;
/// World height shared by all built-in levels.
pub const WORLD_HEIGHT: f32 = 720.0;
/// Side length of the goal square.
pub const GOAL_SIZE: f32 = 40.0;
/// Gap between the goal and the right edge.
pub const GOAL_MARGIN: f32 = 10.0;

/// Numbers accepted by [`level`].
pub const LEVELS: std::ops::RangeInclusive<u32> = 1..=5;

/// The goal square shared by all built-in levels.
pub fn default_goal() -> Rect<f32> {
    rect(
        WORLD_WIDTH - GOAL_SIZE - GOAL_MARGIN,
        WORLD_HEIGHT / 2.0 - GOAL_SIZE / 2.0,
        GOAL_SIZE,
        GOAL_SIZE,
    )
}

/// Builds the arena for a built-in level.
///
/// # Errors
///
/// [`ConfigError::UnknownLevel`] for numbers outside [`LEVELS`].
pub fn level(number: u32) -> Result<Arena, ConfigError> {
    let (move_limit, walls): (usize, Vec<(f32, f32, f32, f32)>) = match number {
        1 => (350, vec![]),
        2 => (400, vec![(500.0, 150.0, 20.0, 420.0)]),
        3 => (
            500,
            vec![
                (350.0, 200.0, 20.0, 320.0),
                (750.0, 200.0, 20.0, 320.0),
                (550.0, 0.0, 20.0, 200.0),
                (550.0, 520.0, 20.0, 200.0),
            ],
        ),
        4 => (
            600,
            vec![
                (300.0, 0.0, 20.0, 400.0),
                (500.0, 400.0, 20.0, 320.0),
                (730.0, 0.0, 20.0, 310.0),
                (730.0, 420.0, 20.0, 300.0),
                (750.0, 290.0, 300.0, 20.0),
                (750.0, 420.0, 300.0, 20.0),
            ],
        ),
        5 => (
            700,
            vec![
                (200.0, 300.0, 20.0, 420.0),
                (500.0, 0.0, 20.0, 350.0),
                (800.0, 300.0, 20.0, 420.0),
                (1100.0, 0.0, 20.0, 350.0),
            ],
        ),
        other => return Err(ConfigError::UnknownLevel(other)),
    };

    let obstacles = walls
        .into_iter()
        .map(|(x, y, w, h)| rect(x, y, w, h))
        .collect();

    Arena::new(WORLD_WIDTH, WORLD_HEIGHT, default_goal(), obstacles, move_limit)
}
