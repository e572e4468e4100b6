//! Geometric utility functions for overlap tests and distance calculations.

use geo::algorithm::Distance;
use geo::{Coord, Euclidean, Point, Rect};
use ndarray::Array1;

/// Builds an axis-aligned rectangle from its top-left corner and extent.
///
/// # Arguments
///
/// * `x` - Left edge
/// * `y` - Top edge
/// * `width` - Horizontal extent
/// * `height` - Vertical extent
pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Rect<f32> {
    Rect::new(
        Coord { x, y },
        Coord {
            x: x + width,
            y: y + height,
        },
    )
}

/// Returns the bounding square of a point agent whose top-left corner is `pos`.
pub fn bounding_square(pos: &Array1<f32>, size: f32) -> Rect<f32> {
    rect(pos[0], pos[1], size, size)
}

/// Tests whether two rectangles share a non-empty interior.
///
/// Rectangles that only touch along an edge do not overlap.
pub fn overlaps(a: &Rect<f32>, b: &Rect<f32>) -> bool {
    a.min().x < b.max().x && b.min().x < a.max().x && a.min().y < b.max().y && b.min().y < a.max().y
}

/// Calculates the Euclidean distance between a position vector and a point.
pub fn point_distance(pos: &Array1<f32>, target: Point<f32>) -> f32 {
    Euclidean.distance(Point::new(pos[0], pos[1]), target)
}

/// Returns the Euclidean length of a 2D vector.
pub fn magnitude(v: &Array1<f32>) -> f32 {
    v[0].hypot(v[1])
}

/// Creates a zero 2D vector.
pub fn zero_vector() -> Array1<f32> {
    Array1::zeros(2)
}
