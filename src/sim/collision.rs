//! Proximity tests and edge response
//!
//! Everything in the dungeon is a circle, so contact is a squared-distance
//! comparison. Tangent circles do not touch.

use glam::Vec2;

use crate::within_range;

/// How the player is repositioned after crossing a room edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeResponse {
    /// Push back just inside the crossed edge (room still has enemies)
    Clamp,
    /// Reappear just inside the opposite edge (entering the next room)
    Wrap,
}

/// Check whether two hit-circles overlap
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    within_range(a, b, a_radius + b_radius)
}

/// Index of the first candidate (in iteration order) overlapping the circle
pub fn first_overlap<I>(pos: Vec2, radius: f32, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = (Vec2, f32)>,
{
    candidates
        .into_iter()
        .position(|(other, other_radius)| circles_overlap(pos, radius, other, other_radius))
}

/// True if a circle pokes past the `[0, width) x [0, height)` rectangle
#[inline]
pub fn circle_out_of_bounds(pos: Vec2, radius: f32, bounds: Vec2) -> bool {
    pos.x < radius || pos.y < radius || pos.x >= bounds.x - radius || pos.y >= bounds.y - radius
}

/// True if a circle lies wholly outside the rectangle (nothing left on screen)
#[inline]
pub fn circle_off_screen(pos: Vec2, radius: f32, bounds: Vec2) -> bool {
    pos.x < -radius || pos.y < -radius || pos.x > bounds.x + radius || pos.y > bounds.y + radius
}

/// Reposition a circle that crossed an edge
///
/// Only the axes that are actually out of bounds are touched. `offset` keeps
/// the new position strictly inside so the same edge does not trigger again.
pub fn resolve_edge(
    pos: Vec2,
    radius: f32,
    bounds: Vec2,
    offset: f32,
    response: EdgeResponse,
) -> Vec2 {
    let near = Vec2::splat(radius + offset);
    let far = bounds - Vec2::splat(radius + offset);
    let (low_side, high_side) = match response {
        EdgeResponse::Clamp => (near, far),
        EdgeResponse::Wrap => (far, near),
    };

    let mut out = pos;
    if pos.x < radius {
        out.x = low_side.x;
    } else if pos.x >= bounds.x - radius {
        out.x = high_side.x;
    }
    if pos.y < radius {
        out.y = low_side.y;
    } else if pos.y >= bounds.y - radius {
        out.y = high_side.y;
    }
    out
}
