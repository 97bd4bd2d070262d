//! Collision detection and response for circles against walls and each other
//!
//! Every entity is a circle and every wall is an axis-aligned rectangle, so
//! the whole game reduces to four primitives plus axis-separated movement.
//! Hot-path overlap tests compare squared distances and never take a root.

use glam::Vec2;

use super::aabb::Aabb;
use crate::consts::{WALL_PUSH_EPSILON, WALL_PUSH_ITERATIONS};

/// True iff two circles overlap (touching does not count)
#[inline]
pub fn circle_intersects_circle(p1: Vec2, r1: f32, p2: Vec2, r2: f32) -> bool {
    let reach = r1 + r2;
    p1.distance_squared(p2) < reach * reach
}

/// True iff a circle overlaps a rectangle
#[inline]
pub fn circle_intersects_rect(p: Vec2, r: f32, rect: &Aabb) -> bool {
    let closest = rect.closest_point(p);
    p.distance_squared(closest) < r * r
}

/// True iff a circle overlaps any wall in the list
#[inline]
pub fn circle_hits_any(p: Vec2, r: f32, walls: &[Aabb]) -> bool {
    walls.iter().any(|w| circle_intersects_rect(p, r, w))
}

/// Split a circle-circle overlap evenly between both bodies
///
/// Returns the corrected positions. Mass is ignored on purpose: both sides
/// move half the penetration. Coincident centers have no defined axis and
/// are returned unchanged, as are non-overlapping pairs.
pub fn soft_separate(p1: Vec2, r1: f32, p2: Vec2, r2: f32) -> (Vec2, Vec2) {
    let delta = p1 - p2;
    let dist_sq = delta.length_squared();
    let reach = r1 + r2;
    if dist_sq == 0.0 || dist_sq >= reach * reach {
        return (p1, p2);
    }

    let dist = dist_sq.sqrt();
    let push = delta / dist * ((reach - dist) * 0.5);
    (p1 + push, p2 - push)
}

/// Push a circle out of every wall it overlaps
///
/// Runs at most `WALL_PUSH_ITERATIONS` passes; resolving one wall can push
/// the circle into a neighbour, so each pass re-checks the full list. Past the
/// bound the partially resolved position is accepted. Returns the new
/// position and whether anything moved.
pub fn push_circle_out_of_walls(mut pos: Vec2, r: f32, walls: &[Aabb]) -> (Vec2, bool) {
    let mut moved_any = false;

    for _ in 0..WALL_PUSH_ITERATIONS {
        let mut moved_this_pass = false;

        for wall in walls {
            if !circle_intersects_rect(pos, r, wall) {
                continue;
            }

            let closest = wall.closest_point(pos);
            let offset = pos - closest;
            let dist_sq = offset.length_squared();

            if dist_sq > 1e-9 {
                // Center outside the rect: push along the contact normal
                let dist = dist_sq.sqrt();
                let penetration = r - dist;
                if penetration > 0.0 {
                    pos += offset / dist * (penetration + WALL_PUSH_EPSILON);
                    moved_this_pass = true;
                }
            } else {
                // Center inside the rect: leave through the nearest edge
                let left = pos.x - wall.left();
                let right = wall.right() - pos.x;
                let bottom = pos.y - wall.bottom();
                let top = wall.top() - pos.y;
                let nearest = left.min(right).min(bottom).min(top);

                if nearest == left {
                    pos.x = wall.left() - r - WALL_PUSH_EPSILON;
                } else if nearest == right {
                    pos.x = wall.right() + r + WALL_PUSH_EPSILON;
                } else if nearest == bottom {
                    pos.y = wall.bottom() - r - WALL_PUSH_EPSILON;
                } else {
                    pos.y = wall.top() + r + WALL_PUSH_EPSILON;
                }
                moved_this_pass = true;
            }
        }

        if !moved_this_pass {
            break;
        }
        moved_any = true;
    }

    (pos, moved_any)
}

/// Upper bound on movement sub-steps per call
pub const MAX_MOVE_SUBSTEPS: u32 = 32;

/// How far a circle reaches into a rectangle, or a negative value when clear
///
/// A center inside the rectangle counts the distance to the nearest edge on
/// top of the radius.
fn wall_penetration(p: Vec2, r: f32, rect: &Aabb) -> f32 {
    let closest = rect.closest_point(p);
    if closest != p {
        return r - p.distance(closest);
    }
    let inside = (p.x - rect.left())
        .min(rect.right() - p.x)
        .min(p.y - rect.bottom())
        .min(rect.top() - p.y);
    r + inside
}

/// Whether moving from `from` to `to` is acceptable against every wall
///
/// A wall the body was clear of must stay clear, and a wall it already
/// touches may not be entered any deeper.
fn step_allowed(from: Vec2, to: Vec2, r: f32, walls: &[Aabb]) -> bool {
    walls.iter().all(|wall| {
        if !circle_intersects_rect(to, r, wall) {
            return true;
        }
        circle_intersects_rect(from, r, wall) && wall_penetration(to, r, wall) <= wall_penetration(from, r, wall)
    })
}

/// Move a circle by `delta`, testing each axis independently against walls
///
/// An axis move is rejected if it would overlap a new wall or push deeper
/// into one already touched, so a body pressed diagonally into a wall keeps
/// sliding along it and a body shoved in by separation can only work its
/// way back out. Long moves are split into steps no longer than the radius
/// so thin walls cannot be skipped.
pub fn move_with_walls(pos: Vec2, delta: Vec2, r: f32, walls: &[Aabb]) -> Vec2 {
    let steps = ((delta.length() / r.max(1.0)).ceil() as u32).clamp(1, MAX_MOVE_SUBSTEPS);
    let step = delta / steps as f32;
    let mut result = pos;

    for _ in 0..steps {
        if step.x != 0.0 {
            let candidate = Vec2::new(result.x + step.x, result.y);
            if step_allowed(result, candidate, r, walls) {
                result = candidate;
            }
        }

        if step.y != 0.0 {
            let candidate = Vec2::new(result.x, result.y + step.y);
            if step_allowed(result, candidate, r, walls) {
                result = candidate;
            }
        }
    }

    result
}
