//! Axis-aligned collision detection
//!
//! The player and every obstacle are plain rectangles in screen pixels
//! (y grows downward). Overlap uses strict inequality on all four sides,
//! so boxes that merely touch at an edge do not collide.

use glam::Vec2;

use super::state::{Obstacle, ObstacleId};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Strict overlap test: edge contact is not a collision
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Return every obstacle whose box overlaps the player's.
///
/// One pass over all obstacles with no short-circuit after the first hit -
/// the caller removes each returned obstacle and deducts one life per id,
/// so two simultaneous hits cost two lives.
pub fn check_collisions(
    player_box: &Aabb,
    obstacles: &[Obstacle],
    viewport_width: f32,
) -> Vec<ObstacleId> {
    obstacles
        .iter()
        .filter(|o| player_box.overlaps(&o.bounding_box(viewport_width)))
        .map(|o| o.id)
        .collect()
}
