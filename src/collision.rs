//! Oriented-body collision detection against the obstacle field.

#[cfg(feature = "debug")]
use crate::debug::{debug_point, debug_polygon};
use crate::error::SimError;
use crate::math::{heading_vector, rot90, Point2d};
use crate::obstacle::Obstacle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The rectangular extent of the vehicle body in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// The extent along the vehicle's heading.
    pub width: f64,
    /// The extent across the vehicle's heading.
    pub height: f64,
}

/// The four corners of the vehicle body in pixel coordinates.
///
/// The first two corners are at the front of the body, the last two at the rear.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corners(pub [Point2d; 4]);

/// The end of the vehicle body that touched an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionEnd {
    Front,
    Back,
}

/// The outcome of a collision check for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionVerdict {
    /// Whether any body corner lies inside an obstacle.
    pub collided: bool,
    /// Whether the reported hit was on a front corner. Meaningless unless `collided`.
    pub front: bool,
}

impl Default for Footprint {
    fn default() -> Self {
        Self {
            width: 128.0,
            height: 64.0,
        }
    }
}

impl Footprint {
    /// Creates a new footprint.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Checks that both dimensions are finite and non-negative.
    pub fn validate(&self) -> Result<(), SimError> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(SimError::InvalidFootprint {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// The dimensions of the axis-aligned box bounding this footprint
    /// once rotated to `heading` degrees.
    pub fn rotated_bounds(&self, heading: f64) -> Footprint {
        let dir = heading_vector(heading);
        let (cos, sin) = (dir.x.abs(), dir.y.abs());
        Footprint {
            width: self.width * cos + self.height * sin,
            height: self.width * sin + self.height * cos,
        }
    }
}

impl Corners {
    /// Computes the body corners for a vehicle.
    ///
    /// # Parameters
    /// * `footprint` - The body extents in pixels
    /// * `scale` - The world-to-pixel scale applied to `position`
    /// * `position` - The centre of the vehicle in world units
    /// * `heading` - The heading in degrees
    pub fn compute(footprint: &Footprint, scale: f64, position: Point2d, heading: f64) -> Self {
        let dir = heading_vector(heading);
        let v1 = 0.5 * footprint.height * rot90(dir);
        let v2 = 0.5 * footprint.width * dir;
        let pos = position * scale;
        Corners([pos + v1 + v2, pos - v1 + v2, pos - v1 - v2, pos + v1 - v2])
    }

    /// The first corner, in order, that lies inside the obstacle.
    fn first_hit(&self, obstacle: &Obstacle) -> Option<usize> {
        self.0.iter().position(|c| obstacle.contains(*c))
    }
}

impl CollisionVerdict {
    /// Which end of the body was hit, if any.
    pub fn end(&self) -> Option<CollisionEnd> {
        match (self.collided, self.front) {
            (false, _) => None,
            (true, true) => Some(CollisionEnd::Front),
            (true, false) => Some(CollisionEnd::Back),
        }
    }
}

impl fmt::Display for CollisionEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionEnd::Front => write!(f, "front"),
            CollisionEnd::Back => write!(f, "back"),
        }
    }
}

/// Checks whether the vehicle body overlaps any obstacle.
///
/// Obstacles are tested in order, and for each obstacle the corners are tested
/// front to rear, stopping at the first one inside it. When several obstacles
/// are hit, the verdict of the last one wins.
pub fn check(
    footprint: &Footprint,
    scale: f64,
    obstacles: &[Obstacle],
    position: Point2d,
    heading: f64,
) -> CollisionVerdict {
    let corners = Corners::compute(footprint, scale, position, heading);
    #[cfg(feature = "debug")]
    debug_polygon("footprint", &corners.0);

    let hit = obstacles
        .iter()
        .filter_map(|obstacle| corners.first_hit(obstacle))
        .last();
    #[cfg(feature = "debug")]
    {
        if let Some(idx) = hit {
            debug_point("hit", corners.0[idx]);
        }
    }

    hit.map(|idx| CollisionVerdict {
        collided: true,
        front: idx < 2,
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn assert_point(p: Point2d, x: f64, y: f64) {
        assert_approx_eq!(p.x, x);
        assert_approx_eq!(p.y, y);
    }

    fn body() -> Footprint {
        Footprint::new(6.0, 2.0)
    }

    fn origin() -> Point2d {
        Point2d::new(0.0, 0.0)
    }

    #[test]
    fn corners_at_zero_heading() {
        let corners = Corners::compute(&body(), 1.0, origin(), 0.0);
        assert_point(corners.0[0], 3.0, 1.0);
        assert_point(corners.0[1], 3.0, -1.0);
        assert_point(corners.0[2], -3.0, -1.0);
        assert_point(corners.0[3], -3.0, 1.0);
    }

    #[test]
    fn corners_follow_trigonometric_basis() {
        let (w, l) = (2.0, 6.0);
        for heading in [90.0, 33.0, -120.0, 200.0] {
            let alpha = f64::to_radians(heading);
            let v1 = (0.5 * w * alpha.sin(), 0.5 * w * alpha.cos());
            let v2 = (0.5 * l * alpha.cos(), -0.5 * l * alpha.sin());
            let position = Point2d::new(1.0, 1.5);
            let corners = Corners::compute(&Footprint::new(l, w), 2.0, position, heading);
            let (x, y) = (2.0, 3.0);
            assert_point(corners.0[0], x + v1.0 + v2.0, y + v1.1 + v2.1);
            assert_point(corners.0[1], x - v1.0 + v2.0, y - v1.1 + v2.1);
            assert_point(corners.0[2], x - v1.0 - v2.0, y - v1.1 - v2.1);
            assert_point(corners.0[3], x + v1.0 - v2.0, y + v1.1 - v2.1);
        }
    }

    #[test]
    fn quarter_turn_swaps_extents() {
        let corners = Corners::compute(&body(), 1.0, origin(), 90.0);
        // Front of the body now points up the screen (-y).
        assert_point(corners.0[0], 1.0, -3.0);
        assert_point(corners.0[1], -1.0, -3.0);
        assert_point(corners.0[2], -1.0, 3.0);
        assert_point(corners.0[3], 1.0, 3.0);
    }

    #[test]
    fn front_corner_hit() {
        let obstacles = [Obstacle::new(2.5, 0.5, 1.0, 1.0)];
        let verdict = check(&body(), 1.0, &obstacles, origin(), 0.0);
        assert_eq!(verdict, CollisionVerdict { collided: true, front: true });
        assert_eq!(verdict.end(), Some(CollisionEnd::Front));
    }

    #[test]
    fn rear_corner_hit() {
        let obstacles = [Obstacle::new(-3.5, -1.5, 1.0, 1.0)];
        let verdict = check(&body(), 1.0, &obstacles, origin(), 0.0);
        assert_eq!(verdict, CollisionVerdict { collided: true, front: false });
        assert_eq!(verdict.end(), Some(CollisionEnd::Back));
    }

    #[test]
    fn last_obstacle_wins() {
        let front = Obstacle::new(2.5, 0.5, 1.0, 1.0);
        let rear = Obstacle::new(-3.5, -1.5, 1.0, 1.0);
        let footprint = Footprint::new(6.0, 2.0);
        let origin = Point2d::new(0.0, 0.0);
        let verdict = check(&footprint, 1.0, &[front, rear], origin, 0.0);
        assert_eq!(verdict.end(), Some(CollisionEnd::Back));
        let verdict = check(&footprint, 1.0, &[rear, front], origin, 0.0);
        assert_eq!(verdict.end(), Some(CollisionEnd::Front));
    }

    #[test]
    fn single_obstacle_reports_first_corner_inside() {
        // Deliberate: each obstacle reports only its first corner inside, so c1 wins.
        // Covers the whole body, so every corner is inside.
        let obstacles = [Obstacle::new(-10.0, -10.0, 20.0, 20.0)];
        let verdict = check(&body(), 1.0, &obstacles, origin(), 0.0);
        assert_eq!(verdict.end(), Some(CollisionEnd::Front));
    }

    #[test]
    fn no_obstacles_no_collision() {
        for heading in [0.0, 45.0, 180.0] {
            let verdict = check(&Footprint::default(), 32.0, &[], Point2d::new(5.0, 5.0), heading);
            assert!(!verdict.collided);
            assert_eq!(verdict.end(), None);
        }
    }

    #[test]
    fn zero_footprint_is_a_point_test() {
        let obstacles = [Obstacle::new(60.0, 60.0, 10.0, 10.0)];
        let footprint = Footprint::new(0.0, 0.0);
        let hit = check(&footprint, 32.0, &obstacles, Point2d::new(2.0, 2.0), 10.0);
        assert!(hit.collided);
        let miss = check(&footprint, 32.0, &obstacles, Point2d::new(1.0, 1.0), 10.0);
        assert!(!miss.collided);
    }

    #[test]
    fn rotated_bounds() {
        let footprint = Footprint::new(6.0, 2.0);
        let bounds = footprint.rotated_bounds(90.0);
        assert_approx_eq!(bounds.width, 2.0);
        assert_approx_eq!(bounds.height, 6.0);
        let bounds = footprint.rotated_bounds(45.0);
        assert_approx_eq!(bounds.width, 8.0 * f64::sqrt(0.5));
        assert_approx_eq!(bounds.height, 8.0 * f64::sqrt(0.5));
    }

    #[test]
    fn scale_applies_to_position_only() {
        let corners = Corners::compute(&body(), 10.0, Point2d::new(1.0, 2.0), 0.0);
        assert_point(corners.0[0], 13.0, 21.0);
        assert_point(corners.0[2], 7.0, 19.0);
    }
}
