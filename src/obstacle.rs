use crate::error::SimError;
use crate::math::Point2d;
use crate::util::Interval;
use serde::{Deserialize, Serialize};

/// The display colour of obstacles unless otherwise specified.
const DEFAULT_COLOR: [u8; 3] = [255, 0, 0];

/// A static axis-aligned rectangle in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// The x coordinate of the rectangle's origin corner.
    pub x: f64,
    /// The y coordinate of the rectangle's origin corner.
    pub y: f64,
    /// The extent of the rectangle along +x.
    pub width: f64,
    /// The extent of the rectangle along +y.
    pub height: f64,
    /// The RGB colour the obstacle is drawn in. Irrelevant to collisions.
    #[serde(default = "default_color")]
    pub color: [u8; 3],
}

/// The immutable set of obstacles in the world.
#[derive(Clone, Debug, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

fn default_color() -> [u8; 3] {
    DEFAULT_COLOR
}

impl Obstacle {
    /// Creates a new obstacle drawn in the default colour.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            color: DEFAULT_COLOR,
        }
    }

    /// The horizontal extents of the obstacle.
    pub fn x_range(&self) -> Interval<f64> {
        Interval::new(self.x, self.x + self.width)
    }

    /// The vertical extents of the obstacle.
    pub fn y_range(&self) -> Interval<f64> {
        Interval::new(self.y, self.y + self.height)
    }

    /// Whether the point lies inside the obstacle.
    /// The left and top edges are inside, the right and bottom edges are not.
    pub fn contains(&self, point: Point2d) -> bool {
        self.x_range().covers(point.x) && self.y_range().covers(point.y)
    }
}

impl ObstacleField {
    /// Builds an obstacle field, rejecting obstacles with negative or non-finite dimensions.
    pub fn build(obstacles: Vec<Obstacle>) -> Result<Self, SimError> {
        for (index, obstacle) in obstacles.iter().enumerate() {
            let valid = [obstacle.x, obstacle.y, obstacle.width, obstacle.height]
                .iter()
                .all(|v| v.is_finite())
                && obstacle.width >= 0.0
                && obstacle.height >= 0.0;
            if !valid {
                return Err(SimError::InvalidObstacle {
                    index,
                    width: obstacle.width,
                    height: obstacle.height,
                });
            }
        }
        Ok(Self { obstacles })
    }

    /// The walls of the default course.
    pub fn default_course() -> Vec<Obstacle> {
        vec![
            Obstacle::new(1000.0, 100.0, 30.0, 500.0),
            Obstacle::new(650.0, 600.0, 500.0, 30.0),
            Obstacle::new(500.0, 200.0, 500.0, 30.0),
            Obstacle::new(650.0, 300.0, 30.0, 300.0),
        ]
    }

    /// Returns an iterator over the obstacles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// The obstacles as a slice.
    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// The number of obstacles.
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// Whether the field has no obstacles.
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let obstacle = Obstacle::new(10.0, 20.0, 5.0, 5.0);
        assert!(obstacle.contains(Point2d::new(10.0, 20.0)));
        assert!(obstacle.contains(Point2d::new(14.9, 24.9)));
        assert!(!obstacle.contains(Point2d::new(15.0, 22.0)));
        assert!(!obstacle.contains(Point2d::new(12.0, 25.0)));
        assert!(!obstacle.contains(Point2d::new(9.9, 22.0)));
    }

    #[test]
    fn default_course_builds() {
        let field = ObstacleField::build(ObstacleField::default_course()).unwrap();
        assert_eq!(field.len(), 4);
        assert!(field.iter().all(|o| o.color == [255, 0, 0]));
    }

    #[test]
    fn rejects_negative_dimensions() {
        let err = ObstacleField::build(vec![
            Obstacle::new(0.0, 0.0, 1.0, 1.0),
            Obstacle::new(0.0, 0.0, -1.0, 1.0),
        ])
        .unwrap_err();
        assert!(matches!(err, SimError::InvalidObstacle { index: 1, .. }));
    }

    #[test]
    fn color_defaults_when_omitted() {
        let obstacle: Obstacle =
            serde_json::from_str(r#"{ "x": 1, "y": 2, "width": 3, "height": 4 }"#).unwrap();
        assert_eq!(obstacle, Obstacle::new(1.0, 2.0, 3.0, 4.0));
    }
}
