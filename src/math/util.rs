use super::Vector2d;
use cgmath::prelude::*;
use cgmath::{Basis2, Deg, Rad};

/// Rotates a body-frame vector into world space for the given heading.
///
/// World space is y-down, so a positive (counter-clockwise on screen) heading
/// rotates the vector by the negated angle.
///
/// # Parameters
/// * `vec` - The vector in the vehicle's frame, +x pointing forward
/// * `heading` - The heading in degrees
pub fn rotate_by_heading(vec: Vector2d, heading: f64) -> Vector2d {
    let rot: Basis2<f64> = Rotation2::from_angle(Deg(-heading));
    rot.rotate_vector(vec)
}

/// A unit vector in world space pointing along the given heading in degrees.
pub fn heading_vector(heading: f64) -> Vector2d {
    let Rad(alpha) = Rad::from(Deg(heading));
    Vector2d::new(alpha.cos(), -alpha.sin())
}

/// Rotates a vector 90 degrees clockwise.
pub fn rot90(vec: Vector2d) -> Vector2d {
    Vector2d::new(-vec.y, vec.x)
}
