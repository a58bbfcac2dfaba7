use crate::math::{rotate_by_heading, Point2d, Vector2d};
use crate::util::Interval;

/// Integrates the longitudinal velocity over `dt` and limits it to `max_vel`.
pub fn integrate_speed(vel: f64, acc: f64, dt: f64, max_vel: f64) -> f64 {
    Interval::disc(0.0, max_vel).clamp(vel + acc * dt)
}

/// Advances a position by a body-frame velocity over `dt`.
///
/// # Parameters
/// * `pos` - The current world position
/// * `vel` - The velocity in the vehicle's own frame, +x pointing forward
/// * `heading` - The vehicle heading in degrees
/// * `dt` - The time step in seconds
pub fn advance_position(pos: Point2d, vel: Vector2d, heading: f64, dt: f64) -> Point2d {
    pos + rotate_by_heading(vel, heading) * dt
}
