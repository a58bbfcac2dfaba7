//! Per-frame mapping of player input to vehicle commands.

use crate::collision::{self, CollisionVerdict, Footprint};
use crate::obstacle::ObstacleField;
use crate::vehicle::Vehicle;
use log::debug;
use serde::{Deserialize, Serialize};

/// A snapshot of the logical input keys, sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputState {
    pub forward: bool,
    pub reverse: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
}

/// The longitudinal control rule in effect for a frame.
///
/// Exactly one rule applies, chosen in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThrottleRule {
    Forward,
    Reverse,
    Brake,
    Coast,
}

/// The steering rule in effect for a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SteerRule {
    Right,
    Left,
    Centre,
}

impl InputState {
    /// Selects the longitudinal rule; forward beats reverse beats brake.
    pub fn throttle(&self) -> ThrottleRule {
        match (self.forward, self.reverse, self.brake) {
            (true, _, _) => ThrottleRule::Forward,
            (false, true, _) => ThrottleRule::Reverse,
            (false, false, true) => ThrottleRule::Brake,
            (false, false, false) => ThrottleRule::Coast,
        }
    }

    /// Selects the steering rule; right beats left.
    pub fn steer(&self) -> SteerRule {
        match (self.steer_right, self.steer_left) {
            (true, _) => SteerRule::Right,
            (false, true) => SteerRule::Left,
            (false, false) => SteerRule::Centre,
        }
    }
}

/// Sets the vehicle's acceleration and steering commands from the input.
pub fn apply_controls(vehicle: &mut Vehicle, input: &InputState, dt: f64) {
    let vel = vehicle.speed();
    let acc = vehicle.acc_model();
    match input.throttle() {
        ThrottleRule::Forward => acc.forward(vel, dt),
        ThrottleRule::Reverse => acc.reverse(vel, dt),
        ThrottleRule::Brake => acc.brake(vel, dt),
        ThrottleRule::Coast => acc.coast(vel, dt),
    }
    acc.limit();

    match input.steer() {
        SteerRule::Right => vehicle.steer_right(dt),
        SteerRule::Left => vehicle.steer_left(dt),
        SteerRule::Centre => vehicle.centre_steering(),
    }
}

/// Runs one frame: applies the controls, integrates the vehicle,
/// then checks the new pose for collisions.
///
/// The verdict is only reported; the vehicle's motion is left as is.
pub fn run_frame(
    vehicle: &mut Vehicle,
    obstacles: &ObstacleField,
    footprint: &Footprint,
    scale: f64,
    input: &InputState,
    dt: f64,
) -> CollisionVerdict {
    apply_controls(vehicle, input, dt);
    vehicle.update(dt);
    debug!(
        "pos=({:.3}, {:.3}) heading={:.2} vel={:.3} acc={:.3} steer={:.3}",
        vehicle.position().x,
        vehicle.position().y,
        vehicle.heading(),
        vehicle.speed(),
        vehicle.acceleration(),
        vehicle.steering()
    );
    collision::check(
        footprint,
        scale,
        obstacles.as_slice(),
        vehicle.position(),
        vehicle.heading(),
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::vehicle::{Pose, VehicleAttributes};
    use assert_approx_eq::assert_approx_eq;

    fn held(forward: bool, reverse: bool, brake: bool) -> InputState {
        InputState {
            forward,
            reverse,
            brake,
            ..Default::default()
        }
    }

    #[test]
    fn throttle_priority() {
        assert_eq!(held(true, true, true).throttle(), ThrottleRule::Forward);
        assert_eq!(held(false, true, true).throttle(), ThrottleRule::Reverse);
        assert_eq!(held(false, false, true).throttle(), ThrottleRule::Brake);
        assert_eq!(held(false, false, false).throttle(), ThrottleRule::Coast);
    }

    #[test]
    fn steer_priority() {
        let both = InputState {
            steer_left: true,
            steer_right: true,
            ..Default::default()
        };
        assert_eq!(both.steer(), SteerRule::Right);
        assert_eq!(InputState::default().steer(), SteerRule::Centre);
    }

    #[test]
    fn steering_ramps_and_snaps_back() {
        let mut veh = Vehicle::new(&VehicleAttributes::default(), Pose::default());
        let left = InputState {
            steer_left: true,
            ..Default::default()
        };
        apply_controls(&mut veh, &left, 0.5);
        apply_controls(&mut veh, &left, 0.5);
        assert_approx_eq!(veh.steering(), 10.0);
        let right = InputState {
            steer_right: true,
            ..Default::default()
        };
        apply_controls(&mut veh, &right, 0.25);
        assert_approx_eq!(veh.steering(), 7.5);
        apply_controls(&mut veh, &InputState::default(), 0.25);
        assert_eq!(veh.steering(), 0.0);
    }

    #[test]
    fn steering_is_limited() {
        let attributes = VehicleAttributes {
            max_steering: 3.0,
            ..Default::default()
        };
        let mut veh = Vehicle::new(&attributes, Pose::default());
        let right = InputState {
            steer_right: true,
            ..Default::default()
        };
        for _ in 0..10 {
            apply_controls(&mut veh, &right, 1.0);
        }
        assert_approx_eq!(veh.steering(), -3.0);
    }

    #[test]
    fn brake_is_limited_to_max_acceleration() {
        let mut veh = Vehicle::new(&VehicleAttributes::default(), Pose::default());
        veh.set_acceleration(5.0);
        veh.update(2.0);
        assert_approx_eq!(veh.speed(), 10.0);
        apply_controls(&mut veh, &held(false, false, true), 0.1);
        assert_approx_eq!(veh.acceleration(), -5.0);
    }

    #[test]
    fn first_frame_with_zero_time_is_safe() {
        let mut veh = Vehicle::new(&VehicleAttributes::default(), Pose::default());
        let field = ObstacleField::default();
        let verdict = run_frame(
            &mut veh,
            &field,
            &Footprint::default(),
            32.0,
            &InputState::default(),
            0.0,
        );
        assert!(!verdict.collided);
        assert!(veh.acceleration().is_finite());
        assert_eq!(veh.pose(), Pose::default());
    }
}
