use self::acceleration::{AccelerationModel, ModelParams};
use self::dynamics::{advance_position, integrate_speed};
use crate::error::{check_attribute, SimError};
use crate::math::{Point2d, Vector2d};
use crate::util::Interval;
use serde::{Deserialize, Serialize};

mod acceleration;
mod dynamics;

/// The rate at which held steering input turns the wheel, in degrees per frame per second.
const STEERING_RATE: f64 = 10.0;

/// The position and heading of a vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// The position of the centre of the vehicle in world units.
    pub position: Point2d,
    /// The heading in degrees, counter-clockwise positive, 0 facing +x.
    pub heading: f64,
}

/// A simulated vehicle.
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// The maximum longitudinal speed.
    max_vel: f64,
    /// The maximum steering magnitude in degrees per frame.
    max_steering: f64,
    /// The acceleration model
    acc: AccelerationModel,
    /// The vehicle's pose.
    pose: Pose,
    /// The velocity in the vehicle's own frame, +x pointing forward.
    vel: Vector2d,
    /// The steering command, added to the heading each frame.
    steering: f64,
}

/// The attributes of a simulated vehicle.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleAttributes {
    /// The vehicle length in world units.
    pub length: f64,
    /// The maximum steering magnitude, in degrees per frame.
    pub max_steering: f64,
    /// The maximum magnitude of the acceleration in units/s^2.
    pub max_acceleration: f64,
    /// The maximum speed in units/s, forwards or backwards.
    pub max_velocity: f64,
    /// The deceleration applied when braking, a positive number in units/s^2.
    pub brake_deceleration: f64,
    /// The deceleration applied when no input is held, a positive number in units/s^2.
    pub free_deceleration: f64,
    /// The rate at which throttle ramps the acceleration, in units/s^3.
    pub acceleration_scaling: f64,
}

impl Default for VehicleAttributes {
    fn default() -> Self {
        Self {
            length: 4.0,
            max_steering: 70.0,
            max_acceleration: 5.0,
            max_velocity: 20.0,
            brake_deceleration: 10.0,
            free_deceleration: 5.0,
            acceleration_scaling: 10.0,
        }
    }
}

impl VehicleAttributes {
    /// Checks that every attribute is finite and non-negative.
    pub fn validate(&self) -> Result<(), SimError> {
        check_attribute("length", self.length)?;
        check_attribute("max_steering", self.max_steering)?;
        check_attribute("max_acceleration", self.max_acceleration)?;
        check_attribute("max_velocity", self.max_velocity)?;
        check_attribute("brake_deceleration", self.brake_deceleration)?;
        check_attribute("free_deceleration", self.free_deceleration)?;
        check_attribute("acceleration_scaling", self.acceleration_scaling)
    }
}

impl Pose {
    /// Creates a new pose.
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self {
            position: Point2d::new(x, y),
            heading,
        }
    }

    /// The position converted to pixel coordinates.
    pub fn pixel_position(&self, scale: f64) -> Point2d {
        self.position * scale
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl Vehicle {
    /// Creates a new vehicle at rest.
    pub fn new(attributes: &VehicleAttributes, pose: Pose) -> Self {
        Self {
            max_vel: attributes.max_velocity,
            max_steering: attributes.max_steering,
            acc: AccelerationModel::new(&ModelParams {
                max_acceleration: attributes.max_acceleration,
                brake_deceleration: attributes.brake_deceleration,
                free_deceleration: attributes.free_deceleration,
                acceleration_scaling: attributes.acceleration_scaling,
            }),
            pose,
            vel: Vector2d::new(0.0, 0.0),
            steering: 0.0,
        }
    }

    /// The vehicle's current pose.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// The coordinates in world space of the centre of the vehicle.
    pub fn position(&self) -> Point2d {
        self.pose.position
    }

    /// The vehicle's heading in degrees.
    pub fn heading(&self) -> f64 {
        self.pose.heading
    }

    /// The velocity in the vehicle's own frame.
    pub fn velocity(&self) -> Vector2d {
        self.vel
    }

    /// The signed longitudinal velocity; negative when reversing.
    pub fn speed(&self) -> f64 {
        self.vel.x
    }

    /// The current acceleration command.
    pub fn acceleration(&self) -> f64 {
        self.acc.acc()
    }

    /// The current steering command in degrees per frame.
    pub fn steering(&self) -> f64 {
        self.steering
    }

    /// The maximum speed of the vehicle.
    pub fn max_speed(&self) -> f64 {
        self.max_vel
    }

    /// The maximum steering magnitude.
    pub fn max_steering(&self) -> f64 {
        self.max_steering
    }

    /// Sets the acceleration command, limited to the maximum acceleration.
    pub fn set_acceleration(&mut self, acc: f64) {
        self.acc.set_acc(acc);
        self.acc.limit();
    }

    /// Sets the steering command, limited to the maximum steering.
    pub fn set_steering(&mut self, steering: f64) {
        self.steering = Interval::disc(0.0, self.max_steering).clamp(steering);
    }

    /// Mutable access to the acceleration model for the control rules.
    pub(crate) fn acc_model(&mut self) -> &mut AccelerationModel {
        &mut self.acc
    }

    /// Turns the steering clockwise for `dt` seconds.
    pub(crate) fn steer_right(&mut self, dt: f64) {
        self.set_steering(self.steering - STEERING_RATE * dt);
    }

    /// Turns the steering counter-clockwise for `dt` seconds.
    pub(crate) fn steer_left(&mut self, dt: f64) {
        self.set_steering(self.steering + STEERING_RATE * dt);
    }

    /// Snaps the steering back to straight ahead.
    pub(crate) fn centre_steering(&mut self) {
        self.steering = 0.0;
    }

    /// Stops all longitudinal motion.
    pub(crate) fn halt(&mut self) {
        self.vel.x = 0.0;
    }

    /// Integrates the vehicle's velocity, position and heading.
    ///
    /// A zero time step leaves the pose untouched.
    ///
    /// # Parameters
    /// * `dt` - The time step in seconds
    pub fn update(&mut self, dt: f64) {
        self.vel.x = integrate_speed(self.vel.x, self.acc.acc(), dt, self.max_vel);
        self.pose.position = advance_position(self.pose.position, self.vel, self.pose.heading, dt);
        if dt != 0.0 {
            self.pose.heading += self.steering;
        }
    }
}
