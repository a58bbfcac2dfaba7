use crate::util::Interval;

/// The longitudinal acceleration model of a vehicle.
///
/// Each `forward`/`reverse`/`brake`/`coast` call sets the raw acceleration
/// command for the current frame; [limit](Self::limit) then restricts it to
/// the vehicle's maximum acceleration before integration.
#[derive(Clone, Debug)]
pub struct AccelerationModel {
    max_acc: f64,
    brake_dec: f64,
    free_dec: f64,
    scale: f64,
    acc: f64,
}

/// The parameters of the acceleration model.
pub struct ModelParams {
    /// The maximum magnitude of the acceleration in units/s<sup>2</sup>.
    pub max_acceleration: f64,
    /// The deceleration applied when braking, a positive number in units/s<sup>2</sup>.
    pub brake_deceleration: f64,
    /// The deceleration applied when coasting, a positive number in units/s<sup>2</sup>.
    pub free_deceleration: f64,
    /// The rate at which throttle ramps the acceleration, in units/s<sup>3</sup>.
    pub acceleration_scaling: f64,
}

impl AccelerationModel {
    /// Creates a new acceleration model.
    pub fn new(params: &ModelParams) -> Self {
        AccelerationModel {
            max_acc: params.max_acceleration,
            brake_dec: params.brake_deceleration,
            free_dec: params.free_deceleration,
            scale: params.acceleration_scaling,
            acc: 0.0,
        }
    }

    /// Gets the current acceleration command.
    pub fn acc(&self) -> f64 {
        self.acc
    }

    /// Overrides the acceleration command.
    pub fn set_acc(&mut self, acc: f64) {
        self.acc = acc;
    }

    /// Throttle input. Brakes hard while still rolling backwards,
    /// otherwise ramps the acceleration up.
    ///
    /// # Arguments
    /// * `vel` - The longitudinal velocity of the vehicle.
    /// * `dt` - The frame time in seconds.
    pub fn forward(&mut self, vel: f64, dt: f64) {
        self.acc = if vel < 0.0 {
            self.brake_dec
        } else {
            self.acc + self.scale * dt
        };
    }

    /// Reverse input, the mirror image of [forward](Self::forward).
    pub fn reverse(&mut self, vel: f64, dt: f64) {
        self.acc = if vel > 0.0 {
            -self.brake_dec
        } else {
            self.acc - self.scale * dt
        };
    }

    /// Brake input. Decelerates towards a standstill at the braking rate.
    pub fn brake(&mut self, vel: f64, dt: f64) {
        self.acc = Self::stop(vel, dt, self.brake_dec);
    }

    /// No longitudinal input. Decelerates towards a standstill at the free rolling rate.
    pub fn coast(&mut self, vel: f64, dt: f64) {
        self.acc = Self::stop(vel, dt, self.free_dec);
    }

    /// Restricts the acceleration command to the maximum acceleration.
    pub fn limit(&mut self) {
        self.acc = Interval::disc(0.0, self.max_acc).clamp(self.acc);
    }

    /// Computes a deceleration of magnitude `dec` opposing `vel`, or, if that would
    /// overshoot zero within this frame, the acceleration that stops the vehicle exactly.
    ///
    /// The exact stop is only reachable with `dt == 0` when `vel == 0`,
    /// in which case no acceleration is needed.
    fn stop(vel: f64, dt: f64, dec: f64) -> f64 {
        if vel.abs() > dt * dec {
            -dec.copysign(vel)
        } else if dt != 0.0 {
            -vel / dt
        } else {
            0.0
        }
    }
}
