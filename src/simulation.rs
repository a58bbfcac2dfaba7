use crate::collision::{CollisionVerdict, Footprint};
use crate::control::{run_frame, InputState};
#[cfg(feature = "debug")]
use crate::debug::take_debug_frame;
use crate::error::SimError;
use crate::math::{Point2d, Vector2d};
use crate::obstacle::{Obstacle, ObstacleField};
use crate::vehicle::{Pose, Vehicle, VehicleAttributes};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// The number of pixels per world unit unless otherwise specified.
const DEFAULT_SCALE: f64 = 32.0;

/// What the simulation does to the vehicle after a collision is detected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionResponse {
    /// Collisions are reported and the vehicle keeps moving.
    #[default]
    ReportOnly,
    /// The vehicle's longitudinal velocity is zeroed on a back collision.
    HaltOnBack,
    /// The vehicle's longitudinal velocity is zeroed on any collision.
    HaltOnAny,
}

/// The static description of a simulated world.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// The number of pixels per world unit.
    pub scale: f64,
    /// The vehicle body extents in pixels.
    pub footprint: Footprint,
    /// Whether collisions use the bounding box of the rotated footprint,
    /// as measured from a rotated sprite, rather than the footprint itself.
    pub rotated_footprint: bool,
    /// The vehicle's pose at the start of the simulation.
    pub start: Pose,
    /// The vehicle's attributes.
    pub vehicle: VehicleAttributes,
    /// The obstacles, in pixel coordinates.
    pub obstacles: Vec<Obstacle>,
    /// The response to detected collisions.
    pub response: CollisionResponse,
}

/// The state of the simulation after a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// The index of the frame, starting at 1.
    pub frame: usize,
    /// The vehicle's pose after the frame.
    pub pose: Pose,
    /// The vehicle's body-frame velocity after the frame.
    pub velocity: Vector2d,
    /// The acceleration command used for the frame.
    pub acceleration: f64,
    /// The steering command used for the frame.
    pub steering: f64,
    /// The collision verdict for the new pose.
    pub verdict: CollisionVerdict,
}

/// A single vehicle driving among static obstacles.
pub struct Simulation {
    /// The simulated vehicle.
    vehicle: Vehicle,
    /// The static obstacles.
    obstacles: ObstacleField,
    /// The vehicle body extents in pixels.
    footprint: Footprint,
    /// Whether to use the rotated bounds of the footprint.
    rotated_footprint: bool,
    /// The number of pixels per world unit.
    scale: f64,
    /// The response to detected collisions.
    response: CollisionResponse,
    /// The verdict of the previously simulated frame.
    verdict: CollisionVerdict,
    /// The current frame of simulation.
    frame: usize,
    /// Debugging information from the previously simulated frame.
    #[cfg(feature = "debug")]
    debug: serde_json::Value,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            footprint: Footprint::default(),
            rotated_footprint: false,
            start: Pose::default(),
            vehicle: VehicleAttributes::default(),
            obstacles: ObstacleField::default_course(),
            response: CollisionResponse::ReportOnly,
        }
    }
}

impl WorldConfig {
    /// Parses a world description from JSON.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a world description from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// The course bundled with the crate.
    pub fn included_course() -> Result<Self, SimError> {
        Self::from_json(include_str!("../config/course.json"))
    }
}

impl Simulation {
    /// Creates a new simulation from a world description.
    pub fn new(config: WorldConfig) -> Result<Self, SimError> {
        if !(config.scale.is_finite() && config.scale > 0.0) {
            return Err(SimError::InvalidScale(config.scale));
        }
        config.footprint.validate()?;
        config.vehicle.validate()?;
        let obstacles = ObstacleField::build(config.obstacles)?;
        info!(
            "Created simulation with {} obstacles at scale {}",
            obstacles.len(),
            config.scale
        );
        Ok(Self {
            vehicle: Vehicle::new(&config.vehicle, config.start),
            obstacles,
            footprint: config.footprint,
            rotated_footprint: config.rotated_footprint,
            scale: config.scale,
            response: config.response,
            verdict: CollisionVerdict::default(),
            frame: 0,
            #[cfg(feature = "debug")]
            debug: serde_json::Value::Null,
        })
    }

    /// Advances the simulation by `dt` seconds with the given input held.
    ///
    /// A time step of zero is valid and leaves the vehicle's pose unchanged.
    pub fn step(&mut self, input: &InputState, dt: f64) -> Result<FrameReport, SimError> {
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(SimError::InvalidTimeStep(dt));
        }

        let footprint = self.collision_footprint();
        let verdict = run_frame(
            &mut self.vehicle,
            &self.obstacles,
            &footprint,
            self.scale,
            input,
            dt,
        );
        self.log_transition(verdict);
        self.respond(verdict);
        self.verdict = verdict;
        self.frame += 1;

        #[cfg(feature = "debug")]
        {
            self.debug = take_debug_frame();
        }

        Ok(FrameReport {
            frame: self.frame,
            pose: self.vehicle.pose(),
            velocity: self.vehicle.velocity(),
            acceleration: self.vehicle.acceleration(),
            steering: self.vehicle.steering(),
            verdict,
        })
    }

    /// Gets the current simulation frame index.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Gets a reference to the vehicle.
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Gets the obstacle field, e.g. for rendering.
    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    /// The number of pixels per world unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The collision verdict of the previously simulated frame.
    pub fn verdict(&self) -> CollisionVerdict {
        self.verdict
    }

    /// The pixel coordinates of the centre of the vehicle.
    pub fn pixel_position(&self) -> Point2d {
        self.vehicle.pose().pixel_position(self.scale)
    }

    /// Gets the debugging information for the previously simulated frame as JSON array.
    #[cfg(feature = "debug")]
    pub fn debug(&mut self) -> serde_json::Value {
        self.debug.clone()
    }

    /// The footprint used for collision checks at the vehicle's current heading.
    fn collision_footprint(&self) -> Footprint {
        if self.rotated_footprint {
            self.footprint.rotated_bounds(self.vehicle.heading())
        } else {
            self.footprint
        }
    }

    /// Logs collisions as they begin and end.
    fn log_transition(&self, verdict: CollisionVerdict) {
        match (self.verdict.end(), verdict.end()) {
            (prev, Some(end)) if prev != Some(end) => {
                info!("{} collision at frame {}", end, self.frame + 1)
            }
            (Some(_), None) => info!("Collision cleared at frame {}", self.frame + 1),
            _ => {}
        }
    }

    /// Applies the configured collision response.
    fn respond(&mut self, verdict: CollisionVerdict) {
        let halt = match self.response {
            CollisionResponse::ReportOnly => false,
            CollisionResponse::HaltOnBack => verdict.collided && !verdict.front,
            CollisionResponse::HaltOnAny => verdict.collided,
        };
        if halt && self.vehicle.speed() != 0.0 {
            warn!("Halting vehicle at speed {:.3} after collision", self.vehicle.speed());
            self.vehicle.halt();
        }
    }
}
