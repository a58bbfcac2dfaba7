pub use cgmath;
pub use collision::{CollisionEnd, CollisionVerdict, Corners, Footprint};
pub use control::{apply_controls, run_frame, InputState, SteerRule, ThrottleRule};
pub use error::SimError;
pub use obstacle::{Obstacle, ObstacleField};
pub use simulation::{CollisionResponse, FrameReport, Simulation, WorldConfig};
pub use util::Interval;
pub use vehicle::{Pose, Vehicle, VehicleAttributes};

pub mod collision;
mod control;
#[cfg(feature = "debug")]
mod debug;
mod error;
pub mod math;
mod obstacle;
mod simulation;
mod util;
mod vehicle;
