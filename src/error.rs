use thiserror::Error;

/// Errors raised while configuring or stepping a [Simulation](crate::Simulation).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SimError {
    #[error("time step must be finite and non-negative, got {0}")]
    InvalidTimeStep(f64),
    #[error("vehicle attribute `{name}` must be finite and non-negative, got {value}")]
    InvalidAttribute { name: &'static str, value: f64 },
    #[error("obstacle {index} has invalid dimensions {width}x{height}")]
    InvalidObstacle {
        index: usize,
        width: f64,
        height: f64,
    },
    #[error("footprint has invalid dimensions {width}x{height}")]
    InvalidFootprint { width: f64, height: f64 },
    #[error("world scale must be finite and positive, got {0}")]
    InvalidScale(f64),
    #[error("failed to parse world description")]
    Json(#[from] serde_json::Error),
    #[error("failed to read world description")]
    Io(#[from] std::io::Error),
}

/// Checks that a configuration value is finite and non-negative.
pub(crate) fn check_attribute(name: &'static str, value: f64) -> Result<(), SimError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidAttribute { name, value })
    }
}
