use thiserror::Error;

/// Rejected flock configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlockError {
    #[error("field dimensions must be positive and finite, got {width}x{height}")]
    InvalidField { width: f32, height: f32 },

    #[error("a flock needs at least one boid")]
    EmptyFlock,

    #[error("`{name}` is out of range: {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("boid at ({x}, {y}) is outside the field margin")]
    OutsideField { x: f32, y: f32 },
}

pub(crate) fn check_field(width: f32, height: f32) -> Result<(), FlockError> {
    // Half of a subnormal dimension rounds to zero and leaves nothing to spawn in.
    let valid = |v: f32| v.is_finite() && v / 2.0 > 0.0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(FlockError::InvalidField { width, height })
    }
}

/// Finite and not negative.
pub(crate) fn check_non_negative(name: &'static str, value: f32) -> Result<(), FlockError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FlockError::InvalidParameter { name, value })
    }
}

/// A blend weight in `[0, 1]`.
pub(crate) fn check_weight(name: &'static str, value: f32) -> Result<(), FlockError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(FlockError::InvalidParameter { name, value })
    }
}

pub(crate) fn check_finite(name: &'static str, value: f32) -> Result<(), FlockError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FlockError::InvalidParameter { name, value })
    }
}
