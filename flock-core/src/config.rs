use core::f32::consts::PI;

use crate::angle::ConeTest;
use crate::error::{check_finite, check_non_negative, check_weight, FlockError};

/// Configuration for the flock simulation
///
/// Steering rules blend the scalar heading toward a target angle:
/// `heading = heading * (1 - weight) + target * weight`. Separation pushes
/// away from the neighbor instead, subtracting the bearing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockConfig {
    /// Distance travelled per step.
    pub speed: f32,
    /// Heading every boid starts with.
    pub initial_heading: f32,
    /// Perception radius.
    pub visible_distance: f32,
    /// Full width of the forward perception cone, in radians.
    pub visible_angle: f32,
    pub separation_weight: f32,
    /// Separation only reacts to neighbors closer than this fraction of
    /// the visible distance.
    pub separation_range: f32,
    /// Separation only reacts to neighbors whose heading differs by less
    /// than this.
    pub separation_angle: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    /// Pull toward the attractor point. Zero leaves the rule inert.
    pub tracking_weight: f32,
    pub cone_test: ConeTest,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            initial_heading: PI,
            visible_distance: 100.0,
            visible_angle: 1.5 * PI,
            separation_weight: 0.05,
            separation_range: 1.0 / 3.0,
            separation_angle: PI / 8.0,
            alignment_weight: 0.2,
            cohesion_weight: 0.05,
            tracking_weight: 0.0,
            cone_test: ConeTest::default(),
        }
    }
}

impl FlockConfig {
    pub fn validate(&self) -> Result<(), FlockError> {
        check_non_negative("speed", self.speed)?;
        check_finite("initial_heading", self.initial_heading)?;
        check_non_negative("visible_distance", self.visible_distance)?;
        check_non_negative("visible_angle", self.visible_angle)?;
        check_weight("separation_weight", self.separation_weight)?;
        check_non_negative("separation_range", self.separation_range)?;
        check_non_negative("separation_angle", self.separation_angle)?;
        check_weight("alignment_weight", self.alignment_weight)?;
        check_weight("cohesion_weight", self.cohesion_weight)?;
        check_weight("tracking_weight", self.tracking_weight)?;
        Ok(())
    }
}
