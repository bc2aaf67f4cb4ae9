use core::f32::consts::FRAC_PI_2;

use rand::Rng;

use crate::angle::ConeTest;
use crate::config::FlockConfig;
use crate::error::{check_finite, check_non_negative, FlockError};
use crate::vector::Vector2D;

/// Arrow shape drawn for every boid, pointing along +y before rotation.
const OUTLINE: [Vector2D; 3] = [
    Vector2D { x: 0.0, y: 15.0 },
    Vector2D { x: -7.0, y: -7.0 },
    Vector2D { x: 7.0, y: -7.0 },
];

/// Displacement past which a boid counts as heading back into the field.
const INWARD_TOLERANCE: f32 = 1.0;

/// A single boid entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub position: Vector2D,
    /// Radians, kept in `(-π, π]` between steps.
    pub heading: f32,
    pub speed: f32,
    pub visible_distance: f32,
    pub visible_angle: f32,
}

/// The circular sector a boid can see, for debug drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerceptionCone {
    pub center: Vector2D,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
}

impl Boid {
    /// A boid at `position` with the heading, speed and perception from `config`.
    pub fn new(position: Vector2D, config: &FlockConfig) -> Self {
        Self {
            position,
            heading: config.initial_heading,
            speed: config.speed,
            visible_distance: config.visible_distance,
            visible_angle: config.visible_angle,
        }
    }

    /// A boid placed uniformly at random over a `width` x `height` field
    /// centered on the origin.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        width: f32,
        height: f32,
        config: &FlockConfig,
    ) -> Self {
        let position = Vector2D::new(
            rng.gen_range(-width / 2.0..width / 2.0),
            rng.gen_range(-height / 2.0..height / 2.0),
        );
        Self::new(position, config)
    }

    pub fn with_heading(mut self, heading: f32) -> Self {
        self.heading = heading;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_perception(mut self, visible_distance: f32, visible_angle: f32) -> Self {
        self.visible_distance = visible_distance;
        self.visible_angle = visible_angle;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), FlockError> {
        check_finite("position.x", self.position.x)?;
        check_finite("position.y", self.position.y)?;
        check_finite("heading", self.heading)?;
        check_non_negative("speed", self.speed)?;
        check_non_negative("visible_distance", self.visible_distance)?;
        check_non_negative("visible_angle", self.visible_angle)?;
        Ok(())
    }

    /// Displacement for one step along the current heading.
    pub fn displacement(&self) -> Vector2D {
        Vector2D::from_polar(self.speed, self.heading)
    }

    /// Move one step forward and return the displacement that was applied.
    pub fn advance(&mut self) -> Vector2D {
        let displacement = self.displacement();
        self.position += displacement;
        displacement
    }

    /// Whether `target` lies within this boid's perception radius and cone.
    ///
    /// A target on top of this boid has no bearing and is never seen.
    pub fn sees(&self, target: &Vector2D, cone: ConeTest) -> bool {
        if self.position.distance(target) > self.visible_distance {
            return false;
        }
        match self.position.bearing_to(target) {
            Some(bearing) => cone.contains(self.heading, self.visible_angle, bearing),
            None => false,
        }
    }

    /// Teleport across a wall once the boid is a full perception radius
    /// past it and still moving outward.
    ///
    /// The field is centered on the origin. The margin keeps boids from
    /// popping in and out of each other's view at the edges.
    pub fn wrap_edges(&mut self, width: f32, height: f32, displacement: Vector2D) {
        let (limit_x, limit_y) = self.margin(width, height);

        if self.position.x > limit_x && displacement.x > -INWARD_TOLERANCE {
            self.position.x = -limit_x;
        } else if self.position.x < -limit_x && displacement.x < INWARD_TOLERANCE {
            self.position.x = limit_x;
        }

        if self.position.y > limit_y && displacement.y > -INWARD_TOLERANCE {
            self.position.y = -limit_y;
        } else if self.position.y < -limit_y && displacement.y < INWARD_TOLERANCE {
            self.position.y = limit_y;
        }
    }

    /// Whether the boid lies inside the field plus its perception margin.
    pub fn within_margin(&self, width: f32, height: f32) -> bool {
        let (limit_x, limit_y) = self.margin(width, height);
        self.position.x.abs() <= limit_x && self.position.y.abs() <= limit_y
    }

    /// Teleport a boid stranded past the margin onto the opposite edge,
    /// whichever way it is moving.
    pub(crate) fn confine(&mut self, width: f32, height: f32) {
        let (limit_x, limit_y) = self.margin(width, height);

        if self.position.x > limit_x {
            self.position.x = -limit_x;
        } else if self.position.x < -limit_x {
            self.position.x = limit_x;
        }

        if self.position.y > limit_y {
            self.position.y = -limit_y;
        } else if self.position.y < -limit_y {
            self.position.y = limit_y;
        }
    }

    fn margin(&self, width: f32, height: f32) -> (f32, f32) {
        (
            width / 2.0 + self.visible_distance,
            height / 2.0 + self.visible_distance,
        )
    }

    /// Triangle vertices for drawing this boid as an arrow along its heading.
    pub fn outline(&self) -> [Vector2D; 3] {
        let rotation = self.heading - FRAC_PI_2;
        OUTLINE.map(|corner| self.position + corner.rotate(rotation))
    }

    pub fn perception_cone(&self) -> PerceptionCone {
        let half = self.visible_angle / 2.0;
        PerceptionCone {
            center: self.position,
            radius: self.visible_distance,
            start_angle: self.heading - half,
            end_angle: self.heading + half,
        }
    }
}
