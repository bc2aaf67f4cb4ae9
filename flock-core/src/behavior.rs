//! Steering rules.
//!
//! Each rule takes the boid with its partially steered heading and returns
//! the new heading. Rules blend raw heading values, they do not sum vectors.

use crate::boid::Boid;
use crate::config::FlockConfig;
use crate::math;
use crate::vector::Vector2D;

fn blend(heading: f32, target: f32, weight: f32) -> f32 {
    heading * (1.0 - weight) + target * weight
}

/// Turn away from every close neighbor flying in nearly the same direction.
///
/// Applied once per qualifying neighbor, so each turn sees the previous one.
pub fn separation<'a, I>(boid: &Boid, neighbors: I, config: &FlockConfig) -> f32
where
    I: Iterator<Item = &'a Boid>,
{
    let range = boid.visible_distance * config.separation_range;
    let mut heading = boid.heading;

    for other in neighbors {
        let Some(bearing) = boid.position.bearing_to(&other.position) else {
            continue;
        };
        let close = boid.position.distance(&other.position) < range;
        let parallel = math::abs(other.heading - heading) < config.separation_angle;
        if close && parallel {
            heading =
                heading * (1.0 - config.separation_weight) - bearing * config.separation_weight;
        }
    }

    heading
}

/// Steer toward the mean heading of the neighbors.
pub fn alignment<'a, I>(boid: &Boid, neighbors: I, config: &FlockConfig) -> f32
where
    I: Iterator<Item = &'a Boid>,
{
    let mut sum = 0.0;
    let mut count = 0;

    for other in neighbors {
        sum += other.heading;
        count += 1;
    }

    if count > 0 {
        blend(boid.heading, sum / count as f32, config.alignment_weight)
    } else {
        boid.heading
    }
}

/// Steer toward the centroid of the neighbors.
pub fn cohesion<'a, I>(boid: &Boid, neighbors: I, config: &FlockConfig) -> f32
where
    I: Iterator<Item = &'a Boid>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for other in neighbors {
        sum += other.position;
        count += 1;
    }

    if count == 0 {
        return boid.heading;
    }

    let centroid = sum / count as f32;
    match boid.position.bearing_to(&centroid) {
        Some(bearing) => blend(boid.heading, bearing, config.cohesion_weight),
        None => boid.heading,
    }
}

/// Steer toward an external target such as the pointer.
pub fn tracking(boid: &Boid, target: Vector2D, config: &FlockConfig) -> f32 {
    if config.tracking_weight <= 0.0 {
        return boid.heading;
    }
    match boid.position.bearing_to(&target) {
        Some(bearing) => blend(boid.heading, bearing, config.tracking_weight),
        None => boid.heading,
    }
}
