use alloc::vec::Vec;

use rand::Rng;

use crate::angle;
use crate::behavior;
use crate::boid::Boid;
use crate::config::FlockConfig;
use crate::error::{check_field, FlockError};
use crate::neighborhood;
use crate::vector::Vector2D;

/// A flock on a toroidal field centered on the origin.
///
/// Every step is computed from a snapshot of the previous frame, so the
/// result does not depend on the order the boids are stored in.
#[derive(Debug, Clone)]
pub struct FlockSimulation {
    boids: Vec<Boid>,
    config: FlockConfig,
    width: f32,
    height: f32,
    attractor: Option<Vector2D>,
    step_count: u64,
}

impl FlockSimulation {
    /// Spawn `count` boids at random positions drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(
        width: f32,
        height: f32,
        count: usize,
        config: FlockConfig,
        rng: &mut R,
    ) -> Result<Self, FlockError> {
        check_field(width, height)?;
        config.validate()?;
        if count == 0 {
            return Err(FlockError::EmptyFlock);
        }

        let boids = (0..count)
            .map(|_| Boid::random(&mut *rng, width, height, &config))
            .collect();

        log::debug!("Spawned {} boids on a {}x{} field", count, width, height);

        Ok(Self::assemble(boids, config, width, height))
    }

    /// Spawn `count` boids using the thread-local RNG.
    #[cfg(feature = "std")]
    pub fn from_entropy(
        width: f32,
        height: f32,
        count: usize,
        config: FlockConfig,
    ) -> Result<Self, FlockError> {
        Self::new(width, height, count, config, &mut rand::thread_rng())
    }

    /// Build a flock from explicit boids, keeping their order.
    ///
    /// Every boid must start inside the field plus its perception margin.
    pub fn from_boids(
        width: f32,
        height: f32,
        config: FlockConfig,
        boids: Vec<Boid>,
    ) -> Result<Self, FlockError> {
        check_field(width, height)?;
        config.validate()?;
        if boids.is_empty() {
            return Err(FlockError::EmptyFlock);
        }
        for boid in &boids {
            boid.validate()?;
            if !boid.within_margin(width, height) {
                return Err(FlockError::OutsideField {
                    x: boid.position.x,
                    y: boid.position.y,
                });
            }
        }

        let mut flock = Self::assemble(boids, config, width, height);
        for boid in flock.boids.iter_mut() {
            boid.heading = angle::normalize(boid.heading);
        }
        Ok(flock)
    }

    fn assemble(boids: Vec<Boid>, config: FlockConfig, width: f32, height: f32) -> Self {
        Self {
            boids,
            config,
            width,
            height,
            attractor: None,
            step_count: 0,
        }
    }

    /// Advance every boid by one step.
    pub fn step(&mut self) {
        let previous = self.boids.clone();
        let mut seen = 0;

        let next: Vec<Boid> = previous
            .iter()
            .enumerate()
            .map(|(index, boid)| {
                let (next, neighbor_count) = self.advance(index, boid, &previous);
                seen += neighbor_count;
                next
            })
            .collect();

        self.boids = next;
        self.step_count += 1;

        log::trace!(
            "Step {}: {} boids saw {} neighbors",
            self.step_count,
            self.boids.len(),
            seen
        );
    }

    fn advance(&self, index: usize, boid: &Boid, previous: &[Boid]) -> (Boid, usize) {
        let mut next = *boid;
        let displacement = next.advance();

        let neighbors =
            neighborhood::visible_neighbors(index, &next, previous, self.config.cone_test);

        if !neighbors.is_empty() {
            let mates = || neighbors.iter().map(|&other| &previous[other]);

            next.heading = behavior::separation(&next, mates(), &self.config);
            next.heading = behavior::alignment(&next, mates(), &self.config);
            next.heading = behavior::cohesion(&next, mates(), &self.config);
            if let Some(target) = self.attractor {
                next.heading = behavior::tracking(&next, target, &self.config);
            }
        }

        next.wrap_edges(self.width, self.height, displacement);
        next.heading = angle::normalize(next.heading);

        (next, neighbors.len())
    }

    /// Indices of the boids that boid `index` can currently see.
    ///
    /// Returns an empty list when `index` is not part of the flock.
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        match self.boids.get(index) {
            Some(boid) => {
                neighborhood::visible_neighbors(index, boid, &self.boids, self.config.cone_test)
            }
            None => Vec::new(),
        }
    }

    /// Change the field size. Boids left past the new margin move to the
    /// opposite edge right away.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), FlockError> {
        check_field(width, height)?;
        self.width = width;
        self.height = height;

        let mut moved = 0;
        for boid in self.boids.iter_mut() {
            if !boid.within_margin(width, height) {
                boid.confine(width, height);
                moved += 1;
            }
        }

        log::debug!(
            "Resized field to {}x{}, {} boids moved inside",
            width,
            height,
            moved
        );
        Ok(())
    }

    pub fn set_attractor(&mut self, attractor: Option<Vector2D>) {
        log::debug!("Attractor set to {:?}", attractor);
        self.attractor = attractor;
    }

    pub fn attractor(&self) -> Option<Vector2D> {
        self.attractor
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Number of completed steps.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }
}
