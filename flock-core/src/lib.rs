#![cfg_attr(not(feature = "std"), no_std)]

//! A steppable boids flocking model.
//!
//! Agents carry a scalar heading and a constant speed. Every call to
//! [`FlockSimulation::step`] moves each agent along its heading, lets it look
//! at the agents inside its perception cone, blends its heading toward them
//! and wraps it around a toroidal field centered on the origin.

extern crate alloc;

pub mod angle;
pub mod behavior;
mod boid;
mod config;
mod error;
mod flock;
mod math;
pub mod neighborhood;
mod vector;

pub use angle::ConeTest;
pub use boid::{Boid, PerceptionCone};
pub use config::FlockConfig;
pub use error::FlockError;
pub use flock::FlockSimulation;
pub use vector::Vector2D;
