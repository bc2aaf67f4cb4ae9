//! Perception queries over a frame of boids.

use alloc::vec::Vec;

use crate::angle::ConeTest;
use crate::boid::Boid;

/// Indices of the boids in `frame` that `observer` can see, in index order.
///
/// `observer_index` is the observer's own slot in `frame` and is skipped.
/// The observer does not need to match `frame[observer_index]`: during a
/// step it has already moved while `frame` still holds the previous state.
pub fn visible_neighbors(
    observer_index: usize,
    observer: &Boid,
    frame: &[Boid],
    cone: ConeTest,
) -> Vec<usize> {
    frame
        .iter()
        .enumerate()
        .filter(|&(index, other)| index != observer_index && observer.sees(&other.position, cone))
        .map(|(index, _)| index)
        .collect()
}
