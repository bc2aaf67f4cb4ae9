//! Heading arithmetic and the perception-cone test.

use core::f32::consts::{PI, TAU};

use crate::math;

/// Map any finite angle onto its canonical value in `(-π, π]`.
pub fn normalize(angle: f32) -> f32 {
    let wrapped = angle % TAU;
    if wrapped > PI {
        wrapped - TAU
    } else if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Signed angle that takes `from` onto `to`, in `(-π, π]`.
pub fn signed_difference(to: f32, from: f32) -> f32 {
    normalize(to - from)
}

/// How a boid decides whether a bearing lies inside its perception cone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConeTest {
    /// `|normalize(bearing - heading)| <= visible_angle / 2`.
    #[default]
    SignedDifference,
    /// Compares `bearing + heading` against the raw cone bounds reduced with
    /// a truncating remainder. Wrong almost everywhere except near heading 0
    /// and only kept to reproduce old recordings.
    Legacy,
}

impl ConeTest {
    pub fn contains(self, heading: f32, visible_angle: f32, bearing: f32) -> bool {
        let half = visible_angle / 2.0;
        match self {
            ConeTest::SignedDifference => math::abs(signed_difference(bearing, heading)) <= half,
            ConeTest::Legacy => {
                let angle = bearing + heading;
                let min_angle = (heading - half) % TAU;
                let max_angle = (heading + half) % TAU;
                angle >= min_angle && angle <= max_angle
            }
        }
    }
}
