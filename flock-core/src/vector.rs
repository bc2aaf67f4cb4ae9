use crate::math;

/// A 2D vector used for positions and displacements
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Vector of length `radius` pointing along `angle` (radians).
    pub fn from_polar(radius: f32, angle: f32) -> Self {
        let (sin, cos) = math::sin_cos(angle);
        Self {
            x: radius * cos,
            y: radius * sin,
        }
    }

    pub fn magnitude(&self) -> f32 {
        math::sqrt(self.x * self.x + self.y * self.y)
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        (*self - *other).magnitude()
    }

    /// Angle of this vector in `[-π, π]`, as returned by `atan2`.
    pub fn angle(&self) -> f32 {
        math::atan2(self.y, self.x)
    }

    /// Bearing from `self` to `other`, or `None` when both points coincide.
    pub fn bearing_to(&self, other: &Vector2D) -> Option<f32> {
        let offset = *other - *self;
        if offset.x == 0.0 && offset.y == 0.0 {
            None
        } else {
            Some(offset.angle())
        }
    }

    /// Rotate counter-clockwise by `angle` radians around the origin.
    pub fn rotate(&self, angle: f32) -> Self {
        let (sin, cos) = math::sin_cos(angle);
        Self {
            x: self.x * cos - self.y * sin,
            y: self.y * cos + self.x * sin,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_vector2d_magnitude() {
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.magnitude(), 5.0);
    }

    #[test]
    fn test_vector2d_operations() {
        let v1 = Vector2D::new(1.0, 2.0);
        let v2 = Vector2D::new(3.0, 4.0);

        let sum = v1 + v2;
        assert_eq!(sum, Vector2D::new(4.0, 6.0));

        let diff = v2 - v1;
        assert_eq!(diff, Vector2D::new(2.0, 2.0));

        let scaled = v1 * 2.0;
        assert_eq!(scaled, Vector2D::new(2.0, 4.0));

        let halved = v2 / 2.0;
        assert_eq!(halved, Vector2D::new(1.5, 2.0));
    }

    #[test]
    fn test_from_polar() {
        let east = Vector2D::from_polar(5.0, 0.0);
        assert_eq!(east, Vector2D::new(5.0, 0.0));

        let north = Vector2D::from_polar(2.0, FRAC_PI_2);
        assert!(north.x.abs() < 1e-6);
        assert!((north.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_bearing_to() {
        let origin = Vector2D::zero();
        assert_eq!(origin.bearing_to(&Vector2D::new(10.0, 0.0)), Some(0.0));

        let west = origin.bearing_to(&Vector2D::new(-1.0, 0.0)).unwrap();
        assert!((west - PI).abs() < 1e-6);

        assert_eq!(origin.bearing_to(&origin), None);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let v = Vector2D::new(1.0, 0.0).rotate(FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }
}
