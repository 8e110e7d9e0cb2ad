//! 2D vector for particle physics

use std::f64::consts::TAU;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};

use crate::util::Rng;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector of length `magnitude` pointing at `angle` radians
    #[inline]
    pub fn polar(angle: f64, magnitude: f64) -> Self {
        Self::new(angle.cos() * magnitude, angle.sin() * magnitude)
    }

    /// Unit vector in a uniformly random direction
    pub fn random_unit(rng: &mut Rng) -> Self {
        Self::polar(rng.next_f64() * TAU, 1.0)
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    #[inline]
    pub fn magnitude2(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.magnitude2().sqrt()
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }
}

impl MulAssign<f64> for Vec2 {
    #[inline]
    fn mul_assign(&mut self, k: f64) {
        self.x *= k;
        self.y *= k;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_polar_uses_magnitude() {
        let v = Vec2::polar(FRAC_PI_2, 3.0);
        assert!(approx(v.x, 0.0));
        assert!(approx(v.y, 3.0));
        assert!(approx(v.magnitude(), 3.0));
        assert!(approx(v.angle(), FRAC_PI_2));
    }

    #[test]
    fn test_random_unit_has_length_one() {
        let mut rng = Rng::new(3);
        for _ in 0..50 {
            assert!(approx(Vec2::random_unit(&mut rng).magnitude(), 1.0));
        }
    }

    #[test]
    fn test_ops() {
        let mut v = Vec2::new(1.0, -2.0) + Vec2::new(3.0, 4.0);
        assert_eq!(v, Vec2::new(4.0, 2.0));
        v *= 0.5;
        assert_eq!(v - Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0));
        assert_eq!(-v, Vec2::new(-2.0, -1.0));
        assert_eq!(v.magnitude2(), 5.0);
    }
}
