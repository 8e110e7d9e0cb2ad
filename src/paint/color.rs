//! 24-bit RGB color value
//!
//! Every constructor and arithmetic operator clamps channels into `0..=255`,
//! so colors never wrap.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

#[inline]
fn clamp_channel(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// An opaque RGB color with 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    /// Build a color from arbitrary integers, clamping each channel
    pub fn new(r: i32, g: i32, b: i32) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Build a color from channels that are already in range
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceptual luminance: 0.30 R + 0.59 G + 0.11 B, truncated.
    /// Integer weights keep white at exactly 255.
    #[inline]
    pub fn luminance(&self) -> u8 {
        let l = 30 * self.r as u32 + 59 * self.g as u32 + 11 * self.b as u32;
        (l / 100) as u8
    }

    /// Gray with the same luminance
    pub fn to_gray(&self) -> Self {
        let l = self.luminance();
        Self::rgb(l, l, l)
    }

    /// Channel-wise maximum
    pub fn max(self, other: Color) -> Self {
        Self::rgb(
            self.r.max(other.r),
            self.g.max(other.g),
            self.b.max(other.b),
        )
    }

    /// Channel-wise minimum
    pub fn min(self, other: Color) -> Self {
        Self::rgb(
            self.r.min(other.r),
            self.g.min(other.g),
            self.b.min(other.b),
        )
    }

    /// Channel-wise absolute difference
    pub fn abs_diff(self, other: Color) -> Self {
        self.max(other) - self.min(other)
    }

    /// Fully saturated, half-lightness color for a hue angle in degrees.
    /// Angles outside `0..360` wrap around.
    pub fn from_hue(angle: i32) -> Self {
        let angle = angle.rem_euclid(360);
        let rising = 255 * (angle % 60) / 60;
        let falling = 255 - rising;
        match angle / 60 {
            0 => Self::new(255, rising, 0),
            1 => Self::new(falling, 255, 0),
            2 => Self::new(0, 255, rising),
            3 => Self::new(0, falling, 255),
            4 => Self::new(rising, 0, 255),
            _ => Self::new(255, 0, falling),
        }
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, o: Color) -> Color {
        Color::new(
            self.r as i32 + o.r as i32,
            self.g as i32 + o.g as i32,
            self.b as i32 + o.b as i32,
        )
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, o: Color) {
        *self = *self + o;
    }
}

impl Sub for Color {
    type Output = Color;

    /// Negative results clamp to zero
    fn sub(self, o: Color) -> Color {
        Color::new(
            self.r as i32 - o.r as i32,
            self.g as i32 - o.g as i32,
            self.b as i32 - o.b as i32,
        )
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, s: f64) -> Color {
        Color::new(
            (s * self.r as f64) as i32,
            (s * self.g as f64) as i32,
            (s * self.b as f64) as i32,
        )
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<Color> for (u8, u8, u8) {
    fn from(c: Color) -> Self {
        (c.r, c.g, c.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_clamps() {
        assert_eq!(Color::new(-20, 300, 128), Color::rgb(0, 255, 128));
        assert_eq!(Color::new(i32::MIN, i32::MAX, 0), Color::rgb(0, 255, 0));
    }

    #[test]
    fn test_add_black_is_identity() {
        for c in [Color::WHITE, Color::RED, Color::rgb(12, 34, 56)] {
            assert_eq!(c + Color::BLACK, c);
        }
    }

    #[test]
    fn test_arithmetic_saturates() {
        let c = Color::rgb(200, 100, 10);
        assert_eq!(c + c, Color::rgb(255, 200, 20));
        assert_eq!(Color::rgb(10, 10, 10) - c, Color::rgb(0, 0, 0));
        assert_eq!(c * 2.0, Color::rgb(255, 200, 20));
        assert_eq!(c * -1.0, Color::BLACK);

        let mut acc = Color::rgb(250, 0, 0);
        acc += Color::rgb(10, 5, 0);
        assert_eq!(acc, Color::rgb(255, 5, 0));
    }

    #[test]
    fn test_scale_truncates() {
        assert_eq!(Color::rgb(255, 101, 3) * 0.5, Color::rgb(127, 50, 1));
        assert_eq!(Color::rgb(17, 18, 19) * 1.0, Color::rgb(17, 18, 19));
    }

    #[test]
    fn test_luminance() {
        assert_eq!(Color::WHITE.luminance(), 255);
        assert_eq!(Color::BLACK.luminance(), 0);
        assert_eq!(Color::RED.luminance(), 76);
        assert_eq!(Color::GREEN.luminance(), 150);
        assert_eq!(Color::BLUE.luminance(), 28);
        assert_eq!(Color::RED.to_gray(), Color::rgb(76, 76, 76));
    }

    #[test]
    fn test_max_min_per_channel() {
        let a = Color::rgb(10, 200, 30);
        let b = Color::rgb(20, 100, 40);
        assert_eq!(a.max(b), Color::rgb(20, 200, 40));
        assert_eq!(a.min(b), Color::rgb(10, 100, 30));
        assert_eq!(a.abs_diff(b), Color::rgb(10, 100, 10));
        assert_eq!(b.abs_diff(a), a.abs_diff(b));
    }

    #[test]
    fn test_hue_sectors() {
        assert_eq!(Color::from_hue(0), Color::rgb(255, 0, 0));
        assert_eq!(Color::from_hue(30), Color::rgb(255, 127, 0));
        assert_eq!(Color::from_hue(60), Color::rgb(255, 255, 0));
        assert_eq!(Color::from_hue(120), Color::rgb(0, 255, 0));
        assert_eq!(Color::from_hue(180), Color::rgb(0, 255, 255));
        assert_eq!(Color::from_hue(240), Color::rgb(0, 0, 255));
        assert_eq!(Color::from_hue(300), Color::rgb(255, 0, 255));
        assert_eq!(Color::from_hue(360), Color::from_hue(0));
        assert_eq!(Color::from_hue(-60), Color::from_hue(300));
    }

    #[test]
    fn test_display_and_serde() {
        let c = Color::rgb(1, 2, 3);
        assert_eq!(c.to_string(), "(1,2,3)");
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"r":1,"g":2,"b":3}"#);
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
