//! Continuous 2D positions and bounding boxes.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::error::{ValueError, ensure_positive};

/// Position or velocity in screen space (pixels, y down).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const RIGHT: Self = Self { x: 1.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or zero for the zero vector.
    pub fn normalized(self) -> Self {
        let length = self.length();
        if length > f32::EPSILON {
            self * (1.0 / length)
        } else {
            Self::ZERO
        }
    }

    /// Rotates counter-clockwise by `radians`.
    pub fn rotated(self, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Axis-aligned box dimensions, anchored at the owner's center.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "BoxSpec"))]
pub struct CollisionBox {
    width: f32,
    height: f32,
}

impl CollisionBox {
    pub fn new(width: f32, height: f32) -> Result<Self, ValueError> {
        let width = ensure_positive("width", f64::from(width))? as f32;
        let height = ensure_positive("height", f64::from(height))? as f32;
        Ok(Self { width, height })
    }

    /// Square box for built-in defaults.
    pub(crate) fn square(size: f32) -> Self {
        debug_assert!(size > 0.0 && size.is_finite());
        Self {
            width: size,
            height: size,
        }
    }

    pub const fn width(&self) -> f32 {
        self.width
    }

    pub const fn height(&self) -> f32 {
        self.height
    }
}

/// Unvalidated on-disk form of [`CollisionBox`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct BoxSpec {
    width: f32,
    height: f32,
}

#[cfg(feature = "serde")]
impl TryFrom<BoxSpec> for CollisionBox {
    type Error = ValueError;

    fn try_from(spec: BoxSpec) -> Result<Self, Self::Error> {
        Self::new(spec.width, spec.height)
    }
}
