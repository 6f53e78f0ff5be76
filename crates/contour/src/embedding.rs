//! Mapping grid indices to drawing-space positions.
//!
//! The classification and assembly logic is shared by every embedding; only
//! the construction of corner positions differs. [`Planar`] lays the grid on
//! a flat plane. [`Elevation`] lifts each corner to its own sample value so
//! contours thread through 3D space at the height of their level.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::{ContourError, ContourResult};

/// A drawing-space coordinate that can be linearly interpolated.
pub trait Position: Copy + PartialEq + Debug + Send + Sync {
    /// Interpolate towards `other`; `t = 0` returns `self` and `t = 1`
    /// returns `other` exactly.
    fn lerp(self, other: Self, t: f32) -> Self;

    /// Squared Euclidean distance.
    fn distance_sq(self, other: Self) -> f32;

    /// Coordinates in axis order (x, y[, z]).
    fn coords(&self) -> Vec<f32>;
}

#[inline]
fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    // Weighted form keeps both endpoints exact.
    (1.0 - t) * a + t * b
}

/// A point on the drawing plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Position for Point2 {
    fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(lerp_f32(self.x, other.x, t), lerp_f32(self.y, other.y, t))
    }

    fn distance_sq(self, other: Self) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    fn coords(&self) -> Vec<f32> {
        vec![self.x, self.y]
    }
}

/// A point in space; `z` carries elevation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Position for Point3 {
    fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            lerp_f32(self.x, other.x, t),
            lerp_f32(self.y, other.y, t),
            lerp_f32(self.z, other.z, t),
        )
    }

    fn distance_sq(self, other: Self) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        dx * dx + dy * dy + dz * dz
    }

    fn coords(&self) -> Vec<f32> {
        vec![self.x, self.y, self.z]
    }
}

/// Scale from grid index to drawing units along each in-plane axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub x: f32,
    pub y: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

impl Spacing {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn uniform(s: f32) -> Self {
        Self { x: s, y: s }
    }

    /// Reject spacings that would collapse or poison output coordinates.
    pub fn validate(&self) -> ContourResult<()> {
        let ok = |v: f32| v.is_finite() && v != 0.0;
        if ok(self.x) && ok(self.y) {
            Ok(())
        } else {
            Err(ContourError::InvalidSpacing {
                x: self.x,
                y: self.y,
            })
        }
    }
}

/// Builds the position of a grid point.
pub trait Embedding: Sync {
    type Point: Position;

    /// Position of grid point `(i, j)` whose sample is `value`.
    fn position(&self, i: usize, j: usize, value: f32) -> Self::Point;
}

impl<E: Embedding + ?Sized> Embedding for &E {
    type Point = E::Point;

    fn position(&self, i: usize, j: usize, value: f32) -> Self::Point {
        (**self).position(i, j, value)
    }
}

/// Flat embedding: `(i, j)` maps to `(i * spacing.x, j * spacing.y)` and the
/// sample only drives classification.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Planar {
    pub spacing: Spacing,
}

impl Planar {
    pub fn new(spacing: Spacing) -> Self {
        Self { spacing }
    }
}

impl Embedding for Planar {
    type Point = Point2;

    #[inline]
    fn position(&self, i: usize, j: usize, _value: f32) -> Point2 {
        Point2::new(i as f32 * self.spacing.x, j as f32 * self.spacing.y)
    }
}

/// Terrain embedding: in-plane axes as [`Planar`], the sample supplies `z`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Elevation {
    pub spacing: Spacing,
}

impl Elevation {
    pub fn new(spacing: Spacing) -> Self {
        Self { spacing }
    }
}

impl Embedding for Elevation {
    type Point = Point3;

    #[inline]
    fn position(&self, i: usize, j: usize, value: f32) -> Point3 {
        Point3::new(i as f32 * self.spacing.x, j as f32 * self.spacing.y, value)
    }
}

/// Embedding selector for configuration files and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingKind {
    #[default]
    Planar,
    #[serde(alias = "elevation_embedded")]
    Elevation,
}

impl std::str::FromStr for EmbeddingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "planar" | "2d" => Ok(EmbeddingKind::Planar),
            "elevation" | "elevation-embedded" | "elevation_embedded" | "3d" => {
                Ok(EmbeddingKind::Elevation)
            }
            other => Err(format!("unknown embedding '{}'", other)),
        }
    }
}
