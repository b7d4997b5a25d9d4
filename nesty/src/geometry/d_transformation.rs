use std::fmt::Display;

use crate::geometry::primitives::Point;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Copy, Default)]
/// [Rigid transformation](https://en.wikipedia.org/wiki/Rigid_transformation) of a placed shape,
/// decomposed into an optional mirroring about the y-axis, a counterclockwise rotation around the origin and a translation.
pub struct DTransformation {
    /// The rotation in degrees, normalized to `[0, 360)`
    pub rotation: i32,
    /// Whether x-coordinates are negated before rotating
    pub mirrored: bool,
    /// The translation in the x and y-axis
    pub translation: (i64, i64),
}

impl DTransformation {
    pub fn new(rotation: i32, mirrored: bool, translation: (i64, i64)) -> Self {
        Self {
            rotation: rotation.rem_euclid(360),
            mirrored,
            translation,
        }
    }

    pub const fn empty() -> Self {
        Self {
            rotation: 0,
            mirrored: false,
            translation: (0, 0),
        }
    }

    /// Same mirroring and rotation, different translation.
    pub fn with_translation(self, translation: (i64, i64)) -> Self {
        Self {
            translation,
            ..self
        }
    }

    /// Maps `p` through the transformation.
    /// Quarter turns are exact, other angles are rounded to the nearest integer coordinate.
    pub fn apply(&self, p: Point) -> Point {
        let Point(x, y) = p;
        let x = if self.mirrored { -x } else { x };
        let (rx, ry) = match self.rotation {
            0 => (x, y),
            90 => (-y, x),
            180 => (-x, -y),
            270 => (y, -x),
            deg => {
                let (sin, cos) = (deg as f64).to_radians().sin_cos();
                let (xf, yf) = (x as f64, y as f64);
                (
                    (cos * xf - sin * yf).round() as i64,
                    (sin * xf + cos * yf).round() as i64,
                )
            }
        };
        Point(rx + self.translation.0, ry + self.translation.1)
    }
}

impl Display for DTransformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "r: {}°{}, t: ({}, {})",
            self.rotation,
            if self.mirrored { " (mirrored)" } else { "" },
            self.translation.0,
            self.translation.1
        )
    }
}
