use crate::Vector;

/// The scales and offsets used to convert stored integer coordinates to
/// real-world values.
///
/// The forward transform is `real = stored * scale + offset`, the inverse is
/// `stored = (real - offset) / scale` truncated toward zero. The scales must
/// be nonzero for the inverse to be meaningful, but this is not validated.
///
/// # Examples
///
/// ```
/// use las_codec::{Scaling, Vector};
/// let scaling = Scaling {
///     scales: Vector::new(0.001, 0.001, 0.001),
///     offsets: Vector::new(1000., 2000., 100.),
/// };
/// assert_eq!(1001.5, scaling.apply_x(1500));
/// assert_eq!(1500, scaling.unapply_x(1001.5));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scaling {
    /// The per-axis multiplicative constants.
    pub scales: Vector<f64>,

    /// The per-axis additive constants.
    pub offsets: Vector<f64>,
}

fn apply(scale: f64, offset: f64, value: i32) -> f64 {
    f64::from(value) * scale + offset
}

fn unapply(scale: f64, offset: f64, value: f64) -> i32 {
    // Truncation, not rounding, to match the stored representation of files
    // written by other producers.
    ((value - offset) / scale) as i32
}

impl Scaling {
    /// Transforms a stored x to a real-world value.
    pub fn apply_x(&self, x: i32) -> f64 {
        apply(self.scales.x, self.offsets.x, x)
    }

    /// Transforms a stored y to a real-world value.
    pub fn apply_y(&self, y: i32) -> f64 {
        apply(self.scales.y, self.offsets.y, y)
    }

    /// Transforms a stored z to a real-world value.
    pub fn apply_z(&self, z: i32) -> f64 {
        apply(self.scales.z, self.offsets.z, z)
    }

    /// Transforms a real-world x back to its stored representation.
    pub fn unapply_x(&self, x: f64) -> i32 {
        unapply(self.scales.x, self.offsets.x, x)
    }

    /// Transforms a real-world y back to its stored representation.
    pub fn unapply_y(&self, y: f64) -> i32 {
        unapply(self.scales.y, self.offsets.y, y)
    }

    /// Transforms a real-world z back to its stored representation.
    pub fn unapply_z(&self, z: f64) -> i32 {
        unapply(self.scales.z, self.offsets.z, z)
    }
}

impl Default for Scaling {
    fn default() -> Scaling {
        Scaling {
            scales: Vector::new(1., 1., 1.),
            offsets: Vector::new(0., 0., 0.),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity() {
        let scaling = Scaling::default();
        assert_eq!(42., scaling.apply_x(42));
        assert_eq!(42, scaling.unapply_x(42.));
    }

    #[test]
    fn roundtrip() {
        let scaling = Scaling {
            scales: Vector::new(0.5, 0.25, 2.),
            offsets: Vector::new(-12.5, 4., 100.),
        };
        for value in [i32::MIN / 4, -1_000_000, -1, 0, 1, 1_000_000, i32::MAX / 4] {
            assert_eq!(value, scaling.unapply_x(scaling.apply_x(value)));
            assert_eq!(value, scaling.unapply_y(scaling.apply_y(value)));
            assert_eq!(value, scaling.unapply_z(scaling.apply_z(value)));
        }
    }

    #[test]
    fn centimeter_scale() {
        let scaling = Scaling {
            scales: Vector::new(0.01, 0.01, 0.01),
            offsets: Vector::new(0., 0., 0.),
        };
        assert_eq!(1., scaling.apply_x(100));
        assert_eq!(100, scaling.unapply_x(1.));
    }

    #[test]
    fn truncates_toward_zero() {
        let scaling = Scaling::default();
        assert_eq!(1, scaling.unapply_x(1.9));
        assert_eq!(-1, scaling.unapply_x(-1.9));
    }
}
