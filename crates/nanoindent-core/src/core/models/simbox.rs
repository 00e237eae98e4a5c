use nalgebra::{Point3, Vector3};

/// An orthogonal simulation cell.
///
/// Bounds are stored as the lower and upper corners in Angstroms. Each axis is either periodic
/// (LAMMPS boundary flag `p`) or not (`f`, `s`, `m`); only periodic axes take part in the
/// minimum-image convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationBox {
    /// Lower corner of the box.
    pub lo: Point3<f64>,
    /// Upper corner of the box.
    pub hi: Point3<f64>,
    /// Periodicity flags for x, y and z.
    pub periodic: [bool; 3],
}

impl SimulationBox {
    pub fn new(lo: Point3<f64>, hi: Point3<f64>, periodic: [bool; 3]) -> Self {
        Self { lo, hi, periodic }
    }

    /// A non-periodic box spanning the given corners.
    pub fn open(lo: Point3<f64>, hi: Point3<f64>) -> Self {
        Self::new(lo, hi, [false; 3])
    }

    /// Edge lengths along x, y and z.
    pub fn lengths(&self) -> Vector3<f64> {
        self.hi - self.lo
    }

    pub fn is_periodic(&self, axis: usize) -> bool {
        self.periodic[axis]
    }

    /// Applies the minimum-image convention to a separation vector.
    ///
    /// Non-periodic axes, and periodic axes with a degenerate length, are left untouched.
    pub fn minimum_image(&self, delta: Vector3<f64>) -> Vector3<f64> {
        let lengths = self.lengths();
        let mut out = delta;
        for axis in 0..3 {
            let length = lengths[axis];
            if self.periodic[axis] && length > 0.0 {
                out[axis] -= length * (out[axis] / length).round();
            }
        }
        out
    }

    /// Maps a point given in fractional (scaled) coordinates to Cartesian coordinates.
    pub fn from_fractional(&self, scaled: Point3<f64>) -> Point3<f64> {
        self.lo + self.lengths().component_mul(&scaled.coords)
    }

    /// Wraps a point back into the box along periodic axes.
    pub fn wrap(&self, point: Point3<f64>) -> Point3<f64> {
        let lengths = self.lengths();
        let mut out = point;
        for axis in 0..3 {
            let length = lengths[axis];
            if self.periodic[axis] && length > 0.0 {
                let offset = (out[axis] - self.lo[axis]).rem_euclid(length);
                out[axis] = self.lo[axis] + offset;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic(periodic: bool) -> SimulationBox {
        SimulationBox::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 10.0, 10.0),
            [periodic; 3],
        )
    }

    #[test]
    fn minimum_image_folds_periodic_axes() {
        let b = cubic(true);
        let d = b.minimum_image(Vector3::new(9.0, -6.0, 4.0));
        assert!((d.x - (-1.0)).abs() < 1e-12);
        assert!((d.y - 4.0).abs() < 1e-12);
        assert!((d.z - 4.0).abs() < 1e-12);
    }

    #[test]
    fn minimum_image_ignores_open_axes() {
        let b = cubic(false);
        let d = b.minimum_image(Vector3::new(9.0, -6.0, 4.0));
        assert_eq!(d, Vector3::new(9.0, -6.0, 4.0));
    }

    #[test]
    fn mixed_periodicity_only_folds_flagged_axes() {
        let b = SimulationBox::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 10.0, 10.0),
            [true, true, false],
        );
        let d = b.minimum_image(Vector3::new(8.0, 8.0, 8.0));
        assert!((d.x + 2.0).abs() < 1e-12);
        assert!((d.y + 2.0).abs() < 1e-12);
        assert!((d.z - 8.0).abs() < 1e-12);
    }

    #[test]
    fn fractional_coordinates_are_scaled_by_box() {
        let b = SimulationBox::open(Point3::new(-5.0, 0.0, 2.0), Point3::new(5.0, 4.0, 6.0));
        let p = b.from_fractional(Point3::new(0.5, 0.25, 1.0));
        assert_eq!(p, Point3::new(0.0, 1.0, 6.0));
    }

    #[test]
    fn wrap_brings_points_back_into_periodic_box() {
        let b = cubic(true);
        let p = b.wrap(Point3::new(-1.0, 12.5, 5.0));
        assert!((p.x - 9.0).abs() < 1e-12);
        assert!((p.y - 2.5).abs() < 1e-12);
        assert!((p.z - 5.0).abs() < 1e-12);
    }
}
