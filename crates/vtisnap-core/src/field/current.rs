// crates/vtisnap-core/src/field/current.rs

use ndarray::ArrayView3;

use crate::lattice::Lattice;

/// Per-axis derived current at a cell, computed from the two magnetic
/// components transverse to that axis.
///
/// The exporter only calls these; swap the implementation to change (or stub)
/// the physics.
pub trait CurrentSource {
    fn ix(&self, i: usize, j: usize, k: usize, hy: &ArrayView3<f64>, hz: &ArrayView3<f64>, lattice: &Lattice) -> f64;

    fn iy(&self, i: usize, j: usize, k: usize, hx: &ArrayView3<f64>, hz: &ArrayView3<f64>, lattice: &Lattice) -> f64;

    fn iz(&self, i: usize, j: usize, k: usize, hx: &ArrayView3<f64>, hy: &ArrayView3<f64>, lattice: &Lattice) -> f64;
}

/// Loop integral of H around the cell face normal to each axis (Ampère's law
/// on the Yee grid). Zero on the lower boundary faces, where the backward
/// neighbour does not exist.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineIntegralCurrent;

impl CurrentSource for LineIntegralCurrent {
    fn ix(&self, i: usize, j: usize, k: usize, hy: &ArrayView3<f64>, hz: &ArrayView3<f64>, lattice: &Lattice) -> f64 {
        if j == 0 || k == 0 {
            return 0.0;
        }
        lattice.dy() * (hy[[i, j, k - 1]] - hy[[i, j, k]]) + lattice.dz() * (hz[[i, j, k]] - hz[[i, j - 1, k]])
    }

    fn iy(&self, i: usize, j: usize, k: usize, hx: &ArrayView3<f64>, hz: &ArrayView3<f64>, lattice: &Lattice) -> f64 {
        if i == 0 || k == 0 {
            return 0.0;
        }
        lattice.dx() * (hx[[i, j, k]] - hx[[i, j, k - 1]]) + lattice.dz() * (hz[[i - 1, j, k]] - hz[[i, j, k]])
    }

    fn iz(&self, i: usize, j: usize, k: usize, hx: &ArrayView3<f64>, hy: &ArrayView3<f64>, lattice: &Lattice) -> f64 {
        if i == 0 || j == 0 {
            return 0.0;
        }
        lattice.dx() * (hx[[i, j - 1, k]] - hx[[i, j, k]]) + lattice.dy() * (hy[[i, j, k]] - hy[[i - 1, j, k]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn lattice() -> Lattice {
        Lattice::new([4, 4, 4], [0.5, 0.25, 2.0], 1e-12)
    }

    #[test]
    fn uniform_h_has_no_current() {
        let h = Array3::from_elem((5, 5, 5), 3.0);
        let v = h.view();
        let c = LineIntegralCurrent;
        let l = lattice();
        assert_eq!(c.ix(2, 2, 2, &v, &v, &l), 0.0);
        assert_eq!(c.iy(2, 2, 2, &v, &v, &l), 0.0);
        assert_eq!(c.iz(2, 2, 2, &v, &v, &l), 0.0);
    }

    #[test]
    fn lower_faces_are_zero() {
        let mut h = Array3::zeros((5, 5, 5));
        h[[0, 1, 1]] = 7.0;
        let v = h.view();
        let c = LineIntegralCurrent;
        let l = lattice();
        assert_eq!(c.iy(0, 1, 1, &v, &v, &l), 0.0);
        assert_eq!(c.iz(0, 1, 1, &v, &v, &l), 0.0);
    }

    #[test]
    fn ix_is_loop_integral() {
        let mut hy = Array3::zeros((5, 5, 5));
        let mut hz = Array3::zeros((5, 5, 5));
        hy[[1, 1, 0]] = 4.0; // Hy[i, j, k-1]
        hy[[1, 1, 1]] = 1.0;
        hz[[1, 1, 1]] = 3.0;
        hz[[1, 0, 1]] = 2.0; // Hz[i, j-1, k]
        let l = lattice();
        let got = LineIntegralCurrent.ix(1, 1, 1, &hy.view(), &hz.view(), &l);
        // dy * (4 - 1) + dz * (3 - 2)
        assert_eq!(got, 0.25 * 3.0 + 2.0 * 1.0);
    }
}
