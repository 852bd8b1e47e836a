// crates/vtisnap-core/src/field/mod.rs

pub mod current;

use ndarray::{Array3, ArrayView3};

use crate::lattice::Lattice;

/// Borrowed views of the six staggered field component arrays, indexed `[i, j, k]`.
#[derive(Clone, Copy, Debug)]
pub struct FieldSet<'a> {
    pub ex: ArrayView3<'a, f64>,
    pub ey: ArrayView3<'a, f64>,
    pub ez: ArrayView3<'a, f64>,
    pub hx: ArrayView3<'a, f64>,
    pub hy: ArrayView3<'a, f64>,
    pub hz: ArrayView3<'a, f64>,
}

impl<'a> FieldSet<'a> {
    pub fn electric(&self) -> [&ArrayView3<'a, f64>; 3] {
        [&self.ex, &self.ey, &self.ez]
    }

    pub fn magnetic(&self) -> [&ArrayView3<'a, f64>; 3] {
        [&self.hx, &self.hy, &self.hz]
    }
}

/// Owned field storage, for drivers that do not already hold their own arrays.
#[derive(Clone, Debug)]
pub struct FieldArrays {
    pub ex: Array3<f64>,
    pub ey: Array3<f64>,
    pub ez: Array3<f64>,
    pub hx: Array3<f64>,
    pub hy: Array3<f64>,
    pub hz: Array3<f64>,
}

impl FieldArrays {
    /// Every E component set to `e`, every H component to `h`.
    pub fn uniform(shape: [usize; 3], e: f64, h: f64) -> Self {
        let sh = (shape[0], shape[1], shape[2]);
        Self {
            ex: Array3::from_elem(sh, e),
            ey: Array3::from_elem(sh, e),
            ez: Array3::from_elem(sh, e),
            hx: Array3::from_elem(sh, h),
            hy: Array3::from_elem(sh, h),
            hz: Array3::from_elem(sh, h),
        }
    }

    /// Arrays hold one sample past the last cell on every axis.
    pub fn lattice_shape(lattice: &Lattice) -> [usize; 3] {
        [lattice.size[0] + 1, lattice.size[1] + 1, lattice.size[2] + 1]
    }

    pub fn view(&self) -> FieldSet<'_> {
        FieldSet {
            ex: self.ex.view(),
            ey: self.ey.view(),
            ez: self.ez.view(),
            hx: self.hx.view(),
            hy: self.hy.view(),
            hz: self.hz.view(),
        }
    }
}
