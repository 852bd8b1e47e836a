// crates/vtisnap-core/src/validate.rs

use crate::error::{Result, SnapError};
use crate::field::FieldSet;
use crate::geometry::{Geometry, AXES};
use crate::lattice::Lattice;

/// Geometry checks that do not need the field data.
pub fn validate_snapshot(g: &Geometry, lattice: &Lattice) -> Result<()> {
    for a in 0..3 {
        if g.volume.end[a] > lattice.size[a] {
            return Err(SnapError::Config(format!(
                "volume end along {} is {} but the lattice has {} cells",
                AXES[a], g.volume.end[a], lattice.size[a]
            )));
        }
    }
    // Spacing is written into the header; a zero here makes a degenerate image.
    if lattice.spacing.iter().any(|&d| !(d > 0.0)) {
        return Err(SnapError::Config(format!(
            "lattice spacing must be positive, got {:?}",
            lattice.spacing
        )));
    }
    g.check_walk()
}

/// Axes along which each component's average reads one past the walked
/// index, in `Ex Ey Ez Hx Hy Hz` order. The current source only reads at or
/// below the walked index.
const FORWARD_AXES: [[bool; 3]; 6] = [
    [false, true, true],
    [true, false, true],
    [true, true, false],
    [true, false, false],
    [false, true, false],
    [false, false, true],
];

/// Every sample the averaging stencils read must exist in its component
/// array: `last + 1` on the stencil axes, `last` elsewhere.
pub fn validate_fields(g: &Geometry, fields: &FieldSet) -> Result<()> {
    let names = ["Ex", "Ey", "Ez", "Hx", "Hy", "Hz"];
    let arrays = fields.electric().into_iter().chain(fields.magnetic());

    for ((name, forward), arr) in names.iter().zip(FORWARD_AXES).zip(arrays) {
        let dim = arr.dim();
        let dims = [dim.0, dim.1, dim.2];
        for a in 0..3 {
            let Some(last) = g.last_index(a) else {
                continue;
            };
            let read = if forward[a] { last + 1 } else { last };
            if dims[a] <= read {
                return Err(SnapError::Config(format!(
                    "{name} has {} samples along {} but the snapshot reads index {}",
                    dims[a], AXES[a], read
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{sample, Stride, Volume};
    use ndarray::Array3;

    // Yee-shaped arrays for an n^3 lattice: each component one longer on
    // the axes its stencil steps along.
    fn staggered(n: usize) -> [Array3<f64>; 6] {
        let shape = |fwd: [bool; 3]| {
            let d = |a: usize| if fwd[a] { n + 1 } else { n };
            Array3::zeros((d(0), d(1), d(2)))
        };
        FORWARD_AXES.map(shape)
    }

    fn set(a: &[Array3<f64>; 6]) -> FieldSet<'_> {
        FieldSet {
            ex: a[0].view(),
            ey: a[1].view(),
            ez: a[2].view(),
            hx: a[3].view(),
            hy: a[4].view(),
            hz: a[5].view(),
        }
    }

    #[test]
    fn staggered_shapes_cover_the_full_lattice() {
        let g = sample(&Volume::new([0, 0, 0], [4, 4, 4]), &Stride::UNIT).unwrap();
        let arrays = staggered(4);
        validate_fields(&g, &set(&arrays)).unwrap();
    }

    #[test]
    fn short_stencil_axis_is_rejected() {
        let g = sample(&Volume::new([0, 0, 0], [4, 4, 4]), &Stride::UNIT).unwrap();
        let mut arrays = staggered(4);
        // Hy steps along y; drop that extra sample.
        arrays[4] = Array3::zeros((4, 4, 4));
        let err = validate_fields(&g, &set(&arrays)).unwrap_err();
        assert!(matches!(err, SnapError::Config(ref m) if m.starts_with("Hy")), "{err}");

        // Short on an axis no stencil steps along for that component.
        let mut arrays = staggered(4);
        arrays[0] = Array3::zeros((3, 5, 5));
        assert!(matches!(validate_fields(&g, &set(&arrays)), Err(SnapError::Config(_))));
    }
}
