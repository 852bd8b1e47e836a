// crates/vtisnap-core/src/geometry.rs

use crate::error::{Result, SnapError};

pub const AXES: [char; 3] = ['x', 'y', 'z'];

/// Requested sub-region of the lattice, in cell indices. `end` is exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Volume {
    pub start: [usize; 3],
    pub end: [usize; 3],
}

impl Volume {
    pub fn new(start: [usize; 3], end: [usize; 3]) -> Self {
        Self { start, end }
    }

    /// Un-rounded `end - start` per axis, in lattice cells.
    pub fn raw_extent(&self) -> [usize; 3] {
        [
            self.end[0].saturating_sub(self.start[0]),
            self.end[1].saturating_sub(self.start[1]),
            self.end[2].saturating_sub(self.start[2]),
        ]
    }
}

/// Sampling step per axis, in lattice cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stride(pub [usize; 3]);

impl Stride {
    pub const UNIT: Stride = Stride([1, 1, 1]);
}

/// Integer image-data extents of the sampled sub-volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellBounds {
    pub start: [usize; 3],
    pub end: [usize; 3],
}

impl CellBounds {
    pub fn counts(&self) -> [usize; 3] {
        [
            self.end[0] - self.start[0],
            self.end[1] - self.start[1],
            self.end[2] - self.start[2],
        ]
    }

    pub fn cell_count(&self) -> usize {
        let [nx, ny, nz] = self.counts();
        nx * ny * nz
    }

    /// `"xs xf ys yf zs zf"` as used by `WholeExtent` and `Extent`.
    pub fn extent_attr(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.start[0], self.end[0], self.start[1], self.end[1], self.start[2], self.end[2]
        )
    }
}

/// Everything both phases need to agree on: the request, its rounded cell
/// bounds and the number of cells the walk visits per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub volume: Volume,
    pub stride: Stride,
    pub bounds: CellBounds,
    pub steps: [usize; 3],
}

/// Round `coord / stride` to the nearest integer, ties to even.
/// Integer-only so repeated calls can never diverge.
#[inline]
pub fn round_cell(coord: usize, stride: usize) -> usize {
    let q = coord / stride;
    let r = coord % stride;
    let twice = 2 * r;
    if twice > stride || (twice == stride && q % 2 == 1) {
        q + 1
    } else {
        q
    }
}

/// Number of indices in `start, start + stride, ... < end`.
#[inline]
fn walk_len(start: usize, end: usize, stride: usize) -> usize {
    if end <= start {
        0
    } else {
        (end - start).div_ceil(stride)
    }
}

/// Map a volume and stride onto cell bounds and walk lengths.
///
/// Pure: the header and payload phases call this independently and must get
/// identical results.
pub fn sample(volume: &Volume, stride: &Stride) -> Result<Geometry> {
    let mut bounds = CellBounds { start: [0; 3], end: [0; 3] };
    let mut steps = [0usize; 3];

    for a in 0..3 {
        let s = stride.0[a];
        if s == 0 {
            return Err(SnapError::Config(format!("stride along {} must be positive", AXES[a])));
        }
        if volume.end[a] < volume.start[a] {
            return Err(SnapError::Config(format!(
                "volume end < start along {}: {} < {}",
                AXES[a], volume.end[a], volume.start[a]
            )));
        }

        bounds.start[a] = round_cell(volume.start[a], s);
        bounds.end[a] = round_cell(volume.end[a], s);
        if bounds.end[a] < bounds.start[a] {
            return Err(SnapError::Config(format!(
                "cell bounds inverted along {} after rounding: {} < {}",
                AXES[a], bounds.end[a], bounds.start[a]
            )));
        }

        steps[a] = walk_len(volume.start[a], volume.end[a], s);
    }

    Ok(Geometry { volume: *volume, stride: *stride, bounds, steps })
}

impl Geometry {
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.bounds.cell_count()
    }

    /// The walk must visit exactly as many cells per axis as the bounds
    /// declare, or the length prefixes would lie about the payload.
    pub fn check_walk(&self) -> Result<()> {
        let counts = self.bounds.counts();
        for a in 0..3 {
            if counts[a] != self.steps[a] {
                return Err(SnapError::Consistency(format!(
                    "along {}: cell bounds {}..{} declare {} cells but stride {} from {} to {} visits {}",
                    AXES[a],
                    self.bounds.start[a],
                    self.bounds.end[a],
                    counts[a],
                    self.stride.0[a],
                    self.volume.start[a],
                    self.volume.end[a],
                    self.steps[a]
                )));
            }
        }
        Ok(())
    }

    /// Last lattice index visited along `axis`, if any.
    pub fn last_index(&self, axis: usize) -> Option<usize> {
        match self.steps[axis] {
            0 => None,
            n => Some(self.volume.start[axis] + (n - 1) * self.stride.0[axis]),
        }
    }

    /// Cell indices `(i, j, k)` in write order: z outermost, x innermost.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, usize)> {
        let [xs, ys, zs] = self.volume.start;
        let [xf, yf, zf] = self.volume.end;
        let [sx, sy, sz] = self.stride.0;
        (zs..zf).step_by(sz).flat_map(move |k| {
            (ys..yf)
                .step_by(sy)
                .flat_map(move |j| (xs..xf).step_by(sx).map(move |i| (i, j, k)))
        })
    }
}
