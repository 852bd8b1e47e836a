// crates/vtisnap-core/src/snapshot/payload.rs

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::ExportConfig;
use crate::error::Result;
use crate::field::current::CurrentSource;
use crate::field::FieldSet;
use crate::geometry::Geometry;
use crate::lattice::Lattice;
use crate::progress::ProgressSink;
use crate::snapshot::header::{BlockLayout, TRAILER};
use crate::snapshot::Block;

/// Cell-centred E: each component is the mean of the 4 samples around the
/// cell edge it is staggered on.
#[inline]
pub fn averaged_e(f: &FieldSet, i: usize, j: usize, k: usize) -> [f64; 3] {
    let (ex, ey, ez) = (&f.ex, &f.ey, &f.ez);
    [
        (ex[[i, j, k]] + ex[[i, j + 1, k]] + ex[[i, j, k + 1]] + ex[[i, j + 1, k + 1]]) / 4.0,
        (ey[[i, j, k]] + ey[[i + 1, j, k]] + ey[[i, j, k + 1]] + ey[[i + 1, j, k + 1]]) / 4.0,
        (ez[[i, j, k]] + ez[[i + 1, j, k]] + ez[[i, j + 1, k]] + ez[[i + 1, j + 1, k]]) / 4.0,
    ]
}

/// Cell-centred H: mean of the sample and its neighbour along its own axis.
#[inline]
pub fn averaged_h(f: &FieldSet, i: usize, j: usize, k: usize) -> [f64; 3] {
    let (hx, hy, hz) = (&f.hx, &f.hy, &f.hz);
    [
        (hx[[i, j, k]] + hx[[i + 1, j, k]]) / 2.0,
        (hy[[i, j, k]] + hy[[i, j + 1, k]]) / 2.0,
        (hz[[i, j, k]] + hz[[i, j, k + 1]]) / 2.0,
    ]
}

/// Streams the three appended blocks after a header written by `HeaderBuilder`.
pub struct PayloadEncoder<'a, C: CurrentSource + ?Sized> {
    pub config: ExportConfig,
    pub lattice: &'a Lattice,
    pub current: &'a C,
}

impl<'a, C: CurrentSource + ?Sized> PayloadEncoder<'a, C> {
    pub fn new(config: ExportConfig, lattice: &'a Lattice, current: &'a C) -> Self {
        Self { config, lattice, current }
    }

    fn triple(&self, block: Block, f: &FieldSet, i: usize, j: usize, k: usize) -> [f64; 3] {
        match block {
            Block::EField => averaged_e(f, i, j, k),
            Block::HField => averaged_h(f, i, j, k),
            Block::Current => [
                self.current.ix(i, j, k, &f.hy, &f.hz, self.lattice),
                self.current.iy(i, j, k, &f.hx, &f.hz, self.lattice),
                self.current.iz(i, j, k, &f.hx, &f.hy, self.lattice),
            ],
        }
    }

    /// Write every block, then the trailer, to any sink.
    /// Returns the number of bytes written.
    pub fn encode<W: Write, P: ProgressSink + ?Sized>(
        &self,
        out: &mut W,
        g: &Geometry,
        layout: &BlockLayout,
        fields: &FieldSet,
        progress: &mut P,
    ) -> Result<u64> {
        let triple_len = 3 * self.config.float_size();
        let mut buf: Vec<u8> = Vec::with_capacity(triple_len);
        let mut written = 0u64;

        for block in Block::ALL {
            out.write_all(&self.config.byte_order.u32_bytes(layout.block_len))?;
            written += 4;

            for (i, j, k) in g.cells() {
                buf.clear();
                for v in self.triple(block, fields, i, j, k) {
                    self.config.push_float(&mut buf, v);
                }
                out.write_all(&buf)?;
                written += triple_len as u64;
                progress.advance(triple_len as u64);
            }
        }

        out.write_all(TRAILER.as_bytes())?;
        written += TRAILER.len() as u64;
        Ok(written)
    }

    /// Append the payload to `path`. The handle is released on every exit path;
    /// a failure part way leaves a truncated file behind.
    pub fn append_to<P: ProgressSink + ?Sized>(
        &self,
        path: &Path,
        g: &Geometry,
        layout: &BlockLayout,
        fields: &FieldSet,
        progress: &mut P,
    ) -> Result<u64> {
        let file = OpenOptions::new().append(true).open(path)?;
        let mut out = BufWriter::new(file);
        let n = self.encode(&mut out, g, layout, fields, progress)?;
        out.flush()?;
        Ok(n)
    }
}
