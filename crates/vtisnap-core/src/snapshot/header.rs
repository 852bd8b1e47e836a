// crates/vtisnap-core/src/snapshot/header.rs

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::config::ExportConfig;
use crate::error::{Result, SnapError};
use crate::geometry::Geometry;
use crate::lattice::Lattice;
use crate::snapshot::fmt;
use crate::snapshot::Block;

/// Size of the u32 length prefix in front of every appended block.
pub const LENGTH_PREFIX: usize = 4;

/// Written by the payload phase after the last block.
pub const TRAILER: &str = "\n</AppendedData>\n</VTKFile>";

/// Byte sizes shared by the header and the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockLayout {
    /// Payload bytes of one block, excluding its length prefix.
    pub block_len: u32,
    /// Offset of each block (E, H, Current) from the `_` marker.
    pub offsets: [u32; 3],
}

impl BlockLayout {
    /// E and H blocks have the same size, so the Current block starts at
    /// twice the H offset.
    pub fn for_cells(cell_count: usize, config: &ExportConfig) -> Result<Self> {
        let overflow = || {
            SnapError::Config(format!(
                "{cell_count} cells at {} bytes per value do not fit u32 appended offsets",
                config.float_size()
            ))
        };

        let block_len = (3 * config.float_size())
            .checked_mul(cell_count)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(overflow)?;
        let offset_h = block_len
            .checked_add(LENGTH_PREFIX as u32)
            .ok_or_else(overflow)?;
        let offset_current = offset_h.checked_mul(2).ok_or_else(overflow)?;

        Ok(Self {
            block_len,
            offsets: [0, offset_h, offset_current],
        })
    }

    /// Bytes between the `_` marker and the trailer.
    pub fn appended_len(&self) -> u64 {
        3 * (LENGTH_PREFIX as u64 + self.block_len as u64)
    }
}

/// A rendered header plus the layout it declares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub layout: BlockLayout,
    pub text: String,
}

impl Header {
    /// Create or truncate `path` and write the header. The file is closed on return.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let mut f = File::create(path)?;
        f.write_all(self.text.as_bytes())?;
        f.flush()?;
        Ok(())
    }
}

pub struct HeaderBuilder<'a> {
    pub config: ExportConfig,
    pub lattice: &'a Lattice,
}

impl<'a> HeaderBuilder<'a> {
    pub fn new(config: ExportConfig, lattice: &'a Lattice) -> Self {
        Self { config, lattice }
    }

    pub fn build(&self, g: &Geometry) -> Result<Header> {
        let layout = BlockLayout::for_cells(g.cell_count(), &self.config)?;
        let text = self.render(g, &layout);
        Ok(Header { layout, text })
    }

    fn render(&self, g: &Geometry, layout: &BlockLayout) -> String {
        let extent = g.bounds.extent_attr();
        let spacing: Vec<String> = (0..3)
            .map(|a| fmt::general(g.stride.0[a] as f64 * self.lattice.spacing[a], 3, true))
            .collect();
        let ty = self.config.precision.vtk_type();

        let mut s = String::with_capacity(768);
        s.push_str("<?xml version=\"1.0\"?>\n");
        s.push_str(&format!(
            "<VTKFile type=\"ImageData\" version=\"1.0\" byte_order=\"{}\">\n",
            self.config.byte_order.vtk_name()
        ));
        s.push_str(&format!(
            "<ImageData WholeExtent=\"{extent}\" Origin=\"0 0 0\" Spacing=\"{} {} {}\">\n",
            spacing[0], spacing[1], spacing[2]
        ));
        s.push_str(&format!("<Piece Extent=\"{extent}\">\n"));

        let names: Vec<&str> = Block::ALL.iter().map(|b| b.name()).collect();
        s.push_str(&format!("<CellData Vectors=\"{}\">\n", names.join(" ")));
        for (block, offset) in Block::ALL.iter().zip(layout.offsets) {
            s.push_str(&format!(
                "<DataArray type=\"{ty}\" Name=\"{}\" NumberOfComponents=\"3\" format=\"appended\" offset=\"{offset}\" />\n",
                block.name()
            ));
        }
        s.push_str("</CellData>\n</Piece>\n</ImageData>\n<AppendedData encoding=\"raw\">\n_");
        s
    }
}
