// crates/vtisnap-core/src/snapshot/mod.rs

//! Volumetric field snapshots written as VTK ImageData (`.vti`) files.
//!
//! A snapshot is exported in two phases on one file:
//! - [`Snapshot::prepare`] resolves the output path and writes the XML header,
//!   which declares where each appended block starts;
//! - [`Snapshot::write`] reopens the file in append mode and streams the
//!   E-field, H-field and Current blocks, then closes the document.
//!
//! Layout after the header's `_` marker (byte order and float width from
//! [`ExportConfig`]):
//! ```text
//! len:u32  E triples[cells]        (offset 0)
//! len:u32  H triples[cells]        (offset len + 4)
//! len:u32  Current triples[cells]  (offset 2 * (len + 4))
//! "\n</AppendedData>\n</VTKFile>"
//! ```

pub mod fmt;
pub mod header;
pub mod payload;
pub mod schedule;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ExportConfig;
use crate::error::{Result, SnapError};
use crate::field::current::CurrentSource;
use crate::field::FieldSet;
use crate::geometry::{self, Geometry, Stride, Volume};
use crate::lattice::{Lattice, RunContext};
use crate::progress::ProgressSink;
use crate::validate::{validate_fields, validate_snapshot};

use self::header::{BlockLayout, HeaderBuilder, TRAILER};
use self::payload::PayloadEncoder;

/// The three appended data arrays, in file order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Block {
    EField,
    HField,
    Current,
}

impl Block {
    pub const ALL: [Block; 3] = [Block::EField, Block::HField, Block::Current];

    pub fn name(self) -> &'static str {
        match self {
            Block::EField => "E-field",
            Block::HField => "H-field",
            Block::Current => "Current",
        }
    }
}

/// State captured by the header phase that the payload phase must honour.
#[derive(Clone, Debug, PartialEq)]
pub struct Prepared {
    pub path: PathBuf,
    pub config: ExportConfig,
    pub geometry: Geometry,
    pub layout: BlockLayout,
    pub header_len: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub volume: Volume,
    pub stride: Stride,
    /// Iteration the snapshot fires on. Scheduling only.
    pub capture_step: u64,
    /// File name without the `.vti` extension.
    pub basename: String,
    prepared: Option<Prepared>,
    written: bool,
}

impl Snapshot {
    pub fn new(volume: Volume, stride: Stride, capture_step: u64, basename: impl Into<String>) -> Self {
        Self {
            volume,
            stride,
            capture_step,
            basename: basename.into(),
            prepared: None,
            written: false,
        }
    }

    /// Recomputed from the request on every call.
    pub fn geometry(&self) -> Result<Geometry> {
        geometry::sample(&self.volume, &self.stride)
    }

    pub fn prepared(&self) -> Option<&Prepared> {
        self.prepared.as_ref()
    }

    /// Absolute output path, once prepared.
    pub fn path(&self) -> Option<&Path> {
        self.prepared.as_ref().map(|p| p.path.as_path())
    }

    pub fn is_written(&self) -> bool {
        self.written
    }

    /// Exact size of the finished file, once prepared.
    pub fn file_size(&self) -> Option<u64> {
        self.prepared
            .as_ref()
            .map(|p| p.header_len + p.layout.appended_len() + TRAILER.len() as u64)
    }

    /// Header phase: validate geometry, create the run's snapshot directory,
    /// write the header to `<dir>/<basename>.vti`.
    ///
    /// All geometry errors are raised before anything touches the filesystem.
    pub fn prepare(&mut self, run: &RunContext, lattice: &Lattice, config: ExportConfig) -> Result<&Path> {
        let g = self.geometry()?;
        validate_snapshot(&g, lattice)?;
        let header = HeaderBuilder::new(config, lattice).build(&g)?;

        let dir = run.snapshot_dir();
        fs::create_dir_all(&dir)?;
        let path = fs::canonicalize(&dir)?.join(format!("{}.vti", self.basename));

        log::debug!(
            "snapshot {}: volume {:?} (raw extent {:?}) stride {:?} -> cells {} {:?}",
            self.basename,
            self.volume.start,
            self.volume.raw_extent(),
            self.stride.0,
            g.bounds.extent_attr(),
            header.layout.offsets
        );

        header.write_to(&path)?;

        self.written = false;
        let prepared = self.prepared.insert(Prepared {
            path,
            config,
            geometry: g,
            layout: header.layout,
            header_len: header.text.len() as u64,
        });
        Ok(prepared.path.as_path())
    }

    /// Payload phase: append the three blocks and the trailer.
    /// Returns the number of bytes appended.
    pub fn write<C, P>(&mut self, fields: &FieldSet, lattice: &Lattice, current: &C, progress: &mut P) -> Result<u64>
    where
        C: CurrentSource + ?Sized,
        P: ProgressSink + ?Sized,
    {
        let prepared = self.prepared.as_ref().ok_or_else(|| {
            SnapError::Consistency(format!("snapshot {} written before prepare", self.basename))
        })?;
        if self.written {
            return Err(SnapError::Consistency(format!(
                "snapshot {} already written to {}",
                self.basename,
                prepared.path.display()
            )));
        }

        let g = self.geometry()?;
        if g != prepared.geometry {
            return Err(SnapError::Consistency(format!(
                "snapshot {}: payload geometry {} differs from header geometry {}",
                self.basename,
                g.bounds.extent_attr(),
                prepared.geometry.bounds.extent_attr()
            )));
        }
        validate_fields(&g, fields)?;

        let encoder = PayloadEncoder::new(prepared.config, lattice, current);
        let n = encoder.append_to(&prepared.path, &g, &prepared.layout, fields, progress)?;

        log::info!(
            "snapshot {} written: {} ({} bytes)",
            self.basename,
            prepared.path.display(),
            prepared.header_len + n
        );
        self.written = true;
        Ok(n)
    }
}
