pub mod error;
pub mod validate;

pub mod command;
pub mod config;
pub mod field;
pub mod geometry;
pub mod lattice;
pub mod progress;
pub mod snapshot;

pub use crate::config::{ByteOrder, ExportConfig, Precision};
pub use crate::error::{Result, SnapError};
pub use crate::field::current::{CurrentSource, LineIntegralCurrent};
pub use crate::field::FieldSet;
pub use crate::geometry::{CellBounds, Geometry, Stride, Volume};
pub use crate::lattice::{Lattice, RunContext};
pub use crate::snapshot::Snapshot;
