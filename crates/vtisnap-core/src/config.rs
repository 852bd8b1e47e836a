// crates/vtisnap-core/src/config.rs

use crate::error::{Result, SnapError};

/// Float width of every value written to the appended section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precision {
    Single,
    Double,
}

impl Precision {
    /// Accepts the simulation's `32`/`64` bit setting.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            32 => Ok(Precision::Single),
            64 => Ok(Precision::Double),
            other => Err(SnapError::Config(format!(
                "precision must be 32 or 64 bits, got {other}"
            ))),
        }
    }

    #[inline]
    pub fn float_size(self) -> usize {
        match self {
            Precision::Single => 4,
            Precision::Double => 8,
        }
    }

    /// VTK `type` attribute for DataArray declarations.
    pub fn vtk_type(self) -> &'static str {
        match self {
            Precision::Single => "Float32",
            Precision::Double => "Float64",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    pub fn native() -> Self {
        if cfg!(target_endian = "little") {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }

    /// VTK `byte_order` attribute.
    pub fn vtk_name(self) -> &'static str {
        match self {
            ByteOrder::Little => "LittleEndian",
            ByteOrder::Big => "BigEndian",
        }
    }

    #[inline]
    pub fn u32_bytes(self, v: u32) -> [u8; 4] {
        match self {
            ByteOrder::Little => v.to_le_bytes(),
            ByteOrder::Big => v.to_be_bytes(),
        }
    }
}

/// Process-wide export settings, fixed before any snapshot is built and
/// passed by value to every phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportConfig {
    pub precision: Precision,
    pub byte_order: ByteOrder,
}

impl ExportConfig {
    pub fn native(precision: Precision) -> Self {
        Self {
            precision,
            byte_order: ByteOrder::native(),
        }
    }

    #[inline]
    pub fn float_size(&self) -> usize {
        self.precision.float_size()
    }

    /// Append one value at the configured width and byte order.
    /// Values are narrowed from f64 only here.
    #[inline]
    pub fn push_float(&self, out: &mut Vec<u8>, v: f64) {
        match (self.precision, self.byte_order) {
            (Precision::Single, ByteOrder::Little) => out.extend_from_slice(&(v as f32).to_le_bytes()),
            (Precision::Single, ByteOrder::Big) => out.extend_from_slice(&(v as f32).to_be_bytes()),
            (Precision::Double, ByteOrder::Little) => out.extend_from_slice(&v.to_le_bytes()),
            (Precision::Double, ByteOrder::Big) => out.extend_from_slice(&v.to_be_bytes()),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::native(Precision::Single)
    }
}
