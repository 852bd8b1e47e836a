// Shared helpers for reading back .vti files in tests.
#![allow(dead_code)]

use ndarray::ArrayView3;
use vtisnap_core::{CurrentSource, Lattice};

pub const TRAILER: &[u8] = b"\n</AppendedData>\n</VTKFile>";

/// Split a file at the `_` appended-data marker.
pub fn split_vti(bytes: &[u8]) -> (String, &[u8]) {
    let marker = b"<AppendedData encoding=\"raw\">\n_";
    let pos = bytes
        .windows(marker.len())
        .position(|w| w == marker)
        .expect("appended data marker");
    let end = pos + marker.len();
    (String::from_utf8(bytes[..end].to_vec()).expect("utf8 header"), &bytes[end..])
}

/// Values of every `name="..."` attribute, in document order.
pub fn attrs(header: &str, name: &str) -> Vec<String> {
    let needle = format!(" {name}=\"");
    header
        .match_indices(&needle)
        .map(|(i, _)| {
            let rest = &header[i + needle.len()..];
            rest[..rest.find('"').expect("closing quote")].to_string()
        })
        .collect()
}

pub fn offsets(header: &str) -> Vec<usize> {
    attrs(header, "offset").iter().map(|s| s.parse().unwrap()).collect()
}

pub fn le_u32(b: &[u8]) -> u32 {
    u32::from_le_bytes(b[..4].try_into().unwrap())
}

/// Block at `offset`: (length prefix, payload bytes).
pub fn block(appended: &[u8], offset: usize) -> (u32, &[u8]) {
    let len = le_u32(&appended[offset..]);
    (len, &appended[offset + 4..offset + 4 + len as usize])
}

pub fn f32s_le(b: &[u8]) -> Vec<f32> {
    b.chunks_exact(4)
        .map(|c| f32::from_le_bytes(c.try_into().unwrap()))
        .collect()
}

/// Returns a fixed value per axis.
pub struct ConstCurrent(pub [f64; 3]);

impl CurrentSource for ConstCurrent {
    fn ix(&self, _: usize, _: usize, _: usize, _: &ArrayView3<f64>, _: &ArrayView3<f64>, _: &Lattice) -> f64 {
        self.0[0]
    }

    fn iy(&self, _: usize, _: usize, _: usize, _: &ArrayView3<f64>, _: &ArrayView3<f64>, _: &Lattice) -> f64 {
        self.0[1]
    }

    fn iz(&self, _: usize, _: usize, _: usize, _: &ArrayView3<f64>, _: &ArrayView3<f64>, _: &Lattice) -> f64 {
        self.0[2]
    }
}
