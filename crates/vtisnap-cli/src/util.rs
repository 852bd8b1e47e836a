// crates/vtisnap-cli/src/util.rs

use anyhow::Context;

/// First 16 bytes of the file's blake3 hash, as hex.
pub fn file_id_hex(path: &std::path::Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(blake3::hash(&bytes).to_hex()[..32].to_string())
}
