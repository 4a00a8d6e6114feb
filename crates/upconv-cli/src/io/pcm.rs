// crates/upconv-cli/src/io/pcm.rs

use anyhow::Context;

/// Read a headerless little-endian s16 PCM file.
pub fn read_s16le(path: &str) -> anyhow::Result<Vec<i16>> {
    let bytes = std::fs::read(path).with_context(|| format!("read pcm {path}"))?;
    decode_s16le(&bytes).with_context(|| format!("decode pcm {path}"))
}

pub fn decode_s16le(bytes: &[u8]) -> anyhow::Result<Vec<i16>> {
    if bytes.len() % 2 != 0 {
        anyhow::bail!("odd byte count {} for s16le samples", bytes.len());
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|c| i16::from_le_bytes([c[0], c[1]]))
        .collect())
}
