// crates/upconv-cli/src/io/bin.rs

use anyhow::Context;
use upconv_core::sink::write_packed;

/// Write the packed stream to `path`, or to stdout when `path` is None.
pub fn write_packed_to(path: Option<&str>, bytes: &[u8]) -> anyhow::Result<()> {
    match path {
        Some(p) => std::fs::write(p, bytes).with_context(|| format!("write packed {p}")),
        None => write_packed(std::io::stdout().lock(), bytes).context("write packed stdout"),
    }
}

pub fn read_packed(path: &str) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read packed {path}"))
}
