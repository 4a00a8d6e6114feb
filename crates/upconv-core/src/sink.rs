// crates/upconv-core/src/sink.rs

use std::io::Write;

use crate::error::Result;

/// Write one finished packed stream to `w` and flush it.
pub fn write_packed<W: Write>(mut w: W, bytes: &[u8]) -> Result<()> {
    w.write_all(bytes)?;
    w.flush()?;
    Ok(())
}
