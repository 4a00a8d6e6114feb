// crates/upconv-core/src/signal/bitpack.rs

use crate::config::RemainderPolicy;
use crate::error::{Result, UpconvError};
use crate::validate::validate_bit_width;

/// Code used to fill the last byte under `RemainderPolicy::Pad`.
pub const PAD_CODE: u8 = 0;

/// Codes per packed byte for a given width: `floor(8 / W)`.
#[inline]
pub fn codes_per_byte(bit_width: u8) -> usize {
    8 / bit_width as usize
}

/// Pack W-bit codes into bytes, `floor(8/W)` codes per byte.
///
/// Slot order is MSB-first within each byte:
/// - The first code of a group occupies the top W bits.
/// - Later codes follow in descending significance.
/// - Bits below the last slot (e.g. W=3 uses 6 of 8) are zero.
///
/// For W=4 this is `(c0 << 4) | c1`; downstream readers depend on the
/// first code being the high nibble.
///
/// A trailing partial group is padded with `PAD_CODE` or rejected depending
/// on `remainder`. Nothing past `codes.len()` is ever read.
pub fn pack_codes(bit_width: u8, codes: &[u8], remainder: RemainderPolicy) -> Result<Vec<u8>> {
    validate_bit_width(bit_width)?;
    let mask: u8 = ((1u16 << bit_width) - 1) as u8;
    let group = codes_per_byte(bit_width);

    let tail = codes.len() % group;
    if tail != 0 {
        match remainder {
            RemainderPolicy::Reject => {
                return Err(UpconvError::TruncatedInput {
                    codes: codes.len(),
                    group,
                });
            }
            RemainderPolicy::Pad => {
                tracing::warn!(
                    codes = codes.len(),
                    group,
                    padded = group - tail,
                    "code count does not fill the last byte; padding with code {}",
                    PAD_CODE
                );
            }
        }
    }

    let mut out = Vec::with_capacity(codes.len().div_ceil(group));
    for chunk in codes.chunks(group) {
        let mut byte: u8 = 0;
        for slot in 0..group {
            let code = chunk.get(slot).copied().unwrap_or(PAD_CODE);
            if code & !mask != 0 {
                return Err(UpconvError::Validation(format!(
                    "code out of range: code={} bit_width={} mask=0x{:02x}",
                    code, bit_width, mask
                )));
            }
            let shift = 8 - (slot + 1) * bit_width as usize;
            byte |= code << shift;
        }
        out.push(byte);
    }

    Ok(out)
}

/// Unpack `code_count` W-bit codes from bytes written by `pack_codes`.
///
/// Requirements:
/// - `bit_width` must be in 1..=8.
/// - `packed` must hold at least `ceil(code_count / floor(8/W))` bytes.
pub fn unpack_codes(bit_width: u8, packed: &[u8], code_count: usize) -> Result<Vec<u8>> {
    validate_bit_width(bit_width)?;
    let mask: u8 = ((1u16 << bit_width) - 1) as u8;
    let group = codes_per_byte(bit_width);

    let need_bytes = code_count.div_ceil(group);
    if packed.len() < need_bytes {
        return Err(UpconvError::Validation(format!(
            "unpack_codes short: need {} bytes for {} codes ({} bits/code), got {}",
            need_bytes,
            code_count,
            bit_width,
            packed.len()
        )));
    }

    let mut out = Vec::with_capacity(code_count);
    for i in 0..code_count {
        let byte = packed[i / group];
        let shift = 8 - (i % group + 1) * bit_width as usize;
        out.push((byte >> shift) & mask);
    }

    Ok(out)
}
