// crates/upconv-core/src/config.rs

use std::num::NonZeroU32;

use crate::error::{Result, UpconvError};
use crate::validate::validate_config;

/// 48 kHz mono s16 source.
pub const SOURCE_SAMPLE_RATE: u32 = 48_000;

/// Sink clock. Must be an exact multiple of the source rate (520x here).
pub const SINK_SAMPLE_RATE: u32 = 24_960_000;

/// Nibble output.
pub const DEFAULT_BIT_WIDTH: u8 = 4;

/// Source samples are mono s16.
pub const SOURCE_CHANNELS: u16 = 1;
pub const SOURCE_BITS_PER_SAMPLE: u16 = 16;

/// What the upsampler writes after the last interpolation span.
///
/// The last input sample is never the left endpoint of a span, so the final
/// `factor` output slots need a policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TailPolicy {
    /// Hold `x[N-1]` flat for one more span. Output length is `N * factor`.
    #[default]
    Hold,
    /// Drop the trailing span. Output length is `(N-1) * factor`.
    Truncate,
}

/// What the packer does when the code count does not fill the last byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RemainderPolicy {
    /// Fill the missing slots with code 0 and log a warning.
    #[default]
    Pad,
    /// Fail with `UpconvError::TruncatedInput`.
    Reject,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpconvConfig {
    pub source_rate: u32,
    pub sink_rate: u32,
    /// Code width W in bits, 1..=8.
    pub bit_width: u8,
    pub tail: TailPolicy,
    pub remainder: RemainderPolicy,
}

impl Default for UpconvConfig {
    fn default() -> Self {
        Self {
            source_rate: SOURCE_SAMPLE_RATE,
            sink_rate: SINK_SAMPLE_RATE,
            bit_width: DEFAULT_BIT_WIDTH,
            tail: TailPolicy::default(),
            remainder: RemainderPolicy::default(),
        }
    }
}

impl UpconvConfig {
    /// Upsampling factor F = sink_rate / source_rate.
    pub fn factor(&self) -> Result<NonZeroU32> {
        validate_config(self)?;
        NonZeroU32::new(self.sink_rate / self.source_rate)
            .ok_or_else(|| UpconvError::Configuration("sink_rate / source_rate is zero".into()))
    }

    /// Codes per packed byte, `floor(8 / W)`.
    pub fn codes_per_byte(&self) -> usize {
        8 / self.bit_width.max(1) as usize
    }
}

/// Declared format of the sample source. The core never parses containers;
/// the caller fills this in from whatever it read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl SourceFormat {
    /// The only source format the converter accepts for `config`.
    pub fn expected(config: &UpconvConfig) -> Self {
        Self {
            sample_rate: config.source_rate,
            channels: SOURCE_CHANNELS,
            bits_per_sample: SOURCE_BITS_PER_SAMPLE,
        }
    }
}
