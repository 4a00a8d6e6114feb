use crate::config::{SourceFormat, UpconvConfig, SOURCE_BITS_PER_SAMPLE, SOURCE_CHANNELS};
use crate::error::{Result, UpconvError};

pub const MAX_BIT_WIDTH: u8 = 8;

pub fn validate_config(c: &UpconvConfig) -> Result<()> {
    if c.source_rate == 0 {
        return Err(UpconvError::Configuration("source_rate must be non-zero".into()));
    }
    if c.sink_rate == 0 {
        return Err(UpconvError::Configuration("sink_rate must be non-zero".into()));
    }
    // Upsampling only, and only by a whole number.
    if c.sink_rate < c.source_rate {
        return Err(UpconvError::Configuration(format!(
            "sink_rate {} is below source_rate {}",
            c.sink_rate, c.source_rate
        )));
    }
    if c.sink_rate % c.source_rate != 0 {
        return Err(UpconvError::Configuration(format!(
            "sink_rate {} is not an integer multiple of source_rate {}",
            c.sink_rate, c.source_rate
        )));
    }

    validate_bit_width(c.bit_width)
}

#[inline]
pub fn validate_bit_width(bit_width: u8) -> Result<()> {
    if bit_width == 0 || bit_width > MAX_BIT_WIDTH {
        return Err(UpconvError::Configuration(format!(
            "bit_width must be in 1..=8, got {}",
            bit_width
        )));
    }
    Ok(())
}

/// Checks the caller's declared source format against the configured constants.
pub fn validate_source(fmt: &SourceFormat, c: &UpconvConfig) -> Result<()> {
    if fmt.sample_rate != c.source_rate {
        return Err(UpconvError::InputContract(format!(
            "source rate {} Hz, expected {} Hz",
            fmt.sample_rate, c.source_rate
        )));
    }
    if fmt.channels != SOURCE_CHANNELS {
        return Err(UpconvError::InputContract(format!(
            "{} channels, expected mono",
            fmt.channels
        )));
    }
    if fmt.bits_per_sample != SOURCE_BITS_PER_SAMPLE {
        return Err(UpconvError::InputContract(format!(
            "{}-bit samples, expected 16-bit",
            fmt.bits_per_sample
        )));
    }
    Ok(())
}
