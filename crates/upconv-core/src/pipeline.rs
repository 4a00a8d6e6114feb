// crates/upconv-core/src/pipeline.rs

use std::num::NonZeroU32;

use crate::config::{SourceFormat, UpconvConfig};
use crate::error::Result;
use crate::signal::bitpack::{codes_per_byte, pack_codes};
use crate::signal::interpolate::interpolate;
use crate::signal::quantize::{scale_sample, NoiseShaper, ShaperState};
use crate::validate::validate_source;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConvertStats {
    pub input_samples: usize,
    /// One code per upsampled sample.
    pub codes: usize,
    /// Slots filled with the pad code in the last byte.
    pub padded_codes: usize,
    pub bytes: usize,
    /// Quantizer steps that wrapped around the code range.
    pub overloads: u64,
    pub peak_error: f64,
}

#[derive(Clone, Debug)]
pub struct Conversion {
    pub bytes: Vec<u8>,
    /// Quantizer state after the last sample.
    pub state: ShaperState,
    pub stats: ConvertStats,
}

/// The whole chain for one fixed configuration:
/// interpolate -> scale -> noise-shape -> pack.
#[derive(Clone, Debug)]
pub struct Upconverter {
    config: UpconvConfig,
    factor: NonZeroU32,
}

impl Upconverter {
    pub fn new(config: UpconvConfig) -> Result<Self> {
        // factor() validates the whole config.
        let factor = config.factor()?;
        Ok(Self { config, factor })
    }

    pub fn config(&self) -> &UpconvConfig {
        &self.config
    }

    pub fn factor(&self) -> NonZeroU32 {
        self.factor
    }

    /// Upsample and quantize, without packing.
    ///
    /// Returns one code per upsampled sample plus the shaper it ran through
    /// (for its final state and counters).
    pub fn quantize_samples(&self, samples: &[i16]) -> Result<(Vec<u8>, NoiseShaper)> {
        let w = self.config.bit_width;
        let upsampled = interpolate(samples, self.factor, self.config.tail);

        let mut shaper = NoiseShaper::new(w)?;
        let codes = upsampled
            .iter()
            .map(|&x| shaper.step(scale_sample(x, w)))
            .collect();

        Ok((codes, shaper))
    }

    pub fn convert(&self, samples: &[i16]) -> Result<Conversion> {
        let w = self.config.bit_width;
        let (codes, shaper) = self.quantize_samples(samples)?;
        let bytes = pack_codes(w, &codes, self.config.remainder)?;

        let group = codes_per_byte(w);
        let stats = ConvertStats {
            input_samples: samples.len(),
            codes: codes.len(),
            padded_codes: bytes.len() * group - codes.len(),
            bytes: bytes.len(),
            overloads: shaper.overloads(),
            peak_error: shaper.peak_error(),
        };

        if stats.overloads > 0 {
            tracing::warn!(
                overloads = stats.overloads,
                codes = stats.codes,
                "quantizer range overloaded; affected codes wrapped"
            );
        }
        tracing::debug!(
            input_samples = stats.input_samples,
            factor = self.factor.get(),
            codes = stats.codes,
            bytes = stats.bytes,
            final_error = shaper.state().error,
            "conversion done"
        );

        Ok(Conversion {
            bytes,
            state: shaper.state(),
            stats,
        })
    }

    /// `convert`, after checking the caller's declared source format.
    pub fn convert_source(&self, fmt: &SourceFormat, samples: &[i16]) -> Result<Conversion> {
        validate_source(fmt, &self.config)?;
        self.convert(samples)
    }
}
