// crates/upconv-core/src/signal/quantize.rs

use crate::error::Result;
use crate::validate::validate_bit_width;

/// Full-scale magnitude of a signed 16-bit sample.
const S16_FULL_SCALE: f64 = 32768.0;

/// Carried state of the error-feedback loop.
///
/// Returned by `quantize_from` so a run can be resumed (or replayed) from any
/// checkpointed error value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShaperState {
    pub error: f64,
}

/// Map a signed 16-bit amplitude onto the symmetric W-bit quantizer range
/// `±(2^W - 1) / 2`.
#[inline]
pub fn scale_sample(x: f64, bit_width: u8) -> f64 {
    let peak = ((1u32 << bit_width) - 1) as f64 / 2.0;
    x / S16_FULL_SCALE * peak
}

/// First-order error-feedback quantizer, one sample at a time.
///
/// For each pre-scaled sample `s`:
/// - `value = s + error`
/// - `level = floor(value + 2^(W-1))`, `code = level` masked to the low W bits
/// - `error = value - (level - 2^(W-1))`
///
/// Overload wraps modulo `2^W` instead of clamping. The error is taken
/// against the unmasked level, so it stays in `[0, 1)`; measuring it against
/// the masked code would only add a multiple of `2^W`, which the mask removes
/// again on every later step. Wrapped steps are counted in `overloads()`.
#[derive(Clone, Debug)]
pub struct NoiseShaper {
    mask: i64,
    half: f64,
    state: ShaperState,
    overloads: u64,
    peak_error: f64,
}

impl NoiseShaper {
    pub fn new(bit_width: u8) -> Result<Self> {
        Self::with_state(bit_width, ShaperState::default())
    }

    pub fn with_state(bit_width: u8, state: ShaperState) -> Result<Self> {
        validate_bit_width(bit_width)?;
        Ok(Self {
            mask: (1i64 << bit_width) - 1,
            half: (1i64 << (bit_width - 1)) as f64,
            state,
            overloads: 0,
            peak_error: state.error.abs(),
        })
    }

    #[inline]
    pub fn step(&mut self, s: f64) -> u8 {
        let value = s + self.state.error;
        let level = (value + self.half).floor() as i64;
        if level < 0 || level > self.mask {
            self.overloads += 1;
        }

        // Two's-complement masking: -1 -> 2^W - 1, 2^W -> 0.
        let code = level & self.mask;
        self.state.error = value - (level as f64 - self.half);
        self.peak_error = self.peak_error.max(self.state.error.abs());

        code as u8
    }

    pub fn state(&self) -> ShaperState {
        self.state
    }

    /// Steps whose code wrapped around the W-bit range.
    pub fn overloads(&self) -> u64 {
        self.overloads
    }

    /// Largest `|error|` carried so far, including the initial state.
    pub fn peak_error(&self) -> f64 {
        self.peak_error
    }
}

/// Quantize a pre-scaled sequence starting from zero error.
pub fn quantize(input: &[f64], bit_width: u8) -> Result<Vec<u8>> {
    let (codes, _state) = quantize_from(input, bit_width, ShaperState::default())?;
    Ok(codes)
}

/// Quantize starting from `state`; returns the codes and the final state.
///
/// Strictly sequential: every code depends on all earlier samples through the
/// carried error.
pub fn quantize_from(input: &[f64], bit_width: u8, state: ShaperState) -> Result<(Vec<u8>, ShaperState)> {
    let mut shaper = NoiseShaper::with_state(bit_width, state)?;
    let codes = input.iter().map(|&s| shaper.step(s)).collect();
    Ok((codes, shaper.state()))
}
