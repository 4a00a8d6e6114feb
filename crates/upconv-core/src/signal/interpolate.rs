// crates/upconv-core/src/signal/interpolate.rs

use std::num::NonZeroU32;

use crate::config::TailPolicy;

/// Output length of `interpolate` for `n` input samples.
///
/// - `Hold`:     `n * factor`
/// - `Truncate`: `(n - 1) * factor`, or 0 when `n <= 1`
#[inline]
pub fn interpolated_len(n: usize, factor: NonZeroU32, tail: TailPolicy) -> usize {
    let f = factor.get() as usize;
    match tail {
        TailPolicy::Hold => n * f,
        TailPolicy::Truncate => n.saturating_sub(1) * f,
    }
}

/// Piecewise-linear upsampling by an integer factor.
///
/// Each consecutive pair `(x[i], x[i+1])` produces `factor` samples
/// `(1 - t) * x[i] + t * x[i+1]` with `t = j / factor`, `j in 0..factor`.
/// The last input sample only ever appears as a right endpoint; what follows
/// it is decided by `tail`.
pub fn interpolate(input: &[i16], factor: NonZeroU32, tail: TailPolicy) -> Vec<f64> {
    let f = factor.get() as usize;
    let mut out = Vec::with_capacity(interpolated_len(input.len(), factor, tail));

    for pair in input.windows(2) {
        let a = pair[0] as f64;
        let b = pair[1] as f64;
        for j in 0..f {
            let t = j as f64 / f as f64;
            out.push((1.0 - t) * a + t * b);
        }
    }

    if tail == TailPolicy::Hold {
        if let Some(&last) = input.last() {
            out.resize(out.len() + f, last as f64);
        }
    }

    debug_assert_eq!(out.len(), interpolated_len(input.len(), factor, tail));
    out
}
