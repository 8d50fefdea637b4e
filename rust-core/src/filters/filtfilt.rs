//! Zero-phase forward-backward filtering
//!
//! The signal is padded at both ends with its odd (point-reflected)
//! extension, filtered forward from a steady-state delay line, reversed and
//! filtered again, then the padding is stripped. Phase shifts cancel and the
//! magnitude response is squared.

use super::sos::{Biquad, SosFilter};
use log::warn;

/// Padding length used for a cascade: three times its tap count
pub fn pad_length(sections: &[Biquad]) -> usize {
    let first_order = sections.iter().filter(|s| s.is_first_order()).count();
    let ntaps = 2 * sections.len() + 1 - first_order;
    3 * ntaps
}

/// Odd extension of `x` by `pad` samples on both sides
///
/// Requires `pad < x.len()`.
pub fn odd_extend(x: &[f64], pad: usize) -> Vec<f64> {
    let n = x.len();
    let first = x[0];
    let last = x[n - 1];

    let mut ext = Vec::with_capacity(n + 2 * pad);
    ext.extend((1..=pad).rev().map(|i| 2.0 * first - x[i]));
    ext.extend_from_slice(x);
    ext.extend((1..=pad).map(|i| 2.0 * last - x[n - 1 - i]));
    ext
}

/// Single causal pass starting from rest
pub fn filter_forward(sections: &[Biquad], x: &[f64]) -> Vec<f64> {
    SosFilter::new(sections.to_vec()).process_block(x)
}

/// Forward-backward filter; output has the length of `x`
pub fn filtfilt(sections: &[Biquad], x: &[f64]) -> Vec<f64> {
    if x.is_empty() {
        return Vec::new();
    }

    let wanted = pad_length(sections);
    let pad = wanted.min(x.len() - 1);
    if pad < wanted {
        warn!(
            "signal of {} samples is shorter than the {} sample zero-phase padding; edge effects likely",
            x.len(),
            wanted
        );
    }

    let ext = odd_extend(x, pad);
    let mut filter = SosFilter::new(sections.to_vec());

    filter.prime(ext[0]);
    let mut y = filter.process_block(&ext);
    y.reverse();

    filter.prime(y[0]);
    let mut z = filter.process_block(&y);
    z.reverse();

    z.drain(..pad);
    z.truncate(x.len());
    z
}
