//! Butterworth IIR design as cascaded second-order sections
//!
//! # Algorithm
//! 1. Place the N analog prototype poles evenly on the left half of the unit circle
//! 2. Pre-warp the cutoff(s) and move the poles to the requested band
//!    (lowpass scaling, highpass inversion, or lowpass-to-bandpass split)
//! 3. Map the poles to the z-plane with the bilinear transform
//! 4. Pair conjugate poles into sections, attach the band's zeros at z = ±1,
//!    and scale each section to unity gain at the passband reference frequency
//!
//! Identical (order, cutoff, sample rate, band type) always yields identical
//! coefficients.

use super::sos::Biquad;
use super::spec::{Cutoff, FilterKind, FilterSpec};
use crate::error::{ProcessingError, Result};
use log::debug;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Poles whose imaginary part is below this are treated as real
const REAL_POLE_TOLERANCE: f64 = 1e-10;

/// Analog Butterworth prototype poles (cutoff 1 rad/s)
///
/// p_k = exp(jπ(2k + N + 1) / 2N) for k = 0..N-1
pub fn analog_prototype(order: usize) -> Vec<Complex64> {
    let n = order as f64;
    (0..order)
        .map(|k| Complex64::from_polar(1.0, PI * (2.0 * k as f64 + n + 1.0) / (2.0 * n)))
        .collect()
}

/// Pre-warp a frequency in Hz for the bilinear transform (returns rad/s)
fn prewarp(frequency_hz: f64, sample_rate: f64) -> f64 {
    2.0 * sample_rate * (PI * frequency_hz / sample_rate).tan()
}

/// Bilinear transform of an analog pole: z = (2fs + s) / (2fs - s)
fn bilinear(s: Complex64, sample_rate: f64) -> Complex64 {
    let fs2 = Complex64::new(2.0 * sample_rate, 0.0);
    (fs2 + s) / (fs2 - s)
}

/// Analog poles of the band-transformed filter and the digital frequency
/// (rad/sample) at which the passband gain is normalized to one
fn band_poles(spec: &FilterSpec, sample_rate: f64) -> Result<(Vec<Complex64>, f64)> {
    let prototype = analog_prototype(spec.order);

    match (spec.kind, spec.cutoff) {
        (FilterKind::Lowpass, Cutoff::Single(fc)) => {
            let wc = prewarp(fc, sample_rate);
            Ok((prototype.iter().map(|&p| p * wc).collect(), 0.0))
        }
        (FilterKind::Highpass, Cutoff::Single(fc)) => {
            let wc = prewarp(fc, sample_rate);
            Ok((prototype.iter().map(|&p| wc / p).collect(), PI))
        }
        (FilterKind::Bandpass, Cutoff::Band { low, high }) => {
            let w1 = prewarp(low, sample_rate);
            let w2 = prewarp(high, sample_rate);
            let bw = w2 - w1;
            let w0 = (w1 * w2).sqrt();

            let mut poles = Vec::with_capacity(2 * spec.order);
            for &p in &prototype {
                let half = p * (bw / 2.0);
                let root = (half * half - w0 * w0).sqrt();
                poles.push(half + root);
                poles.push(half - root);
            }

            // Geometric band centre, mapped back to the digital axis
            let center = 2.0 * (w0 / (2.0 * sample_rate)).atan();
            Ok((poles, center))
        }
        _ => Err(ProcessingError::invalid(
            "cutoff",
            "cutoff shape does not match the filter kind",
        )),
    }
}

/// Group digital poles into section denominators
///
/// Conjugate pairs become one section each; real poles are paired two at a
/// time, leaving at most one first-order section. Sections are ordered with
/// poles farthest from the unit circle first.
fn pair_poles(poles: &[Complex64]) -> Vec<[f64; 3]> {
    let mut complex: Vec<Complex64> = poles
        .iter()
        .copied()
        .filter(|p| p.im > REAL_POLE_TOLERANCE)
        .collect();
    let mut real: Vec<f64> = poles
        .iter()
        .filter(|p| p.im.abs() <= REAL_POLE_TOLERANCE)
        .map(|p| p.re)
        .collect();

    complex.sort_by(|a, b| a.norm().total_cmp(&b.norm()));
    real.sort_by(|a, b| a.abs().total_cmp(&b.abs()));

    let mut denominators = Vec::with_capacity(complex.len() + real.len().div_ceil(2));
    for pair in real.chunks(2) {
        denominators.push(if let [r1, r2] = *pair {
            [1.0, -(r1 + r2), r1 * r2]
        } else {
            [1.0, -pair[0], 0.0]
        });
    }
    for p in complex {
        denominators.push([1.0, -2.0 * p.re, p.norm_sqr()]);
    }
    denominators
}

/// Numerator holding the band's zeros for a section of the given shape
fn section_zeros(kind: FilterKind, first_order: bool) -> [f64; 3] {
    match (kind, first_order) {
        (FilterKind::Lowpass, false) => [1.0, 2.0, 1.0],
        (FilterKind::Lowpass, true) => [1.0, 1.0, 0.0],
        (FilterKind::Highpass, false) => [1.0, -2.0, 1.0],
        (FilterKind::Highpass, true) => [1.0, -1.0, 0.0],
        (FilterKind::Bandpass, _) => [1.0, 0.0, -1.0],
    }
}

/// Design a Butterworth filter for `spec` at `sample_rate`
///
/// # Returns
/// Second-order sections; `spec.order` poles for lowpass/highpass and
/// `2 * spec.order` poles for bandpass
pub fn design_butterworth(spec: &FilterSpec, sample_rate: u32) -> Result<Vec<Biquad>> {
    spec.validate(sample_rate)?;
    let fs = sample_rate as f64;

    let (analog, reference_omega) = band_poles(spec, fs)?;
    let digital: Vec<Complex64> = analog.iter().map(|&s| bilinear(s, fs)).collect();

    let sections: Vec<Biquad> = pair_poles(&digital)
        .into_iter()
        .map(|a| {
            let first_order = a[2] == 0.0;
            let mut section = Biquad::new(section_zeros(spec.kind, first_order), a);
            section.normalize_at(reference_omega);
            section
        })
        .collect();

    debug!(
        "designed {:?} Butterworth, order {}, {} sections at {} Hz",
        spec.kind,
        spec.order,
        sections.len(),
        sample_rate
    );

    Ok(sections)
}

/// Complex frequency response of a cascade at the given frequencies in Hz
pub fn frequency_response(
    sections: &[Biquad],
    frequencies_hz: &[f64],
    sample_rate: u32,
) -> Vec<Complex64> {
    let fs = sample_rate as f64;
    frequencies_hz
        .iter()
        .map(|&f| {
            let omega = 2.0 * PI * f / fs;
            sections
                .iter()
                .fold(Complex64::new(1.0, 0.0), |acc, s| acc * s.response(omega))
        })
        .collect()
}

/// Magnitude response in dB
pub fn magnitude_response_db(sections: &[Biquad], frequencies_hz: &[f64], sample_rate: u32) -> Vec<f64> {
    frequency_response(sections, frequencies_hz, sample_rate)
        .iter()
        .map(|c| 20.0 * c.norm().max(1e-20).log10())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FS: u32 = 22050;
    const HALF_POWER: f64 = std::f64::consts::FRAC_1_SQRT_2;

    fn magnitude(sections: &[Biquad], f: f64) -> f64 {
        frequency_response(sections, &[f], FS)[0].norm()
    }

    fn poles_inside_unit_circle(sections: &[Biquad]) -> bool {
        sections.iter().all(|s| {
            // |a2| < 1 and |a1| < 1 + a2 (stability triangle)
            s.a[2].abs() < 1.0 && s.a[1].abs() < 1.0 + s.a[2]
        })
    }

    #[test]
    fn test_prototype_poles_in_left_half_plane() {
        for order in 1..=10 {
            let poles = analog_prototype(order);
            assert_eq!(poles.len(), order);
            for p in poles {
                assert!(p.re < 0.0);
                assert!((p.norm() - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_lowpass_half_power_at_cutoff() {
        for order in 1..=10 {
            let sections = design_butterworth(&FilterSpec::lowpass(1000.0, order), FS).unwrap();
            assert_eq!(sections.len(), order.div_ceil(2));
            assert!(poles_inside_unit_circle(&sections));

            assert!((magnitude(&sections, 0.0) - 1.0).abs() < 1e-9);
            assert!((magnitude(&sections, 1000.0) - HALF_POWER).abs() < 1e-6);
            assert!(magnitude(&sections, 5000.0) < 0.2);
        }
    }

    #[test]
    fn test_highpass_half_power_at_cutoff() {
        for order in 1..=10 {
            let sections = design_butterworth(&FilterSpec::highpass(3000.0, order), FS).unwrap();
            assert!(poles_inside_unit_circle(&sections));

            assert!(magnitude(&sections, 0.0) < 1e-9);
            assert!((magnitude(&sections, FS as f64 / 2.0) - 1.0).abs() < 1e-9);
            assert!((magnitude(&sections, 3000.0) - HALF_POWER).abs() < 1e-6);
        }
    }

    #[test]
    fn test_bandpass_edges_and_center() {
        for order in 1..=6 {
            let sections =
                design_butterworth(&FilterSpec::bandpass(500.0, 2000.0, order), FS).unwrap();
            assert_eq!(sections.len(), order);
            assert!(poles_inside_unit_circle(&sections));

            assert!((magnitude(&sections, 500.0) - HALF_POWER).abs() < 1e-6);
            assert!((magnitude(&sections, 2000.0) - HALF_POWER).abs() < 1e-6);
            assert!(magnitude(&sections, 0.0) < 1e-9);
            assert!(magnitude(&sections, FS as f64 / 2.0) < 1e-9);
        }
    }

    #[test]
    fn test_design_is_reproducible() {
        let spec = FilterSpec::bandpass(300.0, 3400.0, 5);
        let a = design_butterworth(&spec, FS).unwrap();
        let b = design_butterworth(&spec, FS).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_second_order_lowpass_coefficients() {
        // fc = fs/4 gives the textbook result b = [1, 2, 1] * 0.2929, a = [1, 0, 0.1716]
        let sections = design_butterworth(&FilterSpec::lowpass(2000.0, 2), 8000).unwrap();
        assert_eq!(sections.len(), 1);
        let s = sections[0];
        assert!((s.b[0] - 0.292_893_218_813_452_4).abs() < 1e-9);
        assert!((s.b[1] - 0.585_786_437_626_904_9).abs() < 1e-9);
        assert!((s.b[2] - 0.292_893_218_813_452_4).abs() < 1e-9);
        assert!(s.a[1].abs() < 1e-9);
        assert!((s.a[2] - 0.171_572_875_253_809_9).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_spec_rejected() {
        let err = design_butterworth(&FilterSpec::lowpass(11025.0, 4), FS).unwrap_err();
        assert!(matches!(err, ProcessingError::InvalidParameter { field: "cutoff", .. }));
    }

    #[test]
    fn test_magnitude_response_db() {
        let sections = design_butterworth(&FilterSpec::lowpass(1000.0, 4), FS).unwrap();
        let db = magnitude_response_db(&sections, &[0.0, 1000.0], FS);
        assert!(db[0].abs() < 1e-6);
        assert!((db[1] + 3.0103).abs() < 1e-3);
    }
}
