//! Signal containers passed between the pipeline stages
//!
//! A [`Signal`] is replaced wholesale, never mutated in place. Derived data
//! ([`FilteredSignal`], [`SpectralView`]) carries the sample rate of its source.

use crate::error::{ProcessingError, Result};
use crate::filters::FilterSpec;
use crate::spectrum::Sides;
use std::f64::consts::PI;
use std::ops::Deref;

/// Mono audio samples plus their sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl Signal {
    /// Create a signal, rejecting a zero sample rate
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(ProcessingError::invalid(
                "sample_rate",
                "sample rate must be greater than zero",
            ));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Sine tone of `num_samples` samples
    ///
    /// # Arguments
    /// * `frequency_hz` - Tone frequency
    /// * `amplitude` - Peak amplitude
    /// * `sample_rate` - Sample rate in Hz
    /// * `num_samples` - Output length
    pub fn tone(
        frequency_hz: f64,
        amplitude: f64,
        sample_rate: u32,
        num_samples: usize,
    ) -> Result<Self> {
        let fs = sample_rate as f64;
        let samples = (0..num_samples)
            .map(|n| amplitude * (2.0 * PI * frequency_hz * n as f64 / fs).sin())
            .collect();
        Self::new(samples, sample_rate)
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Nyquist frequency in Hz
    pub fn nyquist(&self) -> f64 {
        self.sample_rate as f64 / 2.0
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

/// Output of a filter run, remembering the spec that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredSignal {
    signal: Signal,
    spec: FilterSpec,
}

impl FilteredSignal {
    pub(crate) fn new(signal: Signal, spec: FilterSpec) -> Self {
        Self { signal, spec }
    }

    pub fn signal(&self) -> &Signal {
        &self.signal
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn into_signal(self) -> Signal {
        self.signal
    }
}

impl Deref for FilteredSignal {
    type Target = Signal;

    fn deref(&self) -> &Signal {
        &self.signal
    }
}

/// Magnitude spectrum |X[k]| of a signal
///
/// One-sided views hold `n / 2 + 1` bins (DC to Nyquist). Two-sided views hold
/// all `n` bins in FFT order, so bins above `n / 2` are negative frequencies.
/// Magnitudes are raw and unnormalised.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralView {
    magnitudes: Vec<f64>,
    sample_rate: u32,
    fft_len: usize,
    sides: Sides,
}

impl SpectralView {
    pub(crate) fn new(magnitudes: Vec<f64>, sample_rate: u32, fft_len: usize, sides: Sides) -> Self {
        Self {
            magnitudes,
            sample_rate,
            fft_len,
            sides,
        }
    }

    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of time-domain samples the transform was computed over
    pub fn fft_len(&self) -> usize {
        self.fft_len
    }

    pub fn sides(&self) -> Sides {
        self.sides
    }

    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Frequency resolution (sample_rate / fft_len)
    pub fn bin_width_hz(&self) -> f64 {
        self.sample_rate as f64 / self.fft_len as f64
    }

    /// Frequency of each bin in Hz (negative above n/2 for two-sided views)
    pub fn frequencies_hz(&self) -> Vec<f64> {
        let width = self.bin_width_hz();
        let n = self.fft_len;
        (0..self.magnitudes.len())
            .map(|k| {
                if k <= n / 2 {
                    k as f64 * width
                } else {
                    (k as f64 - n as f64) * width
                }
            })
            .collect()
    }

    /// Bin nearest to a non-negative frequency, clamped to Nyquist
    pub fn bin_for_frequency(&self, frequency_hz: f64) -> usize {
        let bin = (frequency_hz.max(0.0) / self.bin_width_hz()).round() as usize;
        bin.min(self.fft_len / 2)
    }

    /// Magnitude at the bin nearest to `frequency_hz`
    pub fn magnitude_at(&self, frequency_hz: f64) -> f64 {
        self.magnitudes[self.bin_for_frequency(frequency_hz)]
    }

    /// Strongest non-negative frequency bin
    pub fn peak_bin(&self) -> Option<usize> {
        let positive = &self.magnitudes[..self.magnitudes.len().min(self.fft_len / 2 + 1)];
        positive
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(k, _)| k)
    }

    /// Frequency of [`peak_bin`](Self::peak_bin) in Hz
    pub fn peak_frequency_hz(&self) -> Option<f64> {
        self.peak_bin().map(|k| k as f64 * self.bin_width_hz())
    }

    /// Magnitudes in dB: 20*log10(|X[k]| / reference)
    pub fn to_db(&self, reference: f64) -> Vec<f64> {
        self.magnitudes
            .iter()
            .map(|&mag| {
                let mag_clamped = mag.max(1e-10);
                20.0 * (mag_clamped / reference).log10()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sample_rate_rejected() {
        let err = Signal::new(vec![0.0; 4], 0).unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::InvalidParameter { field: "sample_rate", .. }
        ));
    }

    #[test]
    fn test_tone_properties() {
        let tone = Signal::tone(1000.0, 0.5, 22050, 22050).unwrap();
        assert_eq!(tone.len(), 22050);
        assert!((tone.duration_secs() - 1.0).abs() < 1e-12);
        assert_eq!(tone.nyquist(), 11025.0);

        let peak = tone.samples().iter().fold(0.0_f64, |acc, &s| acc.max(s.abs()));
        assert!(peak <= 0.5 + 1e-12 && peak > 0.49);
    }

    #[test]
    fn test_one_sided_frequency_axis() {
        let view = SpectralView::new(vec![0.0; 5], 8000, 8, Sides::OneSided);
        assert_eq!(view.bin_width_hz(), 1000.0);
        assert_eq!(view.frequencies_hz(), vec![0.0, 1000.0, 2000.0, 3000.0, 4000.0]);
        assert_eq!(view.bin_for_frequency(2400.0), 2);
        assert_eq!(view.bin_for_frequency(10_000.0), 4);
    }

    #[test]
    fn test_two_sided_frequency_axis() {
        let view = SpectralView::new(vec![0.0; 4], 4000, 4, Sides::TwoSided);
        assert_eq!(view.frequencies_hz(), vec![0.0, 1000.0, 2000.0, -1000.0]);
    }

    #[test]
    fn test_peak_ignores_negative_frequencies() {
        let view = SpectralView::new(vec![1.0, 5.0, 2.0, 9.0], 4000, 4, Sides::TwoSided);
        assert_eq!(view.peak_bin(), Some(1));
        assert_eq!(view.peak_frequency_hz(), Some(1000.0));
    }

    #[test]
    fn test_to_db() {
        let view = SpectralView::new(vec![1.0, 10.0, 0.0], 100, 4, Sides::OneSided);
        let db = view.to_db(1.0);
        assert!(db[0].abs() < 1e-12);
        assert!((db[1] - 20.0).abs() < 1e-12);
        assert!((db[2] + 200.0).abs() < 1e-9);
    }
}
