//! Designed IIR filter bound to a sample rate

use super::design::{design_butterworth, frequency_response, magnitude_response_db};
use super::filtfilt::{filter_forward, filtfilt};
use super::sos::Biquad;
use super::spec::FilterSpec;
use crate::error::{ProcessingError, Result};
use crate::signal::{FilteredSignal, Signal};
use num_complex::Complex64;

/// Butterworth filter ready to run on signals of one sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct IirFilter {
    spec: FilterSpec,
    sample_rate: u32,
    sections: Vec<Biquad>,
}

impl IirFilter {
    /// Validate `spec` and design its coefficients
    pub fn design(spec: FilterSpec, sample_rate: u32) -> Result<Self> {
        let sections = design_butterworth(&spec, sample_rate)?;
        Ok(Self {
            spec,
            sample_rate,
            sections,
        })
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Second-order section coefficients
    pub fn sections(&self) -> &[Biquad] {
        &self.sections
    }

    /// Filter raw samples, causally or zero-phase per the spec
    pub fn apply(&self, samples: &[f64]) -> Vec<f64> {
        if self.spec.zero_phase {
            filtfilt(&self.sections, samples)
        } else {
            filter_forward(&self.sections, samples)
        }
    }

    /// Filter a signal recorded at this filter's sample rate
    pub fn filter(&self, signal: &Signal) -> Result<FilteredSignal> {
        if signal.sample_rate() != self.sample_rate {
            return Err(ProcessingError::invalid(
                "sample_rate",
                format!(
                    "filter designed for {} Hz cannot run on a {} Hz signal",
                    self.sample_rate,
                    signal.sample_rate()
                ),
            ));
        }
        if signal.is_empty() {
            return Err(ProcessingError::EmptySignal);
        }

        let output = Signal::new(self.apply(signal.samples()), self.sample_rate)?;
        Ok(FilteredSignal::new(output, self.spec))
    }

    /// Complex response of a single pass at the given frequencies in Hz
    pub fn frequency_response(&self, frequencies_hz: &[f64]) -> Vec<Complex64> {
        frequency_response(&self.sections, frequencies_hz, self.sample_rate)
    }

    /// Magnitude response of a single pass in dB
    pub fn magnitude_response_db(&self, frequencies_hz: &[f64]) -> Vec<f64> {
        magnitude_response_db(&self.sections, frequencies_hz, self.sample_rate)
    }
}

/// Design the filter described by `spec` and run it over `signal`
///
/// Stateless: nothing is kept between calls.
pub fn filter_signal(signal: &Signal, spec: &FilterSpec) -> Result<FilteredSignal> {
    if signal.is_empty() {
        return Err(ProcessingError::EmptySignal);
    }
    IirFilter::design(*spec, signal.sample_rate())?.filter(signal)
}
