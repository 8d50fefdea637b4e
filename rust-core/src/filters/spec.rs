//! Filter parameters supplied by the caller

use crate::error::{ProcessingError, Result};
use serde::{Deserialize, Serialize};

/// Band type of the designed filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Lowpass,
    Highpass,
    Bandpass,
}

/// Cutoff frequency or frequencies in Hz
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cutoff {
    /// Corner frequency of a lowpass or highpass filter
    Single(f64),

    /// Independent lower and upper edges of a bandpass filter
    Band { low: f64, high: f64 },
}

/// Complete description of a Butterworth filter run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub kind: FilterKind,
    pub cutoff: Cutoff,

    /// Prototype order (bandpass designs end up with twice as many poles)
    pub order: usize,

    /// Run forward and backward (no phase shift, squared magnitude response)
    #[serde(default)]
    pub zero_phase: bool,
}

impl FilterSpec {
    pub fn lowpass(cutoff_hz: f64, order: usize) -> Self {
        Self {
            kind: FilterKind::Lowpass,
            cutoff: Cutoff::Single(cutoff_hz),
            order,
            zero_phase: false,
        }
    }

    pub fn highpass(cutoff_hz: f64, order: usize) -> Self {
        Self {
            kind: FilterKind::Highpass,
            cutoff: Cutoff::Single(cutoff_hz),
            order,
            zero_phase: false,
        }
    }

    pub fn bandpass(low_hz: f64, high_hz: f64, order: usize) -> Self {
        Self {
            kind: FilterKind::Bandpass,
            cutoff: Cutoff::Band {
                low: low_hz,
                high: high_hz,
            },
            order,
            zero_phase: false,
        }
    }

    /// Select forward-only (`false`) or forward-backward (`true`) filtering
    pub fn with_zero_phase(mut self, zero_phase: bool) -> Self {
        self.zero_phase = zero_phase;
        self
    }

    /// Check the spec against a sample rate
    ///
    /// Every cutoff must lie strictly inside (0, sample_rate / 2), the order
    /// must be at least 1, and a bandpass needs `low < high`.
    pub fn validate(&self, sample_rate: u32) -> Result<()> {
        if sample_rate == 0 {
            return Err(ProcessingError::invalid(
                "sample_rate",
                "sample rate must be greater than zero",
            ));
        }
        if self.order < 1 {
            return Err(ProcessingError::invalid("order", "order must be at least 1"));
        }

        let nyquist = sample_rate as f64 / 2.0;
        match (self.kind, self.cutoff) {
            (FilterKind::Lowpass | FilterKind::Highpass, Cutoff::Single(fc)) => {
                check_inside_nyquist("cutoff", fc, nyquist)
            }
            (FilterKind::Bandpass, Cutoff::Band { low, high }) => {
                check_inside_nyquist("cutoff.low", low, nyquist)?;
                check_inside_nyquist("cutoff.high", high, nyquist)?;
                if low >= high {
                    return Err(ProcessingError::invalid(
                        "cutoff",
                        format!("bandpass low edge {low} Hz must be below high edge {high} Hz"),
                    ));
                }
                Ok(())
            }
            (FilterKind::Bandpass, Cutoff::Single(_)) => Err(ProcessingError::invalid(
                "cutoff",
                "bandpass filters need a low and a high edge",
            )),
            (_, Cutoff::Band { .. }) => Err(ProcessingError::invalid(
                "cutoff",
                "lowpass and highpass filters take a single cutoff",
            )),
        }
    }
}

fn check_inside_nyquist(field: &'static str, frequency: f64, nyquist: f64) -> Result<()> {
    if !frequency.is_finite() || frequency <= 0.0 || frequency >= nyquist {
        return Err(ProcessingError::invalid(
            field,
            format!("{frequency} Hz must lie strictly between 0 and Nyquist ({nyquist} Hz)"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_field(result: Result<()>) -> &'static str {
        match result {
            Err(ProcessingError::InvalidParameter { field, .. }) => field,
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_specs() {
        assert!(FilterSpec::lowpass(200.0, 4).validate(22050).is_ok());
        assert!(FilterSpec::highpass(11_000.0, 10).validate(22050).is_ok());
        assert!(FilterSpec::bandpass(300.0, 3400.0, 2).validate(8000).is_ok());
    }

    #[test]
    fn test_cutoff_bounds() {
        assert_eq!(invalid_field(FilterSpec::lowpass(0.0, 4).validate(22050)), "cutoff");
        assert_eq!(invalid_field(FilterSpec::lowpass(-5.0, 4).validate(22050)), "cutoff");
        assert_eq!(invalid_field(FilterSpec::highpass(11025.0, 4).validate(22050)), "cutoff");
        assert_eq!(invalid_field(FilterSpec::lowpass(f64::NAN, 4).validate(22050)), "cutoff");
    }

    #[test]
    fn test_bandpass_edges() {
        assert_eq!(
            invalid_field(FilterSpec::bandpass(1000.0, 1000.0, 4).validate(22050)),
            "cutoff"
        );
        assert_eq!(
            invalid_field(FilterSpec::bandpass(2000.0, 1000.0, 4).validate(22050)),
            "cutoff"
        );
        assert_eq!(
            invalid_field(FilterSpec::bandpass(100.0, 12_000.0, 4).validate(22050)),
            "cutoff.high"
        );
        assert_eq!(
            invalid_field(FilterSpec::bandpass(0.0, 1000.0, 4).validate(22050)),
            "cutoff.low"
        );
    }

    #[test]
    fn test_order_must_be_positive() {
        assert_eq!(invalid_field(FilterSpec::lowpass(200.0, 0).validate(22050)), "order");
    }

    #[test]
    fn test_cutoff_shape_must_match_kind() {
        let mut spec = FilterSpec::lowpass(200.0, 2);
        spec.kind = FilterKind::Bandpass;
        assert_eq!(invalid_field(spec.validate(22050)), "cutoff");

        let mut spec = FilterSpec::bandpass(200.0, 400.0, 2);
        spec.kind = FilterKind::Highpass;
        assert_eq!(invalid_field(spec.validate(22050)), "cutoff");
    }

    #[test]
    fn test_zero_phase_builder() {
        let spec = FilterSpec::lowpass(200.0, 4).with_zero_phase(true);
        assert!(spec.zero_phase);
        assert_eq!(spec.kind, FilterKind::Lowpass);
    }
}
