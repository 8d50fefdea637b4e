//! Whole-signal spectrum analyzer
//!
//! Combines the FFT engine with optional windowing to turn a [`Signal`] into a
//! [`SpectralView`].

use super::fft::FftEngine;
use super::windowing::{apply_window, window_correction_factor, WindowType};
use crate::error::{ProcessingError, Result};
use crate::signal::{Signal, SpectralView};
use log::debug;
use serde::{Deserialize, Serialize};

/// Which half of the spectrum a view carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sides {
    /// Bins 0..=n/2 (real-input convention)
    #[default]
    OneSided,

    /// All n bins, negative frequencies above n/2
    TwoSided,
}

/// Spectrum analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Window applied before the transform (rectangular = none)
    pub window: WindowType,

    pub sides: Sides,

    /// Apply amplitude correction for windowing
    pub apply_correction: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            window: WindowType::Rectangular,
            sides: Sides::OneSided,
            apply_correction: false,
        }
    }
}

pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    fft_engine: FftEngine,
}

impl SpectrumAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            fft_engine: FftEngine::new(),
        }
    }

    /// Magnitude spectrum of the whole signal
    ///
    /// Deterministic: the same signal always yields the same view.
    pub fn analyze(&mut self, signal: &Signal) -> Result<SpectralView> {
        if signal.is_empty() {
            return Err(ProcessingError::EmptySignal);
        }

        let windowed;
        let samples = if self.config.window == WindowType::Rectangular {
            signal.samples()
        } else {
            windowed = apply_window(signal.samples(), self.config.window);
            &windowed
        };

        let mut magnitudes = match self.config.sides {
            Sides::OneSided => self.fft_engine.magnitude_one_sided(samples)?,
            Sides::TwoSided => self.fft_engine.magnitude_two_sided(samples)?,
        };

        if self.config.apply_correction {
            let factor = window_correction_factor(self.config.window, signal.len());
            for m in magnitudes.iter_mut() {
                *m *= factor;
            }
        }

        debug!(
            "spectrum of {} samples: {} bins ({:?}, {:?} window)",
            signal.len(),
            magnitudes.len(),
            self.config.sides,
            self.config.window
        );

        Ok(SpectralView::new(
            magnitudes,
            signal.sample_rate(),
            signal.len(),
            self.config.sides,
        ))
    }

    /// Update configuration
    pub fn update_config(&mut self, config: AnalyzerConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}
