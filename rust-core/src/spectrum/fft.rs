//! FFT engine for whole-signal magnitude spectra
//!
//! Real input goes through realfft for the one-sided spectrum; the two-sided
//! spectrum uses a full complex rustfft transform. Both planners cache plans
//! by length, so repeated transforms of equal-length signals are cheap.

use crate::error::Result;
use num_complex::Complex;
use realfft::RealFftPlanner;
use rustfft::FftPlanner;

/// FFT engine for real-valued signals of any length
pub struct FftEngine {
    real_planner: RealFftPlanner<f64>,
    complex_planner: FftPlanner<f64>,
}

impl Default for FftEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FftEngine {
    pub fn new() -> Self {
        Self {
            real_planner: RealFftPlanner::new(),
            complex_planner: FftPlanner::new(),
        }
    }

    /// Magnitude |X[k]| for k = 0..=n/2
    ///
    /// Returns an empty vector for empty input.
    pub fn magnitude_one_sided(&mut self, signal: &[f64]) -> Result<Vec<f64>> {
        if signal.is_empty() {
            return Ok(Vec::new());
        }

        let r2c = self.real_planner.plan_fft_forward(signal.len());
        let mut input = signal.to_vec();
        let mut output = r2c.make_output_vec();
        r2c.process(&mut input, &mut output)?;

        Ok(output.iter().map(|c| c.norm()).collect())
    }

    /// Magnitude |X[k]| for all k = 0..n, in FFT order
    pub fn magnitude_two_sided(&mut self, signal: &[f64]) -> Result<Vec<f64>> {
        if signal.is_empty() {
            return Ok(Vec::new());
        }

        let fft = self.complex_planner.plan_fft_forward(signal.len());
        let mut buffer: Vec<Complex<f64>> =
            signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
        fft.process(&mut buffer);

        Ok(buffer.iter().map(|c| c.norm()).collect())
    }
}
