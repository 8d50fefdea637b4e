//! Optional analysis windows
//!
//! The pipeline's default is [`WindowType::Rectangular`], i.e. the raw,
//! unwindowed transform. Tapered windows trade resolution for less leakage.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// Rectangular window (no windowing)
    #[default]
    Rectangular,

    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(M-1))
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(M-1)) + 0.08*cos(4πn/(M-1))
    Blackman,
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (M)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    if length <= 1 || window_type == WindowType::Rectangular {
        return vec![1.0; length];
    }

    let m = length as f64;
    (0..length)
        .map(|n| {
            let angle = 2.0 * PI * n as f64 / (m - 1.0);
            match window_type {
                WindowType::Hann => 0.5 - 0.5 * angle.cos(),
                WindowType::Hamming => 0.54 - 0.46 * angle.cos(),
                WindowType::Blackman => 0.42 - 0.5 * angle.cos() + 0.08 * (2.0 * angle).cos(),
                WindowType::Rectangular => 1.0,
            }
        })
        .collect()
}

/// Apply window to signal
pub fn apply_window(signal: &[f64], window_type: WindowType) -> Vec<f64> {
    let window = generate_window(window_type, signal.len());

    signal
        .iter()
        .zip(window.iter())
        .map(|(&s, &w)| s * w)
        .collect()
}

/// Amplitude correction factor for a window
///
/// Windowing reduces the amplitude of a tone's spectral peak; multiplying the
/// magnitude by this factor restores it.
pub fn window_correction_factor(window_type: WindowType, length: usize) -> f64 {
    let window = generate_window(window_type, length);
    let sum: f64 = window.iter().sum();
    if sum == 0.0 {
        1.0
    } else {
        length as f64 / sum
    }
}
