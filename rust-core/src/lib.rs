//! Filter Workbench - offline audio filtering and spectral analysis
//!
//! Loads audio files, runs Butterworth filters over them (causal or
//! zero-phase) and computes magnitude spectra, with optional Python bindings.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod audio;
pub mod config;
pub mod error;
pub mod filters;
pub mod signal;
pub mod spectrum;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use audio::{AudioFormat, SessionSpectra, SignalProcessor};
pub use config::ProcessorConfig;
pub use error::{ProcessingError, Result};
pub use filters::{filter_signal, Cutoff, FilterKind, FilterSpec, IirFilter};
pub use signal::{FilteredSignal, Signal, SpectralView};
pub use spectrum::{Sides, SpectrumAnalyzer, WindowType};
