//! Python bindings for the processing session

use super::filter_bindings::PyFilterSpec;
use super::spectrum_bindings::{PySpectralView, PyWindowType};
use crate::audio::{AudioFormat, SignalProcessor};
use crate::config::ProcessorConfig;
use crate::signal::Signal;
use crate::spectrum::{AnalyzerConfig, Sides};
use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;
use std::path::PathBuf;

/// Signal processing session exposed to Python
///
/// Holds the loaded signal and the last filter result between calls.
#[pyclass(name = "SignalProcessor", unsendable)]
pub struct PySignalProcessor {
    processor: SignalProcessor,
}

fn to_signal(samples: PyReadonlyArray1<f64>, sample_rate: u32) -> PyResult<Signal> {
    Ok(Signal::new(samples.as_array().to_vec(), sample_rate)?)
}

fn path_string(path: PathBuf) -> String {
    path.to_string_lossy().into_owned()
}

#[pymethods]
impl PySignalProcessor {
    /// Create a new processor
    ///
    /// Args:
    ///     target_sample_rate: Rate loaded files are resampled to (None keeps the file's rate)
    ///     two_sided: Return all n FFT bins instead of n/2 + 1
    ///     window_type: Window applied before the FFT
    ///     ffmpeg_binary: ffmpeg executable used for MP3 and AAC
    #[new]
    #[pyo3(signature = (
        target_sample_rate=None,
        two_sided=false,
        window_type=PyWindowType::Rectangular,
        ffmpeg_binary=String::from("ffmpeg")
    ))]
    fn new(
        target_sample_rate: Option<u32>,
        two_sided: bool,
        window_type: PyWindowType,
        ffmpeg_binary: String,
    ) -> PyResult<Self> {
        let config = ProcessorConfig {
            target_sample_rate,
            analyzer: AnalyzerConfig {
                window: window_type.into(),
                sides: if two_sided { Sides::TwoSided } else { Sides::OneSided },
                ..AnalyzerConfig::default()
            },
            ffmpeg_binary: PathBuf::from(ffmpeg_binary),
            ..ProcessorConfig::default()
        };

        Ok(Self {
            processor: SignalProcessor::new(config)?,
        })
    }

    /// Load an audio file
    ///
    /// Returns:
    ///     Tuple of (samples, sample_rate)
    fn load_signal<'py>(&mut self, py: Python<'py>, path: PathBuf) -> PyResult<(&'py PyArray1<f64>, u32)> {
        let signal = self.processor.load_signal(path)?;
        Ok((PyArray1::from_slice(py, signal.samples()), signal.sample_rate()))
    }

    /// Replace the current signal with in-memory samples
    fn set_signal(&mut self, samples: PyReadonlyArray1<f64>, sample_rate: u32) -> PyResult<()> {
        let signal = to_signal(samples, sample_rate)?;
        self.processor.set_signal(signal);
        Ok(())
    }

    /// Filter arbitrary samples and cache the result
    fn apply_filter<'py>(
        &mut self,
        py: Python<'py>,
        samples: PyReadonlyArray1<f64>,
        sample_rate: u32,
        spec: PyFilterSpec,
    ) -> PyResult<&'py PyArray1<f64>> {
        let signal = to_signal(samples, sample_rate)?;
        let filtered = self.processor.apply_filter(&signal, &spec.spec)?;
        Ok(PyArray1::from_slice(py, filtered.samples()))
    }

    /// Filter the loaded signal
    fn filter_loaded<'py>(&mut self, py: Python<'py>, spec: PyFilterSpec) -> PyResult<&'py PyArray1<f64>> {
        let filtered = self.processor.filter_loaded(&spec.spec)?;
        Ok(PyArray1::from_slice(py, filtered.samples()))
    }

    /// Load a file and filter it
    fn load_and_filter<'py>(
        &mut self,
        py: Python<'py>,
        path: PathBuf,
        spec: PyFilterSpec,
    ) -> PyResult<&'py PyArray1<f64>> {
        let filtered = self.processor.load_and_filter(path, &spec.spec)?;
        Ok(PyArray1::from_slice(py, filtered.samples()))
    }

    /// Magnitude spectrum of arbitrary samples
    fn transform(&mut self, samples: PyReadonlyArray1<f64>, sample_rate: u32) -> PyResult<PySpectralView> {
        let signal = to_signal(samples, sample_rate)?;
        Ok(self.processor.transform(&signal)?.into())
    }

    fn transform_loaded(&mut self) -> PyResult<PySpectralView> {
        Ok(self.processor.transform_loaded()?.into())
    }

    fn transform_filtered(&mut self) -> PyResult<PySpectralView> {
        Ok(self.processor.transform_filtered()?.into())
    }

    /// Spectra of the loaded and filtered signals
    ///
    /// Returns:
    ///     Tuple of (original, filtered) SpectralView
    fn spectra(&mut self) -> PyResult<(PySpectralView, PySpectralView)> {
        let spectra = self.processor.spectra()?;
        Ok((spectra.original.into(), spectra.filtered.into()))
    }

    /// Write samples to `base` plus the format's extension
    ///
    /// Args:
    ///     format: One of "wav", "mp3", "aac"
    ///
    /// Returns:
    ///     Path of the written file
    fn export_signal(
        &self,
        samples: PyReadonlyArray1<f64>,
        sample_rate: u32,
        base: PathBuf,
        format: &str,
    ) -> PyResult<String> {
        let format: AudioFormat = format.parse()?;
        let signal = to_signal(samples, sample_rate)?;
        Ok(path_string(self.processor.export_signal(&signal, base, format)?))
    }

    /// Write the last filter result
    fn export_filtered(&self, base: PathBuf, format: &str) -> PyResult<String> {
        let format: AudioFormat = format.parse()?;
        Ok(path_string(self.processor.export_filtered(base, format)?))
    }

    /// Sample rate of the loaded signal, if any
    #[getter]
    fn sample_rate(&self) -> Option<u32> {
        self.processor.signal().map(Signal::sample_rate)
    }
}
