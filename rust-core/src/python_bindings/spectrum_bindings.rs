//! Python bindings for spectral views

use crate::signal::SpectralView;
use crate::spectrum::WindowType;
use numpy::PyArray1;
use pyo3::prelude::*;

/// Window type enum exposed to Python
#[pyclass(name = "WindowType")]
#[derive(Clone)]
pub enum PyWindowType {
    Rectangular,
    Hann,
    Hamming,
    Blackman,
}

impl From<PyWindowType> for WindowType {
    fn from(py_win: PyWindowType) -> Self {
        match py_win {
            PyWindowType::Rectangular => WindowType::Rectangular,
            PyWindowType::Hann => WindowType::Hann,
            PyWindowType::Hamming => WindowType::Hamming,
            PyWindowType::Blackman => WindowType::Blackman,
        }
    }
}

/// Magnitude spectrum exposed to Python
#[pyclass(name = "SpectralView")]
pub struct PySpectralView {
    view: SpectralView,
}

impl From<SpectralView> for PySpectralView {
    fn from(view: SpectralView) -> Self {
        Self { view }
    }
}

#[pymethods]
impl PySpectralView {
    /// Raw magnitudes |X[k]|
    #[getter]
    fn magnitudes<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.view.magnitudes())
    }

    /// Frequency of every bin in Hz
    #[getter]
    fn frequencies<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, self.view.frequencies_hz())
    }

    #[getter]
    fn sample_rate(&self) -> u32 {
        self.view.sample_rate()
    }

    #[getter]
    fn bin_width_hz(&self) -> f64 {
        self.view.bin_width_hz()
    }

    #[getter]
    fn two_sided(&self) -> bool {
        self.view.sides() == crate::spectrum::Sides::TwoSided
    }

    fn peak_frequency_hz(&self) -> Option<f64> {
        self.view.peak_frequency_hz()
    }

    fn magnitude_at(&self, frequency_hz: f64) -> f64 {
        self.view.magnitude_at(frequency_hz)
    }

    /// Magnitudes in dB relative to `reference`
    #[pyo3(signature = (reference=1.0))]
    fn to_db<'py>(&self, py: Python<'py>, reference: f64) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, self.view.to_db(reference))
    }

    fn __len__(&self) -> usize {
        self.view.len()
    }
}
