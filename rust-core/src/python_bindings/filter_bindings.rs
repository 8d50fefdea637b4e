//! Python bindings for filter specifications

use crate::filters::{Cutoff, FilterKind, FilterSpec};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Filter band type exposed to Python
#[pyclass(name = "FilterKind")]
#[derive(Clone, Copy)]
pub enum PyFilterKind {
    Lowpass,
    Highpass,
    Bandpass,
}

impl From<PyFilterKind> for FilterKind {
    fn from(kind: PyFilterKind) -> Self {
        match kind {
            PyFilterKind::Lowpass => FilterKind::Lowpass,
            PyFilterKind::Highpass => FilterKind::Highpass,
            PyFilterKind::Bandpass => FilterKind::Bandpass,
        }
    }
}

impl From<FilterKind> for PyFilterKind {
    fn from(kind: FilterKind) -> Self {
        match kind {
            FilterKind::Lowpass => PyFilterKind::Lowpass,
            FilterKind::Highpass => PyFilterKind::Highpass,
            FilterKind::Bandpass => PyFilterKind::Bandpass,
        }
    }
}

/// Butterworth filter request exposed to Python
#[pyclass(name = "FilterSpec")]
#[derive(Clone)]
pub struct PyFilterSpec {
    pub(crate) spec: FilterSpec,
}

#[pymethods]
impl PyFilterSpec {
    /// Create a filter specification
    ///
    /// Args:
    ///     kind: Band type
    ///     cutoff: Cutoff in Hz (lower edge for bandpass)
    ///     order: Filter order, at least 1
    ///     high: Upper edge in Hz, required for bandpass
    ///     zero_phase: Run forward and backward instead of once
    #[new]
    #[pyo3(signature = (kind, cutoff, order, high=None, zero_phase=false))]
    fn new(
        kind: PyFilterKind,
        cutoff: f64,
        order: usize,
        high: Option<f64>,
        zero_phase: bool,
    ) -> PyResult<Self> {
        let spec = match (kind, high) {
            (PyFilterKind::Lowpass, None) => FilterSpec::lowpass(cutoff, order),
            (PyFilterKind::Highpass, None) => FilterSpec::highpass(cutoff, order),
            (PyFilterKind::Bandpass, Some(high)) => FilterSpec::bandpass(cutoff, high, order),
            (PyFilterKind::Bandpass, None) => {
                return Err(PyValueError::new_err("bandpass filters need `high`"))
            }
            (_, Some(_)) => {
                return Err(PyValueError::new_err("`high` is only used by bandpass filters"))
            }
        };

        Ok(Self {
            spec: spec.with_zero_phase(zero_phase),
        })
    }

    #[staticmethod]
    #[pyo3(signature = (cutoff, order, zero_phase=false))]
    fn lowpass(cutoff: f64, order: usize, zero_phase: bool) -> Self {
        Self {
            spec: FilterSpec::lowpass(cutoff, order).with_zero_phase(zero_phase),
        }
    }

    #[staticmethod]
    #[pyo3(signature = (cutoff, order, zero_phase=false))]
    fn highpass(cutoff: f64, order: usize, zero_phase: bool) -> Self {
        Self {
            spec: FilterSpec::highpass(cutoff, order).with_zero_phase(zero_phase),
        }
    }

    #[staticmethod]
    #[pyo3(signature = (low, high, order, zero_phase=false))]
    fn bandpass(low: f64, high: f64, order: usize, zero_phase: bool) -> Self {
        Self {
            spec: FilterSpec::bandpass(low, high, order).with_zero_phase(zero_phase),
        }
    }

    #[getter]
    fn kind(&self) -> PyFilterKind {
        self.spec.kind.into()
    }

    #[getter]
    fn order(&self) -> usize {
        self.spec.order
    }

    #[getter]
    fn zero_phase(&self) -> bool {
        self.spec.zero_phase
    }

    /// Cutoff frequencies as a (low, high) tuple; single cutoffs repeat
    #[getter]
    fn cutoffs(&self) -> (f64, f64) {
        match self.spec.cutoff {
            Cutoff::Single(fc) => (fc, fc),
            Cutoff::Band { low, high } => (low, high),
        }
    }

    /// Raise ValueError if the spec cannot run at `sample_rate`
    fn validate(&self, sample_rate: u32) -> PyResult<()> {
        Ok(self.spec.validate(sample_rate)?)
    }

    fn __repr__(&self) -> String {
        format!("{:?}", self.spec)
    }
}
