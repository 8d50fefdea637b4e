//! PyO3 bindings for a Python front end

use crate::error::ProcessingError;
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

mod filter_bindings;
mod processor_bindings;
mod spectrum_bindings;

impl From<ProcessingError> for PyErr {
    fn from(err: ProcessingError) -> Self {
        let message = err.to_string();
        match err {
            ProcessingError::InvalidParameter { .. } | ProcessingError::UnsupportedFormat(_) => {
                PyValueError::new_err(message)
            }
            ProcessingError::Io { .. } => PyIOError::new_err(message),
            _ => PyRuntimeError::new_err(message),
        }
    }
}

/// Python module definition
#[pymodule]
fn filter_workbench(_py: Python, m: &PyModule) -> PyResult<()> {
    // A host application may already have installed a logger
    let _ = env_logger::try_init();

    m.add_class::<filter_bindings::PyFilterKind>()?;
    m.add_class::<filter_bindings::PyFilterSpec>()?;
    m.add_class::<spectrum_bindings::PyWindowType>()?;
    m.add_class::<spectrum_bindings::PySpectralView>()?;
    m.add_class::<processor_bindings::PySignalProcessor>()?;

    Ok(())
}
