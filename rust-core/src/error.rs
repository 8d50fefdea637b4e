//! Error type shared by every stage of the pipeline

use crate::audio::AudioFormat;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("signal is empty")]
    EmptySignal,

    #[error("precondition not met: {0}")]
    PreconditionNotMet(&'static str),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("{format} codec failed: {reason}")]
    Codec { format: AudioFormat, reason: String },

    #[error("resampling failed: {0}")]
    Resample(String),

    #[error("FFT failed: {0}")]
    Fft(#[from] realfft::FftError),
}

impl ProcessingError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProcessingError>;
