//! Decode/encode collaborator seam
//!
//! The processor never parses containers itself; it hands paths to an
//! [`AudioCodec`] chosen by file format.

use crate::error::Result;
use crate::signal::Signal;
use std::path::Path;

/// Audio as it came out of a decoder: interleaved frames at the file's rate
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    /// Interleaved samples in [-1.0, 1.0]
    pub samples: Vec<f64>,
    pub channels: u16,
    pub sample_rate: u32,
}

impl DecodedAudio {
    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels as usize
        }
    }

    /// Average all channels into one
    pub fn into_mono(self) -> Vec<f64> {
        match self.channels {
            0 => Vec::new(),
            1 => self.samples,
            channels => {
                let channels = channels as usize;
                self.samples
                    .chunks_exact(channels)
                    .map(|frame| frame.iter().sum::<f64>() / channels as f64)
                    .collect()
            }
        }
    }
}

/// A file-format collaborator able to read and write audio
pub trait AudioCodec: Send {
    /// Read a whole file
    fn decode(&self, path: &Path) -> Result<DecodedAudio>;

    /// Write a mono signal, creating or truncating `path`
    fn encode(&self, signal: &Signal, path: &Path) -> Result<()>;
}
