//! Processor configuration

use crate::audio::wav::WavEncoding;
use crate::error::{ProcessingError, Result};
use crate::spectrum::AnalyzerConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Analysis rate used by [`ProcessorConfig::analysis_rate`]
pub const ANALYSIS_SAMPLE_RATE: u32 = 22_050;

/// Settings of a [`SignalProcessor`](crate::audio::SignalProcessor)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Rate loaded audio is resampled to; `None` (the default) keeps the
    /// file's rate so an exported WAV reloads unchanged
    pub target_sample_rate: Option<u32>,

    pub analyzer: AnalyzerConfig,

    /// Sample encoding of exported WAV files
    pub wav_encoding: WavEncoding,

    /// ffmpeg executable used for MP3 and AAC
    pub ffmpeg_binary: PathBuf,

    /// Bitrate of MP3/AAC exports
    pub ffmpeg_bitrate_kbps: u32,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            target_sample_rate: None,
            analyzer: AnalyzerConfig::default(),
            wav_encoding: WavEncoding::Float32,
            ffmpeg_binary: PathBuf::from("ffmpeg"),
            ffmpeg_bitrate_kbps: 192,
        }
    }
}

impl ProcessorConfig {
    /// Resample every loaded file to [`ANALYSIS_SAMPLE_RATE`]
    pub fn analysis_rate() -> Self {
        Self {
            target_sample_rate: Some(ANALYSIS_SAMPLE_RATE),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_sample_rate == Some(0) {
            return Err(ProcessingError::invalid(
                "target_sample_rate",
                "target sample rate must be greater than zero",
            ));
        }
        if self.ffmpeg_bitrate_kbps == 0 {
            return Err(ProcessingError::invalid(
                "ffmpeg_bitrate_kbps",
                "bitrate must be greater than zero",
            ));
        }
        if self.ffmpeg_binary.as_os_str().is_empty() {
            return Err(ProcessingError::invalid(
                "ffmpeg_binary",
                "ffmpeg executable path is empty",
            ));
        }
        Ok(())
    }
}
