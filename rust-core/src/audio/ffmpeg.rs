//! Compressed formats (MP3, AAC) through an external ffmpeg process
//!
//! Audio is staged through a temporary WAV file that the [`WavCodec`] reads or
//! writes; ffmpeg only converts between that file and the compressed one. The
//! temporary directory is removed when the call returns, on success or error.

use super::codec::{AudioCodec, DecodedAudio};
use super::format::AudioFormat;
use super::wav::{WavCodec, WavEncoding};
use crate::error::{ProcessingError, Result};
use crate::signal::Signal;
use log::debug;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Clone)]
pub struct FfmpegCodec {
    binary: PathBuf,
    format: AudioFormat,
    bitrate_kbps: u32,
}

impl FfmpegCodec {
    /// Codec for `format` using the ffmpeg executable at `binary`
    pub fn new(binary: impl Into<PathBuf>, format: AudioFormat, bitrate_kbps: u32) -> Self {
        Self {
            binary: binary.into(),
            format,
            bitrate_kbps,
        }
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// ffmpeg encoder name for the target format
    fn encoder(&self) -> &'static str {
        match self.format {
            AudioFormat::Mp3 => "libmp3lame",
            AudioFormat::Aac => "aac",
            AudioFormat::Wav => "pcm_f32le",
        }
    }

    fn run<I, S>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.binary);
        command.args(["-hide_banner", "-loglevel", "error", "-y"]).args(args);
        debug!("running {:?}", command);

        let output = command
            .output()
            .map_err(|e| ProcessingError::io(&self.binary, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProcessingError::Codec {
                format: self.format,
                reason: format!("ffmpeg exited with {}: {}", output.status, stderr.trim()),
            });
        }
        Ok(())
    }

    fn staging_dir(&self) -> Result<tempfile::TempDir> {
        tempfile::Builder::new()
            .prefix("filter-workbench-")
            .tempdir()
            .map_err(|e| ProcessingError::io(std::env::temp_dir(), e))
    }
}

impl AudioCodec for FfmpegCodec {
    fn decode(&self, path: &Path) -> Result<DecodedAudio> {
        // Surface a missing source as an I/O error rather than an ffmpeg failure
        std::fs::metadata(path).map_err(|e| ProcessingError::io(path, e))?;

        let staging = self.staging_dir()?;
        let wav = staging.path().join("decoded.wav");

        self.run([
            OsStr::new("-i"),
            path.as_os_str(),
            OsStr::new("-vn"),
            OsStr::new("-c:a"),
            OsStr::new("pcm_f32le"),
            wav.as_os_str(),
        ])?;

        WavCodec::new(WavEncoding::Float32).decode(&wav)
    }

    fn encode(&self, signal: &Signal, path: &Path) -> Result<()> {
        let staging = self.staging_dir()?;
        let wav = staging.path().join("source.wav");
        WavCodec::new(WavEncoding::Float32).encode(signal, &wav)?;

        let bitrate = format!("{}k", self.bitrate_kbps);
        self.run([
            OsStr::new("-i"),
            wav.as_os_str(),
            OsStr::new("-c:a"),
            OsStr::new(self.encoder()),
            OsStr::new("-b:a"),
            OsStr::new(&bitrate),
            path.as_os_str(),
        ])
    }
}
