//! Supported audio container formats and export file naming

use crate::error::{ProcessingError, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Wav,
    Aac,
    Mp3,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 3] = [AudioFormat::Wav, AudioFormat::Aac, AudioFormat::Mp3];

    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Aac => "aac",
            AudioFormat::Mp3 => "mp3",
        }
    }

    /// Whether decoding and re-encoding preserves samples exactly
    pub fn is_lossless(&self) -> bool {
        matches!(self, AudioFormat::Wav)
    }

    /// Parse an extension such as `wav`, `.MP3` or `aac`
    pub fn from_extension(extension: &str) -> Result<Self> {
        let ext = extension.trim().trim_start_matches('.').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == ext)
            .ok_or_else(|| ProcessingError::UnsupportedFormat(format!("`{extension}`")))
    }

    /// Format implied by a file's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ProcessingError::UnsupportedFormat(format!(
                    "{} has no recognizable extension",
                    path.display()
                ))
            })?;
        Self::from_extension(extension)
    }

    /// Destination for an export: `base` plus this format's extension
    ///
    /// The extension is appended, not substituted, unless `base` already ends
    /// with it (`take.wav` stays `take.wav`, `take` becomes `take.wav`).
    pub fn export_path(&self, base: &Path) -> PathBuf {
        let already_named = base
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(self.extension()));
        if already_named {
            return base.to_path_buf();
        }

        let mut name = OsString::from(base.as_os_str());
        name.push(".");
        name.push(self.extension());
        PathBuf::from(name)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

impl FromStr for AudioFormat {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s)
    }
}
