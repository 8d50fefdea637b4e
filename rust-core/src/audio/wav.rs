//! WAV codec backed by hound

use super::codec::{AudioCodec, DecodedAudio};
use super::format::AudioFormat;
use crate::error::{ProcessingError, Result};
use crate::signal::Signal;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sample encoding used when writing WAV files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WavEncoding {
    /// 32-bit IEEE float, no clipping
    #[default]
    Float32,

    /// 16-bit PCM, samples clipped to [-1, 1]
    Int16,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WavCodec {
    encoding: WavEncoding,
}

impl WavCodec {
    pub fn new(encoding: WavEncoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> WavEncoding {
        self.encoding
    }
}

/// Map a hound error onto the crate's error kinds
fn map_hound_error(path: &Path, err: hound::Error) -> ProcessingError {
    match err {
        hound::Error::IoError(source) => ProcessingError::io(path, source),
        hound::Error::FormatError(reason) => {
            ProcessingError::UnsupportedFormat(format!("{}: {reason}", path.display()))
        }
        hound::Error::Unsupported => ProcessingError::UnsupportedFormat(format!(
            "{}: WAV feature not supported",
            path.display()
        )),
        other => ProcessingError::Codec {
            format: AudioFormat::Wav,
            reason: other.to_string(),
        },
    }
}

impl AudioCodec for WavCodec {
    fn decode(&self, path: &Path) -> Result<DecodedAudio> {
        let mut reader = WavReader::open(path).map_err(|e| map_hound_error(path, e))?;
        let spec = reader.spec();

        let samples = match spec.sample_format {
            SampleFormat::Float => reader
                .samples::<f32>()
                .map(|s| s.map(f64::from))
                .collect::<std::result::Result<Vec<f64>, _>>(),
            SampleFormat::Int => {
                let full_scale = (1_i64 << (spec.bits_per_sample - 1)) as f64;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f64 / full_scale))
                    .collect::<std::result::Result<Vec<f64>, _>>()
            }
        }
        .map_err(|e| map_hound_error(path, e))?;

        info!(
            "decoded {}: {} Hz, {} channel(s), {} bits {:?}",
            path.display(),
            spec.sample_rate,
            spec.channels,
            spec.bits_per_sample,
            spec.sample_format
        );

        Ok(DecodedAudio {
            samples,
            channels: spec.channels,
            sample_rate: spec.sample_rate,
        })
    }

    fn encode(&self, signal: &Signal, path: &Path) -> Result<()> {
        let spec = match self.encoding {
            WavEncoding::Float32 => WavSpec {
                channels: 1,
                sample_rate: signal.sample_rate(),
                bits_per_sample: 32,
                sample_format: SampleFormat::Float,
            },
            WavEncoding::Int16 => WavSpec {
                channels: 1,
                sample_rate: signal.sample_rate(),
                bits_per_sample: 16,
                sample_format: SampleFormat::Int,
            },
        };

        let mut writer = WavWriter::create(path, spec).map_err(|e| map_hound_error(path, e))?;
        for &sample in signal.samples() {
            let written = match self.encoding {
                WavEncoding::Float32 => writer.write_sample(sample as f32),
                WavEncoding::Int16 => {
                    writer.write_sample((sample.clamp(-1.0, 1.0) * i16::MAX as f64).round() as i16)
                }
            };
            written.map_err(|e| map_hound_error(path, e))?;
        }
        writer.finalize().map_err(|e| map_hound_error(path, e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let tone = Signal::tone(440.0, 0.8, 22050, 2205).unwrap();

        let codec = WavCodec::default();
        codec.encode(&tone, &path).unwrap();
        let decoded = codec.decode(&path).unwrap();

        assert_eq!(decoded.channels, 1);
        assert_eq!(decoded.sample_rate, 22050);
        assert_eq!(decoded.samples.len(), tone.len());
        for (a, b) in decoded.samples.iter().zip(tone.samples()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_int16_round_trip_and_clipping() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pcm.wav");
        let signal = Signal::new(vec![0.0, 0.5, -0.5, 1.5, -2.0], 8000).unwrap();

        let codec = WavCodec::new(WavEncoding::Int16);
        codec.encode(&signal, &path).unwrap();
        let decoded = codec.decode(&path).unwrap();

        let expected = [0.0, 0.5, -0.5, 1.0, -1.0];
        for (a, b) in decoded.samples.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-4, "{a} vs {b}");
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = WavCodec::default()
            .decode(Path::new("/definitely/not/here.wav"))
            .unwrap_err();
        assert!(matches!(err, ProcessingError::Io { .. }));
    }

    #[test]
    fn test_garbage_file_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noise.wav");
        std::fs::write(&path, b"this is not a riff file at all").unwrap();

        let err = WavCodec::default().decode(&path).unwrap_err();
        assert!(matches!(err, ProcessingError::UnsupportedFormat(_)));
    }
}
